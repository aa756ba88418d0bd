use std::fs;

use common::brush::{get_vertices, Polygon};
use rayon::prelude::*;
use tmf::{entities::format_entities, prelude::*};

use crate::{
    assembler::CompileContext,
    config::{Config, DEFAULT_EMPTY_TEXTURE},
    error::CompileError,
    parser::{parse_map, MapBrush, MapEntity},
    texture_cache::{TextureCache, TextureSizes},
};

#[derive(Clone, Debug, PartialEq)]
pub struct CompileOptions {
    /// Sides with one of these textures are kept for collision but never drawn.
    pub empty_textures: Vec<String>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            empty_textures: vec![DEFAULT_EMPTY_TEXTURE.to_owned()],
        }
    }
}

/// Solve every brush on the rayon pool. The result is in the same order as `brushes`.
pub fn solve_brushes(brushes: &[MapBrush]) -> Vec<Vec<Polygon>> {
    brushes
        .par_iter()
        .map(|brush| get_vertices(&brush.planes()))
        .collect()
}

/// Turn parsed entities into map data. Each entity with brushes becomes a model, and its
/// brushes are replaced by a `"model" "*N"` property.
pub fn compile_entities(
    entities: Vec<MapEntity>,
    sizes: &dyn TextureSizes,
    options: &CompileOptions,
) -> Result<TMFData, CompileError> {
    let mut context = CompileContext::new(sizes, options.empty_textures.iter().cloned());
    let mut output = Vec::with_capacity(entities.len());

    for MapEntity {
        mut entity,
        brushes,
        line,
    } in entities
    {
        if !brushes.is_empty() {
            let solved = solve_brushes(&brushes);
            let face_start = context.face_count();

            for (brush, polygons) in brushes.iter().zip(&solved) {
                if polygons.is_empty() {
                    log::warn!("Brush at line {} does not enclose any space", brush.line);
                }
                context.add_brush(brush, polygons)?;
            }

            let model = context.add_model(face_start);
            log::debug!(
                "Entity at line {line} ({}) is model {model} with {} brushes and {} faces",
                entity.classname().unwrap_or("no classname"),
                brushes.len(),
                context.face_count() - face_start,
            );
            entity.set("model", format!("*{model}"));
        }

        output.push(entity);
    }

    let data = context.finish(format_entities(&output));
    log::info!(
        "{} entities, {} models, {} faces, {} vertices, {} textures, {} brushes, {} planes",
        output.len(),
        data.models.len(),
        data.faces.len(),
        data.vertices.len(),
        data.textures.len(),
        data.brushes.len(),
        data.planes.len(),
    );
    Ok(data)
}

pub fn compile_str(
    source: &str,
    sizes: &dyn TextureSizes,
    options: &CompileOptions,
) -> Result<TMFData, CompileError> {
    compile_entities(parse_map(source)?, sizes, options)
}

/// Compile `config.source` into `config.output`, returning the header that was written.
pub fn compile_file(config: &Config) -> Result<TMFHeader, CompileError> {
    log::info!("Compiling {}", config.source.display());

    let source = fs::read_to_string(&config.source).map_err(|source| CompileError::Io {
        path: config.source.clone(),
        source,
    })?;
    let textures = TextureCache::load(&config.data_dir)?;

    let data = compile_str(&source, &textures, &config.options())?;
    Ok(data.save(&config.output)?)
}
