use std::{mem, path::Path, process::ExitCode};

use tmf::prelude::*;

/// Log the fields of the first record in a chunk.
fn describe_first<T: Chunk>(file: &TMFFile) {
    let bytes = file.chunk_bytes(T::chunk_type());
    let Some(record) = bytes.get(..mem::size_of::<T>()) else {
        return;
    };

    log::debug!("first {} record:", T::chunk_type());
    for field in T::LAYOUT {
        if let Some(value) = field.format(record) {
            log::debug!("  {} = {value}", field.name);
        }
    }
}

fn readout(path: &Path) -> Result<(), TMFError> {
    let file = TMFFile::load(path)?;
    log::info!("{}: {} bytes", path.display(), file.len());

    for chunk in ChunkType::ALL {
        let entry = *file.header().get_chunk_header(chunk);
        let (start, length) = (entry.start, entry.length);
        log::info!("{chunk} start {start} length {length}");
    }

    let data = TMFData::read(&file)?;
    log::info!(
        "{} vertices, {} mesh vertices, {} faces, {} models, {} textures, {} planes, {} brush sides, {} brushes",
        data.vertices.len(),
        data.mesh_vertices.len(),
        data.faces.len(),
        data.models.len(),
        data.textures.len(),
        data.planes.len(),
        data.brush_sides.len(),
        data.brushes.len(),
    );

    describe_first::<TMFVertex>(&file);
    describe_first::<TMFMeshVertex>(&file);
    describe_first::<TMFFace>(&file);
    describe_first::<TMFModel>(&file);
    describe_first::<TMFTexture>(&file);
    describe_first::<TMFPlane>(&file);
    describe_first::<TMFBrushSide>(&file);
    describe_first::<TMFBrush>(&file);

    for texture in &data.textures {
        log::debug!("texture {}", texture.name());
    }

    for entity in file.entities()? {
        match entity.model() {
            Some(model) => log::info!(
                "{} -> {model:?}",
                entity.classname().unwrap_or("<no classname>")
            ),
            None => log::info!("{}", entity.classname().unwrap_or("<no classname>")),
        }
    }

    Ok(())
}

pub fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.iter().any(|arg| arg == "-v" || arg == "--verbose");
    mapc::init_logger(verbose);

    let Some(path) = args.iter().find(|arg| !arg.starts_with('-')) else {
        log::error!("usage: tmf_readout <file.tmb> [-v|--verbose]");
        return ExitCode::FAILURE;
    };

    match readout(Path::new(path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}
