use ahash::{AHashMap, AHashSet};
use common::{
    brush::{fan_triangulate, winding_matches, Polygon},
    plane::Plane,
};
use flagset::FlagSet;
use tmf::prelude::*;

use crate::{
    error::CompileError,
    parser::{MapBrush, MapPlane},
    texture_cache::TextureSizes,
    uv::project_uv,
};

/// Everything accumulated while compiling one map.
pub struct CompileContext<'a> {
    sizes: &'a dyn TextureSizes,
    empty_textures: AHashSet<String>,
    data: TMFData,
    texture_indices: AHashMap<String, i32>,
    plane_indices: AHashMap<[u32; 4], i32>,
}

/// Planes match when their normal and distance are bit-for-bit equal.
fn plane_key(plane: &Plane) -> [u32; 4] {
    plane.normal.extend(plane.dist()).to_array().map(f32::to_bits)
}

impl<'a> CompileContext<'a> {
    pub fn new<S: Into<String>>(
        sizes: &'a dyn TextureSizes,
        empty_textures: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            sizes,
            empty_textures: empty_textures.into_iter().map(Into::into).collect(),
            data: TMFData::default(),
            texture_indices: AHashMap::new(),
            plane_indices: AHashMap::new(),
        }
    }

    pub fn data(&self) -> &TMFData {
        &self.data
    }

    /// Index of `name` in the texture table, adding it on first use.
    pub fn texture_index(&mut self, name: &str) -> i32 {
        if let Some(index) = self.texture_indices.get(name) {
            return *index;
        }

        let index = self.data.textures.len() as i32;
        self.data.textures.push(TMFTexture::new(name));
        self.texture_indices.insert(name.to_owned(), index);
        index
    }

    /// Index of `plane` in the plane array. Exact duplicates share one record, stored with the
    /// point of the first one seen.
    pub fn plane_index(&mut self, plane: &Plane) -> i32 {
        let planes = &mut self.data.planes;
        *self.plane_indices.entry(plane_key(plane)).or_insert_with(|| {
            planes.push(TMFPlane {
                point: plane.point,
                normal: plane.normal,
            });
            planes.len() as i32 - 1
        })
    }

    /// Whether a side is only there for collision.
    pub fn is_hidden(&self, side: &MapPlane) -> bool {
        self.empty_textures.contains(&side.texture)
            || FlagSet::<Surface>::new_truncated(side.surface_flags).contains(Surface::NoDraw)
    }

    fn add_collision(&mut self, brush: &MapBrush) {
        let brush_side = self.data.brush_sides.len() as i32;

        for side in &brush.sides {
            let plane = self.plane_index(&side.plane);
            self.data.brush_sides.push(TMFBrushSide {
                plane,
                flags: side.surface_flags,
            });
        }

        let mut contents = brush.sides.first().map_or(0, |side| side.content_flags);
        if brush.sides.iter().any(|side| side.content_flags != contents) {
            log::warn!(
                "Brush at line {} has sides with different contents, using {contents:#x}",
                brush.line
            );
        }
        if contents == 0 {
            contents = Contents::Solid as i32;
        }

        self.data.brushes.push(TMFBrush {
            contents,
            brush_side,
            brush_side_count: brush.sides.len() as i32,
        });
    }

    /// Emit the collision records of a brush and a face for each visible polygon.
    ///
    /// `polygons` are the solved faces of `brush`, as returned by
    /// [`common::brush::get_vertices`]. Returns the number of faces added.
    pub fn add_brush(&mut self, brush: &MapBrush, polygons: &[Polygon]) -> Result<usize, CompileError> {
        self.add_collision(brush);

        let mut faces = 0;
        for polygon in polygons {
            let side = &brush.sides[polygon.plane];
            if self.is_hidden(side) {
                continue;
            }

            let normal = side.plane.normal;
            if !winding_matches(&side.plane, &polygon.vertices) {
                log::warn!(
                    "Face on line {} winds against its plane normal {normal}",
                    side.line
                );
            }

            let size = self
                .sizes
                .size(&side.texture)
                .ok_or_else(|| CompileError::TextureNotFound {
                    name: side.texture.clone(),
                })?;
            let texture_index = self.texture_index(&side.texture);

            let vertex_start = self.data.vertices.len();
            let mesh_vertex_start = self.data.mesh_vertices.len();

            self.data
                .vertices
                .extend(polygon.vertices.iter().map(|&position| TMFVertex {
                    position,
                    normal,
                    texcoord: project_uv(size, normal, position, &side.attributes),
                }));

            self.data.mesh_vertices.extend(
                fan_triangulate(polygon.vertices.len())
                    .flatten()
                    .map(|corner| TMFMeshVertex::new((vertex_start + corner) as i32)),
            );

            self.data.faces.push(TMFFace {
                texture_index,
                vertex_start: vertex_start as i32,
                vertex_count: polygon.vertices.len() as i32,
                mesh_vertex_start: mesh_vertex_start as u32,
                mesh_vertex_count: (self.data.mesh_vertices.len() - mesh_vertex_start) as u32,
                normal,
            });
            faces += 1;
        }

        Ok(faces)
    }

    pub fn face_count(&self) -> usize {
        self.data.faces.len()
    }

    /// Close a model over every face added since `face_start`. Returns the model index.
    pub fn add_model(&mut self, face_start: usize) -> usize {
        let index = self.data.models.len();
        self.data.models.push(TMFModel {
            face_start: face_start as i32,
            face_count: (self.face_count() - face_start) as i32,
        });
        index
    }

    pub fn finish(self, entities: String) -> TMFData {
        TMFData {
            entities,
            ..self.data
        }
    }
}
