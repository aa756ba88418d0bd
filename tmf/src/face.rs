use glam::Vec3;

use crate::{
    chunk::Chunk,
    consts::{ChunkType, MAX_MAP_FACES},
    layout::{Field, FieldKind::*},
};

/// A drawable polygon, stored as a triangle list.
///
/// The face owns `vertex_count` vertices from `vertex_start` and `mesh_vertex_count` mesh
/// vertices from `mesh_vertex_start`. A `texture_index` of -1 means untextured.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFFace {
    pub texture_index: i32,
    pub vertex_start: i32,
    pub vertex_count: i32,
    pub mesh_vertex_start: u32,
    pub mesh_vertex_count: u32,
    pub normal: Vec3,
}

impl TMFFace {
    pub fn vertices(&self) -> std::ops::Range<usize> {
        let start = self.vertex_start as usize;
        start..start + self.vertex_count as usize
    }

    pub fn mesh_vertices(&self) -> std::ops::Range<usize> {
        let start = self.mesh_vertex_start as usize;
        start..start + self.mesh_vertex_count as usize
    }
}

impl Chunk for TMFFace {
    const LAYOUT: &'static [Field] = &[
        Field::new("texture_index", 0, I32),
        Field::new("vertex_start", 4, I32),
        Field::new("vertex_count", 8, I32),
        Field::new("mesh_vertex_start", 12, U32),
        Field::new("mesh_vertex_count", 16, U32),
        Field::new("normal.x", 20, F32),
        Field::new("normal.y", 24, F32),
        Field::new("normal.z", 28, F32),
    ];

    fn chunk_type() -> ChunkType {
        ChunkType::Faces
    }
    fn max() -> usize {
        MAX_MAP_FACES
    }
}
