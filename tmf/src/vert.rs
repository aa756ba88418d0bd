use glam::{Vec2, Vec3};

use crate::{
    chunk::Chunk,
    consts::{ChunkType, MAX_MAP_MESH_VERTS, MAX_MAP_VERTS},
    layout::{Field, FieldKind::*},
};

/// A corner of a face, with everything a renderer needs to draw it.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Texture coordinates, in units of the texture size.
    pub texcoord: Vec2,
}

impl Chunk for TMFVertex {
    const LAYOUT: &'static [Field] = &[
        Field::new("position.x", 0, F32),
        Field::new("position.y", 4, F32),
        Field::new("position.z", 8, F32),
        Field::new("normal.x", 12, F32),
        Field::new("normal.y", 16, F32),
        Field::new("normal.z", 20, F32),
        Field::new("texcoord.x", 24, F32),
        Field::new("texcoord.y", 28, F32),
    ];

    fn chunk_type() -> ChunkType {
        ChunkType::Vertices
    }
    fn max() -> usize {
        MAX_MAP_VERTS
    }
}

/// Index into the vertex array. Every three consecutive entries form one triangle.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFMeshVertex {
    pub vertex: i32,
}

impl TMFMeshVertex {
    pub fn new(vertex: i32) -> Self {
        Self { vertex }
    }
}

impl Chunk for TMFMeshVertex {
    const LAYOUT: &'static [Field] = &[Field::new("vertex", 0, I32)];

    fn chunk_type() -> ChunkType {
        ChunkType::MeshVertices
    }
    fn max() -> usize {
        MAX_MAP_MESH_VERTS
    }
}
