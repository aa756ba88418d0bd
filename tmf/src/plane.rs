use glam::Vec3;

use crate::{
    chunk::Chunk,
    consts::{ChunkType, MAX_MAP_PLANES},
    layout::{Field, FieldKind::*},
};

/// A brush plane as a point on it and its outward unit normal.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFPlane {
    pub point: Vec3,
    pub normal: Vec3,
}

impl Chunk for TMFPlane {
    const LAYOUT: &'static [Field] = &[
        Field::new("point.x", 0, F32),
        Field::new("point.y", 4, F32),
        Field::new("point.z", 8, F32),
        Field::new("normal.x", 12, F32),
        Field::new("normal.y", 16, F32),
        Field::new("normal.z", 20, F32),
    ];

    fn chunk_type() -> ChunkType {
        ChunkType::Planes
    }
    fn max() -> usize {
        MAX_MAP_PLANES
    }
}
