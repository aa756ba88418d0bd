use crate::{
    chunk::Chunk,
    consts::{ChunkType, MAX_MAP_MODELS},
    layout::{Field, FieldKind::*},
};

/// A contiguous run of faces compiled from one entity's brushes.
///
/// Model 0 is the world. Entities refer to the others by a `"model" "*N"` property.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFModel {
    pub face_start: i32,
    pub face_count: i32,
}

impl Chunk for TMFModel {
    const LAYOUT: &'static [Field] = &[
        Field::new("face_start", 0, I32),
        Field::new("face_count", 4, I32),
    ];

    fn chunk_type() -> ChunkType {
        ChunkType::Models
    }
    fn max() -> usize {
        MAX_MAP_MODELS
    }
}
