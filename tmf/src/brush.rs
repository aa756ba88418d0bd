use flagset::FlagSet;

use crate::{
    chunk::Chunk,
    consts::{ChunkType, Contents, Surface, MAX_MAP_BRUSHES, MAX_MAP_BRUSHSIDES},
    layout::{Field, FieldKind::*},
};

/// A convex solid, kept for collision.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFBrush {
    pub contents: i32,
    /// First entry in the brush side array.
    pub brush_side: i32,
    pub brush_side_count: i32,
}

impl TMFBrush {
    pub fn contents(&self) -> FlagSet<Contents> {
        FlagSet::new_truncated(self.contents)
    }

    pub fn sides(&self) -> std::ops::Range<usize> {
        let start = self.brush_side as usize;
        start..start + self.brush_side_count as usize
    }
}

impl Chunk for TMFBrush {
    const LAYOUT: &'static [Field] = &[
        Field::new("contents", 0, I32),
        Field::new("brush_side", 4, I32),
        Field::new("brush_side_count", 8, I32),
    ];

    fn chunk_type() -> ChunkType {
        ChunkType::Brushes
    }
    fn max() -> usize {
        MAX_MAP_BRUSHES
    }
}

#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFBrushSide {
    pub plane: i32,
    pub flags: i32,
}

impl TMFBrushSide {
    pub fn surface(&self) -> FlagSet<Surface> {
        FlagSet::new_truncated(self.flags)
    }
}

impl Chunk for TMFBrushSide {
    const LAYOUT: &'static [Field] = &[Field::new("plane", 0, I32), Field::new("flags", 4, I32)];

    fn chunk_type() -> ChunkType {
        ChunkType::BrushSides
    }
    fn max() -> usize {
        MAX_MAP_BRUSHSIDES
    }
}
