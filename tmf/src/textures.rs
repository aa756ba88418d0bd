use std::borrow::Cow;

use crate::{
    chunk::Chunk,
    consts::{ChunkType, MAX_MAP_TEXTURES, TEXTURE_NAME_LENGTH},
    layout::Field,
};

/// A texture name, NUL-padded to a fixed width.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFTexture {
    pub name: [u8; TEXTURE_NAME_LENGTH],
}

impl TMFTexture {
    /// Store `name`, truncated to the field width.
    pub fn new(name: &str) -> Self {
        let mut texture = Self {
            name: [0; TEXTURE_NAME_LENGTH],
        };

        let bytes = name.as_bytes();
        if bytes.len() > TEXTURE_NAME_LENGTH {
            log::warn!("Texture name {name:?} is longer than {TEXTURE_NAME_LENGTH} bytes, truncating");
        }
        let len = bytes.len().min(TEXTURE_NAME_LENGTH);
        texture.name[..len].copy_from_slice(&bytes[..len]);

        texture
    }

    /// The name with its padding removed.
    pub fn name(&self) -> Cow<'_, str> {
        let end = self
            .name
            .iter()
            .position(|b| *b == 0)
            .unwrap_or(TEXTURE_NAME_LENGTH);
        String::from_utf8_lossy(&self.name[..end])
    }
}

impl Chunk for TMFTexture {
    const LAYOUT: &'static [Field] = &[Field::bytes("name", 0, TEXTURE_NAME_LENGTH)];

    fn chunk_type() -> ChunkType {
        ChunkType::Textures
    }
    fn max() -> usize {
        MAX_MAP_TEXTURES
    }
}
