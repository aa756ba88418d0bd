use std::fmt;

use flagset::flags;
use num_derive::FromPrimitive;
use num_traits::FromPrimitive;

/// `TMF` followed by a backspace byte.
pub const HEADER_IDENT: [u8; 4] = *b"TMF\x08";
pub const TMF_VERSION: i32 = 1;

/// Ident and version, before the directory.
pub const HEADER_SIZE: usize = 8;
pub const NUMBER_OF_CHUNKS: usize = 9;
pub const CHUNK_ENTRY_SIZE: usize = 20;
/// Zero byte written ahead of every chunk payload.
pub const CHUNK_PADDING: usize = 1;

/// Byte offset of the first chunk payload.
pub const FIRST_CHUNK_OFFSET: usize =
    HEADER_SIZE + CHUNK_ENTRY_SIZE * NUMBER_OF_CHUNKS + CHUNK_PADDING;

pub const TEXTURE_NAME_LENGTH: usize = 64;

// upper design bounds, chosen so every offset stays within an i32
pub const MAX_MAP_VERTS: usize = 0x100_0000;
pub const MAX_MAP_MESH_VERTS: usize = 0x200_0000;
pub const MAX_MAP_FACES: usize = 0x10_0000;
pub const MAX_MAP_MODELS: usize = 0x1_0000;
pub const MAX_MAP_ENTSTRING: usize = 0x100_0000;
pub const MAX_MAP_TEXTURES: usize = 0x1000;
pub const MAX_MAP_PLANES: usize = 0x10_0000;
pub const MAX_MAP_BRUSHSIDES: usize = 0x10_0000;
pub const MAX_MAP_BRUSHES: usize = 0x4_0000;

const fn tag(ident: &[u8; 4]) -> u32 {
    u32::from_le_bytes(*ident)
}

/// The chunks of a map file, in directory order.
///
/// The discriminant is the chunk tag read as a little-endian `u32`.
#[repr(u32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
pub enum ChunkType {
    Vertices = tag(b"VERT"),
    MeshVertices = tag(b"MVER"),
    Faces = tag(b"FACE"),
    Models = tag(b"MODL"),
    Entities = tag(b"ENTY"),
    Textures = tag(b"TEXT"),
    Planes = tag(b"PLAN"),
    BrushSides = tag(b"BSID"),
    Brushes = tag(b"BRUS"),
}

impl ChunkType {
    pub const ALL: [ChunkType; NUMBER_OF_CHUNKS] = [
        ChunkType::Vertices,
        ChunkType::MeshVertices,
        ChunkType::Faces,
        ChunkType::Models,
        ChunkType::Entities,
        ChunkType::Textures,
        ChunkType::Planes,
        ChunkType::BrushSides,
        ChunkType::Brushes,
    ];

    /// Position of the chunk in the directory and in the payload order.
    pub const fn slot(self) -> usize {
        match self {
            ChunkType::Vertices => 0,
            ChunkType::MeshVertices => 1,
            ChunkType::Faces => 2,
            ChunkType::Models => 3,
            ChunkType::Entities => 4,
            ChunkType::Textures => 5,
            ChunkType::Planes => 6,
            ChunkType::BrushSides => 7,
            ChunkType::Brushes => 8,
        }
    }

    pub const fn tag(self) -> [u8; 4] {
        (self as u32).to_le_bytes()
    }

    pub fn from_tag(tag: [u8; 4]) -> Option<Self> {
        Self::from_u32(u32::from_le_bytes(tag))
    }
}

impl fmt::Display for ChunkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.tag()))
    }
}

flags! {
    /// What a brush is made of.
    pub enum Contents: i32 {
        Solid = 0x1,
        Window = 0x2,
        Aux = 0x4,
        Lava = 0x8,
        Slime = 0x10,
        Water = 0x20,
        Mist = 0x40,
        AreaPortal = 0x8000,
        PlayerClip = 0x10000,
        MonsterClip = 0x20000,
        Origin = 0x100_0000,
        Detail = 0x800_0000,
        Translucent = 0x1000_0000,
        Ladder = 0x2000_0000,
    }

    /// How a brush side is drawn.
    pub enum Surface: i32 {
        Light = 0x1,
        Slick = 0x2,
        Sky = 0x4,
        Warp = 0x8,
        Trans33 = 0x10,
        Trans66 = 0x20,
        Flowing = 0x40,
        NoDraw = 0x80,
    }
}

#[cfg(test)]
mod consts_tests {
    use flagset::FlagSet;

    use super::*;

    #[test]
    fn tags_round_trip() {
        for (slot, chunk) in ChunkType::ALL.into_iter().enumerate() {
            assert_eq!(chunk.slot(), slot);
            assert_eq!(ChunkType::from_tag(chunk.tag()), Some(chunk));
        }

        assert_eq!(&ChunkType::Entities.tag(), b"ENTY");
        assert_eq!(ChunkType::Planes.to_string(), "PLAN");
        assert_eq!(ChunkType::from_tag(*b"LUMP"), None);
    }

    #[test]
    fn first_chunk_follows_directory_and_pad() {
        assert_eq!(FIRST_CHUNK_OFFSET, 189);
    }

    #[test]
    fn flag_bits() {
        let contents = FlagSet::<Contents>::new_truncated(0x21);
        assert!(contents.contains(Contents::Solid));
        assert!(contents.contains(Contents::Water));
        assert!(!contents.contains(Contents::Lava));

        let surface: FlagSet<Surface> = Surface::NoDraw | Surface::Sky;
        assert_eq!(surface.bits(), 0x84);
    }
}
