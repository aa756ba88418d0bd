use std::{fmt, ops::Range};

use crate::{
    consts::{ChunkType, HEADER_IDENT, NUMBER_OF_CHUNKS, TMF_VERSION},
    error::TMFError,
};

/// A directory entry: where one chunk lives in the file.
#[repr(C, packed)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFChunk {
    pub tag: [u8; 4],
    pub version: i32,
    /// Always 0, chunks are stored uncompressed.
    pub compression: i32,
    /// Offset of the payload from the start of the file.
    pub start: i32,
    /// Payload size in bytes.
    pub length: i32,
}

impl TMFChunk {
    pub fn new(chunk: ChunkType, start: i32, length: i32) -> Self {
        Self {
            tag: chunk.tag(),
            version: 0,
            compression: 0,
            start,
            length,
        }
    }

    pub fn chunk_type(&self) -> Option<ChunkType> {
        ChunkType::from_tag(self.tag)
    }

    /// The payload as a byte range. Only meaningful once the directory has been validated.
    pub fn range(&self) -> Range<usize> {
        let start = self.start.max(0) as usize;
        start..start + self.length.max(0) as usize
    }
}

#[repr(C, packed)]
#[derive(Copy, Clone, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TMFHeader {
    pub ident: [u8; 4],
    pub version: i32,
    pub chunks: [TMFChunk; NUMBER_OF_CHUNKS],
}

impl Default for TMFHeader {
    fn default() -> Self {
        Self::new(Default::default())
    }
}

impl fmt::Debug for TMFHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let version = self.version;
        f.debug_struct("TMFHeader")
            .field("ident", &String::from_utf8_lossy(&self.ident))
            .field("version", &version)
            .field("chunks", &self.chunks)
            .finish()
    }
}

impl TMFHeader {
    pub fn new(chunks: [TMFChunk; NUMBER_OF_CHUNKS]) -> Self {
        Self {
            ident: HEADER_IDENT,
            version: TMF_VERSION,
            chunks,
        }
    }

    pub fn get_chunk_header(&self, chunk: ChunkType) -> &TMFChunk {
        &self.chunks[chunk.slot()]
    }

    /// Check the ident, the version, and that every directory slot holds the chunk it should
    /// and lies inside a file of `file_len` bytes.
    pub fn validate(&self, file_len: usize) -> Result<(), TMFError> {
        if self.ident != HEADER_IDENT {
            return Err(TMFError::BadMagic(self.ident));
        }

        let version = self.version;
        if version != TMF_VERSION {
            return Err(TMFError::UnsupportedVersion(version));
        }

        for (slot, (entry, expected)) in self.chunks.iter().zip(ChunkType::ALL).enumerate() {
            if entry.tag != expected.tag() {
                return Err(TMFError::UnexpectedChunk {
                    slot,
                    expected,
                    found: entry.tag,
                });
            }

            let start = entry.start;
            let length = entry.length;
            if start < 0 || length < 0 || start as i64 + length as i64 > file_len as i64 {
                return Err(TMFError::MalformedDirectory {
                    chunk: expected,
                    start,
                    length,
                    file_len,
                });
            }
        }

        Ok(())
    }
}
