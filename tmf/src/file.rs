use std::{fs, mem, path::Path};

use crate::{
    binaries::BinaryData,
    chunk::{self, Chunk},
    consts::ChunkType,
    entities::{self, Entity},
    error::TMFError,
    header::TMFHeader,
};

/// A map file held in memory, with its directory checked against the file size.
pub struct TMFFile {
    header: TMFHeader,
    data: Box<[u8]>,
}

impl TMFFile {
    pub fn load(path: &Path) -> Result<Self, TMFError> {
        log::debug!("Loading map file {}", path.display());
        Self::from_bytes(fs::read(path)?)
    }

    pub fn from_bytes(data: impl Into<Box<[u8]>>) -> Result<Self, TMFError> {
        let data = data.into();

        if data.len() < mem::size_of::<TMFHeader>() {
            // still report a wrong ident over a short read when there is one to check
            if let Some(ident) = data.get(..4) {
                if ident != crate::consts::HEADER_IDENT {
                    let mut found = [0; 4];
                    found.copy_from_slice(ident);
                    return Err(TMFError::BadMagic(found));
                }
            }
            return Err(TMFError::Truncated(data.len()));
        }

        let header = TMFHeader::read(&mut &data[..])?;
        header.validate(data.len())?;

        Ok(Self { header, data })
    }

    pub fn header(&self) -> &TMFHeader {
        &self.header
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn chunk_bytes(&self, chunk: ChunkType) -> &[u8] {
        &self.data[self.header.get_chunk_header(chunk).range()]
    }

    pub fn get_chunk<T: Chunk>(&self) -> Result<Box<[T]>, TMFError> {
        chunk::decode(self.chunk_bytes(T::chunk_type()))
    }

    pub fn entity_text(&self) -> Result<&str, TMFError> {
        Ok(std::str::from_utf8(self.chunk_bytes(ChunkType::Entities))?)
    }

    pub fn entities(&self) -> Result<Vec<Entity>, TMFError> {
        entities::parse_entities(self.entity_text()?)
    }
}
