use std::mem;

use crate::{consts::ChunkType, error::TMFError, layout::Field};

/// A record type stored as a flat array in one chunk of the map file.
pub trait Chunk: bytemuck::Pod {
    /// Field-by-field description of the record, in file order.
    const LAYOUT: &'static [Field];

    fn chunk_type() -> ChunkType;
    fn max() -> usize;
}

/// The payload bytes of a chunk holding `items`.
pub fn encode<T: Chunk>(items: &[T]) -> &[u8] {
    bytemuck::cast_slice(items)
}

/// Split a chunk payload back into records.
pub fn decode<T: Chunk>(bytes: &[u8]) -> Result<Box<[T]>, TMFError> {
    let record_size = mem::size_of::<T>();

    if bytes.len() % record_size != 0 {
        return Err(TMFError::MisalignedChunk {
            chunk: T::chunk_type(),
            length: bytes.len(),
            record_size,
        });
    }

    let count = bytes.len() / record_size;
    check_count::<T>(count)?;

    // payloads start at arbitrary offsets, so read each record unaligned
    Ok(bytes
        .chunks_exact(record_size)
        .map(bytemuck::pod_read_unaligned)
        .collect())
}

pub fn check_count<T: Chunk>(count: usize) -> Result<(), TMFError> {
    if count > T::max() {
        return Err(TMFError::TooManyRecords {
            chunk: T::chunk_type(),
            count,
            max: T::max(),
        });
    }
    Ok(())
}
