use std::io;

use thiserror::Error;

use crate::consts::ChunkType;

#[derive(Debug, Error)]
pub enum TMFError {
    #[error("failed to access map file: {0}")]
    Io(#[from] io::Error),
    #[error("not a map file, ident is {0:?}")]
    BadMagic([u8; 4]),
    #[error("unsupported map version {0}")]
    UnsupportedVersion(i32),
    #[error("file is {0} bytes, too short for the chunk directory")]
    Truncated(usize),
    #[error(
        "malformed directory: {chunk} chunk at {start} with length {length} does not fit in {file_len} bytes"
    )]
    MalformedDirectory {
        chunk: ChunkType,
        start: i32,
        length: i32,
        file_len: usize,
    },
    #[error("malformed directory: slot {slot} should hold {expected} but is tagged {found:?}")]
    UnexpectedChunk {
        slot: usize,
        expected: ChunkType,
        found: [u8; 4],
    },
    #[error("{chunk} chunk is {length} bytes, not a whole number of {record_size} byte records")]
    MisalignedChunk {
        chunk: ChunkType,
        length: usize,
        record_size: usize,
    },
    #[error("{chunk} chunk holds {count} records, at most {max} are allowed")]
    TooManyRecords {
        chunk: ChunkType,
        count: usize,
        max: usize,
    },
    #[error("entity text is not valid utf-8: {0}")]
    EntityEncoding(#[from] std::str::Utf8Error),
    #[error("entity text line {line}: {message}")]
    EntitySyntax { line: usize, message: &'static str },
}
