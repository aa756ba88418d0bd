use std::{io, path::PathBuf};

use thiserror::Error;
use tmf::error::TMFError;

use crate::{config::ConfigError, parser::ParseError};

#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Tmf(#[from] TMFError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to access {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("texture {name:?} is not in the texture cache")]
    TextureNotFound { name: String },
    #[error("texture cache line {line}: {message}")]
    TextureCacheFormat { line: usize, message: &'static str },
}
