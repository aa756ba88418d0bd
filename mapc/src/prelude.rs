pub use crate::{
    assembler::CompileContext,
    compiler::{compile_entities, compile_file, compile_str, CompileOptions},
    config::{Config, ConfigError, USAGE},
    error::CompileError,
    parser::{parse_map, MapBrush, MapEntity, MapPlane, ParseError},
    texture_cache::{TextureCache, TextureSizes},
    uv::{project_uv, TextureAttributes},
};
