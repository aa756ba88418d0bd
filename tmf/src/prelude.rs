pub use crate::{
    brush::{TMFBrush, TMFBrushSide},
    chunk::Chunk,
    consts::{ChunkType, Contents, Surface},
    data::TMFData,
    entities::{Entity, ModelRef},
    error::TMFError,
    face::TMFFace,
    file::TMFFile,
    header::{TMFChunk, TMFHeader},
    model::TMFModel,
    plane::TMFPlane,
    textures::TMFTexture,
    vert::{TMFMeshVertex, TMFVertex},
};
