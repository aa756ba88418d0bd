use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    binaries::BinaryData,
    brush::{TMFBrush, TMFBrushSide},
    chunk::{self, check_count},
    consts::{ChunkType, CHUNK_PADDING, FIRST_CHUNK_OFFSET, MAX_MAP_ENTSTRING, NUMBER_OF_CHUNKS},
    error::TMFError,
    face::TMFFace,
    file::TMFFile,
    header::{TMFChunk, TMFHeader},
    model::TMFModel,
    plane::TMFPlane,
    textures::TMFTexture,
    vert::{TMFMeshVertex, TMFVertex},
};

/// The full contents of a map file, one array per chunk.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TMFData {
    pub vertices: Vec<TMFVertex>,
    pub mesh_vertices: Vec<TMFMeshVertex>,
    pub faces: Vec<TMFFace>,
    pub models: Vec<TMFModel>,
    /// Entity text, as produced by [`crate::entities::format_entities`].
    pub entities: String,
    pub textures: Vec<TMFTexture>,
    pub planes: Vec<TMFPlane>,
    pub brush_sides: Vec<TMFBrushSide>,
    pub brushes: Vec<TMFBrush>,
}

impl TMFData {
    pub fn chunk_bytes(&self, chunk: ChunkType) -> &[u8] {
        match chunk {
            ChunkType::Vertices => chunk::encode(&self.vertices),
            ChunkType::MeshVertices => chunk::encode(&self.mesh_vertices),
            ChunkType::Faces => chunk::encode(&self.faces),
            ChunkType::Models => chunk::encode(&self.models),
            ChunkType::Entities => self.entities.as_bytes(),
            ChunkType::Textures => chunk::encode(&self.textures),
            ChunkType::Planes => chunk::encode(&self.planes),
            ChunkType::BrushSides => chunk::encode(&self.brush_sides),
            ChunkType::Brushes => chunk::encode(&self.brushes),
        }
    }

    fn check_limits(&self) -> Result<(), TMFError> {
        check_count::<TMFVertex>(self.vertices.len())?;
        check_count::<TMFMeshVertex>(self.mesh_vertices.len())?;
        check_count::<TMFFace>(self.faces.len())?;
        check_count::<TMFModel>(self.models.len())?;
        check_count::<TMFTexture>(self.textures.len())?;
        check_count::<TMFPlane>(self.planes.len())?;
        check_count::<TMFBrushSide>(self.brush_sides.len())?;
        check_count::<TMFBrush>(self.brushes.len())?;

        if self.entities.len() > MAX_MAP_ENTSTRING {
            return Err(TMFError::TooManyRecords {
                chunk: ChunkType::Entities,
                count: self.entities.len(),
                max: MAX_MAP_ENTSTRING,
            });
        }
        Ok(())
    }

    /// The directory this data will be written with. Each payload is preceded by one pad byte.
    pub fn directory(&self) -> Result<[TMFChunk; NUMBER_OF_CHUNKS], TMFError> {
        self.check_limits()?;

        let mut chunks = [TMFChunk::default(); NUMBER_OF_CHUNKS];
        let mut start = FIRST_CHUNK_OFFSET;

        for chunk in ChunkType::ALL {
            let length = self.chunk_bytes(chunk).len();
            // the limits keep every offset far inside an i32
            chunks[chunk.slot()] = TMFChunk::new(chunk, start as i32, length as i32);
            start += length + CHUNK_PADDING;
        }

        Ok(chunks)
    }

    /// Write the header, directory, and every chunk payload in directory order.
    pub fn write_to<W: Write>(&self, out: &mut W) -> Result<TMFHeader, TMFError> {
        let header = TMFHeader::new(self.directory()?);
        header.write(out)?;

        for chunk in ChunkType::ALL {
            out.write_all(&[0; CHUNK_PADDING])?;
            out.write_all(self.chunk_bytes(chunk))?;
        }

        Ok(header)
    }

    pub fn save(&self, path: &Path) -> Result<TMFHeader, TMFError> {
        let mut out = BufWriter::new(File::create(path)?);
        let header = self.write_to(&mut out)?;
        out.flush()?;

        log::info!("Wrote {}", path.display());
        Ok(header)
    }

    pub fn read(file: &TMFFile) -> Result<Self, TMFError> {
        Ok(Self {
            vertices: file.get_chunk()?.into_vec(),
            mesh_vertices: file.get_chunk()?.into_vec(),
            faces: file.get_chunk()?.into_vec(),
            models: file.get_chunk()?.into_vec(),
            entities: file.entity_text()?.to_owned(),
            textures: file.get_chunk()?.into_vec(),
            planes: file.get_chunk()?.into_vec(),
            brush_sides: file.get_chunk()?.into_vec(),
            brushes: file.get_chunk()?.into_vec(),
        })
    }
}
