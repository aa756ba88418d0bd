//! The Tremor map file (`.tmb`): a compiled level laid out as a fixed chunk directory followed
//! by flat arrays of fixed-size records.
//!
//! ```text
//! +--------+-----------------------+-----+---------+-----+---------+-----
//! | header | directory (9 entries) | pad | chunk 0 | pad | chunk 1 | ...
//! +--------+-----------------------+-----+---------+-----+---------+-----
//! ```
//!
//! Every integer and float in the file is little-endian.

// Records are written by casting them straight to bytes.
#[cfg(not(target_endian = "little"))]
compile_error!("the tmf record layout is little-endian and records are cast directly to bytes");

pub mod binaries;
pub mod brush;
pub mod chunk;
pub mod consts;
pub mod data;
pub mod entities;
pub mod error;
pub mod face;
pub mod file;
pub mod header;
pub mod layout;
pub mod model;
pub mod plane;
pub mod prelude;
pub mod textures;
pub mod vert;
