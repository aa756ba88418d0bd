//! Compiler from editor `.map` files to Tremor map files.
//!
//! The pipeline is [`parser`] → [`common::brush`] (per brush, in parallel) → [`assembler`] →
//! [`tmf::data::TMFData`], driven by [`compiler`].

use log::LevelFilter;

pub mod assembler;
pub mod compiler;
pub mod config;
pub mod error;
pub mod parser;
pub mod prelude;
pub mod texture_cache;
pub mod uv;

/// Log to stderr at `Info`, or `Debug` when verbose. `RUST_LOG` still applies on top.
pub fn init_logger(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}
