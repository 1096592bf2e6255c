//! Library side of the `dtgen` command: logging setup and the generation
//! pipeline.

#![deny(unsafe_code)]

pub mod logging;
pub mod pipeline;
