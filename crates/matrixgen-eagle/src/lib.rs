//! EAGLE `.sch`/`.brd` document I/O.
//!
//! Loading is selective: only the collections the engine rewrites are parsed
//! into the typed model; the byte span of each collection node is recorded.
//! Saving renders the transformed collections back to XML and splices them
//! into the original text, so layers, libraries, settings, design rules and
//! any later schematic sheets round-trip byte-for-byte.

mod error;
mod load;
mod save;

pub use error::EagleError;
pub use load::{LoadedBoard, LoadedSchematic};
