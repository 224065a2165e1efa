//! Typed in-memory model of the collections matrixgen transforms in an
//! EAGLE schematic/board pair. Everything else in the documents passes
//! through the I/O layer untouched.
//!
//! All types own their children; `Clone` is the deep-copy used when
//! replicating template content.

mod board;
mod drawing;
mod naming;
mod rot;
mod schematic;

pub use board::{Board, ContactRef, Element, ElementAttribute, Signal, SignalItem};
pub use drawing::{Junction, Label, Polygon, Vertex, Via, Wire};
pub use naming::{external, is_template, replica, stem, Role, TEMPLATE_MARKER};
pub use rot::Rot;
pub use schematic::{Instance, Net, Part, PinRef, Schematic, Segment, SegmentItem};
