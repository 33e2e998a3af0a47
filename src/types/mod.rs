//! Core domain types for wiggle.
//!
//! - `Colour` - RGBA colour values with hex parsing
//! - `Shape` - the built-in wiggle shape catalog
//! - `WigglePixel` - one placed, animating mark

mod colour;
mod pixel;
mod shape;

pub use colour::Colour;
pub use pixel::{Point, WigglePixel};
pub use shape::{Frame, Shape, ShapeLibrary, DIAG, PLUS, REVERSE_DIAG};
