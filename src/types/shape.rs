//! Wiggle shapes.
//!
//! A shape is an ordered list of frames. Each frame is a list of `(dx, dy)`
//! offsets relative to the point where the pixel was placed. Pixels step
//! through the frames of their shape to produce the wiggle.
//!
//! The catalog is fixed and `'static`, so every pixel holds a plain
//! `&'static Shape` and nothing is cloned per placement.

use rand::Rng;

/// One animation step: the offsets filled for this frame.
pub type Frame = &'static [(i32, i32)];

/// A named, ordered sequence of frames.
#[derive(Debug, PartialEq, Eq)]
pub struct Shape {
    pub name: &'static str,
    frames: &'static [Frame],
}

impl Shape {
    pub const fn new(name: &'static str, frames: &'static [Frame]) -> Self {
        Self { name, frames }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Offsets of frame `index`, wrapping around the cycle.
    pub fn frame(&self, index: usize) -> Frame {
        self.frames[index % self.frames.len()]
    }

    pub fn frames(&self) -> &'static [Frame] {
        self.frames
    }

    /// Number of offsets filled per frame.
    pub fn cell_count(&self) -> usize {
        self.frames.first().map_or(0, |f| f.len())
    }
}

/// A small plus sign that hops right, then down.
pub static PLUS: Shape = Shape::new(
    "plus",
    &[
        &[(0, -1), (-1, 0), (0, 0), (1, 0), (0, 1)],
        &[(1, -1), (0, 0), (1, 0), (2, 0), (1, 1)],
        &[(0, 0), (-1, 1), (0, 1), (1, 1), (0, 2)],
    ],
);

/// A three-cell `\` stroke that bends as it cycles.
pub static DIAG: Shape = Shape::new(
    "diag",
    &[
        &[(-1, -1), (0, 0), (1, 1)],
        &[(-1, -1), (0, 0), (1, 0)],
        &[(0, -1), (0, 0), (1, 1)],
    ],
);

/// The mirror of [`DIAG`]: a `/` stroke.
pub static REVERSE_DIAG: Shape = Shape::new(
    "reverse-diag",
    &[
        &[(1, -1), (0, 0), (-1, 1)],
        &[(1, -1), (0, 0), (-1, 0)],
        &[(0, -1), (0, 0), (-1, 1)],
    ],
);

static CATALOG: [&Shape; 3] = [&PLUS, &DIAG, &REVERSE_DIAG];

/// The built-in shape catalog.
pub struct ShapeLibrary;

impl ShapeLibrary {
    pub fn all() -> &'static [&'static Shape] {
        &CATALOG
    }

    pub fn get(name: &str) -> Option<&'static Shape> {
        CATALOG.iter().copied().find(|s| s.name == name)
    }

    /// Uniformly random shape from the catalog.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> &'static Shape {
        CATALOG[rng.gen_range(0..CATALOG.len())]
    }
}
