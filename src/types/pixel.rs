//! A single placed wiggle pixel.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::render::Surface;

use super::{Colour, Shape};

/// A point in surface coordinates. Interpolated drag points are fractional.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Linear interpolation towards `other`; `t = 1.0` yields `other`.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }
}

/// One mark on the canvas, cycling through the frames of its shape.
#[derive(Debug, Clone)]
pub struct WigglePixel {
    pub position: Point,
    pub colour: Colour,
    shape: &'static Shape,
    current_frame: usize,
}

impl WigglePixel {
    pub fn new(position: Point, colour: Colour, shape: &'static Shape) -> Self {
        Self {
            position,
            colour,
            shape,
            current_frame: 0,
        }
    }

    pub fn shape(&self) -> &'static Shape {
        self.shape
    }

    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    pub fn frame_count(&self) -> usize {
        self.shape.frame_count()
    }

    pub fn advance_frame(&mut self) {
        self.current_frame = (self.current_frame + 1) % self.shape.frame_count();
    }

    /// Jump straight to frame `index` (wrapped to this shape's cycle).
    pub fn set_frame(&mut self, index: usize) {
        self.current_frame = index % self.shape.frame_count();
    }

    /// Fill one surface pixel per offset of the current frame.
    pub fn render(&self, surface: &mut Surface) {
        let x = self.position.x.floor() as i64;
        let y = self.position.y.floor() as i64;

        for &(dx, dy) in self.shape.frame(self.current_frame) {
            surface.fill_rect(x + i64::from(dx), y + i64::from(dy), 1, 1, self.colour);
        }
    }
}

// Field names follow the JSON the state dump has always printed.
impl Serialize for WigglePixel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("WigglePixel", 6)?;
        state.serialize_field("x", &self.position.x)?;
        state.serialize_field("y", &self.position.y)?;
        state.serialize_field("color", &self.colour)?;
        state.serialize_field("shape", self.shape.name)?;
        state.serialize_field("currentFrame", &self.current_frame)?;
        state.serialize_field("frameCount", &self.shape.frame_count())?;
        state.end()
    }
}
