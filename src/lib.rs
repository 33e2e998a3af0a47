//! wiggle - a pixel canvas where every mark wiggles
//!
//! Pixels are placed with a pointer, each one cycling through the frames of
//! a small built-in shape. The animation can be exported as a looping GIF.

pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod export;
pub mod output;
pub mod render;
pub mod script;
pub mod types;
#[cfg(feature = "window")]
pub mod window;

pub use config::{CanvasConfig, ExportSettings};
pub use controller::{Controller, DrawState, PointerButton};
pub use error::{ExportError, Result, WiggleError};
pub use export::{Capture, EncodeJob, EncoderConfig, ExportedImage, FrameEncoder, GifFrameEncoder};
pub use render::{AnimationLoop, FrameHandle, FrameScheduler, LoopState, Surface};
pub use script::{Replayer, Script, ScriptEvent};
pub use types::{Colour, Point, Shape, ShapeLibrary, WigglePixel};
