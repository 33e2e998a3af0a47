//! Rendering module for wiggle.
//!
//! Holds the raster surface pixels paint onto, the display-frame scheduler,
//! and the animation loop that repaints every live pixel at a fixed cadence.

mod animation;
mod scheduler;
mod surface;

pub use animation::{AnimationLoop, LoopState, DEFAULT_FRAME_INTERVAL};
pub use scheduler::{FrameHandle, FrameScheduler};
pub use surface::Surface;
