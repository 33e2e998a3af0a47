//! Animation export.
//!
//! Export replays a fixed number of frames onto the surface, one per index
//! of each pixel's own cycle, and hands each frame to a [`FrameEncoder`].
//! The live loop is paused for the capture and resumed only when the encoder
//! finishes successfully.
//!
//! Pixel frame indices are left at the last exported frame; the live loop
//! carries on from there.

mod encoder;
mod gif;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};

use crate::config::ExportSettings;
use crate::controller::Controller;
use crate::error::{ExportError, Result, WiggleError};

pub use encoder::{EncodeJob, EncoderConfig, FrameEncoder};
pub use gif::GifFrameEncoder;

/// Default number of exported frames.
pub const DEFAULT_EXPORT_FRAMES: usize = 3;

/// An encoded animation, ready to be written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedImage {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl ExportedImage {
    pub fn gif(bytes: Vec<u8>) -> Self {
        Self {
            bytes,
            mime: "image/gif",
        }
    }

    /// `wigglecanvas-<timestamp>.gif`, safe on every filesystem.
    pub fn file_name(at: DateTime<Utc>) -> String {
        format!("wigglecanvas-{}.gif", at.format("%Y-%m-%dT%H-%M-%S%.3fZ"))
    }

    /// Write to `dir` under a timestamped name. Returns the written path.
    pub fn save_in(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(Self::file_name(Utc::now()));
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| WiggleError::Io {
                path: parent.to_path_buf(),
                message: format!("Failed to create output directory: {}", e),
            })?;
        }
        std::fs::write(path, &self.bytes).map_err(|e| WiggleError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to write export: {}", e),
        })
    }
}

/// An export waiting on its encoder.
pub struct Capture {
    job: EncodeJob,
    resume: bool,
}

impl Capture {
    /// Check the encoder without blocking.
    ///
    /// Returns `Some` exactly once, when the encoder settles.
    pub fn poll(
        &mut self,
        controller: &mut Controller,
    ) -> Option<std::result::Result<ExportedImage, ExportError>> {
        let outcome = self.job.poll()?;
        Some(settle(controller, self.resume, outcome))
    }

    /// Block until the encoder settles.
    pub fn wait(
        self,
        controller: &mut Controller,
    ) -> std::result::Result<ExportedImage, ExportError> {
        let outcome = self.job.wait();
        settle(controller, self.resume, outcome)
    }

    /// Whether the live loop will be resumed on success.
    pub fn resumes_animation(&self) -> bool {
        self.resume
    }
}

fn settle(
    controller: &mut Controller,
    resume: bool,
    outcome: std::result::Result<Vec<u8>, ExportError>,
) -> std::result::Result<ExportedImage, ExportError> {
    match outcome {
        Ok(bytes) => {
            info!("export finished: {} bytes", bytes.len());
            if resume {
                controller.resume_animation();
            }
            Ok(ExportedImage::gif(bytes))
        }
        Err(e) => {
            warn!("export failed: {}", e);
            Err(e)
        }
    }
}

impl Controller {
    /// Encoder settings for this canvas.
    pub fn encoder_config(&self, settings: &ExportSettings) -> EncoderConfig {
        EncoderConfig {
            workers: settings.workers,
            quality: settings.quality,
            width: self.surface.width(),
            height: self.surface.height(),
            background: self.draw_state().background,
        }
    }

    /// Pause the loop, replay `frames` frames into `encoder` and finish it.
    pub fn begin_capture<E: FrameEncoder>(
        &mut self,
        mut encoder: E,
        frames: usize,
        delay: Duration,
    ) -> Capture {
        let resume = self.animation.stop(&mut self.scheduler);
        let background = self.draw_state().background;

        for i in 0..frames {
            self.surface.fill(background);
            for pixel in self.pixels.iter_mut() {
                pixel.set_frame(i);
                pixel.render(&mut self.surface);
            }
            debug!("captured export frame {}/{}", i + 1, frames);
            encoder.add_frame(self.surface.image(), delay);
        }

        Capture {
            job: encoder.finish(),
            resume,
        }
    }

    /// Capture and wait for the encoder.
    pub fn capture_animation<E: FrameEncoder>(
        &mut self,
        encoder: E,
        frames: usize,
        delay: Duration,
    ) -> std::result::Result<ExportedImage, ExportError> {
        self.begin_capture(encoder, frames, delay).wait(self)
    }

    /// Capture to GIF with the configured export settings.
    pub fn export_gif(
        &mut self,
        settings: &ExportSettings,
    ) -> std::result::Result<ExportedImage, ExportError> {
        let encoder = GifFrameEncoder::new(self.encoder_config(settings));
        self.capture_animation(encoder, settings.frames, settings.delay())
    }
}
