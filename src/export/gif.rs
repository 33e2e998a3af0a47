//! Looping GIF encoding via `image::codecs::gif`.

use std::time::Duration;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, Rgba, RgbaImage};

use crate::error::ExportError;
use crate::types::Colour;

use super::{EncodeJob, EncoderConfig, FrameEncoder};

/// Collects frames and encodes them into an infinitely looping GIF.
pub struct GifFrameEncoder {
    config: EncoderConfig,
    frames: Vec<(RgbaImage, Duration)>,
}

impl GifFrameEncoder {
    pub fn new(config: EncoderConfig) -> Self {
        Self {
            config,
            frames: Vec::new(),
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

impl FrameEncoder for GifFrameEncoder {
    fn add_frame(&mut self, frame: &RgbaImage, delay: Duration) {
        let mut copy = frame.clone();
        let background = self.config.background;
        for p in copy.pixels_mut() {
            let c = Colour::new(p[0], p[1], p[2], p[3]).over(background);
            *p = Rgba(c.to_rgba());
        }
        self.frames.push((copy, delay));
    }

    fn finish(self) -> EncodeJob {
        let GifFrameEncoder { config, frames } = self;
        if config.workers == 0 {
            EncodeJob::ready(encode(&config, frames))
        } else {
            EncodeJob::spawn(move || encode(&config, frames))
        }
    }
}

fn encode(config: &EncoderConfig, frames: Vec<(RgbaImage, Duration)>) -> Result<Vec<u8>, ExportError> {
    if frames.is_empty() {
        return Err(ExportError::aborted("no frames to encode"));
    }

    for (image, _) in &frames {
        if image.dimensions() != (config.width, config.height) {
            return Err(ExportError::aborted(format!(
                "frame is {}x{}, expected {}x{}",
                image.width(),
                image.height(),
                config.width,
                config.height
            )));
        }
    }

    let speed = i32::from(config.quality.clamp(1, 30));
    let mut bytes = Vec::new();
    {
        let mut encoder = GifEncoder::new_with_speed(&mut bytes, speed);
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| ExportError::aborted(e.to_string()))?;

        let frames = frames.into_iter().map(|(image, delay)| {
            Frame::from_parts(image, 0, 0, Delay::from_saturating_duration(delay))
        });
        encoder
            .encode_frames(frames)
            .map_err(|e| ExportError::aborted(e.to_string()))?;
    }

    log::debug!("encoded gif: {} bytes", bytes.len());
    Ok(bytes)
}
