//! Interactive window host (minifb).
//!
//! Left mouse draws, right mouse is ignored. Keys:
//! `C` clear, `J` dump pixels as JSON, `S` save a GIF, `1`-`9` pick a pencil
//! from the palette, `B` cycle the background, `Esc` quit.

use std::time::Instant;

use log::info;
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

use crate::config::CanvasConfig;
use crate::controller::{Controller, PointerButton};
use crate::error::{Result, WiggleError};
use crate::export::{Capture, GifFrameEncoder};
use crate::output::{display_path, Printer};
use crate::types::Point;

const PALETTE_KEYS: [Key; 9] = [
    Key::Key1,
    Key::Key2,
    Key::Key3,
    Key::Key4,
    Key::Key5,
    Key::Key6,
    Key::Key7,
    Key::Key8,
    Key::Key9,
];

/// Pointer state from the previous display frame.
#[derive(Default)]
struct PointerTracker {
    left: bool,
    right: bool,
    inside: bool,
    last: Option<(f32, f32)>,
}

pub struct CanvasWindow {
    window: Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
}

impl CanvasWindow {
    pub fn open(title: &str, config: &CanvasConfig) -> Result<Self> {
        let (width, height) = (config.width as usize, config.height as usize);
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| WiggleError::Setup {
                message: format!("Failed to open window: {}", e),
                help: Some("The draw command needs a graphical session".to_string()),
            })?;
        window.set_target_fps(60);

        Ok(Self {
            window,
            buffer: Vec::with_capacity(width * height),
            width,
            height,
        })
    }

    fn present(&mut self, controller: &Controller) -> Result<()> {
        let background = controller.draw_state().background;
        controller.surface().to_u32_over(background, &mut self.buffer);
        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| WiggleError::Setup {
                message: format!("Failed to update window: {}", e),
                help: None,
            })
    }

    fn pressed(&self, key: Key) -> bool {
        self.window.is_key_pressed(key, KeyRepeat::No)
    }

    /// Translate this frame's mouse state into controller pointer events.
    fn pump_pointer(&self, tracker: &mut PointerTracker, controller: &mut Controller) {
        let pos = self.window.get_mouse_pos(MouseMode::Discard);
        let left = self.window.get_mouse_down(MouseButton::Left);
        let right = self.window.get_mouse_down(MouseButton::Right);

        match pos {
            None => {
                if tracker.inside {
                    controller.on_pointer_leave();
                }
                tracker.inside = false;
            }
            Some((x, y)) => {
                let point = Point::new(f64::from(x), f64::from(y));
                tracker.inside = true;

                if right && !tracker.right {
                    controller.on_pointer_down(point, PointerButton::Secondary);
                }
                if left && !tracker.left {
                    controller.on_pointer_down(point, PointerButton::Primary);
                } else if left && tracker.last != Some((x, y)) {
                    controller.on_pointer_move(point);
                } else if !left && tracker.left {
                    controller.on_pointer_up();
                }
                tracker.last = Some((x, y));
            }
        }

        tracker.left = left;
        tracker.right = right;
    }

    pub fn run(mut self, controller: &mut Controller, config: &CanvasConfig, printer: &Printer) -> Result<()> {
        let started = Instant::now();
        let mut tracker = PointerTracker::default();
        let mut capture: Option<Capture> = None;
        let mut background_index = 0usize;

        info!("window open: {}x{}", self.width, self.height);

        while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
            self.pump_pointer(&mut tracker, controller);

            if self.pressed(Key::C) {
                controller.clear();
            }
            if self.pressed(Key::J) {
                println!("{}", controller.dump_state()?);
            }
            for (i, key) in PALETTE_KEYS.iter().enumerate() {
                if let Some(&colour) = config.palette.get(i).filter(|_| self.pressed(*key)) {
                    controller.set_pencil(colour);
                }
            }
            if self.pressed(Key::B) && !config.palette.is_empty() {
                background_index = (background_index + 1) % config.palette.len();
                controller.set_background(config.palette[background_index]);
            }
            if self.pressed(Key::S) && capture.is_none() {
                let encoder = GifFrameEncoder::new(controller.encoder_config(&config.export));
                capture = Some(controller.begin_capture(
                    encoder,
                    config.export.frames,
                    config.export.delay(),
                ));
            }

            if let Some(outcome) = capture.as_mut().and_then(|c| c.poll(controller)) {
                let resume = capture.take().is_some_and(|c| c.resumes_animation());
                match outcome {
                    Ok(image) => match image.save_in(&config.export.output) {
                        Ok(path) => printer.status("Exported", &display_path(&path)),
                        Err(e) => printer.error("Failed", &e.to_string()),
                    },
                    Err(e) => {
                        printer.error("Failed", &format!("GIF creation failed: {}", e));
                        if resume {
                            controller.resume_animation();
                        }
                    }
                }
            }

            controller.on_frame(started.elapsed());
            self.present(controller)?;
        }

        Ok(())
    }
}
