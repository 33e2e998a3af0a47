//! Interaction controller.
//!
//! The controller is the drawing session: it owns the pixel collection, the
//! surface, the scheduler, the animation loop and the current draw colours.
//! Hosts feed it pointer events and display-frame callbacks.

use std::time::Duration;

use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::CanvasConfig;
use crate::error::{Result, WiggleError};
use crate::render::{AnimationLoop, FrameScheduler, Surface};
use crate::types::{Colour, Point, ShapeLibrary, WigglePixel};

/// Which pointer button a press came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerButton {
    #[default]
    Primary,
    Middle,
    /// The context-menu button; never draws.
    Secondary,
}

/// Current pencil and background.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawState {
    pub pencil: Colour,
    pub background: Colour,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            pencil: Colour::BLACK,
            background: Colour::WHITE,
        }
    }
}

pub struct Controller {
    pub(crate) pixels: Vec<WigglePixel>,
    pub(crate) surface: Surface,
    pub(crate) scheduler: FrameScheduler,
    pub(crate) animation: AnimationLoop,
    state: DrawState,
    spacing: f64,
    drawing: bool,
    last_point: Option<Point>,
    rng: StdRng,
}

impl Controller {
    pub fn new(config: &CanvasConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// A controller whose shape choices are reproducible.
    pub fn with_seed(config: &CanvasConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &CanvasConfig, rng: StdRng) -> Self {
        Self {
            pixels: Vec::new(),
            surface: Surface::new(config.width, config.height),
            scheduler: FrameScheduler::new(),
            animation: AnimationLoop::new(config.frame_interval()),
            state: DrawState {
                pencil: config.pencil,
                background: config.background,
            },
            spacing: config.spacing,
            drawing: false,
            last_point: None,
            rng,
        }
    }

    pub fn pixels(&self) -> &[WigglePixel] {
        &self.pixels
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn animation(&self) -> &AnimationLoop {
        &self.animation
    }

    pub fn draw_state(&self) -> DrawState {
        self.state
    }

    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Clamp a pointer position to the surface; non-finite positions are dropped.
    fn to_canvas(&self, point: Point) -> Option<Point> {
        if !point.x.is_finite() || !point.y.is_finite() {
            debug!("ignoring non-finite pointer position ({}, {})", point.x, point.y);
            return None;
        }
        Some(Point::new(
            point.x.clamp(0.0, f64::from(self.surface.width())),
            point.y.clamp(0.0, f64::from(self.surface.height())),
        ))
    }

    pub fn on_pointer_down(&mut self, point: Point, button: PointerButton) {
        if button == PointerButton::Secondary {
            return;
        }
        let Some(point) = self.to_canvas(point) else {
            return;
        };
        self.drawing = true;
        self.last_point = Some(point);
        self.place_pixel(point.x, point.y);
    }

    /// Continue a stroke, filling the gap since the last point so placed
    /// pixels are never more than `spacing` apart.
    pub fn on_pointer_move(&mut self, point: Point) {
        if !self.drawing {
            return;
        }
        let Some(point) = self.to_canvas(point) else {
            return;
        };
        let Some(last) = self.last_point else {
            self.last_point = Some(point);
            return;
        };

        let steps = ((last.distance(point) / self.spacing).floor() as usize).max(1);
        for i in 1..=steps {
            let p = last.lerp(point, i as f64 / steps as f64);
            self.place_pixel(p.x, p.y);
        }
        self.last_point = Some(point);
    }

    pub fn on_pointer_up(&mut self) {
        self.end_stroke();
    }

    pub fn on_pointer_leave(&mut self) {
        self.end_stroke();
    }

    fn end_stroke(&mut self) {
        self.drawing = false;
        self.last_point = None;
    }

    pub fn place_pixel(&mut self, x: f64, y: f64) {
        let shape = ShapeLibrary::random(&mut self.rng);
        self.pixels
            .push(WigglePixel::new(Point::new(x, y), self.state.pencil, shape));

        if self.pixels.len() == 1 {
            self.animation.start(&mut self.scheduler, self.pixels.len());
        }
    }

    /// Drop every pixel, blank the surface and stop the animation.
    pub fn clear(&mut self) {
        debug!("clearing {} pixel(s)", self.pixels.len());
        self.pixels.clear();
        self.surface.clear();
        self.animation.stop(&mut self.scheduler);
    }

    pub fn set_pencil(&mut self, colour: Colour) {
        self.state.pencil = colour;
    }

    /// Set the background. Hosts composite the live surface over it, and
    /// exports fill each frame with it.
    pub fn set_background(&mut self, colour: Colour) {
        self.state.background = colour;
    }

    /// Restart a paused loop, e.g. after a failed export. No-op when empty.
    pub fn resume_animation(&mut self) -> bool {
        self.animation.start(&mut self.scheduler, self.pixels.len())
    }

    /// Deliver a display-frame callback at host time `now`.
    ///
    /// Returns whether the surface was repainted.
    pub fn on_frame(&mut self, now: Duration) -> bool {
        match self.scheduler.take() {
            Some(handle) => self.animation.tick(
                handle,
                now,
                &mut self.pixels,
                &mut self.surface,
                &mut self.scheduler,
            ),
            None => false,
        }
    }

    /// The pixel collection as pretty-printed JSON.
    pub fn dump_state(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.pixels).map_err(|e| WiggleError::Parse {
            message: format!("Failed to serialise pixels: {}", e),
            help: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::LoopState;
    use pretty_assertions::assert_eq;

    fn controller() -> Controller {
        let config = CanvasConfig {
            width: 32,
            height: 32,
            ..CanvasConfig::default()
        };
        Controller::with_seed(&config, 42)
    }

    fn xs(c: &Controller) -> Vec<(f64, f64)> {
        c.pixels()
            .iter()
            .map(|p| (p.position.x, p.position.y))
            .collect()
    }

    #[test]
    fn test_place_single_pixel_starts_animation() {
        let mut c = controller();
        assert!(!c.animation().is_running());

        c.place_pixel(10.0, 10.0);

        assert_eq!(c.pixels().len(), 1);
        assert!(c.animation().is_running());
        assert_eq!(c.pixels()[0].colour, Colour::BLACK);
    }

    #[test]
    fn test_place_pixel_always_adds_one() {
        let mut c = controller();
        for n in 1..=50 {
            c.place_pixel(n as f64 % 32.0, 3.0);
            assert_eq!(c.pixels().len(), n);
        }
    }

    #[test]
    fn test_drag_places_pixels_at_spacing() {
        let mut c = controller();
        c.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Primary);
        let before = c.pixels().len();

        c.on_pointer_move(Point::new(10.0, 0.0));

        assert_eq!(c.pixels().len() - before, 5);
        assert_eq!(
            xs(&c)[before..].to_vec(),
            vec![(2.0, 0.0), (4.0, 0.0), (6.0, 0.0), (8.0, 0.0), (10.0, 0.0)]
        );
    }

    #[test]
    fn test_diagonal_drag_spacing_bounded() {
        let mut c = controller();
        let start = Point::new(1.0, 2.0);
        let end = Point::new(20.0, 15.0);
        c.on_pointer_down(start, PointerButton::Primary);
        c.on_pointer_move(end);

        let expected = ((start.distance(end) / 2.0).floor() as usize).max(1);
        assert_eq!(c.pixels().len(), 1 + expected);

        let points: Vec<Point> = c.pixels().iter().map(|p| p.position).collect();
        for pair in points.windows(2) {
            assert!(pair[0].distance(pair[1]) < 2.5);
        }
        let last = points[points.len() - 1];
        assert!(last.distance(end) < 1e-9);
    }

    #[test]
    fn test_short_move_places_one_pixel() {
        let mut c = controller();
        c.on_pointer_down(Point::new(5.0, 5.0), PointerButton::Primary);
        c.on_pointer_move(Point::new(5.5, 5.0));
        c.on_pointer_move(Point::new(5.5, 5.0));

        assert_eq!(c.pixels().len(), 3);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut c = controller();
        c.on_pointer_move(Point::new(4.0, 4.0));
        assert!(c.pixels().is_empty());

        c.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Primary);
        c.on_pointer_up();
        c.on_pointer_move(Point::new(8.0, 0.0));
        assert_eq!(c.pixels().len(), 1);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut c = controller();
        c.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Primary);
        assert!(c.is_drawing());
        c.on_pointer_leave();
        assert!(!c.is_drawing());
    }

    #[test]
    fn test_secondary_button_ignored() {
        let mut c = controller();
        c.on_pointer_down(Point::new(3.0, 3.0), PointerButton::Secondary);
        c.on_pointer_move(Point::new(9.0, 3.0));

        assert!(c.pixels().is_empty());
        assert!(!c.is_drawing());
    }

    #[test]
    fn test_middle_button_draws() {
        let mut c = controller();
        c.on_pointer_down(Point::new(3.0, 3.0), PointerButton::Middle);

        assert_eq!(c.pixels().len(), 1);
        assert!(c.is_drawing());
    }

    #[test]
    fn test_far_move_is_clamped_to_surface() {
        let mut c = controller();
        c.on_pointer_down(Point::new(0.0, 0.0), PointerButton::Primary);
        c.on_pointer_move(Point::new(4_000_000.0, 0.0));

        // 32px wide at spacing 2: one on down plus sixteen along the drag.
        assert_eq!(c.pixels().len(), 17);
        assert_eq!(c.pixels()[16].position, Point::new(32.0, 0.0));
    }

    #[test]
    fn test_non_finite_pointer_is_ignored() {
        let mut c = controller();
        c.on_pointer_down(Point::new(f64::NAN, 1.0), PointerButton::Primary);
        assert!(c.pixels().is_empty());
        assert!(!c.is_drawing());

        c.on_pointer_down(Point::new(1.0, 1.0), PointerButton::Primary);
        c.on_pointer_move(Point::new(f64::INFINITY, 1.0));
        c.on_pointer_move(Point::new(1.0, f64::NAN));
        assert_eq!(c.pixels().len(), 1);
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut c = controller();
        c.place_pixel(4.0, 4.0);
        c.place_pixel(6.0, 4.0);
        c.on_frame(Duration::from_millis(0));
        c.on_frame(Duration::from_millis(100));
        assert!(!c.surface().is_blank());

        c.clear();

        assert!(c.pixels().is_empty());
        assert!(c.surface().is_blank());
        assert_eq!(c.animation().state(), LoopState::Stopped);
        assert!(!c.on_frame(Duration::from_millis(500)));
    }

    #[test]
    fn test_clear_on_empty_canvas() {
        let mut c = controller();
        c.clear();
        assert!(c.pixels().is_empty());
        assert_eq!(c.animation().state(), LoopState::Stopped);
    }

    #[test]
    fn test_animation_restarts_after_clear() {
        let mut c = controller();
        c.place_pixel(1.0, 1.0);
        c.clear();
        c.place_pixel(2.0, 2.0);
        assert!(c.animation().is_running());
    }

    #[test]
    fn test_pencil_snapshot_per_pixel() {
        let mut c = controller();
        let red = Colour::rgb(255, 0, 0);
        c.place_pixel(1.0, 1.0);
        c.set_pencil(red);
        c.place_pixel(2.0, 1.0);
        c.set_background(Colour::BLACK);

        assert_eq!(c.pixels()[0].colour, Colour::BLACK);
        assert_eq!(c.pixels()[1].colour, red);
        assert_eq!(c.draw_state().background, Colour::BLACK);
    }

    #[test]
    fn test_resume_animation_needs_pixels() {
        let mut c = controller();
        assert!(!c.resume_animation());

        c.place_pixel(1.0, 1.0);
        c.animation.stop(&mut c.scheduler);
        assert!(c.resume_animation());
        assert!(c.animation().is_running());
    }

    #[test]
    fn test_on_frame_advances_pixels() {
        let mut c = controller();
        c.place_pixel(8.0, 8.0);

        assert!(!c.on_frame(Duration::from_millis(0)));
        assert!(c.on_frame(Duration::from_millis(60)));
        assert_eq!(c.pixels()[0].current_frame(), 1);
    }

    #[test]
    fn test_dump_state_lists_pixels() {
        let mut c = controller();
        c.place_pixel(3.0, 4.0);

        let dump: serde_json::Value = serde_json::from_str(&c.dump_state().unwrap()).unwrap();
        let pixels = dump.as_array().unwrap();
        assert_eq!(pixels.len(), 1);
        assert_eq!(pixels[0]["x"], 3.0);
        assert_eq!(pixels[0]["color"], "#000000");
        assert_eq!(pixels[0]["currentFrame"], 0);
    }
}
