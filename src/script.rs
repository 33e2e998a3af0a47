//! Headless event scripts.
//!
//! A script is a YAML (or JSON) list of pointer and control events replayed
//! through a [`Controller`], so drawings can be produced and exported without
//! a window:
//!
//! ```yaml
//! pencil: "#E63946"
//! events:
//!   - down: { x: 10, y: 10 }
//!   - move: { x: 40, y: 12 }
//!   - up
//!   - wait: 120
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::controller::{Controller, PointerButton};
use crate::error::{Result, WiggleError};
use crate::types::{Colour, Point};

/// Simulated display refresh used by `wait`.
pub const DISPLAY_FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptButton {
    #[default]
    Primary,
    Middle,
    Secondary,
}

impl From<ScriptButton> for PointerButton {
    fn from(b: ScriptButton) -> Self {
        match b {
            ScriptButton::Primary => PointerButton::Primary,
            ScriptButton::Middle => PointerButton::Middle,
            ScriptButton::Secondary => PointerButton::Secondary,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptEvent {
    Down {
        x: f64,
        y: f64,
        #[serde(default)]
        button: ScriptButton,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    Leave,
    Clear,
    Pencil(Colour),
    Background(Colour),
    /// Let the animation run for this many milliseconds.
    Wait(u64),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    pub pencil: Option<Colour>,
    pub background: Option<Colour>,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub events: Vec<ScriptEvent>,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| WiggleError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read script: {}", e),
        })?;
        Self::parse(&content)
    }

    /// Parse a script. YAML is a superset of JSON, so both are accepted.
    pub fn parse(content: &str) -> Result<Self> {
        let script: Self = serde_yaml::from_str(content).map_err(|e| WiggleError::Parse {
            message: format!("Invalid script: {}", e),
            help: Some("Events are down, move, up, leave, clear, pencil, background, wait".to_string()),
        })?;
        script.validate()?;
        Ok(script)
    }

    fn validate(&self) -> Result<()> {
        for (i, event) in self.events.iter().enumerate() {
            let (x, y) = match *event {
                ScriptEvent::Down { x, y, .. } | ScriptEvent::Move { x, y } => (x, y),
                _ => continue,
            };
            if !x.is_finite() || !y.is_finite() {
                return Err(WiggleError::Parse {
                    message: format!("Invalid script: events[{}] has position ({}, {})", i, x, y),
                    help: Some("Coordinates must be finite numbers".to_string()),
                });
            }
        }
        Ok(())
    }
}

/// Feeds script events to a controller against a simulated clock.
pub struct Replayer {
    clock: Duration,
}

impl Replayer {
    pub fn new() -> Self {
        Self {
            clock: Duration::ZERO,
        }
    }

    /// Simulated time elapsed so far.
    pub fn clock(&self) -> Duration {
        self.clock
    }

    pub fn run(&mut self, script: &Script, controller: &mut Controller) {
        if let Some(pencil) = script.pencil {
            controller.set_pencil(pencil);
        }
        if let Some(background) = script.background {
            controller.set_background(background);
        }
        for event in &script.events {
            self.apply(event, controller);
        }
    }

    pub fn apply(&mut self, event: &ScriptEvent, controller: &mut Controller) {
        match *event {
            ScriptEvent::Down { x, y, button } => {
                controller.on_pointer_down(Point::new(x, y), button.into())
            }
            ScriptEvent::Move { x, y } => controller.on_pointer_move(Point::new(x, y)),
            ScriptEvent::Up => controller.on_pointer_up(),
            ScriptEvent::Leave => controller.on_pointer_leave(),
            ScriptEvent::Clear => controller.clear(),
            ScriptEvent::Pencil(colour) => controller.set_pencil(colour),
            ScriptEvent::Background(colour) => controller.set_background(colour),
            ScriptEvent::Wait(ms) => {
                let end = self.clock + Duration::from_millis(ms);
                while self.clock < end {
                    self.clock = (self.clock + DISPLAY_FRAME).min(end);
                    controller.on_frame(self.clock);
                }
            }
        }
    }
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CanvasConfig;
    use pretty_assertions::assert_eq;

    const SCRIPT: &str = r##"
pencil: "#FF0000"
background: "#000000"
events:
  - down: { x: 0, y: 0 }
  - move: { x: 10, y: 0 }
  - up
  - move: { x: 20, y: 0 }
  - down: { x: 5, y: 5, button: secondary }
  - wait: 200
"##;

    fn controller() -> Controller {
        let config = CanvasConfig {
            width: 24,
            height: 24,
            ..CanvasConfig::default()
        };
        Controller::with_seed(&config, 9)
    }

    #[test]
    fn test_parse_yaml_script() {
        let script = Script::parse(SCRIPT).unwrap();

        assert_eq!(script.pencil, Some(Colour::rgb(255, 0, 0)));
        assert_eq!(script.events.len(), 6);
        assert_eq!(
            script.events[0],
            ScriptEvent::Down {
                x: 0.0,
                y: 0.0,
                button: ScriptButton::Primary
            }
        );
        assert_eq!(script.events[2], ScriptEvent::Up);
        assert_eq!(script.events[5], ScriptEvent::Wait(200));
    }

    #[test]
    fn test_parse_json_script() {
        let json = r##"{"events": [{"down": {"x": 1, "y": 2}}, "clear", {"pencil": "#00FF00"}]}"##;
        let script = Script::parse(json).unwrap();

        assert_eq!(script.events.len(), 3);
        assert_eq!(script.events[1], ScriptEvent::Clear);
        assert_eq!(script.events[2], ScriptEvent::Pencil(Colour::rgb(0, 255, 0)));
    }

    #[test]
    fn test_parse_rejects_unknown_event() {
        assert!(Script::parse("events:\n  - jump\n").is_err());
    }

    #[test]
    fn test_parse_rejects_non_finite_position() {
        let err = Script::parse("events:\n  - down: { x: 0, y: 0 }\n  - move: { x: .inf, y: 0 }\n")
            .unwrap_err();
        assert!(matches!(err, WiggleError::Parse { .. }));
    }

    #[test]
    fn test_parse_far_move_script() {
        let script =
            Script::parse("events:\n  - down: { x: 0, y: 0 }\n  - move: { x: 4000000, y: 0 }\n")
                .unwrap();
        let mut c = controller();
        Replayer::new().run(&script, &mut c);

        // Clamped to the 24px surface.
        assert_eq!(c.pixels().len(), 13);
    }

    #[test]
    fn test_replay_draws_stroke() {
        let script = Script::parse(SCRIPT).unwrap();
        let mut c = controller();
        let mut replayer = Replayer::new();

        replayer.run(&script, &mut c);

        // One pixel on down, five along the drag; the rest is ignored.
        assert_eq!(c.pixels().len(), 6);
        assert!(c.pixels().iter().all(|p| p.colour == Colour::rgb(255, 0, 0)));
        assert_eq!(c.draw_state().background, Colour::BLACK);
        assert_eq!(replayer.clock(), Duration::from_millis(200));
        assert!(!c.surface().is_blank());
    }

    #[test]
    fn test_wait_runs_animation() {
        let mut c = controller();
        let mut replayer = Replayer::new();
        replayer.apply(
            &ScriptEvent::Down {
                x: 12.0,
                y: 12.0,
                button: ScriptButton::Primary,
            },
            &mut c,
        );
        replayer.apply(&ScriptEvent::Wait(100), &mut c);

        // Baseline at 16ms, single repaint at 80ms.
        assert_eq!(c.pixels()[0].current_frame(), 1);
    }
}
