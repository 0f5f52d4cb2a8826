use std::path::Path;

use serde::Deserialize;

use crate::controller::GestureEvent;
use crate::error::{AppError, AppResult};
use crate::geometry::ContainerBounds;

/// Recorded gesture session replayed by the `cropme` binary.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GestureScript {
    pub container: ContainerBounds,
    #[serde(default)]
    pub events: Vec<GestureEvent>,
}

impl GestureScript {
    pub fn parse(contents: &str) -> AppResult<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| AppError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_events() {
        let script = GestureScript::parse(
            r#"{
                "container": {"width": 1080, "height": 1920},
                "events": [
                    {"event": "touch_down", "x": 10.5, "y": 20},
                    {"event": "moved", "dx": 0, "dy": -4},
                    {"event": "flinged", "vx": 100, "vy": 0},
                    {"event": "scaled", "factor": 1.5},
                    {"event": "scale_ended"},
                    {"event": "move_ended"},
                    {"event": "touch_up"}
                ]
            }"#,
        )
        .expect("script should parse");

        assert_eq!(script.container, ContainerBounds::new(1080.0, 1920.0));
        assert_eq!(
            script.events,
            vec![
                GestureEvent::TouchDown { x: 10.5, y: 20.0 },
                GestureEvent::Moved { dx: 0.0, dy: -4.0 },
                GestureEvent::Flinged { vx: 100.0, vy: 0.0 },
                GestureEvent::Scaled { factor: 1.5 },
                GestureEvent::ScaleEnded,
                GestureEvent::MoveEnded,
                GestureEvent::TouchUp,
            ]
        );
    }

    #[test]
    fn events_default_to_empty() {
        let script = GestureScript::parse(r#"{"container": {"width": 10, "height": 10}}"#)
            .expect("script should parse");
        assert!(script.events.is_empty());
    }

    #[test]
    fn unknown_event_is_rejected() {
        let err = GestureScript::parse(
            r#"{"container": {"width": 10, "height": 10}, "events": [{"event": "rotate"}]}"#,
        )
        .expect_err("unknown event should fail");
        assert!(matches!(err, AppError::Script(_)));
    }
}
