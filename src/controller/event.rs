use serde::Deserialize;

use crate::geometry::CropRect;
use crate::handles::DragCorner;

/// Semantic gestures, already decoded from raw touch input, in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GestureEvent {
    TouchDown { x: f32, y: f32 },
    Moved { dx: f32, dy: f32 },
    Flinged { vx: f32, vy: f32 },
    MoveEnded,
    TouchUp,
    Scaled { factor: f32 },
    ScaleEnded,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    DragStarted(DragCorner),
    PanStarted,
    Panned,
    Flung,
    Scaled,
    Resized(CropRect),
    Vetoed,
    Settled,
    Ignored,
}
