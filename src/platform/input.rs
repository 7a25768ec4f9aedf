//! Input events delivered to the run loop

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Pointer button designator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerButton {
    /// Usually the left mouse button
    Primary,
    /// Usually the right mouse button
    Secondary,
    Middle,
    Other(u16),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    /// Button pressed at a position in window pixels
    PointerDown { button: PointerButton, position: Vec2 },
    /// Window asked to close; the loop finishes the current frame and stops
    CloseRequested,
}

impl InputEvent {
    pub fn pointer_down(button: PointerButton, x: f32, y: f32) -> Self {
        InputEvent::PointerDown {
            button,
            position: Vec2::new(x, y),
        }
    }
}
