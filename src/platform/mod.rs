//! Platform abstraction layer
//!
//! The run loop pulls from a [`Platform`] instead of registering callbacks:
//! - Input events for the frame
//! - Elapsed real time
//! - Shutdown signal

pub mod input;
pub mod script;

pub use input::{InputEvent, PointerButton};
pub use script::{Script, ScriptFrame, ScriptedPlatform};

/// Source of frames for [`crate::Harness::run`]
pub trait Platform {
    /// Drain the input events pending for the next frame
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Seconds elapsed for the frame returned by the last `poll_events`
    fn frame_time(&mut self) -> f64;

    fn should_close(&self) -> bool;
}
