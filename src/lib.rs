//! pe2d-harness - A visualization harness for a 2D rigid-body engine
//!
//! Core modules:
//! - `sim`: Fixed-timestep clock, shapes, bodies and the input-driven spawner
//! - `renderer`: Circle tessellation, visibility culling and frame drawing
//! - `platform`: Input events and the frame source driving the run loop
//! - `app`: The single-threaded run loop tying everything together
//! - `settings`: JSON-backed configuration

pub mod app;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use app::{FrameReport, Harness, RunSummary};
pub use error::{Error, Result};
pub use settings::Settings;

/// Harness configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Accumulated real time is capped here; anything above is dropped
    pub const MAX_ACCUMULATED: f64 = 1.0;
    /// Upper bound on ticks a single frame may run (cap / step)
    pub const MAX_TICKS_PER_FRAME: u32 = 10_000;

    /// Window dimensions in pixels (also the visible world rectangle)
    pub const WINDOW_WIDTH: f32 = 800.0;
    pub const WINDOW_HEIGHT: f32 = 600.0;

    /// Downward gravity in pixels/s² (y grows downward on screen)
    pub const GRAVITY: Vec2 = Vec2::new(0.0, 98.0);

    /// Length of the debug segment drawn along each contact normal
    pub const CONTACT_NORMAL_LENGTH: f32 = 10.0;
    /// Point size used for contact markers
    pub const CONTACT_POINT_SIZE: f32 = 4.0;

    /// Upper bound on circle tessellation (radius ~10430 px)
    pub const MAX_CIRCLE_SEGMENTS: usize = 65_536;
    /// Upper bound on spawned polygon vertex count
    pub const MAX_POLYGON_VERTICES: usize = 1_024;

    /// Primary-button circle radius range [min, max)
    pub const CIRCLE_RADIUS_MIN: f32 = 20.0;
    pub const CIRCLE_RADIUS_MAX: f32 = 80.0;

    /// Secondary-button polygon: 3 + up to 40 extra vertices
    pub const POLYGON_BASE_VERTICES: usize = 3;
    pub const POLYGON_EXTRA_VERTICES: usize = 40;
    /// Per-vertex half-extent range [min, max)
    pub const HALF_EXTENT_MIN: f32 = 50.0;
    pub const HALF_EXTENT_MAX: f32 = 100.0;
}
