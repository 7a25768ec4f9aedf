//! Drawing side of the harness
//!
//! Produces outline geometry and issues it through a [`DrawBackend`]; the
//! backend decides how (or whether) it reaches the screen.

pub mod backend;
pub mod frame;
pub mod shapes;
pub mod vertex;
pub mod visibility;

pub use backend::{CommandRecorder, DrawBackend, DrawBatch, Primitive, RecordedFrame, screen_projection};
pub use frame::{FrameRenderer, FrameStats};
pub use shapes::{segment_count, tessellate_circle};
pub use vertex::Vertex;
pub use visibility::is_visible;
