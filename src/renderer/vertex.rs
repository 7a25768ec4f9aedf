//! Vertex types for 2D line rendering

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Byte stride of one vertex in an upload buffer
    pub const STRIDE: usize = std::mem::size_of::<Vertex>();
}

/// Colors for debug drawing
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BODY: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const CONTACT_POINT: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    pub const CONTACT_NORMAL: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
}
