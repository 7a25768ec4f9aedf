//! Immediate-mode draw interface and a recording implementation
//!
//! The harness speaks in begin/vertex/end batches with a current transform,
//! color and point size. A real backend turns these into GPU draws;
//! [`CommandRecorder`] keeps them as data for headless runs and tests.

use glam::{Affine2, Mat4, Vec2};
use serde::Serialize;

use super::vertex::{Vertex, colors};

/// How a batch of vertices is assembled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Primitive {
    Points,
    /// Independent segments, two vertices each
    Lines,
    /// Closed outline through every vertex
    LineLoop,
}

/// Primitive drawing operations consumed by the frame renderer
pub trait DrawBackend {
    /// Set once at startup
    fn set_projection(&mut self, projection: Mat4);
    fn clear(&mut self, color: [f32; 4]);
    /// Model transform for subsequent vertices
    fn set_transform(&mut self, transform: Affine2);
    fn set_color(&mut self, color: [f32; 4]);
    fn set_point_size(&mut self, size: f32);
    fn begin(&mut self, primitive: Primitive);
    fn vertex(&mut self, position: Vec2);
    fn end(&mut self);
    /// Finish the frame and show it
    fn present(&mut self);
}

/// Pixel-space orthographic projection with y growing downward
pub fn screen_projection(width: f32, height: f32) -> Mat4 {
    Mat4::orthographic_rh_gl(0.0, width, height, 0.0, -1.0, 1.0)
}

/// One begin/end batch as issued
#[derive(Debug, Clone, Serialize)]
pub struct DrawBatch {
    pub primitive: Primitive,
    pub transform: Affine2,
    pub point_size: f32,
    /// Model-space vertices
    pub vertices: Vec<Vertex>,
}

impl DrawBatch {
    /// Vertex positions with the batch transform applied
    pub fn world_positions(&self) -> impl Iterator<Item = Vec2> + '_ {
        self.vertices
            .iter()
            .map(|v| self.transform.transform_point2(Vec2::from(v.position)))
    }

    /// Raw vertex data ready for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RecordedFrame {
    pub clear_color: [f32; 4],
    pub batches: Vec<DrawBatch>,
}

impl Default for RecordedFrame {
    fn default() -> Self {
        Self {
            clear_color: colors::BACKGROUND,
            batches: Vec::new(),
        }
    }
}

impl RecordedFrame {
    pub fn vertex_count(&self) -> usize {
        self.batches.iter().map(|b| b.vertices.len()).sum()
    }

    pub fn batches_of(&self, primitive: Primitive) -> impl Iterator<Item = &DrawBatch> {
        self.batches.iter().filter(move |b| b.primitive == primitive)
    }

    /// All batches packed back to back
    pub fn to_vertex_buffer(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.vertex_count() * Vertex::STRIDE);
        for batch in &self.batches {
            bytes.extend_from_slice(batch.as_bytes());
        }
        bytes
    }
}

/// Backend that stores draw calls instead of executing them
pub struct CommandRecorder {
    projection: Mat4,
    transform: Affine2,
    color: [f32; 4],
    point_size: f32,
    open: Option<DrawBatch>,
    frame: RecordedFrame,
    presented: Option<RecordedFrame>,
    frames_presented: u64,
}

impl Default for CommandRecorder {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRecorder {
    pub fn new() -> Self {
        Self {
            projection: Mat4::IDENTITY,
            transform: Affine2::IDENTITY,
            color: colors::BODY,
            point_size: 1.0,
            open: None,
            frame: RecordedFrame::default(),
            presented: None,
            frames_presented: 0,
        }
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> Option<&RecordedFrame> {
        self.presented.as_ref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }
}

impl DrawBackend for CommandRecorder {
    fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn clear(&mut self, color: [f32; 4]) {
        self.frame = RecordedFrame {
            clear_color: color,
            batches: Vec::new(),
        };
    }

    fn set_transform(&mut self, transform: Affine2) {
        self.transform = transform;
    }

    fn set_color(&mut self, color: [f32; 4]) {
        self.color = color;
    }

    fn set_point_size(&mut self, size: f32) {
        self.point_size = size;
    }

    fn begin(&mut self, primitive: Primitive) {
        if self.open.is_some() {
            log::warn!("begin({primitive:?}) while a batch is open; closing it");
            self.end();
        }
        self.open = Some(DrawBatch {
            primitive,
            transform: self.transform,
            point_size: self.point_size,
            vertices: Vec::new(),
        });
    }

    fn vertex(&mut self, position: Vec2) {
        match self.open.as_mut() {
            Some(batch) => batch.vertices.push(Vertex::new(position.x, position.y, self.color)),
            None => log::warn!("vertex outside begin/end dropped"),
        }
    }

    fn end(&mut self) {
        match self.open.take() {
            Some(batch) => self.frame.batches.push(batch),
            None => log::warn!("end without begin"),
        }
    }

    fn present(&mut self) {
        if self.open.is_some() {
            self.end();
        }
        self.presented = Some(std::mem::take(&mut self.frame));
        self.frames_presented += 1;
    }
}
