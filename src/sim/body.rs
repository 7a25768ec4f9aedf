//! Bodies, contacts and the engine interface consumed by the harness
//!
//! The harness never solves physics itself. It adds bodies, asks the engine
//! to step, and reads bodies and contacts back for drawing.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::shape::Shape;

/// Stable identifier returned by [`PhysicsEngine::add_body`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

/// Material tag passed through to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Material {
    #[default]
    Rock,
    Metal,
    Wood,
}

impl Material {
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Rock => "rock",
            Material::Metal => "metal",
            Material::Wood => "wood",
        }
    }
}

/// Position and rotation of a body in world space
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec2,
    /// Radians, counter-clockwise in math coordinates
    pub orientation: f32,
}

impl Transform {
    pub fn new(position: Vec2, orientation: f32) -> Self {
        Self {
            position,
            orientation,
        }
    }

    /// Model matrix: rotate about the body origin, then translate
    #[inline]
    pub fn to_affine(&self) -> Affine2 {
        Affine2::from_angle_translation(self.orientation, self.position)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub handle: BodyHandle,
    pub shape: Shape,
    pub material: Material,
    pub transform: Transform,
    pub linear_velocity: Vec2,
    pub is_static: bool,
}

impl Body {
    pub fn new(handle: BodyHandle, shape: Shape, material: Material) -> Self {
        Self {
            handle,
            shape,
            material,
            transform: Transform::default(),
            linear_velocity: Vec2::ZERO,
            is_static: false,
        }
    }

    /// Pin the body in place; the engine stops integrating it
    pub fn set_static(&mut self) {
        self.is_static = true;
        self.linear_velocity = Vec2::ZERO;
    }

    /// Shape bounds under the current orientation, offset by position
    #[inline]
    pub fn world_aabb(&self) -> Aabb {
        self.shape
            .aabb(self.transform.orientation)
            .offset(self.transform.position)
    }
}

/// A contact between two bodies as reported by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifold {
    /// Unit contact normal
    pub normal: Vec2,
    pub contact_points: Vec<Vec2>,
}

/// The slice of a rigid-body engine the harness depends on
pub trait PhysicsEngine {
    /// Register a new dynamic body at the origin
    fn add_body(&mut self, shape: Shape, material: Material) -> BodyHandle;

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body>;

    /// Advance the simulation by exactly one fixed tick
    fn step(&mut self);

    /// Snapshot of all bodies (order is not guaranteed stable)
    fn bodies(&self) -> &[Body];

    fn contacts(&self) -> &[Manifold];
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_rotates_then_translates() {
        let t = Transform::new(Vec2::new(100.0, 50.0), FRAC_PI_2);
        let p = t.to_affine().transform_point2(Vec2::new(10.0, 0.0));
        assert!((p - Vec2::new(100.0, 60.0)).length() < 1e-4);
    }

    #[test]
    fn test_set_static_clears_velocity() {
        let mut body = Body::new(BodyHandle(0), Shape::circle(5.0).unwrap(), Material::Wood);
        body.linear_velocity = Vec2::new(3.0, 4.0);
        body.set_static();
        assert!(body.is_static);
        assert_eq!(body.linear_velocity, Vec2::ZERO);
    }

    #[test]
    fn test_world_aabb_offsets_by_position() {
        let mut body = Body::new(BodyHandle(1), Shape::circle(30.0).unwrap(), Material::Wood);
        body.transform.position = Vec2::new(440.0, 400.0);
        let aabb = body.world_aabb();
        assert_eq!(aabb.min, Vec2::new(410.0, 370.0));
        assert_eq!(aabb.max, Vec2::new(470.0, 430.0));
    }
}
