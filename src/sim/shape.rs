//! Collision shapes handed to the physics engine
//!
//! Shapes are validated at construction, so any `Shape` value in the system
//! has a positive radius or at least three finite vertices.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use crate::error::{Error, Result};

/// A circle centered at the body origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::invalid(format!("circle radius must be > 0, got {radius}")));
        }
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }
}

/// A closed outline in body-local coordinates.
///
/// Self-intersection and zero area are not checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    vertices: Vec<Vec2>,
}

impl Polygon {
    pub fn new(vertices: Vec<Vec2>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::invalid(format!(
                "polygon needs at least 3 vertices, got {}",
                vertices.len()
            )));
        }
        if !vertices.iter().all(|v| v.is_finite()) {
            return Err(Error::invalid("polygon vertices must be finite"));
        }
        Ok(Self { vertices })
    }

    /// Axis-aligned box outline from two opposite corners
    pub fn from_corners(a: Vec2, b: Vec2) -> Result<Self> {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(vec![
            min,
            Vec2::new(max.x, min.y),
            max,
            Vec2::new(min.x, max.y),
        ])
    }

    #[inline]
    pub fn vertices(&self) -> &[Vec2] {
        &self.vertices
    }
}

/// Shape variants the harness knows how to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Polygon(Polygon),
}

impl Shape {
    pub fn circle(radius: f32) -> Result<Self> {
        Circle::new(radius).map(Shape::Circle)
    }

    pub fn polygon(vertices: Vec<Vec2>) -> Result<Self> {
        Polygon::new(vertices).map(Shape::Polygon)
    }

    /// Bounding box in body space, rotated by `orientation` but not translated
    pub fn aabb(&self, orientation: f32) -> Aabb {
        match self {
            Shape::Circle(c) => Aabb::from_center_half_extents(Vec2::ZERO, Vec2::splat(c.radius)),
            Shape::Polygon(p) => {
                let rot = Vec2::from_angle(orientation);
                // Constructor guarantees at least three vertices
                Aabb::from_points(p.vertices.iter().map(|v| rot.rotate(*v))).unwrap_or_default()
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Polygon(_) => "polygon",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_circle_rejects_bad_radius() {
        assert!(Circle::new(0.0).is_err());
        assert!(Circle::new(-1.0).is_err());
        assert!(Circle::new(f32::NAN).is_err());
        assert!(Circle::new(f32::INFINITY).is_err());
        assert_eq!(Circle::new(30.0).unwrap().radius(), 30.0);
    }

    #[test]
    fn test_polygon_needs_three_vertices() {
        assert!(Polygon::new(vec![]).is_err());
        assert!(Polygon::new(vec![Vec2::ZERO, Vec2::X]).is_err());
        assert!(Polygon::new(vec![Vec2::ZERO, Vec2::X, Vec2::Y]).is_ok());
        assert!(Polygon::new(vec![Vec2::ZERO, Vec2::X, Vec2::new(f32::NAN, 0.0)]).is_err());
    }

    #[test]
    fn test_from_corners_box() {
        let p = Polygon::from_corners(Vec2::new(300.0, 10.0), Vec2::new(-300.0, -10.0)).unwrap();
        assert_eq!(p.vertices().len(), 4);
        assert_eq!(p.vertices()[0], Vec2::new(-300.0, -10.0));
        assert_eq!(p.vertices()[2], Vec2::new(300.0, 10.0));
    }

    #[test]
    fn test_circle_aabb_ignores_orientation() {
        let s = Shape::circle(10.0).unwrap();
        assert_eq!(s.aabb(0.0), s.aabb(1.3));
        assert_eq!(s.aabb(0.0).min, Vec2::splat(-10.0));
    }

    #[test]
    fn test_polygon_aabb_follows_rotation() {
        let s = Shape::Polygon(Polygon::from_corners(Vec2::new(-300.0, -10.0), Vec2::new(300.0, 10.0)).unwrap());
        let flat = s.aabb(0.0);
        assert_eq!(flat.max, Vec2::new(300.0, 10.0));

        let upright = s.aabb(FRAC_PI_2);
        assert!((upright.max.x - 10.0).abs() < 1e-3);
        assert!((upright.max.y - 300.0).abs() < 1e-3);
    }
}
