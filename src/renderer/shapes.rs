//! Outline generation for 2D primitives

use glam::Vec2;
use std::f32::consts::TAU;

use crate::consts::MAX_CIRCLE_SEGMENTS;
use crate::error::{Error, Result};

/// Segment count for a circle of `radius`: roughly one segment per pixel of
/// circumference, `floor(2πr + 1)`
pub fn segment_count(radius: f32) -> Result<usize> {
    if !(radius.is_finite() && radius > 0.0) {
        return Err(Error::invalid(format!("circle radius must be > 0, got {radius}")));
    }
    let n = (TAU * radius + 1.0).floor();
    if n > MAX_CIRCLE_SEGMENTS as f32 {
        return Err(Error::invalid(format!(
            "radius {radius} needs {n} segments, limit is {MAX_CIRCLE_SEGMENTS}"
        )));
    }
    Ok(n as usize)
}

/// Closed outline of a circle centered at the origin, starting at `(r, 0)`.
///
/// Points are produced by repeatedly rotating the previous point by `2π/n`:
/// step along the tangent scaled by `tan θ`, then pull back by `cos θ`. Only
/// one `cos`/`tan` pair is evaluated per call. Error accumulates slowly with
/// `n`; fine for drawing, not for geometry.
///
/// The last point connects back to the first implicitly (line loop).
pub fn tessellate_circle(radius: f32) -> Result<Vec<Vec2>> {
    let n = segment_count(radius)?;
    let theta = TAU / n as f32;
    let c = theta.cos();
    let t = theta.tan();

    let mut points = Vec::with_capacity(n);
    let mut p = Vec2::new(radius, 0.0);
    for _ in 0..n {
        points.push(p);
        p = (p + p.perp() * t) * c;
    }
    Ok(points)
}
