//! Viewport culling

use crate::sim::Aabb;

/// True if any part of `shape` can land inside `viewport`.
///
/// Touching edges count as visible; a partially visible shape is never culled.
#[inline]
pub fn is_visible(shape: &Aabb, viewport: &Aabb) -> bool {
    shape.overlaps(viewport)
}
