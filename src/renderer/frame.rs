//! Per-frame drawing of engine state
//!
//! Bodies are culled against the viewport before any draw work is issued.
//! Visible ones are drawn as white outlines; contacts get a red marker and
//! a short green normal on top.

use glam::{Affine2, Vec2};
use serde::Serialize;

use super::backend::{DrawBackend, Primitive};
use super::shapes::tessellate_circle;
use super::vertex::colors;
use super::visibility::is_visible;
use crate::consts::{CONTACT_NORMAL_LENGTH, CONTACT_POINT_SIZE};
use crate::sim::{Aabb, Body, Manifold, PhysicsEngine, Shape};

/// Counters for a single rendered frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub drawn: usize,
    pub culled: usize,
    /// Bodies whose outline could not be generated
    pub skipped: usize,
    pub contact_points: usize,
}

pub struct FrameRenderer {
    viewport: Aabb,
    contact_normal_length: f32,
    contact_point_size: f32,
}

impl FrameRenderer {
    /// Renderer for a `width` x `height` pixel viewport anchored at the origin
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            viewport: Aabb::new(Vec2::ZERO, Vec2::new(width, height)),
            contact_normal_length: CONTACT_NORMAL_LENGTH,
            contact_point_size: CONTACT_POINT_SIZE,
        }
    }

    pub fn with_contact_overlay(mut self, normal_length: f32, point_size: f32) -> Self {
        self.contact_normal_length = normal_length;
        self.contact_point_size = point_size;
        self
    }

    /// Draw every visible body, then the contact overlays. Does not present.
    pub fn render<E, B>(&self, engine: &E, backend: &mut B) -> FrameStats
    where
        E: PhysicsEngine + ?Sized,
        B: DrawBackend + ?Sized,
    {
        let mut stats = FrameStats::default();
        backend.clear(colors::BACKGROUND);

        for body in engine.bodies() {
            if !is_visible(&body.world_aabb(), &self.viewport) {
                log::trace!("Culled {:?}", body.handle);
                stats.culled += 1;
                continue;
            }
            if self.draw_body(body, backend) {
                stats.drawn += 1;
            } else {
                stats.skipped += 1;
            }
        }

        backend.set_transform(Affine2::IDENTITY);
        stats.contact_points = self.draw_contacts(engine.contacts(), backend);
        stats
    }

    fn draw_body<B: DrawBackend + ?Sized>(&self, body: &Body, backend: &mut B) -> bool {
        match &body.shape {
            Shape::Circle(circle) => {
                let ring = match tessellate_circle(circle.radius()) {
                    Ok(ring) => ring,
                    Err(e) => {
                        log::warn!("Skipping {:?}: {}", body.handle, e);
                        return false;
                    }
                };
                backend.set_transform(body.transform.to_affine());
                backend.set_color(colors::BODY);
                backend.begin(Primitive::LineLoop);
                // Leading center vertex draws a spoke that shows rotation
                backend.vertex(Vec2::ZERO);
                for p in ring {
                    backend.vertex(p);
                }
                backend.end();
            }
            Shape::Polygon(polygon) => {
                backend.set_transform(body.transform.to_affine());
                backend.set_color(colors::BODY);
                backend.begin(Primitive::LineLoop);
                for v in polygon.vertices() {
                    backend.vertex(*v);
                }
                backend.end();
            }
        }
        true
    }

    fn draw_contacts<B: DrawBackend + ?Sized>(&self, contacts: &[Manifold], backend: &mut B) -> usize {
        if contacts.is_empty() {
            return 0;
        }

        let mut count = 0;
        backend.set_point_size(self.contact_point_size);
        backend.set_color(colors::CONTACT_POINT);
        backend.begin(Primitive::Points);
        for p in contacts.iter().flat_map(|m| &m.contact_points) {
            backend.vertex(*p);
            count += 1;
        }
        backend.end();
        backend.set_point_size(1.0);

        backend.set_color(colors::CONTACT_NORMAL);
        backend.begin(Primitive::Lines);
        for manifold in contacts {
            let tip = manifold.normal * self.contact_normal_length;
            for p in &manifold.contact_points {
                backend.vertex(*p);
                backend.vertex(*p + tip);
            }
        }
        backend.end();
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{GRAVITY, SIM_DT};
    use crate::renderer::backend::CommandRecorder;
    use crate::sim::{Material, Polygon, Scene};

    fn scene() -> Scene {
        Scene::new(SIM_DT as f32, GRAVITY)
    }

    fn place(scene: &mut Scene, shape: Shape, pos: Vec2, orientation: f32) {
        let h = scene.add_body(shape, Material::Rock);
        let body = scene.body_mut(h).unwrap();
        body.transform.position = pos;
        body.transform.orientation = orientation;
    }

    fn draw(scene: &Scene) -> (FrameStats, crate::renderer::RecordedFrame) {
        let renderer = FrameRenderer::new(800.0, 600.0);
        let mut rec = CommandRecorder::new();
        let stats = renderer.render(scene, &mut rec);
        rec.present();
        (stats, rec.last_frame().unwrap().clone())
    }

    #[test]
    fn test_circle_outline_has_center_spoke() {
        let mut s = scene();
        place(&mut s, Shape::circle(10.0).unwrap(), Vec2::new(100.0, 100.0), 0.0);

        let (stats, frame) = draw(&s);
        assert_eq!(stats.drawn, 1);
        let batch = &frame.batches[0];
        assert_eq!(batch.primitive, Primitive::LineLoop);
        assert_eq!(batch.vertices.len(), 64);
        assert_eq!(batch.vertices[0].position, [0.0, 0.0]);
        assert_eq!(batch.vertices[0].color, colors::BODY);

        let world: Vec<Vec2> = batch.world_positions().collect();
        assert!((world[0] - Vec2::new(100.0, 100.0)).length() < 1e-4);
        assert!((world[1] - Vec2::new(110.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn test_polygon_drawn_with_rotation() {
        let mut s = scene();
        let square = Polygon::from_corners(Vec2::splat(-5.0), Vec2::splat(5.0)).unwrap();
        place(&mut s, Shape::Polygon(square), Vec2::new(200.0, 200.0), std::f32::consts::PI);

        let (_, frame) = draw(&s);
        let batch = &frame.batches[0];
        assert_eq!(batch.vertices.len(), 4);
        let first = batch.world_positions().next().unwrap();
        // (-5, -5) rotated by π lands at (5, 5)
        assert!((first - Vec2::new(205.0, 205.0)).length() < 1e-3);
    }

    #[test]
    fn test_offscreen_bodies_issue_no_draws() {
        let mut s = scene();
        place(&mut s, Shape::circle(20.0).unwrap(), Vec2::new(-100.0, 300.0), 0.0);
        place(&mut s, Shape::circle(20.0).unwrap(), Vec2::new(400.0, 2000.0), 0.0);
        place(&mut s, Shape::circle(20.0).unwrap(), Vec2::new(400.0, 300.0), 0.0);
        // Edge-touching: AABB max.x == 0
        place(&mut s, Shape::circle(20.0).unwrap(), Vec2::new(-20.0, 300.0), 0.0);

        let (stats, frame) = draw(&s);
        assert_eq!(stats.culled, 2);
        assert_eq!(stats.drawn, 2);
        assert_eq!(frame.batches_of(Primitive::LineLoop).count(), 2);
    }

    #[test]
    fn test_untessellatable_body_skipped_rest_drawn() {
        let mut s = scene();
        // Segment count for r = 20 000 is far above the tessellation limit
        place(&mut s, Shape::circle(20_000.0).unwrap(), Vec2::new(400.0, 300.0), 0.0);
        place(&mut s, Shape::circle(10.0).unwrap(), Vec2::new(100.0, 100.0), 0.0);

        let (stats, frame) = draw(&s);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.drawn, 1);
        assert_eq!(stats.culled, 0);
        assert_eq!(frame.batches.len(), 1);

        let batch = &frame.batches[0];
        assert_eq!(batch.primitive, Primitive::LineLoop);
        assert_eq!(batch.vertices.len(), 64);
        assert_eq!(batch.transform, Affine2::from_translation(Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn test_contact_overlay() {
        let mut s = scene();
        s.set_contacts(vec![
            Manifold {
                normal: Vec2::new(0.0, -1.0),
                contact_points: vec![Vec2::new(10.0, 10.0), Vec2::new(20.0, 10.0)],
            },
            Manifold {
                normal: Vec2::X,
                contact_points: vec![Vec2::new(50.0, 60.0)],
            },
        ]);

        let (stats, frame) = draw(&s);
        assert_eq!(stats.contact_points, 3);

        let points: Vec<_> = frame.batches_of(Primitive::Points).collect();
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].vertices.len(), 3);
        assert_eq!(points[0].point_size, CONTACT_POINT_SIZE);
        assert_eq!(points[0].transform, Affine2::IDENTITY);
        assert_eq!(points[0].vertices[0].color, colors::CONTACT_POINT);

        let lines: Vec<_> = frame.batches_of(Primitive::Lines).collect();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].point_size, 1.0);
        let v = &lines[0].vertices;
        assert_eq!(v.len(), 6);
        assert_eq!(v[0].position, [10.0, 10.0]);
        assert_eq!(v[1].position, [10.0, 0.0]);
        assert_eq!(v[5].position, [60.0, 60.0]);
        assert_eq!(v[5].color, colors::CONTACT_NORMAL);
    }

    #[test]
    fn test_no_contacts_no_overlay_batches() {
        let s = scene();
        let (stats, frame) = draw(&s);
        assert_eq!(stats, FrameStats::default());
        assert!(frame.batches.is_empty());
    }
}
