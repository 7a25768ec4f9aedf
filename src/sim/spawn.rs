//! Input-driven body spawning
//!
//! Primary clicks drop a random circle, secondary clicks drop a random
//! irregular polygon. Sampling is split from engine access so requests can be
//! inspected without an engine.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::f32::consts::TAU;

use super::body::{BodyHandle, Material, PhysicsEngine, Transform};
use super::rng::RandomSource;
use super::shape::Shape;
use crate::consts::*;
use crate::error::{Error, Result};
use crate::platform::PointerButton;

/// Sampling ranges for spawned geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    /// Circle radius range [min, max)
    pub circle_radius: [f32; 2],
    /// Minimum polygon vertex count
    pub polygon_base_vertices: usize,
    /// Vertex count is drawn from [base, base + extra)
    pub polygon_extra_vertices: usize,
    /// Per-vertex half-extent range [min, max)
    pub half_extent: [f32; 2],
    pub material: Material,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            circle_radius: [CIRCLE_RADIUS_MIN, CIRCLE_RADIUS_MAX],
            polygon_base_vertices: POLYGON_BASE_VERTICES,
            polygon_extra_vertices: POLYGON_EXTRA_VERTICES,
            half_extent: [HALF_EXTENT_MIN, HALF_EXTENT_MAX],
            material: Material::Rock,
        }
    }
}

impl SpawnConfig {
    /// Reject ranges that could yield a non-positive radius, fewer than three
    /// or more than `MAX_POLYGON_VERTICES` vertices, or an empty sampling range
    pub fn validate(&self) -> Result<()> {
        let [r_min, r_max] = self.circle_radius;
        if !(r_min.is_finite() && r_max.is_finite() && r_min > 0.0 && r_min < r_max) {
            return Err(Error::invalid(format!(
                "circle radius range must satisfy 0 < min < max, got [{r_min}, {r_max})"
            )));
        }
        if self.polygon_base_vertices < 3 {
            return Err(Error::invalid(format!(
                "polygons need at least 3 vertices, base is {}",
                self.polygon_base_vertices
            )));
        }
        if self.polygon_extra_vertices == 0 {
            return Err(Error::invalid("polygon vertex range is empty"));
        }
        match self
            .polygon_base_vertices
            .checked_add(self.polygon_extra_vertices)
        {
            Some(end) if end <= MAX_POLYGON_VERTICES + 1 => {}
            _ => {
                return Err(Error::invalid(format!(
                    "polygon vertex count {} + {} exceeds limit of {MAX_POLYGON_VERTICES}",
                    self.polygon_base_vertices, self.polygon_extra_vertices
                )));
            }
        }
        let [k_min, k_max] = self.half_extent;
        if !(k_min.is_finite() && k_max.is_finite() && k_min > 0.0 && k_min < k_max) {
            return Err(Error::invalid(format!(
                "half-extent range must satisfy 0 < min < max, got [{k_min}, {k_max})"
            )));
        }
        Ok(())
    }
}

/// A body waiting to be handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    pub shape: Shape,
    pub position: Vec2,
    pub orientation: f32,
    pub material: Material,
}

pub struct SpawnController {
    config: SpawnConfig,
    rng: RandomSource,
}

impl SpawnController {
    pub fn new(config: SpawnConfig, rng: RandomSource) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, rng })
    }

    pub fn rng(&self) -> &RandomSource {
        &self.rng
    }

    /// Sample a spawn for `button` at `position`; None for unbound buttons
    pub fn request(&mut self, button: PointerButton, position: Vec2) -> Option<Result<SpawnRequest>> {
        match button {
            PointerButton::Primary => Some(self.circle_request(position)),
            PointerButton::Secondary => Some(self.polygon_request(position)),
            PointerButton::Middle | PointerButton::Other(_) => None,
        }
    }

    fn circle_request(&mut self, position: Vec2) -> Result<SpawnRequest> {
        let [r_min, r_max] = self.config.circle_radius;
        let radius = self.rng.range_f32(r_min..r_max);
        Ok(SpawnRequest {
            shape: Shape::circle(radius)?,
            position,
            orientation: 0.0,
            material: self.config.material,
        })
    }

    fn polygon_request(&mut self, position: Vec2) -> Result<SpawnRequest> {
        let base = self.config.polygon_base_vertices;
        let n = self
            .rng
            .range_usize(base..base + self.config.polygon_extra_vertices);
        let [k_min, k_max] = self.config.half_extent;

        // Half-extent is resampled per vertex, so outlines come out jagged
        // and may self-intersect
        let vertices = (0..n)
            .map(|_| {
                let k = self.rng.range_f32(k_min..k_max);
                Vec2::new(self.rng.range_f32(-k..k), self.rng.range_f32(-k..k))
            })
            .collect();

        let shape = Shape::polygon(vertices)?;
        let orientation = self.rng.range_f32(0.0..TAU);
        Ok(SpawnRequest {
            shape,
            position,
            orientation,
            material: self.config.material,
        })
    }

    /// Handle a pointer press: sample a request and add it to the engine as a
    /// dynamic body. Rejected requests leave the engine untouched.
    pub fn on_input<E: PhysicsEngine>(
        &mut self,
        button: PointerButton,
        position: Vec2,
        engine: &mut E,
    ) -> Result<Option<BodyHandle>> {
        let request = match self.request(button, position) {
            Some(request) => request?,
            None => return Ok(None),
        };
        Ok(Some(spawn(engine, request)))
    }
}

/// Add a validated request to the engine and place it
pub fn spawn<E: PhysicsEngine>(engine: &mut E, request: SpawnRequest) -> BodyHandle {
    let kind = request.shape.kind();
    let handle = engine.add_body(request.shape, request.material);
    if let Some(body) = engine.body_mut(handle) {
        body.transform = Transform::new(request.position, request.orientation);
    }
    log::debug!(
        "Spawned {} {:?} ({}) at ({:.1}, {:.1})",
        kind,
        handle,
        request.material.as_str(),
        request.position.x,
        request.position.y
    );
    handle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Scene;
    use proptest::prelude::*;

    fn controller(seed: u64) -> SpawnController {
        SpawnController::new(SpawnConfig::default(), RandomSource::from_seed(seed)).unwrap()
    }

    #[test]
    fn test_primary_spawns_circle_at_event() {
        let mut scene = Scene::new(SIM_DT as f32, GRAVITY);
        let mut spawner = controller(1);
        let pos = Vec2::new(123.0, 45.0);

        let handle = spawner
            .on_input(PointerButton::Primary, pos, &mut scene)
            .unwrap()
            .unwrap();

        let body = scene.body_mut(handle).unwrap();
        assert_eq!(body.transform.position, pos);
        assert_eq!(body.material, Material::Rock);
        assert!(!body.is_static);
        match &body.shape {
            Shape::Circle(c) => assert!((20.0..80.0).contains(&c.radius())),
            Shape::Polygon(_) => panic!("primary click must spawn a circle"),
        }
    }

    #[test]
    fn test_secondary_spawns_polygon() {
        let mut scene = Scene::new(SIM_DT as f32, GRAVITY);
        let mut spawner = controller(2);
        let pos = Vec2::new(400.0, 100.0);

        let handle = spawner
            .on_input(PointerButton::Secondary, pos, &mut scene)
            .unwrap()
            .unwrap();

        let body = scene.body_mut(handle).unwrap();
        assert_eq!(body.transform.position, pos);
        assert!((0.0..TAU).contains(&body.transform.orientation));
        assert!(matches!(body.shape, Shape::Polygon(_)));
    }

    #[test]
    fn test_middle_button_spawns_nothing() {
        let mut scene = Scene::new(SIM_DT as f32, GRAVITY);
        let mut spawner = controller(3);
        let result = spawner
            .on_input(PointerButton::Middle, Vec2::ZERO, &mut scene)
            .unwrap();
        assert!(result.is_none());
        assert!(scene.bodies().is_empty());
    }

    #[test]
    fn test_same_seed_reproduces_spawns() {
        let mut a = controller(99);
        let mut b = controller(99);
        for button in [PointerButton::Primary, PointerButton::Secondary, PointerButton::Primary] {
            let ra = a.request(button, Vec2::new(10.0, 20.0)).unwrap().unwrap();
            let rb = b.request(button, Vec2::new(10.0, 20.0)).unwrap().unwrap();
            assert_eq!(ra, rb);
        }
    }

    #[test]
    fn test_config_validation() {
        let mut cfg = SpawnConfig::default();
        assert!(cfg.validate().is_ok());

        cfg.circle_radius = [0.0, 10.0];
        assert!(cfg.validate().is_err());

        let mut cfg = SpawnConfig {
            polygon_base_vertices: 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
        cfg.polygon_base_vertices = 3;
        cfg.polygon_extra_vertices = 0;
        assert!(cfg.validate().is_err());

        let cfg = SpawnConfig {
            polygon_extra_vertices: usize::MAX,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(Error::InvalidParameter(_))));
        assert!(SpawnController::new(cfg, RandomSource::from_seed(0)).is_err());

        // Largest allowed range: every sampled count stays within the limit
        let cfg = SpawnConfig {
            polygon_extra_vertices: MAX_POLYGON_VERTICES - POLYGON_BASE_VERTICES + 1,
            ..Default::default()
        };
        let mut spawner = SpawnController::new(cfg, RandomSource::from_seed(5)).unwrap();
        for _ in 0..8 {
            let req = spawner.request(PointerButton::Secondary, Vec2::ZERO).unwrap().unwrap();
            match req.shape {
                Shape::Polygon(p) => assert!(p.vertices().len() <= MAX_POLYGON_VERTICES),
                Shape::Circle(_) => panic!("secondary click must spawn a polygon"),
            }
        }
        let cfg = SpawnConfig {
            polygon_extra_vertices: MAX_POLYGON_VERTICES - POLYGON_BASE_VERTICES + 2,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = SpawnConfig {
            half_extent: [100.0, 50.0],
            ..Default::default()
        };
        assert!(SpawnController::new(cfg, RandomSource::from_seed(0)).is_err());
    }

    proptest! {
        #[test]
        fn prop_circle_radius_in_range(seed in any::<u64>()) {
            let mut spawner = controller(seed);
            let req = spawner.request(PointerButton::Primary, Vec2::ZERO).unwrap().unwrap();
            match req.shape {
                Shape::Circle(c) => prop_assert!(c.radius() >= 20.0 && c.radius() < 80.0),
                Shape::Polygon(_) => prop_assert!(false, "expected circle"),
            }
        }

        #[test]
        fn prop_polygon_within_bounds(seed in any::<u64>()) {
            let mut spawner = controller(seed);
            let req = spawner.request(PointerButton::Secondary, Vec2::ZERO).unwrap().unwrap();
            prop_assert!(req.orientation >= 0.0 && req.orientation < TAU);
            match req.shape {
                Shape::Polygon(p) => {
                    prop_assert!((3..43).contains(&p.vertices().len()));
                    for v in p.vertices() {
                        prop_assert!(v.x.abs() <= 100.0 && v.y.abs() <= 100.0);
                    }
                }
                Shape::Circle(_) => prop_assert!(false, "expected polygon"),
            }
        }
    }
}
