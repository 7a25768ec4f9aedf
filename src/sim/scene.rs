//! Minimal stand-in engine
//!
//! Integrates gravity for dynamic bodies at a fixed step and nothing else:
//! no collision detection, no contact generation, no solver. Contacts are
//! whatever the caller hands to [`Scene::set_contacts`]. This is enough to
//! run the harness headless and to test it.

use glam::Vec2;

use super::body::{Body, BodyHandle, Manifold, Material, PhysicsEngine};
use super::shape::Shape;

pub struct Scene {
    bodies: Vec<Body>,
    contacts: Vec<Manifold>,
    gravity: Vec2,
    dt: f32,
    next_id: u32,
    ticks: u64,
}

impl Scene {
    pub fn new(dt: f32, gravity: Vec2) -> Self {
        Self {
            bodies: Vec::new(),
            contacts: Vec::new(),
            gravity,
            dt,
            next_id: 0,
            ticks: 0,
        }
    }

    /// Number of ticks stepped since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_contacts(&mut self, contacts: Vec<Manifold>) {
        self.contacts = contacts;
    }
}

impl PhysicsEngine for Scene {
    fn add_body(&mut self, shape: Shape, material: Material) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        self.bodies.push(Body::new(handle, shape, material));
        handle
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|b| b.handle == handle)
    }

    fn step(&mut self) {
        // Semi-implicit Euler
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.linear_velocity += self.gravity * self.dt;
            body.transform.position += body.linear_velocity * self.dt;
        }
        self.ticks += 1;
    }

    fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    fn contacts(&self) -> &[Manifold] {
        &self.contacts
    }
}
