//! Simulation side of the harness
//!
//! Everything here is renderer-agnostic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Physics is delegated to a [`PhysicsEngine`] implementation

pub mod aabb;
pub mod body;
pub mod clock;
pub mod rng;
pub mod scene;
pub mod shape;
pub mod spawn;

pub use aabb::Aabb;
pub use body::{Body, BodyHandle, Manifold, Material, PhysicsEngine, Transform};
pub use clock::SimulationClock;
pub use rng::RandomSource;
pub use scene::Scene;
pub use shape::{Circle, Polygon, Shape};
pub use spawn::{SpawnConfig, SpawnController, SpawnRequest, spawn};
