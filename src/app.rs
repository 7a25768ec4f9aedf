//! Single-threaded run loop
//!
//! Each iteration handles input, then update, then render, then present.
//! Only the spawner (additions) and the engine's own stepping mutate the
//! body list; the clock and renderer just read it.

use glam::Vec2;
use serde::Serialize;

use crate::error::Result;
use crate::platform::{InputEvent, Platform};
use crate::renderer::{DrawBackend, FrameRenderer, FrameStats, screen_projection};
use crate::settings::Settings;
use crate::sim::{
    Material, PhysicsEngine, Polygon, RandomSource, Shape, SimulationClock, SpawnController,
    SpawnRequest, spawn,
};

/// What happened during one loop iteration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub frame: u64,
    /// Simulation ticks run this frame
    pub steps: u32,
    pub spawned: usize,
    pub rejected: usize,
    pub stats: FrameStats,
}

/// Totals over a whole run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    pub spawned: usize,
    pub rejected: usize,
    pub bodies: usize,
}

pub struct Harness<E: PhysicsEngine> {
    engine: E,
    clock: SimulationClock,
    spawner: SpawnController,
    renderer: FrameRenderer,
    width: f32,
    height: f32,
    frame: u64,
}

impl<E: PhysicsEngine> Harness<E> {
    /// Build a harness around `engine` without adding any bodies
    pub fn new(engine: E, settings: &Settings, rng: RandomSource) -> Result<Self> {
        settings.validate()?;
        let clock = SimulationClock::new(settings.fixed_step, settings.max_accumulated)?;
        let spawner = SpawnController::new(settings.spawn.clone(), rng)?;
        let renderer = FrameRenderer::new(settings.window_width, settings.window_height)
            .with_contact_overlay(settings.contact_normal_length, settings.contact_point_size);

        log::info!(
            "Harness ready: {}x{} viewport, {:.4}s step, seed {}",
            settings.window_width,
            settings.window_height,
            settings.fixed_step,
            spawner.rng().seed()
        );

        Ok(Self {
            engine,
            clock,
            spawner,
            renderer,
            width: settings.window_width,
            height: settings.window_height,
            frame: 0,
        })
    }

    /// Add the static floor and peg the demo scene starts with
    pub fn populate_default_scene(&mut self) -> Result<()> {
        let floor = SpawnRequest {
            shape: Shape::Polygon(Polygon::from_corners(
                Vec2::new(-300.0, -10.0),
                Vec2::new(300.0, 10.0),
            )?),
            position: Vec2::new(400.0, 560.0),
            orientation: 0.0,
            material: Material::Metal,
        };
        let peg = SpawnRequest {
            shape: Shape::circle(30.0)?,
            position: Vec2::new(440.0, 400.0),
            orientation: 0.0,
            material: Material::Wood,
        };

        for request in [floor, peg] {
            let handle = spawn(&mut self.engine, request);
            if let Some(body) = self.engine.body_mut(handle) {
                body.set_static();
            }
        }
        Ok(())
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn clock(&self) -> &SimulationClock {
        &self.clock
    }

    /// Feed pointer events to the spawner. Returns (spawned, rejected).
    pub fn handle_input(&mut self, events: &[InputEvent]) -> (usize, usize) {
        let mut spawned = 0;
        let mut rejected = 0;
        for event in events {
            let InputEvent::PointerDown { button, position } = event else {
                continue;
            };
            match self.spawner.on_input(*button, *position, &mut self.engine) {
                Ok(Some(_)) => spawned += 1,
                Ok(None) => {}
                Err(e) => {
                    log::warn!("Spawn rejected: {}", e);
                    rejected += 1;
                }
            }
        }
        (spawned, rejected)
    }

    /// Advance the clock by `dt` seconds, stepping the engine per tick
    pub fn update(&mut self, dt: f64) -> Result<u32> {
        let engine = &mut self.engine;
        self.clock.advance(dt, || engine.step())
    }

    pub fn render<B: DrawBackend + ?Sized>(&self, backend: &mut B) -> FrameStats {
        self.renderer.render(&self.engine, backend)
    }

    /// One full iteration: input, update, render, present
    pub fn frame<B: DrawBackend + ?Sized>(
        &mut self,
        events: &[InputEvent],
        dt: f64,
        backend: &mut B,
    ) -> Result<FrameReport> {
        let (spawned, rejected) = self.handle_input(events);
        let steps = self.update(dt)?;
        let stats = self.render(backend);
        backend.present();

        let report = FrameReport {
            frame: self.frame,
            steps,
            spawned,
            rejected,
            stats,
        };
        log::debug!(
            "Frame {}: {} steps, {} drawn, {} culled, {} contacts",
            report.frame,
            steps,
            stats.drawn,
            stats.culled,
            stats.contact_points
        );
        self.frame += 1;
        Ok(report)
    }

    /// Run until the platform asks to close. A negative frame time ends the
    /// run with an error.
    pub fn run<P, B>(&mut self, platform: &mut P, backend: &mut B) -> Result<RunSummary>
    where
        P: Platform + ?Sized,
        B: DrawBackend + ?Sized,
    {
        backend.set_projection(screen_projection(self.width, self.height));

        let mut summary = RunSummary::default();
        while !platform.should_close() {
            let events = platform.poll_events();
            let dt = platform.frame_time();
            let report = self.frame(&events, dt, backend)?;

            summary.frames += 1;
            summary.steps += u64::from(report.steps);
            summary.spawned += report.spawned;
            summary.rejected += report.rejected;
        }
        summary.bodies = self.engine.bodies().len();

        log::info!(
            "Run finished: {} frames, {} steps, {} spawned, {} bodies",
            summary.frames,
            summary.steps,
            summary.spawned,
            summary.bodies
        );
        Ok(summary)
    }
}
