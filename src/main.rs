//! pe2d-harness entry point
//!
//! Runs the harness headless against the stand-in scene and a scripted
//! input stream, then prints a JSON summary.
//!
//! Usage: `pe2d-harness [settings.json] [script.json]`

use std::process::ExitCode;

use pe2d_harness::platform::{Script, ScriptedPlatform};
use pe2d_harness::renderer::CommandRecorder;
use pe2d_harness::sim::{RandomSource, Scene};
use pe2d_harness::{Harness, Result, Settings};

/// Demo length when no script is given
const DEMO_FRAMES: usize = 600;
const DEMO_CLICK_EVERY: usize = 45;

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(path) => Settings::load(path)?,
        None => {
            log::info!("No settings file given, using defaults");
            Settings::default()
        }
    };
    let script = match args.next() {
        Some(path) => Script::load(path)?,
        None => Script::demo(
            DEMO_FRAMES,
            settings.fixed_step,
            DEMO_CLICK_EVERY,
            settings.window_width,
        ),
    };

    let rng = match settings.seed {
        Some(seed) => RandomSource::from_seed(seed),
        None => RandomSource::from_entropy(),
    };
    let scene = Scene::new(settings.fixed_step as f32, settings.gravity);
    let mut harness = Harness::new(scene, &settings, rng)?;
    harness.populate_default_scene()?;

    let mut platform = ScriptedPlatform::new(script);
    let mut backend = CommandRecorder::new();
    let summary = harness.run(&mut platform, &mut backend)?;

    let last_frame = backend.last_frame().map(|f| {
        serde_json::json!({
            "batches": f.batches.len(),
            "vertices": f.vertex_count(),
            "vertex_bytes": f.to_vertex_buffer().len(),
        })
    });
    let out = serde_json::json!({
        "summary": summary,
        "last_frame": last_frame,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("pe2d-harness starting...");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
