// SPDX-License-Identifier: MIT OR Apache-2.0
//! Ashlar demo driver.
//!
//! Runs the physics demo and showcase scenes headless. A scripted input
//! timeline stands in for the keyboard and mouse, a frame clock runs on
//! simulated time, and a logging renderer stands in for the GPU.

mod renderer;
mod timeline;

use ashlar_physics::{
    ActionState, CameraState, ConfigError, FrameClock, FrameContext, InputSnapshot,
    LookController, PhysicsDemoScene, SceneDirector, SceneError, Settings, ShowcaseScene,
};
use clap::Parser;
use renderer::LoggingRenderer;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use thiserror::Error;
use timeline::Timeline;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Frames simulated when no count is given
const DEFAULT_FRAMES: u32 = 600;

/// Simulated CPU cost of one frame
const FRAME_WORK: Duration = Duration::from_millis(4);

/// Errors that stop the demo
#[derive(Debug, Error)]
enum DemoError {
    /// Settings file problem
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Scene load or update failed
    #[error(transparent)]
    Scene(#[from] SceneError),
}

#[derive(Parser)]
#[command(name = "ashlar_demo")]
#[command(about = "Run the Ashlar physics demo headless", long_about = None)]
struct Args {
    /// RON settings file, re-read on every scene reload
    settings_path: Option<PathBuf>,
    /// Frames to simulate
    #[arg(default_value_t = DEFAULT_FRAMES)]
    frames: u32,
}

fn run(args: Args) -> Result<(), DemoError> {
    let settings = match &args.settings_path {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut clock = FrameClock::new(&settings.frame);
    let mut look = LookController::new(&settings.look);
    let mut demo = PhysicsDemoScene::new(settings);
    if let Some(path) = args.settings_path {
        demo = demo.with_settings_path(path);
    }
    let mut scenes = SceneDirector::new()
        .with_scene(demo)
        .with_scene(ShowcaseScene::new());
    scenes.start()?;

    let timeline = Timeline::scripted();
    let mut actions = ActionState::new();
    let mut camera = CameraState::default();
    let mut renderer = LoggingRenderer::default();

    let mut now = Instant::now();
    for frame in 0..args.frames {
        let frame_start = now;
        let dt = clock.tick(now);

        if let Some(cap) = timeline.fps_cap_at(frame) {
            clock.set_target_fps(cap);
        }
        if let Some((x, y)) = timeline.cursor_at(frame) {
            look.handle_mouse(x, y);
        }
        look.apply(&mut camera);

        actions.update(timeline.held_at(frame));
        let mut ctx = FrameContext::new(dt, camera, InputSnapshot { actions });
        scenes.update(&mut ctx)?;
        camera = ctx.camera;

        scenes.draw(&mut renderer);

        let work_done = frame_start + FRAME_WORK;
        now = work_done + clock.sleep_time(frame_start, work_done).unwrap_or_default();
    }

    scenes.log_summary();
    renderer.log_summary();

    Ok(())
}

fn main() {
    let mut env_filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in ["ashlar_physics=debug", "ashlar_demo=debug"] {
        if let Ok(directive) = directive.parse() {
            env_filter = env_filter.add_directive(directive);
        }
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ashlar demo v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    if let Err(e) = run(args) {
        tracing::error!("Demo failed: {e}");
        std::process::exit(1);
    }
}
