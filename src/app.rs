use crate::io::config::{Config, ConfigError};
use crate::io::image::save_plan_image;
use crate::scene::context::SceneContext;
use crate::scene::loader::{init_scene, resolve_session};
use crate::table::{Corner, PointerOutcome, SetupError};
use crate::ui::viewer::start_viewer;
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error("Viewer failed: {0}")]
    Viewer(#[from] eframe::Error),
}

/// What a replayed session did to the table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub frames: usize,
    pub stretches: usize,
    pub misses: usize,
    pub width: f32,
    pub depth: f32,
    pub chairs: usize,
}

/// Replays the configured `[[session]]` frames against a freshly built scene.
pub fn replay_session(config: &Config) -> Result<(SceneContext, SessionSummary), SetupError> {
    let mut context = init_scene(config)?;
    let samples = resolve_session(&config.session, &context.world)?;

    let mut summary = SessionSummary {
        frames: samples.len(),
        stretches: 0,
        misses: 0,
        width: 0.0,
        depth: 0.0,
        chairs: 0,
    };

    for (i, sample) in samples.into_iter().enumerate() {
        let report = context.frame(sample);
        match report.pointer {
            PointerOutcome::Stretched { .. } => summary.stretches += 1,
            PointerOutcome::PlaneMissed => summary.misses += 1,
            _ => {}
        }
        debug!("Frame {}: {:?}", i, report);
    }

    summary.width = context.table.width();
    summary.depth = context.table.depth();
    summary.chairs = context.table.chair_count();
    Ok((context, summary))
}

/// Runs the scripted session headlessly and writes the plan image.
pub fn run_cli(config: &Config, output: Option<&str>) -> Result<SessionSummary, SetupError> {
    info!("Starting CLI mode...");
    let start_time = Instant::now();

    let (context, summary) = replay_session(config)?;

    info!(
        "Replayed {} frames in {:.2?}: {} stretch updates, {} plane misses",
        summary.frames,
        start_time.elapsed(),
        summary.stretches,
        summary.misses
    );
    for corner in Corner::ALL {
        let p = context.table.corner_position(corner);
        info!("  {:?}: ({:.3}, {:.3})", corner, p.x, p.z);
    }
    info!(
        "Tabletop {:.3} x {:.3}, {} chairs",
        summary.width, summary.depth, summary.chairs
    );

    let path = output.unwrap_or(config.plan.output.as_str());
    save_plan_image(&context.world, &context.table, &config.plan, path);
    info!("Done.");
    Ok(summary)
}

/// Opens the interactive viewer.
pub fn run_gui(config: Config, config_path: Option<PathBuf>) -> Result<(), AppError> {
    let context = init_scene(&config)?;
    info!(
        "Starting GUI mode ({}x{})...",
        config.viewport.width, config.viewport.height
    );
    info!("Controls: Hover a corner, drag to stretch, R=Reload Config, P=Save Plan, Esc=Quit");
    start_viewer(config, config_path, context)?;
    Ok(())
}
