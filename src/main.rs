mod cli;
mod config;
mod engine;
mod error;
mod renderer;
mod types;
mod ui;

use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, anyhow};
use log::{LevelFilter, debug, info};

use crate::cli::Args;
use crate::config::{APPLICATION, ICON_PATH, ORGANIZATION, PathConfig, WINDOW_TITLE};
use crate::engine::GstPlaybackEngine;
use crate::error::AppError;
use crate::types::layout::WindowLayoutState;
use crate::ui::app::{PlayerApp, viewport_for};
use crate::ui::dialogs::show_fatal;
use crate::ui::icon::load_icon;
use crate::ui::player_window::PlayerWindow;
use crate::ui::video_surface::VideoSurface;

fn main() -> ExitCode {
    let args = match Args::from_env() {
        Ok(args) => args,
        Err(e) => {
            init_logging(LevelFilter::Warn);
            return fail(&e);
        }
    };
    init_logging(args.log_level());
    debug!("Command-line args: {args:?}");

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => fail(&e),
    }
}

fn init_logging(level: LevelFilter) {
    // RUST_LOG wins over -v
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .filter_module("egui", LevelFilter::Info)
        .format_timestamp_millis()
        .init();
}

fn fail(err: &AppError) -> ExitCode {
    show_fatal(err.title(), &err.to_string());
    ExitCode::from(err.exit_code())
}

fn run(args: &Args) -> Result<(), AppError> {
    let media_path = args.media_path()?;

    let path_config = PathConfig::from_env_and_cli(args.config_dir.clone());
    let settings_file = path_config.settings_file(ORGANIZATION, APPLICATION);
    info!("Settings: {}", settings_file.display());

    let surface = VideoSurface::new();
    let engine = GstPlaybackEngine::new(&media_path, &surface)
        .with_context(|| format!("Failed to open {}", media_path.display()))?;
    info!("Playing {}", engine.uri());

    let mut viewport = viewport_for(WINDOW_TITLE);
    if let Some(icon) = load_icon(Path::new(ICON_PATH)) {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        // geometry and window state go through our own blobs
        persist_window: false,
        persistence_path: Some(settings_file),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| {
            let layout = cc
                .storage
                .map(WindowLayoutState::load)
                .unwrap_or_default();
            let app = PlayerApp::new(PlayerWindow::new(engine), surface, &layout);
            app.attach(&cc.egui_ctx, &layout);
            Ok(Box::new(app))
        }),
    )
    .map_err(|e| anyhow!("Event loop failed: {e}"))?;

    info!("Window closed");
    Ok(())
}
