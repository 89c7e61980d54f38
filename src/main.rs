//! rayframe-demo
//!
//! Opens a raylib window, logs every input event and optionally round-trips
//! a texture through the GPU.

use std::fs::File;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rayframe::config::Config;
use rayframe::input::{Event, Key};
use rayframe::native::RaylibBackend;
use rayframe::resources::{Text, TextConfig};
use rayframe::utils::{format_user_error, FrameTimes, Timer};
use rayframe::window::Window;

/// Command-line arguments for rayframe-demo
#[derive(Parser, Debug)]
#[command(name = "rayframe-demo")]
#[command(version, about = "Frame-synchronized input and texture demo", long_about = None)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, env = "RAYFRAME_CONFIG")]
    pub config: Option<PathBuf>,

    /// Window width in pixels
    #[arg(long)]
    pub width: Option<i32>,

    /// Window height in pixels
    #[arg(long)]
    pub height: Option<i32>,

    /// Window title
    #[arg(long)]
    pub title: Option<String>,

    /// Verbose logging (can be specified multiple times)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Log format (json|pretty|compact)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Write logs to file (in addition to stdout)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Image to upload and read back after the window opens
    #[arg(long)]
    pub texture: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_user_error(&e));
            return Err(e);
        }
    };

    let _guard = init_logging(&args, &config)?;

    info!("════════════════════════════════════════════════════════");
    info!("  rayframe-demo v{}", env!("CARGO_PKG_VERSION"));
    info!("  Built: {} {}", env!("BUILD_DATE"), env!("BUILD_TIME"));
    info!("  Commit: {}", env!("GIT_HASH"));
    info!("  Profile: {}", if cfg!(debug_assertions) { "debug" } else { "release" });
    info!("════════════════════════════════════════════════════════");
    debug!("Config: {:?}", config);

    if let Err(e) = run(&args, &config) {
        eprintln!("{}", format_user_error(&e));
        return Err(e);
    }

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default_config(),
    };

    let config = config.with_overrides(args.width, args.height, args.title.clone());
    config.validate().context("Invalid config after CLI overrides")?;
    Ok(config)
}

fn run(args: &Args, config: &Config) -> Result<()> {
    let backend = Rc::new(RaylibBackend::new());
    let mut window = Window::open_with_config(backend, config).context("Opening demo window")?;

    if let Some(path) = &args.texture {
        round_trip_texture(&window, path)?;
    }

    let label = Text::new(TextConfig {
        text: config.window.title.clone(),
        ..Default::default()
    })?;
    let (label_width, label_height) = window.text_size(&label);
    debug!("Title label measures {}x{}", label_width, label_height);

    let mut frames = FrameTimes::new();
    let mut timer = Timer::new();

    'frames: loop {
        window.display();
        frames.record(timer.lap_ms());

        while let Some(event) = window.poll_event() {
            match event {
                Event::WindowClose => {
                    info!("Close requested, leaving event loop");
                    break 'frames;
                }
                Event::KeyPress {
                    key: Key::Escape, ..
                } => {
                    info!("Escape pressed, leaving event loop");
                    break 'frames;
                }
                Event::MouseMove { .. } => debug!("{:?}", event),
                _ => info!("{:?}", event),
            }
        }
    }

    let stats = frames.stats();
    let collected = window.collector_stats();
    info!(
        "Frames: {} (mean {:.2}ms, p95 {:.2}ms, {:.1} fps)",
        stats.count,
        stats.mean,
        stats.p95,
        stats.mean_fps()
    );
    info!(
        "Events emitted: {}, unmapped codes skipped: {}",
        collected.events_emitted, collected.unmapped_skipped
    );

    window.close();
    Ok(())
}

fn round_trip_texture(window: &Window<RaylibBackend>, path: &std::path::Path) -> Result<()> {
    let texture = window
        .load_texture(path)
        .with_context(|| format!("Loading texture {}", path.display()))?;
    info!(
        "Loaded texture {} ({}x{})",
        texture.id(),
        texture.width(),
        texture.height()
    );

    let timer = Timer::new();
    match texture.read() {
        Ok(pixels) => info!(
            "Read back {}x{} RGBA pixels in {:.2}ms",
            pixels.width(),
            pixels.height(),
            timer.elapsed_ms()
        ),
        Err(e) => warn!("Texture read-back failed: {}", e),
    }

    texture.release();
    Ok(())
}

/// Initialize logging with a stdout layer and an optional file layer
///
/// `--log-file` takes precedence over `logging.log_dir` from the config.
fn init_logging(args: &Args, config: &Config) -> Result<Option<WorkerGuard>> {
    let log_level = match args.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let log_format = args
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "rayframe={level},rayframe_demo={level},warn",
            level = log_level
        ))
    });

    let (file_writer, guard) = if let Some(log_file_path) = &args.log_file {
        let file = File::create(log_file_path)
            .with_context(|| format!("Failed to create log file: {}", log_file_path.display()))?;
        let (writer, guard) = tracing_appender::non_blocking(file);
        (Some(writer), Some(guard))
    } else if let Some(dir) = &config.logging.log_dir {
        let appender = tracing_appender::rolling::daily(dir, "rayframe.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (Some(writer), Some(guard))
    } else {
        (None, None)
    };
    let logging_to_file = file_writer.is_some();

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
        "compact" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().compact())
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .with(file_writer.map(|writer| {
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                }))
                .init();
        }
    }

    if logging_to_file {
        info!("Logging to file");
    }

    Ok(guard)
}
