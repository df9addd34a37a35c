mod app;
mod pacing;
mod scenario;

use anyhow::{anyhow, Context as _};
use app::SimApp;
use clap::{Parser, Subcommand};
use collisim_core::{format_scenario_error, run_scenario, REFERENCE_SCENARIO};
use scenario::load_context;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "collisim")]
#[command(about = "Collisim - 2D elastic collision simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a scenario in a window, reloading it whenever the file changes
    View {
        /// Path to the scenario file
        file: PathBuf,
    },
    /// Run a scenario without a window and print the final particle states
    Run {
        /// Path to the scenario file
        file: PathBuf,
        /// Number of frames to simulate (defaults to the scenario's steps)
        #[arg(long)]
        frames: Option<u32>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        None => view(REFERENCE_SCENARIO.to_string(), None),
        Some(Commands::View { file }) => view_file(file),
        Some(Commands::Run { file, frames }) => run_file(&file, frames),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn view_file(file: PathBuf) -> anyhow::Result<()> {
    let source = fs::read_to_string(&file)
        .with_context(|| format!("reading {}", file.display()))?;
    view(source, Some(file))
}

fn view(source: String, path: Option<PathBuf>) -> anyhow::Result<()> {
    let ctx = load_context(&source).map_err(|e| anyhow!(e))?;
    let window = ctx.scenario.window.clone();

    let origin = path
        .as_ref()
        .map_or_else(|| "reference scenario".to_string(), |p| p.display().to_string());
    tracing::info!(
        source = %origin,
        width = window.width,
        height = window.height,
        "opening window"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width as f32, window.height as f32])
            .with_title(window.title.clone())
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        &window.title,
        options,
        Box::new(move |cc| Ok(Box::new(SimApp::new(cc, ctx, source, path)))),
    )
    .map_err(|e| anyhow!("window error: {}", e))?;

    tracing::info!("window closed");
    Ok(())
}

fn run_file(file: &Path, frames: Option<u32>) -> anyhow::Result<()> {
    let source = fs::read_to_string(file)
        .with_context(|| format!("reading {}", file.display()))?;
    let result =
        run_scenario(&source, frames).map_err(|e| anyhow!(format_scenario_error(&e, &source)))?;

    for particle in &result.particles {
        println!(
            "{}: pos=({:.6}, {:.6}) vel=({:.6}, {:.6})",
            particle.name, particle.pos.x, particle.pos.y, particle.vel.x, particle.vel.y
        );
    }
    println!("frames = {}", result.frames);
    println!("collisions = {}", result.collisions);
    println!("momentum_x = {:.6}", result.momentum_x);
    println!("kinetic_energy = {:.6}", result.kinetic_energy);

    Ok(())
}
