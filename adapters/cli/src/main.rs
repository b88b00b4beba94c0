#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.

mod session;

use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use lane_defence_rendering::{GridPresentation, HudPresentation, Presentation, RenderingBackend, Scene};
use lane_defence_rendering_macroquad::{MacroquadBackend, Theme};
use lane_defence_core::SessionPhase;

use crate::session::{Session, SessionConfig};

/// Command-line options accepted by the Lane Defence binary.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", about = "Real-time grid lane-defence simulation")]
struct Args {
    /// Number of grid columns.
    #[arg(long, default_value_t = 9)]
    columns: u32,

    /// Number of grid rows.
    #[arg(long, default_value_t = 5)]
    rows: u32,

    /// Side length of one grid cell in pixels.
    #[arg(long, default_value_t = 80.0)]
    cell_length: f32,

    /// Milliseconds between attacker spawns.
    #[arg(long, default_value_t = 5000)]
    spawn_interval_ms: u64,

    /// Seed for the spawn row generator; random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file overriding the drawing palette.
    #[arg(long)]
    theme: Option<PathBuf>,

    /// Run without a window for the given number of fixed ticks and print a
    /// JSON summary of the outcome.
    #[arg(long, value_name = "TICKS")]
    headless: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut session = Session::new(SessionConfig {
        columns: args.columns,
        rows: args.rows,
        cell_length: args.cell_length,
        spawn_interval: Duration::from_millis(args.spawn_interval_ms),
        rng_seed: seed,
    });

    println!("{}", session.welcome_banner());

    if let Some(ticks) = args.headless {
        let summary = session.run_headless(ticks);
        println!("{}", serde_json::to_string(&summary)?);
        return Ok(());
    }

    let theme = match &args.theme {
        Some(path) => Theme::from_file(path)?,
        None => Theme::default(),
    };

    let grid = GridPresentation::new(args.columns, args.rows, args.cell_length, theme.grid_lines)?;
    let hud = HudPresentation::new(0, 0, None, SessionPhase::Idle);
    let mut scene = Scene::new(grid, Vec::new(), Vec::new(), Vec::new(), hud);
    session.populate_scene(&mut scene);

    let presentation = Presentation::new("Lane Defence", theme.background, scene);
    let backend = MacroquadBackend::with_theme(theme);

    backend.run(presentation, move |dt, input, scene| {
        session.advance_frame(dt, &input);
        session.populate_scene(scene);
    })
}
