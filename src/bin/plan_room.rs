//! Plan the energy path for a room description file.
//!
//! Usage:
//!   cargo run --bin plan_room -- room.json
//!   cargo run --bin plan_room -- room.json --config planner.json --plot room.png

use clap::Parser;
use serde_json::json;
use std::fs;
use std::process;

use energy_path::room::RoomLayout;
use energy_path::utils::{colors, PathStyle, Visualizer};
use energy_path::{EnergyPathConfig, EnergyPathPlanner, PlanOutcome, PlanResult, Point2D};

/// Energy path planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Room description JSON file
    room: String,

    /// Planner configuration JSON file
    #[arg(short, long)]
    config: Option<String>,

    /// Save a PNG plot of the room and path
    #[arg(short, long)]
    plot: Option<String>,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> PlanResult<()> {
    let config = match &args.config {
        Some(path) => EnergyPathConfig::from_json(&fs::read_to_string(path)?)?,
        None => EnergyPathConfig::default(),
    };
    let room_json = fs::read_to_string(&args.room)?;

    let planner = EnergyPathPlanner::new(config.clone());
    let outcome = planner.plan_json(&room_json);

    let (label, reason) = match &outcome {
        PlanOutcome::Found(_) => ("found", None),
        PlanOutcome::Fallback(_) => ("fallback", None),
        PlanOutcome::NoPath(e) => ("no_path", Some(e.to_string())),
    };
    let points: Vec<[f64; 2]> = outcome
        .path()
        .map(|p| p.points.iter().map(|pt| [pt.x, pt.y]).collect())
        .unwrap_or_default();

    println!(
        "{}",
        json!({ "outcome": label, "points": points, "reason": reason })
    );

    if let (Some(png), Some(path)) = (&args.plot, outcome.path()) {
        let layout = RoomLayout::from_json(&room_json)?;
        let mut vis = Visualizer::new();
        vis.set_title(&format!("Energy path ({})", label))
            .plot_layout(&layout, Some(config.safety_padding))
            .plot_path(path, &PathStyle::default())
            .plot_point(Point2D::origin(), colors::START, "Origin");
        if let Some(exit) = path.last() {
            vis.plot_point(*exit, colors::GOAL, "Exit");
        }
        vis.save_png(png, 800, 600)?;
        eprintln!("Plot saved to: {}", png);
    }

    Ok(())
}
