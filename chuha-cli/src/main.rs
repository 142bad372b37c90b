//! chuha - ChuhaBot swarm controller
//! Command-line simulator for a single robot of the swarm

mod frames;
mod sim;

use anyhow::{Context, Result};
use chuha_actuator::DriveTrain;
use chuha_core::BehaviorKind;
use chuha_swarm::{MissionMode, MissionSchedule, SwarmConfig, SwarmController};
use clap::{Parser, Subcommand};
use colored::*;
use frames::JsonLinesSink;
use sim::SimulatedLidar;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chuha")]
#[command(author = "Silvano Neto <dev@silvanoneto.com>")]
#[command(version = "2026.1.16")]
#[command(about = "ChuhaBot - decentralized swarm controller", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the controller against a simulated world
    Run {
        /// Number of control steps
        #[arg(short, long, default_value_t = 3000)]
        steps: u64,

        /// TOML configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Robot name (names ending in _0 lead the swarm)
        #[arg(short, long, default_value = "chuha_1")]
        name: String,

        /// Simulated neighbor robots
        #[arg(long, default_value_t = 4)]
        neighbors: usize,

        /// Simulated static obstacles
        #[arg(long, default_value_t = 2)]
        obstacles: usize,

        /// Follow the demonstration mission schedule
        #[arg(long)]
        schedule: bool,

        /// Emit JSON-lines visualization frames on stdout
        #[arg(long)]
        frames: bool,

        /// Fail one sensor read every N steps
        #[arg(long, value_name = "N")]
        dropout: Option<u64>,
    },

    /// Print the effective configuration as TOML
    Config {
        /// TOML configuration file
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List behaviors and per-mode weight profiles
    Behaviors,
}

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chuha=info,chuha_swarm=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            steps,
            config,
            name,
            neighbors,
            obstacles,
            schedule,
            frames,
            dropout,
        } => run_command(&RunOptions {
            steps,
            config,
            name,
            neighbors,
            obstacles,
            schedule,
            frames,
            dropout,
        }),
        Commands::Config { config } => config_command(config.as_deref()),
        Commands::Behaviors => {
            print_behaviors();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

// ============================================================================
// Configuration
// ============================================================================

fn load_config(path: Option<&Path>) -> Result<SwarmConfig> {
    let config = match path {
        Some(path) => SwarmConfig::load(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => SwarmConfig::default(),
    };
    Ok(config.with_env_overrides())
}

fn config_command(path: Option<&Path>) -> Result<()> {
    let config = load_config(path)?;
    config.validate().context("invalid configuration")?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

// ============================================================================
// Simulation
// ============================================================================

struct RunOptions {
    steps: u64,
    config: Option<PathBuf>,
    name: String,
    neighbors: usize,
    obstacles: usize,
    schedule: bool,
    frames: bool,
    dropout: Option<u64>,
}

fn run_command(opts: &RunOptions) -> Result<()> {
    let config = load_config(opts.config.as_deref())?;
    let calibration = config.detection.calibration();
    let sectors = config.detection.sectors;
    let max_velocity = config.max_velocity;

    let mut controller =
        SwarmController::new(opts.name.clone(), config).context("failed to build controller")?;
    if opts.schedule {
        controller.set_schedule(MissionSchedule::demo());
    }
    if opts.frames {
        controller.set_visualization(Box::new(JsonLinesSink::new(std::io::stdout())));
    }

    let mut lidar = SimulatedLidar::new(calibration, sectors, opts.neighbors, opts.obstacles);
    if let Some(every) = opts.dropout {
        lidar = lidar.with_dropout(every);
    }
    let mut drive = DriveTrain::new(max_velocity).context("failed to initialize wheel motors")?;

    eprintln!(
        "{} {} as {} for {} steps",
        "Running".green().bold(),
        opts.name.cyan(),
        controller.role(),
        opts.steps
    );

    let mut mode_changes = 0usize;
    for _ in 0..opts.steps {
        let report = controller.step_with_sensor(&mut lidar);
        if report.mode_change.is_some() {
            mode_changes += 1;
        }
        drive
            .apply(report.command)
            .with_context(|| format!("wheel command rejected at step {}", report.step))?;
    }
    drive.emergency_stop().context("failed to stop wheel motors")?;

    let metrics = controller.metrics();
    eprintln!();
    eprintln!("{}", "Performance summary".bold());
    eprintln!("  {:<20} {:.2} m", "distance traveled", metrics.distance_traveled);
    eprintln!("  {:<20} {:.0} steps", "time in formation", metrics.time_in_formation);
    eprintln!("  {:<20} {:.1}", "collisions", metrics.collision_count);
    eprintln!("  {:<20} {:.1}", "exploration coverage", metrics.exploration_coverage);
    eprintln!("  {:<20} {}", "final mode", controller.mode());
    eprintln!("  {:<20} {}", "formation", controller.formation());
    eprintln!("  {:<20} {}", "mode changes", mode_changes);
    eprintln!("  {:<20} {:.2}", "epsilon", controller.epsilon());
    eprintln!("{}", "    Finished".green().bold());

    Ok(())
}

// ============================================================================
// Info
// ============================================================================

fn print_behaviors() {
    let config = SwarmConfig::default();
    let profiles = &config.mission.profiles;

    print!("{:<20}", "behavior".bold());
    for mode in MissionMode::ALL {
        print!("{:>13}", mode.name().bold());
    }
    println!();

    for kind in BehaviorKind::ALL {
        print!("{:<20}", kind.name().cyan());
        for mode in MissionMode::ALL {
            print!("{:>13.1}", profiles.base(mode).get(kind));
        }
        println!();
    }
}
