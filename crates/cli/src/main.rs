#![deny(unsafe_code)]
//! CLI binary for the satswarm particle simulation.
//!
//! Subcommands:
//! - `render` runs the simulation N ticks and writes a PNG
//! - `schema` prints the parameter schema
//! - `schemes` lists the mass-center motion schemes

mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use satswarm_core::{Engine, Seed, Srgb};
use satswarm_render::snapshot::write_png;
use satswarm_render::View;
use satswarm_sim::{MotionScheme, Simulation, SwarmOptions};
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser)]
#[command(name = "satswarm", about = "Stochastic satellite swarm renderer")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the simulation for N ticks and write a PNG snapshot.
    Render {
        /// Snapshot width in pixels.
        #[arg(short = 'W', long, default_value_t = 512)]
        width: usize,

        /// Snapshot height in pixels.
        #[arg(short = 'H', long, default_value_t = 512)]
        height: usize,

        /// Number of simulation ticks.
        #[arg(short, long, default_value_t = 600)]
        steps: usize,

        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// World units from the image center to its top edge.
        #[arg(long, default_value_t = 120.0)]
        extent: f64,

        /// Background color as #rrggbb.
        #[arg(long, default_value = "#000000")]
        background: String,

        /// Output file path.
        #[arg(short, long, default_value = "swarm.png")]
        output: PathBuf,

        /// Simulation parameters as a JSON object.
        #[arg(long, default_value = "{}")]
        params: String,

        /// Replay a seed file written by a previous `--json` run.
        /// Overrides --params, --seed, --steps, -W and -H.
        #[arg(long)]
        replay: Option<PathBuf>,
    },
    /// Print the parameter schema as JSON.
    Schema,
    /// List available mass-center motion schemes.
    Schemes,
}

fn read_replay(path: &Path) -> Result<Seed, CliError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::Io(format!("cannot read {}: {e}", path.display())))?;
    serde_json::from_str(&text)
        .map_err(|e| CliError::Input(format!("invalid replay file {}: {e}", path.display())))
}

fn parse_params(params: &str) -> Result<Value, CliError> {
    let value: Value = serde_json::from_str(params)
        .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
    if !value.is_object() {
        return Err(CliError::Input("--params must be a JSON object".into()));
    }
    Ok(value)
}

/// The `seed` field of a [`Seed`] wins over any `seed` key in its params.
fn simulation_for(run: &Seed) -> Result<Simulation, CliError> {
    let mut params = run.params.clone();
    if let Value::Object(map) = &mut params {
        map.insert("seed".into(), run.seed.into());
    }
    Ok(Simulation::from_json(&params)?)
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Schemes => {
            let schemes = MotionScheme::NAMES;
            if cli.json {
                let info = serde_json::json!({ "schemes": schemes });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Schemes:");
                for name in schemes {
                    println!("  {name}");
                }
            }
        }
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&SwarmOptions::param_schema())?);
        }
        Command::Render {
            width,
            height,
            steps,
            seed,
            extent,
            background,
            output,
            params,
            replay,
        } => {
            let run = match replay {
                Some(path) => read_replay(&path)?,
                None => Seed {
                    params: parse_params(&params)?,
                    steps,
                    ..Seed::new(width, height, seed)
                },
            };
            run.validate()?;

            let mut view = View::new(run.width, run.height, extent)?;
            view.background =
                Srgb::from_hex(&background).map_err(|e| CliError::Input(e.to_string()))?;

            let mut sim = simulation_for(&run)?;
            log::info!(
                "{} masses, {} satellites each, scheme {}",
                sim.options().num_masses,
                sim.options().num_satellites,
                sim.options().scheme.name()
            );
            for _ in 0..run.steps {
                sim.step();
            }
            log::debug!("stepped {} ticks, elapsed {:.3}s", sim.ticks(), sim.elapsed());

            write_png(&sim, &view, &output)?;

            if cli.json {
                // Record the effective options so the seed replays even if defaults change.
                let record = Seed {
                    params: sim.params(),
                    ..run
                };
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                eprintln!(
                    "rendered {} ticks ({}x{}, seed {}) -> {}",
                    run.steps,
                    run.width,
                    run.height,
                    run.seed,
                    output.display()
                );
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
