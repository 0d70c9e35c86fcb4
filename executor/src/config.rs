//! Command-line configuration.
//!
//! Every option can also be given through the environment variable named next to it.

use crate::host::REQUESTED_STATE_CELL;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "executor")]
#[command(about = "Runs an event graph that drives a frame state machine")]
#[command(version)]
pub struct Cli {
    /// Graph definition file (JSON).
    #[arg(long, env = "EXECUTOR_GRAPH")]
    pub graph: PathBuf,

    /// Number of frames to run before stopping.
    #[arg(long, env = "EXECUTOR_FRAMES", default_value_t = 60)]
    pub frames: u32,

    /// Simulated frame duration in milliseconds.
    #[arg(long, env = "EXECUTOR_DELTA_MS", default_value_t = 16)]
    pub delta_ms: i32,

    /// Number of states in the machine. Requesting a state outside `0..states` stops it.
    #[arg(long, env = "EXECUTOR_STATES", default_value_t = 2)]
    pub states: usize,

    /// State the machine starts in.
    #[arg(long, env = "EXECUTOR_INITIAL_STATE", default_value_t = 0)]
    pub initial_state: i32,

    /// Additional host cell as `name=value`. May be repeated. `requested_state` is reserved,
    /// use `--initial-state` instead.
    #[arg(long = "cell", value_parser = parse_cell)]
    pub cells: Vec<(String, i32)>,
}

fn parse_cell(arg: &str) -> Result<(String, i32), String> {
    let (name, value) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{arg}`"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err("cell name is empty".to_string());
    }
    if name == REQUESTED_STATE_CELL {
        return Err(format!(
            "`{REQUESTED_STATE_CELL}` is owned by the state machine, use --initial-state"
        ));
    }
    let value = value
        .trim()
        .parse::<i32>()
        .map_err(|err| format!("invalid value for cell `{name}`: {err}"))?;
    Ok((name.to_string(), value))
}
