//! Headless runner (default binary).
//!
//! Replays a scripted session and prints either one JSON line per tick or a
//! final summary. With no script file, a quiet run (no input) is synthesized
//! from the seed/tick flags.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use blockfall::harness::{run_script, ScriptMsg, TickMsg};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// One JSON message per tick on stdout.
    Jsonl,
    /// A single human-readable line at the end of the run.
    Summary,
}

#[derive(Debug, Parser)]
#[command(name = "blockfall", about = "Deterministic headless runs of the blockfall core")]
struct Args {
    /// RNG seed for the piece sequence (ignored when --script is given).
    #[arg(long, default_value_t = 1)]
    seed: u32,

    /// Number of ticks to simulate (ignored when --script is given).
    #[arg(long, default_value_t = 600)]
    ticks: u64,

    /// Simulated seconds per tick (ignored when --script is given).
    #[arg(long, default_value_t = 1.0 / 60.0)]
    tick_seconds: f64,

    /// JSON script file with seed, tick count, and timed inputs.
    #[arg(long)]
    script: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "summary")]
    emit: Emit,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let script = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing script {}", path.display()))?
        }
        None => ScriptMsg {
            seed: args.seed,
            ticks: args.ticks,
            tick_seconds: args.tick_seconds,
            inputs: Vec::new(),
        },
    };

    let run = run_script(&script)?;

    match args.emit {
        Emit::Jsonl => {
            for tick in &run {
                println!("{}", serde_json::to_string(tick)?);
            }
        }
        Emit::Summary => print_summary(&script, &run),
    }

    Ok(())
}

fn print_summary(script: &ScriptMsg, run: &[TickMsg]) {
    let Some(last) = run.last() else {
        println!("seed {}: no ticks simulated", script.seed);
        return;
    };
    let s = &last.snapshot;
    println!(
        "seed {}: {} ticks, score {}, level {}, lines {}, {}",
        script.seed,
        run.len(),
        s.score,
        s.level,
        s.total_lines,
        if s.game_over { "game over" } else { "still going" }
    );
}
