//! Scripted headless runs
//!
//! A [`ScriptMsg`] is a complete, replayable experiment: seed, step size,
//! tick count, and timed inputs. Running one yields the per-tick messages a
//! host or a test can assert on, byte-for-byte reproducible for the same
//! script.

use std::collections::HashMap;

use anyhow::Result;

use blockfall_core::GameConfig;
use blockfall_types::InputState;

use crate::protocol::{ScriptMsg, TickMsg};
use crate::runtime::{HarnessConfig, SessionHandle};

/// Run a script against the default game configuration.
pub fn run_script(script: &ScriptMsg) -> Result<Vec<TickMsg>> {
    run_script_with(GameConfig::default(), script)
}

/// Run a script against a custom game configuration.
///
/// The run stops after the tick that observes game over; the remaining
/// scripted ticks would be no-ops.
pub fn run_script_with(game: GameConfig, script: &ScriptMsg) -> Result<Vec<TickMsg>> {
    let mut handle = SessionHandle::new(HarnessConfig {
        seed: script.seed,
        game,
    })?;

    let mut timed_inputs: HashMap<u64, InputState> = HashMap::new();
    for entry in &script.inputs {
        let state: InputState = entry.input.into();
        timed_inputs
            .entry(entry.at)
            .and_modify(|existing| *existing = existing.merged(state))
            .or_insert(state);
    }

    let mut out = Vec::with_capacity(script.ticks as usize);
    for tick in 0..script.ticks {
        if let Some(&input) = timed_inputs.get(&tick) {
            handle.inject_input(input);
        }
        let report = handle.tick(tick as f64 * script.tick_seconds);
        let game_over = report.snapshot.game_over;
        out.push(TickMsg::from(&report));
        if game_over {
            break;
        }
    }
    Ok(out)
}
