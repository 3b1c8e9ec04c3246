//! The headless session handle
//!
//! [`SessionHandle`] is the harness surface promised to hosts: create a
//! session from a config, inject input between ticks, tick with an explicit
//! clock value, and get back a [`TickReport`] carrying the events and a full
//! snapshot. Inputs accumulate (OR) until the next tick consumes them, so
//! several injections between steps behave like keys held together.

use blockfall_core::{ConfigError, GameConfig, GameEvent, GameSession, SessionSnapshot};
use blockfall_types::InputState;

use crate::protocol::{EventMsg, SnapshotMsg, TickMsg};

/// Everything needed to (re)create a session deterministically.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub seed: u32,
    pub game: GameConfig,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: 1,
            game: GameConfig::default(),
        }
    }
}

/// What one tick produced.
#[derive(Debug, Clone)]
pub struct TickReport {
    pub tick: u64,
    pub now: f64,
    pub events: Vec<GameEvent>,
    pub snapshot: SessionSnapshot,
}

impl From<&TickReport> for TickMsg {
    fn from(report: &TickReport) -> Self {
        TickMsg {
            tick: report.tick,
            now: report.now,
            events: report.events.iter().map(EventMsg::from).collect(),
            snapshot: SnapshotMsg::from(&report.snapshot),
        }
    }
}

/// An owned, steppable session.
pub struct SessionHandle {
    config: HarnessConfig,
    session: GameSession,
    pending: InputState,
    ticks: u64,
}

impl SessionHandle {
    /// Create a session; configuration problems are reported before any
    /// state exists.
    pub fn new(config: HarnessConfig) -> Result<Self, ConfigError> {
        let session = GameSession::with_seed(config.game.clone(), config.seed)?;
        Ok(Self {
            config,
            session,
            pending: InputState::default(),
            ticks: 0,
        })
    }

    /// Accumulate input for the next tick.
    pub fn inject_input(&mut self, input: InputState) {
        self.pending = self.pending.merged(input);
    }

    /// Step once at the given clock value, consuming pending input.
    pub fn tick(&mut self, now: f64) -> TickReport {
        let input = std::mem::take(&mut self.pending);
        let events = self.session.tick(now, input).to_vec();
        let tick = self.ticks;
        self.ticks += 1;
        TickReport {
            tick,
            now,
            events,
            snapshot: self.session.snapshot(),
        }
    }

    /// Recreate the session from its config and seed (same piece sequence).
    pub fn reset(&mut self) -> Result<(), ConfigError> {
        self.session = GameSession::with_seed(self.config.game.clone(), self.config.seed)?;
        self.pending = InputState::default();
        self.ticks = 0;
        Ok(())
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Ticks stepped since creation or the last reset.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
