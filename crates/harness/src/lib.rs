//! Headless harness - drive the simulation without a rendering host
//!
//! This crate exposes the core through the narrow surface a test rig or CLI
//! needs:
//!
//! 1. **Create**: [`SessionHandle::new`] builds a session from a
//!    [`HarnessConfig`] (seed + game config); configuration errors come back
//!    before any state exists.
//! 2. **Inject**: [`SessionHandle::inject_input`] accumulates input flags
//!    between steps.
//! 3. **Tick**: [`SessionHandle::tick`] advances one step at an explicit
//!    clock value and returns the events plus a full snapshot.
//!
//! # Scripts
//!
//! [`ScriptMsg`] captures a whole run as data — seed, step size, timed
//! inputs — and [`run_script`] replays it deterministically. Two runs of the
//! same script produce identical [`TickMsg`] sequences, which is what the
//! integration tests and the `blockfall` binary are built on.
//!
//! # Wire format
//!
//! Everything crossing this boundary serializes with serde: snapshots,
//! tagged event records, and scripts. See [`protocol`].
//!
//! ```
//! use blockfall_harness::{run_script, ScriptMsg};
//!
//! let script = ScriptMsg { seed: 7, ticks: 30, ..ScriptMsg::default() };
//! let run = run_script(&script).unwrap();
//! assert_eq!(run.len(), 30);
//! assert!(run[0].events.iter().any(|e| matches!(
//!     e,
//!     blockfall_harness::EventMsg::PieceSpawned { .. }
//! )));
//! ```

pub mod protocol;
pub mod runtime;
pub mod script;

pub use blockfall_core as core;
pub use blockfall_types as types;

// Re-export the harness surface for convenience
pub use protocol::{
    ActiveMsg, CellMsg, EventMsg, InputMsg, ScriptInputMsg, ScriptMsg, SnapshotMsg, TickMsg,
};
pub use runtime::{HarnessConfig, SessionHandle, TickReport};
pub use script::{run_script, run_script_with};
