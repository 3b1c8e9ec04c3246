//! Core simulation - pure, deterministic, and testable
//!
//! This crate is the complete game logic of a falling-block puzzle: the
//! playfield grid, the active piece and its movement rules, line clearing
//! with cascading compaction, and the scoring/leveling state machine. It has
//! **zero dependencies** on UI, networking, or I/O, making it:
//!
//! - **Deterministic**: a seed and an input script fully determine a session
//! - **Testable**: every rule is exercised without a rendering host
//! - **Portable**: runs anywhere a host can call `tick` once per step
//!
//! # Module Structure
//!
//! - [`grid`]: occupancy matrix, line detection, bounded clear scan
//! - [`piece`]: the active piece, collision checks, rotation, landing preview
//! - [`session`]: tick orchestration, locking, spawn, game over
//! - [`scoring`]: score table, level thresholds, gravity speeds
//! - [`source`]: piece supply (uniform-random with one-piece lookahead)
//! - [`shapes`]: shape data and the offset rotation transform
//! - [`config`]: session configuration and validation
//! - [`events`]: per-tick event records and the `VisualSink` interface
//! - [`snapshot`]: plain-data captures of session state
//! - [`rng`]: the small deterministic generator behind the stock source
//!
//! # Game Rules
//!
//! - Gravity pulls the piece down one row per fall interval; the interval
//!   shortens with each level and clamps at the fastest defined speed.
//! - A piece that fails to descend on two consecutive gravity ticks locks
//!   into the grid. The first stall is a grace window for last-moment moves.
//! - Only the rows spanned by the locked piece are scanned for clears, and a
//!   deleted row's index is rechecked because the rows above shift into it.
//! - Scoring is the classic 40/100/300/1200 table times `(level + 1)`;
//!   levels need `level * n + n` cleared lines, excess carries over.
//! - Rotation is a plain quarter turn around the anchor with a bounds nudge;
//!   if the result overlaps, the attempt is rejected outright (no kicks).
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameSession};
//! use blockfall_types::InputState;
//!
//! let mut session = GameSession::with_seed(GameConfig::default(), 12345).unwrap();
//!
//! // One tick per discrete step; the host supplies the clock.
//! let events = session.tick(0.0, InputState::default());
//! assert!(!events.is_empty()); // first tick reports the initial spawn
//! assert!(!session.game_over());
//! ```

pub mod config;
pub mod events;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shapes;
pub mod snapshot;
pub mod source;

pub use blockfall_types as types;

// Re-export the common surface for convenience
pub use config::{ConfigError, GameConfig};
pub use events::{dispatch_events, GameEvent, LockedCell, VisualSink};
pub use grid::Grid;
pub use piece::ActivePiece;
pub use scoring::{fall_timeout_for_level, line_clear_score, lines_to_next_level, Progress};
pub use session::GameSession;
pub use shapes::{rotate_offset, standard_set};
pub use snapshot::{PieceSnapshot, SessionSnapshot};
pub use source::{PieceSource, RandomPieceSource};
pub use rng::SimpleRng;
