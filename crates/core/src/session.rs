//! Session orchestration - ticks, gravity, locking, spawn, game over
//!
//! [`GameSession`] owns the grid, the active piece, and the score/level
//! accounting, and drives them from host-supplied ticks. One call to
//! [`GameSession::tick`] is one discrete time step: the host passes the
//! current monotonic clock value (seconds) and the input sampled for this
//! step, and gets back the slice of events the step produced.
//!
//! # Tick order
//!
//! 1. An instant-fall request arms the flag and zeroes the fall timer.
//! 2. Gravity runs. A piece that cannot descend accrues stalled ticks; the
//!    second consecutive stall commits the lock: cells hand off to the grid,
//!    complete rows clear, scoring applies, and the next piece spawns (or the
//!    game ends). A locking tick processes nothing else.
//! 3. Otherwise: rotation request, then sideways movement, then the landing
//!    preview is recomputed.
//!
//! The first stalled tick deliberately does **not** lock: it leaves the
//! player one more window to shift or rotate before the piece commits.
//!
//! Both the grid and the piece source are constructor-injected, so tests can
//! pre-populate the well or script the shape sequence.

use blockfall_types::{InputState, MoveDir, PIECE_CELLS};

use crate::config::{ConfigError, GameConfig};
use crate::events::GameEvent;
use crate::grid::Grid;
use crate::piece::ActivePiece;
use crate::scoring::Progress;
use crate::snapshot::{PieceSnapshot, SessionSnapshot};
use crate::source::{PieceSource, RandomPieceSource};

/// One game from spawn to game over.
pub struct GameSession {
    config: GameConfig,
    grid: Grid,
    source: Box<dyn PieceSource>,
    piece: Option<ActivePiece>,
    progress: Progress,
    events: Vec<GameEvent>,
    /// Events raised during construction are held so the first tick reports
    /// them in order instead of dropping them.
    held_events: bool,
    game_over: bool,
    instant_fall: bool,
    stalled_ticks: u8,
    next_fall_at: f64,
    next_horizontal_at: f64,
    ghost: Option<[(i8, i8); PIECE_CELLS]>,
    next_piece_id: u32,
}

impl GameSession {
    /// Build a session from an injected grid and piece source.
    ///
    /// Fails without side effects on invalid configuration. If the grid is
    /// pre-populated and the first piece overlaps it, the session is created
    /// already game over (the first tick reports it, nothing else mutates).
    pub fn new(
        config: GameConfig,
        grid: Grid,
        source: Box<dyn PieceSource>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        if grid.width() != config.width || grid.height() != config.height {
            return Err(ConfigError::GridDimensionMismatch {
                width: config.width,
                height: config.height,
                got_width: grid.width(),
                got_height: grid.height(),
            });
        }

        let progress = Progress::new(config.lines_per_level);
        let mut session = Self {
            config,
            grid,
            source,
            piece: None,
            progress,
            events: Vec::new(),
            held_events: true,
            game_over: false,
            instant_fall: false,
            stalled_ticks: 0,
            next_fall_at: 0.0,
            next_horizontal_at: 0.0,
            ghost: None,
            next_piece_id: 0,
        };

        if session.spawn_piece() {
            session.finish_game();
        }
        Ok(session)
    }

    /// Convenience constructor: fresh grid, uniform-random source.
    pub fn with_seed(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height);
        let source = Box::new(RandomPieceSource::new(config.shapes.len(), seed));
        Self::new(config, grid, source)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active_piece(&self) -> Option<&ActivePiece> {
        self.piece.as_ref()
    }

    /// The landing preview cells, recomputed every non-locking tick.
    pub fn ghost_cells(&self) -> Option<[(i8, i8); PIECE_CELLS]> {
        self.ghost
    }

    pub fn score(&self) -> u32 {
        self.progress.score()
    }

    pub fn level(&self) -> u32 {
        self.progress.level()
    }

    pub fn total_lines(&self) -> u32 {
        self.progress.total_lines()
    }

    /// Current gravity interval in seconds.
    pub fn fall_timeout(&self) -> f64 {
        self.progress.fall_timeout()
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    /// Events not yet reported through a tick (spawn events raised at
    /// construction, game over for a dead-on-arrival session).
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Advance one step.
    ///
    /// `now` is the host's monotonic clock in seconds and must not decrease
    /// between calls. After game over this is a no-op returning an empty
    /// slice (the terminal tick itself still reports `GameOver`).
    pub fn tick(&mut self, now: f64, input: InputState) -> &[GameEvent] {
        if self.held_events {
            self.held_events = false;
        } else {
            self.events.clear();
        }
        if self.game_over {
            return &self.events;
        }

        if input.hard_drop && !self.instant_fall {
            self.instant_fall = true;
            self.next_fall_at = 0.0;
        }

        if self.apply_gravity(now) {
            self.lock_active();
            return &self.events;
        }

        if input.rotate {
            self.try_rotate();
        }
        self.move_sideways(now, input.move_left, input.move_right);
        self.refresh_ghost();

        &self.events
    }

    /// Capture the current state as plain data.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            width: self.config.width,
            height: self.config.height,
            cells: self.grid.occupancy(),
            active: self.piece.as_ref().map(PieceSnapshot::from),
            ghost: self.ghost,
            next_shape: self.source.peek_next(),
            score: self.progress.score(),
            level: self.progress.level(),
            total_lines: self.progress.total_lines(),
            fall_timeout: self.progress.fall_timeout(),
            game_over: self.game_over,
        }
    }

    /// Gravity step. Returns true when the piece should lock **now**.
    fn apply_gravity(&mut self, now: f64) -> bool {
        if now < self.next_fall_at {
            return false;
        }
        let timeout = self.progress.fall_timeout();
        let divisor = if self.instant_fall {
            self.config.instant_fall_multiplier
        } else {
            1.0
        };
        self.next_fall_at = now + timeout / divisor;

        let Some(mut piece) = self.piece else {
            return false;
        };

        if piece.can_move(&self.grid, MoveDir::Down) {
            piece.translate(0, -1);
            self.piece = Some(piece);
        } else {
            if self.stalled_ticks == 1 {
                // Second consecutive stall: commit. Re-arm the timer at the
                // plain level speed so instant-fall residue cannot leak into
                // the next piece's first interval.
                self.next_fall_at = now + timeout;
                return true;
            }
            self.stalled_ticks += 1;
        }
        false
    }

    fn try_rotate(&mut self) {
        if self.instant_fall {
            return;
        }
        let Some(piece) = self.piece else {
            return;
        };
        if !piece.rotates() {
            return;
        }

        // Rotate a candidate, pull it back inside the walls, and only then
        // decide: an occupied cell rejects the whole attempt, leaving the
        // real piece untouched.
        let candidate = piece
            .rotated(false)
            .normalized(self.grid.right_bound(), self.grid.top_bound());
        if !candidate.overlaps(&self.grid) {
            self.piece = Some(candidate);
        }
    }

    fn move_sideways(&mut self, now: f64, left: bool, right: bool) {
        if !(now > self.next_horizontal_at) || self.instant_fall {
            return;
        }
        // Both directions at once cancel out.
        if left && right {
            return;
        }
        let requested = left || right;
        let Some(mut piece) = self.piece else {
            return;
        };

        if left && piece.can_move(&self.grid, MoveDir::Left) {
            piece.translate(-1, 0);
        } else if right && piece.can_move(&self.grid, MoveDir::Right) {
            piece.translate(1, 0);
        }

        // The timer re-arms on the request, not on success; holding a key
        // against a wall still rate-limits.
        if requested {
            self.next_horizontal_at = now + self.config.horizontal_move_timeout;
        }
        self.piece = Some(piece);
    }

    /// Hand the active piece to the grid, clear lines, account, respawn.
    fn lock_active(&mut self) {
        let Some(piece) = self.piece.take() else {
            return;
        };

        let cells = piece.locked_cells();
        let lowest = piece.lowest_row();
        self.grid.place(&cells);
        self.events.push(GameEvent::PieceLocked { cells });

        let cleared = self
            .grid
            .clear_lines(lowest, self.config.max_piece_height, &mut self.events);
        if cleared > 0 {
            let outcome = self.progress.record_clear(cleared);
            self.events.push(GameEvent::ScoreChanged {
                score: self.progress.score(),
            });
            self.events.push(GameEvent::LinesCountChanged {
                total: self.progress.total_lines(),
            });
            if outcome.leveled_up {
                self.events.push(GameEvent::LevelChanged {
                    level: self.progress.level(),
                    fall_timeout: self.progress.fall_timeout(),
                });
            }
        }

        if self.spawn_piece() {
            self.finish_game();
        }
    }

    /// Draw and position the next piece. Returns true if its cells already
    /// overlap grid occupants (the game-over signal).
    fn spawn_piece(&mut self) -> bool {
        self.stalled_ticks = 0;
        self.instant_fall = false;

        let shape = self.source.next();
        let idx = shape.index();
        debug_assert!(idx < self.config.shapes.len(), "source returned {idx}");
        let def = self.config.shapes[idx.min(self.config.shapes.len() - 1)];

        let piece = ActivePiece::spawn(
            &def,
            shape,
            self.next_piece_id,
            self.config.spawn_col,
            self.config.spawn_row,
        );
        self.next_piece_id += 1;

        self.events.push(GameEvent::PieceSpawned {
            piece: piece.piece_id(),
            shape,
        });
        self.events.push(GameEvent::NextPieceChanged {
            shape: self.source.peek_next(),
        });

        let overlapping = piece.overlaps(&self.grid);
        self.piece = Some(piece);
        self.refresh_ghost();
        overlapping
    }

    fn refresh_ghost(&mut self) {
        let ghost = self
            .piece
            .as_ref()
            .map(|piece| piece.drop_preview(&self.grid));
        self.ghost = ghost;
    }

    fn finish_game(&mut self) {
        self.game_over = true;
        self.events.push(GameEvent::GameOver);
    }
}
