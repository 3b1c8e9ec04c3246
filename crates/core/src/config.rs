//! Session configuration and validation
//!
//! Configuration errors are fatal at session creation: `GameSession::new`
//! validates the whole config up front and refuses to build a partial
//! session. Everything here is error class (a) of the design — bad inputs
//! from the host, reported back as [`ConfigError`], never panics.

use blockfall_types::{
    ShapeDef, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_HORIZONTAL_MOVE_TIMEOUT,
    DEFAULT_INSTANT_FALL_MULTIPLIER, DEFAULT_LINES_PER_LEVEL, DEFAULT_MAX_PIECE_HEIGHT,
    MAX_SCAN_ROWS,
};
use thiserror::Error;

use crate::shapes::standard_set;

/// Errors reported when a session cannot be created from its configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("playfield dimensions must be positive (got {width}x{height})")]
    InvalidDimensions { width: u8, height: u8 },

    #[error("shape set is empty")]
    EmptyShapeSet,

    #[error("shape set has {count} entries, more than the {max} a ShapeId can index")]
    TooManyShapes { count: usize, max: usize },

    #[error("scan bound must be in 1..={max} rows (got {got})")]
    InvalidScanBound { got: u8, max: usize },

    #[error("spawn point ({col}, {row}) is outside the playfield")]
    SpawnOutOfBounds { col: i8, row: i8 },

    #[error("shape '{tag}' does not fit the playfield at the spawn point")]
    ShapeOutOfBounds { tag: char },

    #[error("{name} must be {requirement}")]
    InvalidTiming {
        name: &'static str,
        requirement: &'static str,
    },

    #[error("lines-per-level multiplier must be positive")]
    ZeroLinesPerLevel,

    #[error("injected grid is {got_width}x{got_height}, config wants {width}x{height}")]
    GridDimensionMismatch {
        width: u8,
        height: u8,
        got_width: u8,
        got_height: u8,
    },
}

/// Tuning and geometry for one session.
///
/// `Default` is the classic setup: a 10x20 well, the seven standard shapes
/// spawning near the top middle, a 4-row clear scan, 10 lines per level, and
/// a 40x instant-fall divisor.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Playfield width in columns.
    pub width: u8,
    /// Playfield height in rows.
    pub height: u8,
    /// Upper bound on rows examined by one clear scan.
    pub max_piece_height: u8,
    /// Spawn anchor column.
    pub spawn_col: i8,
    /// Spawn anchor row.
    pub spawn_row: i8,
    /// Minimum seconds between horizontal moves while a key is held.
    pub horizontal_move_timeout: f64,
    /// Gravity divisor while instant fall is active.
    pub instant_fall_multiplier: f64,
    /// Cleared lines needed per level step.
    pub lines_per_level: u32,
    /// The shape set pieces are drawn from.
    pub shapes: Vec<ShapeDef>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            max_piece_height: DEFAULT_MAX_PIECE_HEIGHT,
            spawn_col: (DEFAULT_BOARD_WIDTH / 2) as i8,
            spawn_row: DEFAULT_BOARD_HEIGHT as i8 - 2,
            horizontal_move_timeout: DEFAULT_HORIZONTAL_MOVE_TIMEOUT,
            instant_fall_multiplier: DEFAULT_INSTANT_FALL_MULTIPLIER,
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
            shapes: standard_set(),
        }
    }
}

impl GameConfig {
    /// Rightmost valid column.
    pub fn right_bound(&self) -> i8 {
        self.width as i8 - 1
    }

    /// Topmost valid row.
    pub fn top_bound(&self) -> i8 {
        self.height as i8 - 1
    }

    /// Check the whole configuration; returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if self.shapes.is_empty() {
            return Err(ConfigError::EmptyShapeSet);
        }
        if self.shapes.len() > u8::MAX as usize + 1 {
            return Err(ConfigError::TooManyShapes {
                count: self.shapes.len(),
                max: u8::MAX as usize + 1,
            });
        }
        if self.max_piece_height == 0 || self.max_piece_height as usize > MAX_SCAN_ROWS {
            return Err(ConfigError::InvalidScanBound {
                got: self.max_piece_height,
                max: MAX_SCAN_ROWS,
            });
        }
        if self.spawn_col < 0
            || self.spawn_col > self.right_bound()
            || self.spawn_row < 0
            || self.spawn_row > self.top_bound()
        {
            return Err(ConfigError::SpawnOutOfBounds {
                col: self.spawn_col,
                row: self.spawn_row,
            });
        }
        for def in &self.shapes {
            let anchor_x = self.spawn_col + def.spawn_offset.0;
            let anchor_y = self.spawn_row + def.spawn_offset.1;
            for &(dx, dy) in &def.cells {
                let x = anchor_x + dx;
                let y = anchor_y + dy;
                if x < 0 || x > self.right_bound() || y < 0 || y > self.top_bound() {
                    return Err(ConfigError::ShapeOutOfBounds { tag: def.tag });
                }
            }
        }
        if !(self.horizontal_move_timeout >= 0.0) {
            return Err(ConfigError::InvalidTiming {
                name: "horizontal_move_timeout",
                requirement: "non-negative",
            });
        }
        if !(self.instant_fall_multiplier >= 1.0) {
            return Err(ConfigError::InvalidTiming {
                name: "instant_fall_multiplier",
                requirement: "at least 1",
            });
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        Ok(())
    }
}
