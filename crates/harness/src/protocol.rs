//! Wire DTOs for snapshots, events, and input scripts
//!
//! The core stays serde-free; this module mirrors its types into plain
//! serializable messages. Events use an externally tagged `type` field so an
//! event log reads naturally as JSON lines.

use serde::{Deserialize, Serialize};

use blockfall_core::{GameEvent, LockedCell, SessionSnapshot};
use blockfall_types::InputState;

/// Input flags for one tick. Missing fields default to false so scripts only
/// name the keys they press.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputMsg {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub rotate: bool,
    #[serde(default)]
    pub hard_drop: bool,
}

impl From<InputMsg> for InputState {
    fn from(msg: InputMsg) -> Self {
        InputState {
            move_left: msg.left,
            move_right: msg.right,
            rotate: msg.rotate,
            hard_drop: msg.hard_drop,
        }
    }
}

/// One occupied cell of a locked piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellMsg {
    pub x: i8,
    pub y: i8,
    pub piece: u32,
    pub shape: u8,
}

impl From<&LockedCell> for CellMsg {
    fn from(cell: &LockedCell) -> Self {
        Self {
            x: cell.x,
            y: cell.y,
            piece: cell.token.piece,
            shape: cell.token.shape.0,
        }
    }
}

/// Serializable form of a core event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventMsg {
    PieceSpawned { piece: u32, shape: u8 },
    NextPieceChanged { shape: u8 },
    PieceLocked { cells: Vec<CellMsg> },
    RowsShifted { from_row: i8, delta: i8 },
    LinesCleared { rows: Vec<i8> },
    ScoreChanged { score: u32 },
    LinesCountChanged { total: u32 },
    LevelChanged { level: u32, fall_timeout: f64 },
    GameOver,
}

impl From<&GameEvent> for EventMsg {
    fn from(event: &GameEvent) -> Self {
        match event {
            GameEvent::PieceSpawned { piece, shape } => EventMsg::PieceSpawned {
                piece: *piece,
                shape: shape.0,
            },
            GameEvent::NextPieceChanged { shape } => EventMsg::NextPieceChanged { shape: shape.0 },
            GameEvent::PieceLocked { cells } => EventMsg::PieceLocked {
                cells: cells.iter().map(CellMsg::from).collect(),
            },
            GameEvent::RowsShifted { from_row, delta } => EventMsg::RowsShifted {
                from_row: *from_row,
                delta: *delta,
            },
            GameEvent::LinesCleared { rows } => EventMsg::LinesCleared {
                rows: rows.iter().copied().collect(),
            },
            GameEvent::ScoreChanged { score } => EventMsg::ScoreChanged { score: *score },
            GameEvent::LinesCountChanged { total } => EventMsg::LinesCountChanged { total: *total },
            GameEvent::LevelChanged {
                level,
                fall_timeout,
            } => EventMsg::LevelChanged {
                level: *level,
                fall_timeout: *fall_timeout,
            },
            GameEvent::GameOver => EventMsg::GameOver,
        }
    }
}

/// The active piece within a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveMsg {
    pub shape: u8,
    pub x: i8,
    pub y: i8,
    pub turns: u8,
    pub cells: Vec<[i8; 2]>,
}

/// Serializable form of a session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMsg {
    pub width: u8,
    pub height: u8,
    /// Row-major occupancy from the bottom row up (0 = empty).
    pub cells: Vec<u8>,
    pub active: Option<ActiveMsg>,
    pub ghost: Option<Vec<[i8; 2]>>,
    pub next_shape: u8,
    pub score: u32,
    pub level: u32,
    pub total_lines: u32,
    pub fall_timeout: f64,
    pub game_over: bool,
}

impl From<&SessionSnapshot> for SnapshotMsg {
    fn from(snapshot: &SessionSnapshot) -> Self {
        Self {
            width: snapshot.width,
            height: snapshot.height,
            cells: snapshot.cells.clone(),
            active: snapshot.active.as_ref().map(|piece| ActiveMsg {
                shape: piece.shape.0,
                x: piece.anchor.0,
                y: piece.anchor.1,
                turns: piece.turns,
                cells: piece.cells.iter().map(|&(x, y)| [x, y]).collect(),
            }),
            ghost: snapshot
                .ghost
                .map(|cells| cells.iter().map(|&(x, y)| [x, y]).collect()),
            next_shape: snapshot.next_shape.0,
            score: snapshot.score,
            level: snapshot.level,
            total_lines: snapshot.total_lines,
            fall_timeout: snapshot.fall_timeout,
            game_over: snapshot.game_over,
        }
    }
}

/// One emitted line of a headless run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickMsg {
    pub tick: u64,
    pub now: f64,
    pub events: Vec<EventMsg>,
    pub snapshot: SnapshotMsg,
}

/// Input injected at a given tick of a scripted run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptInputMsg {
    pub at: u64,
    #[serde(flatten)]
    pub input: InputMsg,
}

fn default_ticks() -> u64 {
    600
}

fn default_tick_seconds() -> f64 {
    1.0 / 60.0
}

/// A deterministic replay: seed, step size, and timed inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptMsg {
    pub seed: u32,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: f64,
    #[serde(default)]
    pub inputs: Vec<ScriptInputMsg>,
}

impl Default for ScriptMsg {
    fn default() -> Self {
        Self {
            seed: 1,
            ticks: default_ticks(),
            tick_seconds: default_tick_seconds(),
            inputs: Vec::new(),
        }
    }
}
