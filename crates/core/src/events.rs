//! Event records emitted by the session
//!
//! Each `tick` returns the slice of [`GameEvent`]s it produced, in order.
//! Hosts can consume the slice directly (tests replay it deterministically)
//! or forward it to a [`VisualSink`] with [`dispatch_events`]. The core only
//! reports; it never queries the sink back.

use arrayvec::ArrayVec;
use blockfall_types::{BlockToken, ShapeId, MAX_SCAN_ROWS};

/// One grid cell a locked piece now occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockedCell {
    pub x: i8,
    pub y: i8,
    pub token: BlockToken,
}

/// A discrete state change produced during one tick.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A new active piece entered play.
    PieceSpawned { piece: u32, shape: ShapeId },
    /// The lookahead slot changed; hosts use this for the preview display.
    NextPieceChanged { shape: ShapeId },
    /// The active piece's cells became permanent grid occupants.
    PieceLocked { cells: [LockedCell; 4] },
    /// Every row at or above `from_row` moved down by `delta` rows.
    ///
    /// Emitted once per deleted row during a clear cascade, before the
    /// summary `LinesCleared` record.
    RowsShifted { from_row: i8, delta: i8 },
    /// Rows completed and removed by the last lock. Indices are as observed
    /// at each row's clear time (cascades shift later indices down).
    LinesCleared { rows: ArrayVec<i8, MAX_SCAN_ROWS> },
    ScoreChanged { score: u32 },
    LinesCountChanged { total: u32 },
    LevelChanged { level: u32, fall_timeout: f64 },
    /// Terminal: the session stops responding to ticks.
    GameOver,
}

/// Rendering/UI collaborator interface.
///
/// All methods default to no-ops so a host only implements what it draws.
/// The spawn/preview events are host-level concerns and are not part of this
/// surface; consume them from the event slice directly.
pub trait VisualSink {
    fn on_piece_locked(&mut self, _cells: &[LockedCell]) {}
    fn on_lines_cleared(&mut self, _rows: &[i8]) {}
    fn on_rows_shifted(&mut self, _from_row: i8, _delta: i8) {}
    fn on_score_changed(&mut self, _score: u32) {}
    fn on_level_changed(&mut self, _level: u32) {}
    fn on_lines_count_changed(&mut self, _total: u32) {}
    fn on_game_over(&mut self) {}
}

/// Replay a tick's event slice into a sink, preserving order.
pub fn dispatch_events(events: &[GameEvent], sink: &mut dyn VisualSink) {
    for event in events {
        match event {
            GameEvent::PieceLocked { cells } => sink.on_piece_locked(cells),
            GameEvent::LinesCleared { rows } => sink.on_lines_cleared(rows),
            GameEvent::RowsShifted { from_row, delta } => sink.on_rows_shifted(*from_row, *delta),
            GameEvent::ScoreChanged { score } => sink.on_score_changed(*score),
            GameEvent::LevelChanged { level, .. } => sink.on_level_changed(*level),
            GameEvent::LinesCountChanged { total } => sink.on_lines_count_changed(*total),
            GameEvent::GameOver => sink.on_game_over(),
            GameEvent::PieceSpawned { .. } | GameEvent::NextPieceChanged { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        locked: usize,
        cleared_rows: Vec<i8>,
        shifts: Vec<(i8, i8)>,
        score: Option<u32>,
        game_over: bool,
    }

    impl VisualSink for Recorder {
        fn on_piece_locked(&mut self, _cells: &[LockedCell]) {
            self.locked += 1;
        }
        fn on_lines_cleared(&mut self, rows: &[i8]) {
            self.cleared_rows.extend_from_slice(rows);
        }
        fn on_rows_shifted(&mut self, from_row: i8, delta: i8) {
            self.shifts.push((from_row, delta));
        }
        fn on_score_changed(&mut self, score: u32) {
            self.score = Some(score);
        }
        fn on_game_over(&mut self) {
            self.game_over = true;
        }
    }

    #[test]
    fn test_dispatch_preserves_order_and_payloads() {
        let token = BlockToken {
            piece: 1,
            shape: ShapeId(0),
        };
        let cells = [
            LockedCell { x: 0, y: 0, token },
            LockedCell { x: 1, y: 0, token },
            LockedCell { x: 2, y: 0, token },
            LockedCell { x: 3, y: 0, token },
        ];
        let mut rows = ArrayVec::new();
        rows.push(0);

        let events = vec![
            GameEvent::PieceLocked { cells },
            GameEvent::RowsShifted {
                from_row: 0,
                delta: 1,
            },
            GameEvent::LinesCleared { rows },
            GameEvent::ScoreChanged { score: 40 },
            GameEvent::GameOver,
        ];

        let mut sink = Recorder::default();
        dispatch_events(&events, &mut sink);

        assert_eq!(sink.locked, 1);
        assert_eq!(sink.cleared_rows, vec![0]);
        assert_eq!(sink.shifts, vec![(0, 1)]);
        assert_eq!(sink.score, Some(40));
        assert!(sink.game_over);
    }

    #[test]
    fn test_spawn_events_are_host_level() {
        // Dispatch must ignore them without panicking.
        let events = vec![
            GameEvent::PieceSpawned {
                piece: 0,
                shape: ShapeId(1),
            },
            GameEvent::NextPieceChanged { shape: ShapeId(2) },
        ];
        let mut sink = Recorder::default();
        dispatch_events(&events, &mut sink);
        assert_eq!(sink.locked, 0);
    }
}
