//! Playfield grid - occupancy, line detection, clearing, compaction
//!
//! The grid is a list of rows, bottom row first, each cell holding an
//! optional occupant token. It answers occupancy queries and performs the
//! bounded clear scan; it does **not** validate piece movement (the session
//! does that before calling [`Grid::place`]).
//!
//! # Clear scan
//!
//! Only rows spanned by the just-locked piece can newly become complete, so
//! [`Grid::clear_lines`] examines at most `max_rows` rows starting at the
//! piece's lowest row instead of rescanning the whole board. When a complete
//! row is deleted, a fresh empty row is appended at the top, every row at or
//! above the deleted index moves down by one, and the **same index is
//! examined again** (the row that shifted into it has not been checked yet).
//! The rows-examined counter still advances on every iteration, so a cascade
//! never examines more than `max_rows` rows relative to the scan start.

use arrayvec::ArrayVec;
use blockfall_types::{BlockToken, MAX_SCAN_ROWS};

use crate::events::{GameEvent, LockedCell};

/// The occupancy matrix. Row 0 is the bottom of the well.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    width: u8,
    height: u8,
    rows: Vec<Vec<Option<BlockToken>>>,
}

impl Grid {
    /// Create an empty grid. Dimensions are fixed for the session.
    pub fn new(width: u8, height: u8) -> Self {
        let rows = (0..height)
            .map(|_| vec![None; width as usize])
            .collect();
        Self {
            width,
            height,
            rows,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Rightmost valid column.
    pub fn right_bound(&self) -> i8 {
        self.width as i8 - 1
    }

    /// Topmost valid row.
    pub fn top_bound(&self) -> i8 {
        self.height as i8 - 1
    }

    fn in_bounds(&self, x: i8, y: i8) -> bool {
        x >= 0 && x <= self.right_bound() && y >= 0 && y <= self.top_bound()
    }

    /// True iff the cell holds an occupant.
    ///
    /// Callers are expected to have bound-checked already; an out-of-range
    /// coordinate here is an invariant violation. Debug builds assert,
    /// release builds answer "empty" as a fallback.
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        debug_assert!(
            self.in_bounds(x, y),
            "occupancy query out of bounds: ({x}, {y})"
        );
        if !self.in_bounds(x, y) {
            return false;
        }
        self.rows[y as usize][x as usize].is_some()
    }

    /// The occupant token at a cell, if any. Out of range reads as empty.
    pub fn get(&self, x: i8, y: i8) -> Option<BlockToken> {
        if !self.in_bounds(x, y) {
            return None;
        }
        self.rows[y as usize][x as usize]
    }

    /// Mark each cell occupied by its token.
    ///
    /// The caller has already validated bounds and non-overlap; this is the
    /// lock handoff, not a collision check. Debug builds assert both
    /// preconditions, release builds skip offending cells.
    pub fn place(&mut self, cells: &[LockedCell]) {
        for cell in cells {
            debug_assert!(
                self.in_bounds(cell.x, cell.y),
                "placed cell out of bounds: ({}, {})",
                cell.x,
                cell.y
            );
            if !self.in_bounds(cell.x, cell.y) {
                continue;
            }
            debug_assert!(
                self.rows[cell.y as usize][cell.x as usize].is_none(),
                "placed cell already occupied: ({}, {})",
                cell.x,
                cell.y
            );
            self.rows[cell.y as usize][cell.x as usize] = Some(cell.token);
        }
    }

    fn row_complete(&self, row: i8) -> bool {
        self.rows[row as usize].iter().all(|cell| cell.is_some())
    }

    /// Scan up to `max_rows` rows starting at `from_row`, deleting every
    /// complete row found and compacting the rows above it.
    ///
    /// Emits one `RowsShifted` per deletion and a summary `LinesCleared`
    /// (row indices as observed at clear time) when anything cleared.
    /// Returns the number of lines cleared.
    pub fn clear_lines(
        &mut self,
        from_row: i8,
        max_rows: u8,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        debug_assert!(from_row >= 0, "scan start below the well: {from_row}");
        debug_assert!(max_rows as usize <= MAX_SCAN_ROWS, "scan bound {max_rows} too large");
        let max_rows = max_rows.min(MAX_SCAN_ROWS as u8);

        let mut rows_checked: u8 = 0;
        let mut current_row = from_row.max(0);
        let mut cleared_rows: ArrayVec<i8, MAX_SCAN_ROWS> = ArrayVec::new();

        while rows_checked < max_rows {
            if current_row > self.top_bound() {
                break;
            }

            if self.row_complete(current_row) {
                // Delete the row and keep the well the same height.
                self.rows.remove(current_row as usize);
                self.rows.push(vec![None; self.width as usize]);
                events.push(GameEvent::RowsShifted {
                    from_row: current_row,
                    delta: 1,
                });
                cleared_rows.push(current_row);

                // The row above just shifted into this index and has not
                // been checked yet, so examine the same index again.
                current_row -= 1;
            }

            current_row += 1;
            rows_checked += 1;
        }

        let cleared = cleared_rows.len() as u32;
        if cleared > 0 {
            events.push(GameEvent::LinesCleared { rows: cleared_rows });
        }
        cleared
    }

    /// Row-major occupancy dump from the bottom row up, one byte per cell
    /// (0 = empty, shape index + 1 otherwise). Used by snapshots.
    pub fn occupancy(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.width as usize * self.height as usize);
        for row in &self.rows {
            for cell in row {
                out.push(match cell {
                    Some(token) => token.shape.0.saturating_add(1),
                    None => 0,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use blockfall_types::ShapeId;

    fn token(piece: u32) -> BlockToken {
        BlockToken {
            piece,
            shape: ShapeId(0),
        }
    }

    fn fill_row(grid: &mut Grid, row: i8) {
        let cells: Vec<LockedCell> = (0..grid.width() as i8)
            .map(|x| LockedCell {
                x,
                y: row,
                token: token(row as u32),
            })
            .collect();
        grid.place(&cells);
    }

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(10, 20);
        for y in 0..20 {
            for x in 0..10 {
                assert!(!grid.is_occupied(x, y));
            }
        }
    }

    #[test]
    fn test_place_and_query() {
        let mut grid = Grid::new(10, 20);
        grid.place(&[LockedCell {
            x: 3,
            y: 5,
            token: token(7),
        }]);
        assert!(grid.is_occupied(3, 5));
        assert_eq!(grid.get(3, 5), Some(token(7)));
        assert!(!grid.is_occupied(3, 6));
    }

    #[test]
    fn test_clear_single_row_shifts_rows_down() {
        let mut grid = Grid::new(4, 8);
        fill_row(&mut grid, 0);
        // A lone block above the complete row.
        grid.place(&[LockedCell {
            x: 1,
            y: 1,
            token: token(99),
        }]);

        let mut events = Vec::new();
        let cleared = grid.clear_lines(0, 4, &mut events);

        assert_eq!(cleared, 1);
        // The block fell into the cleared slot.
        assert_eq!(grid.get(1, 0), Some(token(99)));
        assert!(!grid.is_occupied(1, 1));
        // Top row is fresh.
        assert!((0..4).all(|x| !grid.is_occupied(x, 7)));
    }

    #[test]
    fn test_cascade_rechecks_same_index() {
        let mut grid = Grid::new(4, 8);
        // Rows 0..=2 complete; row 3 holds a partial remainder.
        for row in 0..3 {
            fill_row(&mut grid, row);
        }
        grid.place(&[LockedCell {
            x: 0,
            y: 3,
            token: token(50),
        }]);

        let mut events = Vec::new();
        let cleared = grid.clear_lines(0, 4, &mut events);

        assert_eq!(cleared, 3);
        // Each deletion was observed at index 0 as rows cascaded down.
        let rows: Vec<i8> = events
            .iter()
            .find_map(|e| match e {
                GameEvent::LinesCleared { rows } => Some(rows.iter().copied().collect()),
                _ => None,
            })
            .unwrap();
        assert_eq!(rows, vec![0, 0, 0]);
        // The remainder landed on the floor.
        assert_eq!(grid.get(0, 0), Some(token(50)));
    }

    #[test]
    fn test_scan_is_bounded() {
        let mut grid = Grid::new(4, 8);
        // Five complete rows, but the scan may only examine four.
        for row in 0..5 {
            fill_row(&mut grid, row);
        }

        let mut events = Vec::new();
        let cleared = grid.clear_lines(0, 4, &mut events);

        assert_eq!(cleared, 4);
        // The fifth row survived (now sitting on the floor).
        assert!(grid.row_complete(0));
    }

    #[test]
    fn test_scan_stops_at_top_bound() {
        let mut grid = Grid::new(4, 4);
        fill_row(&mut grid, 3);
        let mut events = Vec::new();
        // Starting near the top: the scan must not run past the well.
        let cleared = grid.clear_lines(3, 4, &mut events);
        assert_eq!(cleared, 1);
    }

    #[test]
    fn test_no_clear_returns_zero_and_no_events() {
        let mut grid = Grid::new(4, 8);
        grid.place(&[LockedCell {
            x: 0,
            y: 0,
            token: token(1),
        }]);
        let mut events = Vec::new();
        assert_eq!(grid.clear_lines(0, 4, &mut events), 0);
        assert!(events.is_empty());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "out of bounds")]
    fn test_place_out_of_bounds_asserts_in_debug() {
        let mut grid = Grid::new(4, 4);
        grid.place(&[LockedCell {
            x: 4,
            y: 0,
            token: token(0),
        }]);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "already occupied")]
    fn test_double_place_asserts_in_debug() {
        let mut grid = Grid::new(4, 4);
        let cell = LockedCell {
            x: 1,
            y: 1,
            token: token(0),
        };
        grid.place(&[cell]);
        grid.place(&[cell]);
    }
}
