//! Shape data and the offset rotation transform
//!
//! Shape geometry is supplied to the session as data, not computed: a
//! [`ShapeDef`] lists four cell offsets from the piece anchor (y-up), a spawn
//! offset, a display tag, and whether the shape responds to rotation at all.
//! [`standard_set`] is the classic seven-piece set; hosts can pass any other
//! non-empty set through [`crate::config::GameConfig`].
//!
//! Rotation is a plain ±90° transform applied to every offset around the
//! anchor. There is no orientation table and no wall-kick search; the session
//! nudges an out-of-bounds result back into the well and otherwise rejects
//! the rotation outright.

use blockfall_types::ShapeDef;

/// Rotate a single anchor-relative offset by a quarter turn.
///
/// The default turn is -90° in a y-up plane (clockwise on screen);
/// `opposite` selects +90°.
pub fn rotate_offset(offset: (i8, i8), opposite: bool) -> (i8, i8) {
    let (dx, dy) = offset;
    if opposite {
        (-dy, dx)
    } else {
        (dy, -dx)
    }
}

/// The classic seven tetrominoes.
///
/// The bar spawns one row higher than the rest (its cells sit on a single
/// row) so every shape's top cell lands on the same row at spawn. The square
/// is marked non-rotating; anchor rotation would only shuffle it around.
pub fn standard_set() -> Vec<ShapeDef> {
    vec![
        ShapeDef {
            cells: [(-1, 0), (0, 0), (1, 0), (2, 0)],
            spawn_offset: (0, 1),
            tag: 'I',
            rotates: true,
        },
        ShapeDef {
            cells: [(0, 0), (1, 0), (0, 1), (1, 1)],
            spawn_offset: (0, 0),
            tag: 'O',
            rotates: false,
        },
        ShapeDef {
            cells: [(-1, 0), (0, 0), (1, 0), (0, 1)],
            spawn_offset: (0, 0),
            tag: 'T',
            rotates: true,
        },
        ShapeDef {
            cells: [(-1, 0), (0, 0), (0, 1), (1, 1)],
            spawn_offset: (0, 0),
            tag: 'S',
            rotates: true,
        },
        ShapeDef {
            cells: [(0, 0), (1, 0), (-1, 1), (0, 1)],
            spawn_offset: (0, 0),
            tag: 'Z',
            rotates: true,
        },
        ShapeDef {
            cells: [(-1, 1), (-1, 0), (0, 0), (1, 0)],
            spawn_offset: (0, 0),
            tag: 'J',
            rotates: true,
        },
        ShapeDef {
            cells: [(1, 1), (-1, 0), (0, 0), (1, 0)],
            spawn_offset: (0, 0),
            tag: 'L',
            rotates: true,
        },
    ]
}
