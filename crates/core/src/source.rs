//! Piece sources
//!
//! The session never generates shapes itself; it draws [`ShapeId`]s from a
//! [`PieceSource`] injected at construction. The stock implementation picks
//! uniformly at random and keeps a one-piece lookahead buffer so hosts can
//! always show what comes after the current piece.

use blockfall_types::ShapeId;

use crate::rng::SimpleRng;

/// Supplies the session with shapes, one lock ahead.
pub trait PieceSource {
    /// Take the next shape to spawn, advancing the lookahead.
    fn next(&mut self) -> ShapeId;

    /// The shape `next` will return, for preview display.
    fn peek_next(&self) -> ShapeId;
}

/// Uniform-random selection over the configured shape set.
///
/// A seed fully determines the sequence. The lookahead slot is filled at
/// construction, so `peek_next` is valid before the first draw.
#[derive(Debug, Clone)]
pub struct RandomPieceSource {
    rng: SimpleRng,
    shape_count: u32,
    lookahead: ShapeId,
}

impl RandomPieceSource {
    /// `shape_count` is the size of the session's shape set; session
    /// configuration guarantees it is non-zero.
    pub fn new(shape_count: usize, seed: u32) -> Self {
        debug_assert!(shape_count > 0, "shape set must be non-empty");
        let shape_count = shape_count.max(1) as u32;
        let mut rng = SimpleRng::new(seed);
        let lookahead = Self::pick(&mut rng, shape_count);
        Self {
            rng,
            shape_count,
            lookahead,
        }
    }

    fn pick(rng: &mut SimpleRng, shape_count: u32) -> ShapeId {
        ShapeId(rng.next_range(shape_count) as u8)
    }
}

impl PieceSource for RandomPieceSource {
    fn next(&mut self) -> ShapeId {
        let current = self.lookahead;
        self.lookahead = Self::pick(&mut self.rng, self.shape_count);
        current
    }

    fn peek_next(&self) -> ShapeId {
        self.lookahead
    }
}
