//! Positions stored as JSON, used by tests, benches and the `referee` CLI.
//!
//! ```json
//! { "board_size": 7, "lines": [[[0, 0], [1, 0]], [[1, 0], [1, 1]]] }
//! ```
//!
//! `points` may be given instead of relying on `board_size` to describe a lattice that isn't a
//! full square.

use serde::{Deserialize, Serialize};

use crate::{
    board::{Board, Lattice},
    Point, Result, Segment,
};

/// A lattice and the lines drawn on it so far, in play order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameFixture {
    /// Side length of a square lattice, ignored when `points` is present
    pub board_size: u32,
    /// Explicit lattice points
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<Vec<Point>>,
    #[allow(missing_docs)]
    #[serde(default)]
    pub lines: Vec<Segment>,
}

impl GameFixture {
    /// An empty square board
    pub fn empty(board_size: u32) -> Self {
        Self {
            board_size,
            points: None,
            lines: vec![],
        }
    }

    #[allow(missing_docs)]
    pub fn lattice(&self) -> Result<Lattice> {
        match &self.points {
            Some(points) => Lattice::new(points.iter().copied()),
            None => Lattice::square(self.board_size),
        }
    }

    /// Replay the lines onto the lattice, failing on the first one that isn't legal
    pub fn board(&self) -> Result<Board> {
        Board::with_history(self.lattice()?, &self.lines)
    }
}
