use thiserror::Error;

use crate::{Point, Segment};

/// Everything that can go wrong when handing a position to the engine
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// The lattice was built from an empty point list
    #[error("the lattice has no points")]
    EmptyLattice,

    /// A square lattice too wide for `i32` coordinates
    #[error("a {0} × {0} lattice does not fit in i32 coordinates")]
    BoardTooLarge(u32),

    /// The same point appeared twice in the lattice
    #[error("point {0} appears more than once in the lattice")]
    DuplicatePoint(Point),

    /// A segment used a point that is not part of the lattice
    #[error("point {0} is not part of the lattice")]
    UnknownPoint(Point),

    /// A segment from a point to itself
    #[error("segment from {0} to itself has zero length")]
    DegenerateSegment(Point),

    /// An entry of the drawn history could not have been legally played
    #[error("drawn line #{index} ({segment}) is not legal on the board before it")]
    IllegalHistory {
        /// Position of the offending entry in the history
        index: usize,
        #[allow(missing_docs)]
        segment: Segment,
    },

    /// There is nothing left to draw, the game is over
    #[error("no legal move remains")]
    NoLegalMove,
}

/// Result type used across the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
