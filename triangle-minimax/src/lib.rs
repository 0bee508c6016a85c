#![deny(missing_debug_implementations)]
#![warn(missing_docs)]
//! This crate picks moves for the triangle game: two players take turns drawing straight lines
//! between points of a fixed lattice, and whoever closes an empty triangle scores a point for it.
//!
//! The pieces, from the bottom up:
//! - [geometry]: exact predicates on points, segments and triangles
//! - [board]: which lines are legal, kept up to date incrementally as lines are drawn and undone
//! - [score]: how many triangles a line closes
//! - [minimax]: the depth-adaptive alpha-beta search that chooses the engine's line
//!
//! Running the game itself (whose turn it is, keeping score, drawing the board) is up to the
//! caller. The engine is handed the lattice once and the drawn lines each turn, and answers with
//! one new legal line.

pub mod board;
mod error;
pub mod fixture;
pub mod geometry;
pub mod minimax;
pub mod score;

pub use error::{Error, Result};
pub use geometry::{Point, Segment, Triangle};
