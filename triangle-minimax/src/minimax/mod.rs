//! Two-player minimax with alpha-beta pruning over the lines that can still be drawn.
//!
//! The engine is always the maximizing side. A node's value is the number of triangles the
//! engine closes from that point on minus the number its opponent closes, so each move adds
//! `+points` when the engine makes it and `-points` when the opponent does. There is no
//! positional evaluation, a depth-limited leaf is just worth the triangles closed on the way to
//! it.
//!
//! Each node passes a single bound down to its children: the best value it has found so far,
//! shifted by the points already earned on the way to the child. A child stops looking at
//! candidates once it has shown it can't beat that bound.
//!
//! How deep to look depends on how many moves are available, see [DepthPolicy]. Wide positions
//! get a shallow search and the endgame is searched to the end.
//!
//! ```rust
//! use triangle_minimax::{
//!     board::Lattice,
//!     minimax::{Depth, EngineOptions, TriangleEngine},
//!     Point,
//! };
//!
//! let lattice = Lattice::new([Point::new(0, 0), Point::new(2, 0), Point::new(1, 2)]).unwrap();
//! let history = [
//!     lattice.segment(Point::new(0, 0), Point::new(2, 0)).unwrap(),
//!     lattice.segment(Point::new(2, 0), Point::new(1, 2)).unwrap(),
//! ];
//!
//! let mut engine = TriangleEngine::new(lattice.clone(), EngineOptions::default());
//! let chosen = engine.select_move(&history).unwrap();
//!
//! assert_eq!(chosen, lattice.segment(Point::new(0, 0), Point::new(1, 2)).unwrap());
//! assert_eq!(engine.single_minimax(Depth::Exhaustive).unwrap().value, 1);
//! ```

mod depth;
pub use depth::{Depth, DepthPolicy};

mod minimax_return;
pub use minimax_return::{MinMaxReturn, OptionValue};

mod move_ordering;
pub use move_ordering::MoveOrdering;

mod eval;
pub use eval::{EngineOptions, TriangleEngine};
