//! The legality model: which lines may still be drawn.
//!
//! [DrawableSet] is derived once from the lattice and then kept up to date incrementally. Drawing
//! a line only ever removes segments from it, so [DrawableSet::apply_move] hands back exactly
//! what it removed and [DrawableSet::undo_move] puts those segments back.

use std::collections::{BTreeSet, HashSet};

use derivative::Derivative;
use itertools::Itertools;

use crate::{
    geometry::{point_on_segment, Point, Segment},
    Error, Result,
};

/// The fixed set of points a game is played on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lattice {
    points: Vec<Point>,
    members: HashSet<Point>,
}

impl Lattice {
    /// Side length of the board the game is normally played on
    pub const REFERENCE_SIZE: u32 = 7;

    /// Build a lattice from an explicit list of points
    ///
    /// The list must be non-empty and free of duplicates. Order does not matter, points are kept
    /// sorted.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self> {
        let mut members = HashSet::new();
        let mut sorted = Vec::new();

        for p in points {
            if !members.insert(p) {
                return Err(Error::DuplicatePoint(p));
            }
            sorted.push(p);
        }

        if sorted.is_empty() {
            return Err(Error::EmptyLattice);
        }

        sorted.sort();

        Ok(Self {
            points: sorted,
            members,
        })
    }

    /// Every point of an `size × size` grid with coordinates starting at zero
    ///
    /// A size of zero is an empty lattice and an error like any other.
    pub fn square(size: u32) -> Result<Self> {
        let size = i32::try_from(size).map_err(|_| Error::BoardTooLarge(size))?;

        Self::new(
            (0..size)
                .cartesian_product(0..size)
                .map(|(x, y)| Point::new(x, y)),
        )
    }

    /// All points, ascending
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always false, a lattice can't be built without points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[allow(missing_docs)]
    pub fn contains(&self, p: Point) -> bool {
        self.members.contains(&p)
    }

    /// Join two lattice points, checking that both belong to the lattice
    pub fn segment(&self, a: Point, b: Point) -> Result<Segment> {
        let segment = Segment::new(a, b)?;
        self.check_segment(&segment)?;

        Ok(segment)
    }

    /// Fail if either endpoint of `segment` is not part of the lattice
    pub fn check_segment(&self, segment: &Segment) -> Result<()> {
        match segment.endpoints().into_iter().find(|p| !self.contains(*p)) {
            Some(p) => Err(Error::UnknownPoint(p)),
            None => Ok(()),
        }
    }

    /// Whether some lattice point other than the endpoints lies on `segment`
    pub fn skips_point(&self, segment: &Segment) -> bool {
        self.points
            .iter()
            .any(|p| !segment.has_endpoint(*p) && point_on_segment(segment, *p))
    }
}

/// Whether `candidate` may be drawn given everything in `drawn`
///
/// A segment is legal when both endpoints are lattice points, no other lattice point sits on it,
/// it doesn't cross a drawn line anywhere but a single shared endpoint, and it hasn't been drawn
/// already.
pub fn is_legal(candidate: &Segment, lattice: &Lattice, drawn: &[Segment]) -> bool {
    lattice.check_segment(candidate).is_ok()
        && !lattice.skips_point(candidate)
        && !drawn.iter().any(|line| candidate.crosses(line))
}

/// Every segment that is legal on an empty board
pub fn initial_drawable(lattice: &Lattice) -> DrawableSet {
    let segments = lattice
        .points()
        .iter()
        .tuple_combinations()
        .filter_map(|(a, b)| Segment::new(*a, *b).ok())
        .filter(|s| !lattice.skips_point(s))
        .collect();

    DrawableSet { segments }
}

/// The segments that are currently legal to play
///
/// Iteration is in ascending [Segment] order, which is the candidate order the search uses.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DrawableSet {
    segments: BTreeSet<Segment>,
}

impl DrawableSet {
    /// Recompute the drawable set from scratch for a given history
    pub fn from_history(lattice: &Lattice, drawn: &[Segment]) -> Self {
        let segments = initial_drawable(lattice)
            .segments
            .into_iter()
            .filter(|s| is_legal(s, lattice, drawn))
            .collect();

        Self { segments }
    }

    #[allow(missing_docs)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[allow(missing_docs)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    #[allow(missing_docs)]
    pub fn contains(&self, segment: &Segment) -> bool {
        self.segments.contains(segment)
    }

    #[allow(missing_docs)]
    pub fn iter(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.segments.iter()
    }

    /// Copy of the current contents, for iterating while the set itself changes
    pub fn snapshot(&self) -> Vec<Segment> {
        self.segments.iter().copied().collect()
    }

    /// Draw `segment`: remove it and everything it now blocks
    ///
    /// Returns exactly the segments that were removed, `segment` itself included when it was
    /// present.
    #[must_use = "the removed segments are needed to undo the move"]
    pub fn apply_move(&mut self, segment: &Segment) -> Vec<Segment> {
        let removed = self
            .segments
            .iter()
            .filter(|s| s.crosses(segment))
            .copied()
            .collect_vec();

        for s in &removed {
            self.segments.remove(s);
        }

        removed
    }

    /// Put back segments previously returned by [DrawableSet::apply_move]
    pub fn undo_move(&mut self, removed: Vec<Segment>) {
        self.segments.extend(removed);
    }
}

/// Undo information for a single [Board::play]
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a played move must be undone with Board::undo"]
pub struct MoveRecord {
    segment: Segment,
    removed: Vec<Segment>,
}

impl MoveRecord {
    /// The segment that was played
    pub fn segment(&self) -> Segment {
        self.segment
    }

    /// The segments the move took out of the drawable set
    pub fn removed(&self) -> &[Segment] {
        &self.removed
    }
}

/// A lattice together with the lines drawn on it and what may still be drawn
///
/// This is the state the search mutates in place. Every [Board::play] has to be paired with a
/// [Board::undo] of the returned record, in reverse order.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct Board {
    #[derivative(Debug = "ignore")]
    lattice: Lattice,
    history: Vec<Segment>,
    #[derivative(Debug(format_with = "fmt_drawable_count"))]
    drawable: DrawableSet,
}

fn fmt_drawable_count(
    drawable: &DrawableSet,
    f: &mut std::fmt::Formatter,
) -> std::result::Result<(), std::fmt::Error> {
    write!(f, "{} segments", drawable.len())
}

impl Board {
    /// An empty board
    pub fn new(lattice: Lattice) -> Self {
        let drawable = initial_drawable(&lattice);

        Self {
            lattice,
            history: vec![],
            drawable,
        }
    }

    /// Replay `history` onto an empty board, validating every entry
    pub fn with_history(lattice: Lattice, history: &[Segment]) -> Result<Self> {
        let mut board = Self::new(lattice);
        for segment in history {
            board.extend(*segment)?;
        }

        Ok(board)
    }

    /// Permanently add a line, failing if it isn't legal right now
    pub fn extend(&mut self, segment: Segment) -> Result<()> {
        self.lattice.check_segment(&segment)?;

        if !self.drawable.contains(&segment) {
            return Err(Error::IllegalHistory {
                index: self.history.len(),
                segment,
            });
        }

        let _ = self.play(segment);

        Ok(())
    }

    #[allow(missing_docs)]
    pub fn lattice(&self) -> &Lattice {
        &self.lattice
    }

    /// Lines drawn so far, in play order
    pub fn history(&self) -> &[Segment] {
        &self.history
    }

    #[allow(missing_docs)]
    pub fn drawable(&self) -> &DrawableSet {
        &self.drawable
    }

    /// Whether `segment` could be drawn right now
    pub fn is_legal(&self, segment: &Segment) -> bool {
        is_legal(segment, &self.lattice, &self.history)
    }

    /// Draw a line without checking it, returning what is needed to take it back
    pub fn play(&mut self, segment: Segment) -> MoveRecord {
        let removed = self.drawable.apply_move(&segment);
        self.history.push(segment);

        MoveRecord { segment, removed }
    }

    /// Take back the most recent [Board::play]
    pub fn undo(&mut self, record: MoveRecord) {
        let popped = self.history.pop();
        debug_assert_eq!(popped, Some(record.segment), "undo out of order");

        self.drawable.undo_move(record.removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn lattice_rejects_bad_point_lists() {
        assert_eq!(Lattice::new(vec![]), Err(Error::EmptyLattice));
        assert_eq!(
            Lattice::new(vec![p(0, 0), p(1, 0), p(0, 0)]),
            Err(Error::DuplicatePoint(p(0, 0)))
        );
    }

    #[test]
    fn square_lattice_sizes() {
        assert_eq!(Lattice::square(Lattice::REFERENCE_SIZE).unwrap().len(), 49);
        assert_eq!(Lattice::square(0), Err(Error::EmptyLattice));
        assert_eq!(
            Lattice::square(u32::MAX),
            Err(Error::BoardTooLarge(u32::MAX))
        );
    }

    #[test]
    fn lattice_at_the_edge_of_the_coordinate_range() {
        let (min, max) = (i32::MIN, i32::MAX);
        let lattice = Lattice::new(vec![p(min, min), p(max, max), p(0, 0), p(min, max)]).unwrap();
        let drawable = initial_drawable(&lattice);

        // the long diagonal runs through (0, 0)
        assert!(!drawable.contains(&seg((min, min), (max, max))));
        assert!(drawable.contains(&seg((min, min), (0, 0))));
        assert!(drawable.contains(&seg((0, 0), (min, max))));
        assert_eq!(drawable.len(), 5);

        let drawn = [seg((min, max), (0, 0))];
        assert!(is_legal(&seg((min, min), (0, 0)), &lattice, &drawn));
        assert!(!is_legal(&seg((min, max), (0, 0)), &lattice, &drawn));
    }

    #[test]
    fn lattice_segment_checks_membership() {
        let lattice = Lattice::square(2).unwrap();

        assert!(lattice.segment(p(0, 0), p(1, 1)).is_ok());
        assert_eq!(
            lattice.segment(p(0, 0), p(5, 5)),
            Err(Error::UnknownPoint(p(5, 5)))
        );
        assert_eq!(
            lattice.segment(p(1, 1), p(1, 1)),
            Err(Error::DegenerateSegment(p(1, 1)))
        );
    }

    #[test]
    fn unit_square_has_every_pair_drawable() {
        let lattice = Lattice::square(2).unwrap();
        let drawable = initial_drawable(&lattice);

        // 4 sides and 2 diagonals
        assert_eq!(drawable.len(), 6);
    }

    #[test]
    fn initial_drawable_excludes_skipping_segments() {
        let lattice = Lattice::square(3).unwrap();
        let drawable = initial_drawable(&lattice);

        assert!(!drawable.contains(&seg((0, 0), (2, 0))));
        assert!(!drawable.contains(&seg((0, 0), (2, 2))));
        assert!(drawable.contains(&seg((0, 0), (1, 2))));
        // 36 pairs minus 3 rows, 3 columns and 2 diagonals of length two
        assert_eq!(drawable.len(), 28);
    }

    #[test]
    fn legality_rules() {
        let lattice = Lattice::square(3).unwrap();
        let drawn = vec![seg((0, 0), (1, 1))];

        // already drawn
        assert!(!is_legal(&seg((1, 1), (0, 0)), &lattice, &drawn));
        // skips (1, 1)
        assert!(!is_legal(&seg((0, 0), (2, 2)), &lattice, &[]));
        // crosses in the middle
        assert!(!is_legal(&seg((0, 1), (1, 0)), &lattice, &drawn));
        // touches at a shared endpoint
        assert!(is_legal(&seg((1, 1), (2, 1)), &lattice, &drawn));
        // not a lattice point
        assert!(!is_legal(&seg((0, 0), (5, 1)), &lattice, &drawn));
        assert!(is_legal(&seg((0, 1), (1, 2)), &lattice, &drawn));
    }

    #[test]
    fn apply_move_removes_the_line_and_what_it_crosses() {
        let lattice = Lattice::square(2).unwrap();
        let mut drawable = initial_drawable(&lattice);

        let removed = drawable.apply_move(&seg((0, 0), (1, 1)));

        assert_eq!(removed, vec![seg((0, 0), (1, 1)), seg((0, 1), (1, 0))]);
        assert_eq!(drawable.len(), 4);
    }

    #[test]
    fn incremental_updates_match_a_full_recompute() {
        let lattice = Lattice::square(4).unwrap();
        let moves = [
            seg((0, 0), (1, 2)),
            seg((1, 1), (2, 0)),
            seg((3, 3), (2, 1)),
            seg((0, 3), (1, 2)),
            seg((1, 2), (2, 1)),
            seg((3, 0), (3, 1)),
        ];

        let mut board = Board::new(lattice.clone());
        for (i, m) in moves.iter().enumerate() {
            assert!(board.is_legal(m), "move {i} should be legal");
            let _ = board.play(*m);

            assert_eq!(
                board.drawable(),
                &DrawableSet::from_history(&lattice, board.history())
            );
        }
    }

    #[test]
    fn undo_restores_the_exact_prior_state() {
        let lattice = Lattice::square(4).unwrap();
        let mut board = Board::new(lattice);
        let start = board.clone();

        let mut records = vec![];
        let mut states = vec![];
        for m in [
            seg((0, 0), (3, 1)),
            seg((1, 1), (1, 2)),
            seg((0, 0), (1, 1)),
            seg((2, 2), (3, 1)),
        ] {
            states.push(board.clone());
            records.push(board.play(m));
        }

        while let Some(record) = records.pop() {
            board.undo(record);
            assert_eq!(Some(&board), states.pop().as_ref());
        }

        assert_eq!(board, start);
    }

    #[test]
    fn with_history_rejects_crossing_lines() {
        let lattice = Lattice::square(2).unwrap();
        let history = [seg((0, 0), (1, 1)), seg((0, 1), (1, 0))];

        assert_eq!(
            Board::with_history(lattice, &history),
            Err(Error::IllegalHistory {
                index: 1,
                segment: seg((0, 1), (1, 0)),
            })
        );
    }

    #[test]
    fn with_history_rejects_repeats_and_unknown_points() {
        let lattice = Lattice::square(2).unwrap();

        assert!(matches!(
            Board::with_history(lattice.clone(), &[seg((0, 0), (1, 0)), seg((1, 0), (0, 0))]),
            Err(Error::IllegalHistory { index: 1, .. })
        ));
        assert_eq!(
            Board::with_history(lattice, &[seg((0, 0), (2, 0))]),
            Err(Error::UnknownPoint(p(2, 0)))
        );
    }
}
