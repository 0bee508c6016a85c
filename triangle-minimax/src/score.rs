//! Counting the triangles a line closes.
//!
//! Nothing here is stored between calls. Triangles are rediscovered from the drawn history every
//! time a candidate is evaluated.

use std::ops::AddAssign;

use itertools::Itertools;

use crate::{
    board::Lattice,
    geometry::{Point, Segment, Triangle},
};

/// The empty triangles that drawing `candidate` would complete
///
/// `drawn` must be the history *before* the move, it must not already contain `candidate`. A
/// triangle is closed when each endpoint of the candidate has a drawn line to the same third point
/// and no other lattice point lies inside or on that triangle.
pub fn closed_triangles(candidate: &Segment, lattice: &Lattice, drawn: &[Segment]) -> Vec<Triangle> {
    let [dot1, dot2] = candidate.endpoints();

    let neighbours_of = |dot: Point| {
        drawn
            .iter()
            .filter_map(|line| line.other_endpoint(dot))
            .filter(|p| !candidate.has_endpoint(*p))
            .collect_vec()
    };

    let at_dot1 = neighbours_of(dot1);
    if at_dot1.is_empty() {
        return vec![];
    }
    let at_dot2 = neighbours_of(dot2);

    at_dot1
        .iter()
        .cartesian_product(at_dot2.iter())
        .filter(|(a, b)| a == b)
        .map(|(apex, _)| Triangle::new(dot1, dot2, *apex))
        .filter(|triangle| is_empty(triangle, lattice))
        .collect()
}

/// How many triangles drawing `candidate` would complete, see [closed_triangles]
pub fn score_move(candidate: &Segment, lattice: &Lattice, drawn: &[Segment]) -> u32 {
    closed_triangles(candidate, lattice, drawn).len() as u32
}

fn is_empty(triangle: &Triangle, lattice: &Lattice) -> bool {
    !lattice
        .points()
        .iter()
        .any(|p| !triangle.has_vertex(*p) && triangle.contains(*p))
}

/// How closed triangles turn into points for the player who closed them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScoringRule {
    /// Every closed triangle is worth a point, so a line between two triangles scores two
    #[default]
    PerTriangle,
    /// A line is worth one point if it closes anything at all
    AtMostOne,
}

impl ScoringRule {
    /// Points earned for a move that closes `triangles` triangles
    pub fn points(self, triangles: u32) -> u32 {
        match self {
            ScoringRule::PerTriangle => triangles,
            ScoringRule::AtMostOne => triangles.min(1),
        }
    }

    /// Points earned for drawing `candidate` on top of `drawn`
    pub fn score(self, candidate: &Segment, lattice: &Lattice, drawn: &[Segment]) -> u32 {
        self.points(score_move(candidate, lattice, drawn))
    }
}

/// One of the two sides of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Party {
    #[allow(missing_docs)]
    Opponent,
    /// The side this crate is choosing moves for
    Engine,
}

impl Party {
    /// The other side
    pub fn other(self) -> Self {
        match self {
            Party::Opponent => Party::Engine,
            Party::Engine => Party::Opponent,
        }
    }
}

/// Running totals for a game. The search never looks at this, it is for whoever runs the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    #[allow(missing_docs)]
    pub opponent: u32,
    #[allow(missing_docs)]
    pub engine: u32,
}

impl Score {
    /// Give `points` to `party`
    pub fn credit(&mut self, party: Party, points: u32) {
        match party {
            Party::Opponent => self.opponent += points,
            Party::Engine => self.engine += points,
        }
    }

    /// The engine's lead, negative when it is behind
    pub fn margin(&self) -> i64 {
        i64::from(self.engine) - i64::from(self.opponent)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Self) {
        self.opponent += rhs.opponent;
        self.engine += rhs.engine;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn needs_lines_at_both_ends() {
        let lattice = Lattice::square(2).unwrap();
        let drawn = [seg((0, 0), (1, 0))];

        assert_eq!(score_move(&seg((1, 0), (1, 1)), &lattice, &drawn), 0);
        assert_eq!(score_move(&seg((0, 0), (1, 1)), &lattice, &[]), 0);
    }

    #[test]
    fn closing_the_third_side_scores_one() {
        let lattice = Lattice::square(2).unwrap();
        let drawn = [seg((0, 0), (1, 0)), seg((1, 0), (1, 1))];
        let closing = seg((0, 0), (1, 1));

        assert_eq!(score_move(&closing, &lattice, &drawn), 1);
        assert_eq!(
            closed_triangles(&closing, &lattice, &drawn),
            vec![Triangle::new((0, 0).into(), (1, 0).into(), (1, 1).into())]
        );
    }

    #[test]
    fn endpoint_order_does_not_matter() {
        let lattice = Lattice::square(3).unwrap();
        let drawn = [
            seg((0, 0), (1, 0)),
            seg((1, 0), (1, 1)),
            seg((0, 1), (1, 1)),
            seg((0, 0), (0, 1)),
        ];

        for (a, b) in [((0, 0), (1, 1)), ((1, 0), (0, 1)), ((0, 0), (2, 2))] {
            let forward = Segment::new(a.into(), b.into()).unwrap();
            let backward = Segment::new(b.into(), a.into()).unwrap();

            assert_eq!(
                score_move(&forward, &lattice, &drawn),
                score_move(&backward, &lattice, &drawn)
            );
        }
    }

    #[test]
    fn a_diagonal_can_close_two_triangles_at_once() {
        let lattice = Lattice::square(2).unwrap();
        let drawn = [
            seg((0, 0), (1, 0)),
            seg((1, 0), (1, 1)),
            seg((1, 1), (0, 1)),
            seg((0, 1), (0, 0)),
        ];
        let diagonal = seg((0, 0), (1, 1));

        assert_eq!(score_move(&diagonal, &lattice, &drawn), 2);
        assert_eq!(ScoringRule::PerTriangle.score(&diagonal, &lattice, &drawn), 2);
        assert_eq!(ScoringRule::AtMostOne.score(&diagonal, &lattice, &drawn), 1);
    }

    #[test]
    fn triangles_with_a_point_inside_do_not_score() {
        let lattice = Lattice::square(3).unwrap();
        // (1, 1) sits strictly inside (0, 0) (2, 1) (1, 2)
        let drawn = [seg((0, 0), (2, 1)), seg((2, 1), (1, 2))];

        assert_eq!(score_move(&seg((0, 0), (1, 2)), &lattice, &drawn), 0);
    }

    #[test]
    fn score_bookkeeping() {
        let mut score = Score::default();
        score.credit(Party::Engine, 2);
        score.credit(Party::Engine.other(), 3);

        assert_eq!(
            score,
            Score {
                opponent: 3,
                engine: 2
            }
        );
        assert_eq!(score.margin(), -1);
    }
}
