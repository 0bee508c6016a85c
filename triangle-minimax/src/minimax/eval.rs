use std::time::{Duration, Instant};

use derivative::Derivative;
use tracing::{debug, info, info_span};

use crate::{
    board::{Board, Lattice},
    score::ScoringRule,
    Error, Point, Result, Segment,
};

use super::{Depth, DepthPolicy, MinMaxReturn, MoveOrdering, OptionValue};

/// Larger than any value a real game can reach, used as the open bound at the root
const INFINITY: i32 = i32::MAX / 4;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Optional properties that can be defined for a [TriangleEngine]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use triangle_minimax::minimax::{Depth, EngineOptions};
/// use triangle_minimax::score::ScoringRule;
///
/// let defaults: EngineOptions = Default::default();
///
/// assert_eq!(defaults.depth_policy.depth_for(20), Depth::Limited(3));
/// assert_eq!(defaults.scoring, ScoringRule::PerTriangle);
/// assert_eq!(defaults.time_budget, None);
/// ```
pub struct EngineOptions {
    /// Maps the number of available moves to a search depth
    pub depth_policy: DepthPolicy,
    /// How closed triangles are turned into points
    pub scoring: ScoringRule,
    /// When set, search with iterative deepening and stop once this much time has passed
    ///
    /// The depth from `depth_policy` is then a ceiling rather than a target.
    pub time_budget: Option<Duration>,
    /// How root moves are ordered between deepening iterations
    pub move_ordering: MoveOrdering,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            depth_policy: DepthPolicy::default(),
            scoring: ScoringRule::default(),
            time_budget: None,
            move_ordering: MoveOrdering::default(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
/// This type is used to represent that the deadline passed
/// part way through an iteration so we returned out of the
/// current context
struct AbortedEarly;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Maximizer,
    Minimizer,
}

impl Role {
    fn opponent(self) -> Self {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }

    fn sign(self) -> i32 {
        match self {
            Role::Maximizer => 1,
            Role::Minimizer => -1,
        }
    }

    fn worst(self) -> i32 {
        -self.sign() * INFINITY
    }

    fn prefers(self, value: i32, current: i32) -> bool {
        match self {
            Role::Maximizer => value > current,
            Role::Minimizer => value < current,
        }
    }

    fn reached(self, value: i32, cutoff: i32) -> bool {
        match self {
            Role::Maximizer => value >= cutoff,
            Role::Minimizer => value <= cutoff,
        }
    }
}

/// One run of alpha-beta over a borrowed board
///
/// The board is mutated while searching and is always back in its starting state when a call
/// returns, aborted or not.
struct Search<'board> {
    board: &'board mut Board,
    scoring: ScoringRule,
    deadline: Option<Instant>,
    nodes: u64,
}

impl<'board> Search<'board> {
    fn new(board: &'board mut Board, scoring: ScoringRule, deadline: Option<Instant>) -> Self {
        Self {
            board,
            scoring,
            deadline,
            nodes: 0,
        }
    }

    fn check_deadline(&self) -> Result<(), AbortedEarly> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Err(AbortedEarly),
            _ => Ok(()),
        }
    }

    fn root(
        &mut self,
        depth: Depth,
        candidates: Vec<Segment>,
    ) -> Result<MinMaxReturn, AbortedEarly> {
        let mut options = Vec::with_capacity(candidates.len());
        let (value, best_move) =
            self.step(Role::Maximizer, INFINITY, depth, candidates, Some(&mut options))?;

        Ok(MinMaxReturn {
            // The root is only ever searched with at least one candidate
            best_move: best_move.unwrap_or_else(|| options[0].0),
            value,
            depth,
            nodes: self.nodes,
            options,
        })
    }

    fn step_max(&mut self, cutoff: i32, depth: Depth) -> Result<i32, AbortedEarly> {
        let candidates = self.board.drawable().snapshot();
        self.step(Role::Maximizer, cutoff, depth, candidates, None)
            .map(|(value, _)| value)
    }

    fn step_min(&mut self, cutoff: i32, depth: Depth) -> Result<i32, AbortedEarly> {
        let candidates = self.board.drawable().snapshot();
        self.step(Role::Minimizer, cutoff, depth, candidates, None)
            .map(|(value, _)| value)
    }

    /// Examine `candidates` for `role`, stopping once the best value found reaches `cutoff`
    fn step(
        &mut self,
        role: Role,
        cutoff: i32,
        depth: Depth,
        candidates: Vec<Segment>,
        mut options: Option<&mut Vec<(Segment, OptionValue)>>,
    ) -> Result<(i32, Option<Segment>), AbortedEarly> {
        let mut best_value = role.worst();
        let mut best_choice = None;

        for choice in candidates {
            self.check_deadline()?;
            self.nodes += 1;

            let points = self
                .scoring
                .score(&choice, self.board.lattice(), self.board.history());
            let mut cur_value = role.sign() * points as i32;

            let record = self.board.play(choice);

            let below = if !self.board.drawable().is_empty() && !depth.is_exhausted() {
                let child_cutoff = best_value - cur_value;
                match role.opponent() {
                    Role::Maximizer => self.step_max(child_cutoff, depth.next()),
                    Role::Minimizer => self.step_min(child_cutoff, depth.next()),
                }
            } else {
                Ok(0)
            };

            self.board.undo(record);
            cur_value += below?;

            let improved = role.prefers(cur_value, best_value);

            if let Some(options) = options.as_deref_mut() {
                let value = if improved {
                    OptionValue::Exact(cur_value)
                } else {
                    OptionValue::AtMost(cur_value)
                };
                options.push((choice, value));
            }

            if improved {
                best_value = cur_value;
                best_choice = Some(choice);

                if role.reached(best_value, cutoff) {
                    break;
                }
            }
        }

        Ok((best_value, best_choice))
    }
}

#[derive(Derivative, Clone)]
#[derivative(Debug)]
/// This is the struct that wraps a board and the search options and is used to pick moves
///
/// One engine plays one side of one game. It keeps its own copy of the drawn lines and the
/// drawable set between turns and catches up with the caller's history at the start of every
/// [TriangleEngine::select_move].
///
/// It also outputs traces using the [tracing] crate.
///
/// ```
/// use triangle_minimax::{board::Lattice, minimax::{EngineOptions, TriangleEngine}, Point};
///
/// let lattice = Lattice::square(3).unwrap();
/// let mut engine = TriangleEngine::new(lattice.clone(), EngineOptions::default());
///
/// let first = lattice.segment(Point::new(0, 0), Point::new(1, 0)).unwrap();
/// let reply = engine.select_move(&[first]).unwrap();
///
/// assert!(engine.board().is_legal(&reply));
/// ```
pub struct TriangleEngine {
    board: Board,
    #[derivative(Debug = "ignore")]
    options: EngineOptions,
}

impl TriangleEngine {
    /// Construct a new `TriangleEngine` for an empty board
    pub fn new(lattice: Lattice, options: EngineOptions) -> Self {
        Self {
            board: Board::new(lattice),
            options,
        }
    }

    /// Construct a new `TriangleEngine` from a raw point list, validating it
    pub fn from_points(
        points: impl IntoIterator<Item = Point>,
        options: EngineOptions,
    ) -> Result<Self> {
        Ok(Self::new(Lattice::new(points)?, options))
    }

    /// The engine's view of the game as of the last sync
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Bring the engine's board up to date with the caller's history
    ///
    /// New lines at the end of `history` are checked and applied one at a time. If `history`
    /// doesn't start with what the engine saw last time, the board is rebuilt from scratch.
    pub fn sync(&mut self, history: &[Segment]) -> Result<()> {
        if history.starts_with(self.board.history()) {
            let seen = self.board.history().len();
            debug!(new_lines = history.len() - seen, "Applying new lines");

            for segment in &history[seen..] {
                self.board.extend(*segment)?;
            }
        } else {
            debug!(lines = history.len(), "History diverged, rebuilding board");

            self.board = Board::with_history(self.board.lattice().clone(), history)?;
        }

        Ok(())
    }

    /// Pick the next line to draw
    ///
    /// Syncs with `history`, chooses a depth from the depth policy and runs the search. With a
    /// time budget this uses [TriangleEngine::deepened_minimax_until] and otherwise
    /// [TriangleEngine::single_minimax]. The chosen line is not added to the engine's board, it is
    /// picked up from the next history like any other line.
    pub fn select_move(&mut self, history: &[Segment]) -> Result<Segment> {
        self.sync(history)?;

        let branching = self.board.drawable().len();

        info_span!(
            "select_move",
            branching,
            turn = history.len(),
            depth = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
            chosen_segment = tracing::field::Empty,
            nodes = tracing::field::Empty,
            elapsed_ms = tracing::field::Empty,
        )
        .in_scope(|| {
            let started_at = Instant::now();
            let max_depth = self.options.depth_policy.depth_for(branching);

            let result = match self.options.time_budget {
                Some(budget) => self.deepened_minimax_until(max_depth, started_at + budget)?,
                None => self.single_minimax(max_depth)?,
            };

            let elapsed_ms = started_at.elapsed().as_millis() as u64;
            let current_span = tracing::Span::current();
            current_span.record("depth", result.depth.to_string().as_str());
            current_span.record("chosen_value", result.value);
            current_span.record("chosen_segment", result.best_move.to_string().as_str());
            current_span.record("nodes", result.nodes);
            current_span.record("elapsed_ms", elapsed_ms);

            info!(
                selection = %result.best_move,
                expectation = result.value,
                depth = %result.depth,
                elapsed_ms,
                "Selected move"
            );

            Ok(result.best_move)
        })
    }

    /// This runs the search to the given depth on the current board, returning the chosen move
    /// and the value of every root candidate
    ///
    /// Root candidates are examined in ascending segment order and ties go to the first one
    /// seen, so the result is fully determined by the board and the depth.
    pub fn single_minimax(&mut self, depth: Depth) -> Result<MinMaxReturn> {
        let candidates = self.root_candidates()?;

        Search::new(&mut self.board, self.options.scoring, None)
            .root(depth, candidates)
            .map_err(|AbortedEarly| unreachable!("searches without a deadline never abort"))
    }

    /// This will do an iterative deepening search until `deadline` or until `max_depth` has
    /// been fully searched. Iterative deepening means it will first evaluate every move at depth
    /// 0, then depth 1 with the best moves from depth 0 tried first, and so on.
    ///
    /// Depth 0 is always completed, even past the deadline, so there is always a move to return.
    /// An iteration that runs out of time is thrown away and the last complete one is returned.
    pub fn deepened_minimax_until(
        &mut self,
        max_depth: Depth,
        deadline: Instant,
    ) -> Result<MinMaxReturn> {
        let candidates = self.root_candidates()?;
        let remaining = candidates.len();
        let ordering = self.options.move_ordering;
        let scoring = self.options.scoring;

        let mut current = Search::new(&mut self.board, scoring, None)
            .root(Depth::Limited(0), candidates.clone())
            .map_err(|AbortedEarly| -> Error {
                unreachable!("searches without a deadline never abort")
            })?;

        let mut depth = 0;
        while !current.depth.covers(remaining) && current.depth != max_depth {
            depth += 1;

            let ordered = ordering.order_moves(Some(&current), candidates.clone());
            let mut search = Search::new(&mut self.board, scoring, Some(deadline));

            match search.root(Depth::Limited(depth), ordered) {
                Ok(mut next) => {
                    next.nodes += current.nodes;
                    debug!(depth = %next.depth, value = next.value, "Completed iteration");
                    current = next;
                }
                Err(AbortedEarly) => {
                    debug!(depth, "Ran out of time part way through iteration");
                    break;
                }
            }
        }

        Ok(current)
    }

    fn root_candidates(&self) -> Result<Vec<Segment>> {
        if self.board.drawable().is_empty() {
            return Err(Error::NoLegalMove);
        }

        Ok(self.board.drawable().snapshot())
    }
}
