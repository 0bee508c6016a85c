use std::fmt;

/// How far below the root the search may recurse
///
/// `Limited(n)` lets the search go `n` plies past the root move, so `Limited(0)` only looks at
/// the immediate value of each candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    #[allow(missing_docs)]
    Limited(u32),
    /// Keep going until nothing is left to draw
    Exhaustive,
}

impl Depth {
    /// True when no further recursion is allowed
    pub fn is_exhausted(self) -> bool {
        matches!(self, Depth::Limited(0))
    }

    /// The depth one ply further down
    pub fn next(self) -> Self {
        match self {
            Depth::Limited(n) => Depth::Limited(n.saturating_sub(1)),
            Depth::Exhaustive => Depth::Exhaustive,
        }
    }

    /// Whether searching to this depth is the same as searching exhaustively when `remaining`
    /// moves are available. Every move removes at least itself from the drawable set, so there
    /// are never more than `remaining` plies left.
    pub fn covers(self, remaining: usize) -> bool {
        match self {
            Depth::Limited(n) => n as usize + 1 >= remaining,
            Depth::Exhaustive => true,
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Depth::Limited(n) => write!(f, "{n}"),
            Depth::Exhaustive => write!(f, "exhaustive"),
        }
    }
}

/// Picks a search depth from the number of moves currently available
///
/// Rows are checked widest first; the first row whose threshold the branching factor exceeds
/// decides the depth. Anything narrower than every row gets the fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthPolicy {
    rows: Vec<(usize, Depth)>,
    fallback: Depth,
}

impl DepthPolicy {
    /// Build a policy from `(exclusive lower bound on branching, depth)` rows
    pub fn new(rows: impl IntoIterator<Item = (usize, Depth)>, fallback: Depth) -> Self {
        let mut rows: Vec<_> = rows.into_iter().collect();
        rows.sort_by(|a, b| b.0.cmp(&a.0));

        Self { rows, fallback }
    }

    /// Always search to `depth`
    pub fn fixed(depth: Depth) -> Self {
        Self::new([], depth)
    }

    /// The depth to use when `branching` moves are available
    pub fn depth_for(&self, branching: usize) -> Depth {
        self.rows
            .iter()
            .find(|(threshold, _)| branching > *threshold)
            .map(|(_, depth)| *depth)
            .unwrap_or(self.fallback)
    }
}

impl Default for DepthPolicy {
    /// More than 15 moves: depth 3. More than 7: depth 5. Otherwise search to the end.
    fn default() -> Self {
        Self::new(
            [(15, Depth::Limited(3)), (7, Depth::Limited(5))],
            Depth::Exhaustive,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_thresholds() {
        let policy = DepthPolicy::default();

        assert_eq!(policy.depth_for(100), Depth::Limited(3));
        assert_eq!(policy.depth_for(16), Depth::Limited(3));
        assert_eq!(policy.depth_for(15), Depth::Limited(5));
        assert_eq!(policy.depth_for(8), Depth::Limited(5));
        assert_eq!(policy.depth_for(7), Depth::Exhaustive);
        assert_eq!(policy.depth_for(1), Depth::Exhaustive);
    }

    #[test]
    fn rows_are_ordered_regardless_of_input() {
        let policy = DepthPolicy::new(
            [(7, Depth::Limited(5)), (15, Depth::Limited(3))],
            Depth::Exhaustive,
        );

        assert_eq!(policy, DepthPolicy::default());
    }

    #[test]
    fn depth_counts_down_to_zero() {
        assert_eq!(Depth::Limited(2).next(), Depth::Limited(1));
        assert_eq!(Depth::Limited(0).next(), Depth::Limited(0));
        assert!(Depth::Limited(0).is_exhausted());
        assert!(!Depth::Exhaustive.next().is_exhausted());
    }

    #[test]
    fn covers_remaining_moves() {
        assert!(Depth::Limited(4).covers(5));
        assert!(!Depth::Limited(3).covers(5));
        assert!(Depth::Exhaustive.covers(1000));
    }
}
