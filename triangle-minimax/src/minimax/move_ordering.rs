use crate::Segment;

use super::MinMaxReturn;

/// How root candidates are ordered when the search is run with iterative deepening
///
/// Plain searches always use ascending segment order. Inside the tree the order is always
/// ascending, only the root is reordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoveOrdering {
    /// Ascending segment order every iteration
    Lexicographic,
    /// Candidates that scored best in the previous iteration go first
    ///
    /// The sort is stable so ties keep ascending order.
    #[default]
    BestFirst,
}

impl MoveOrdering {
    pub(crate) fn order_moves(
        &self,
        previous_return: Option<&MinMaxReturn>,
        possible_moves: Vec<Segment>,
    ) -> Vec<Segment> {
        match (self, previous_return) {
            (MoveOrdering::BestFirst, Some(previous)) => {
                let mut v = possible_moves;
                v.sort_by_cached_key(|m| {
                    std::cmp::Reverse(previous.value_of(m).map(|x| x.value()))
                });
                v
            }
            _ => possible_moves,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minimax::{Depth, OptionValue};

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::new(a.into(), b.into()).unwrap()
    }

    #[test]
    fn best_first_puts_previous_winners_in_front() {
        let a = seg((0, 0), (1, 0));
        let b = seg((0, 0), (0, 1));
        let c = seg((0, 1), (1, 1));
        let d = seg((1, 0), (1, 1));

        let previous = MinMaxReturn {
            best_move: c,
            value: 2,
            depth: Depth::Limited(0),
            nodes: 3,
            options: vec![
                (a, OptionValue::Exact(0)),
                (b, OptionValue::AtMost(0)),
                (c, OptionValue::Exact(2)),
            ],
        };

        let ordered = MoveOrdering::BestFirst.order_moves(Some(&previous), vec![a, b, c, d]);

        // d was never examined so it sorts after everything that was
        assert_eq!(ordered, vec![c, a, b, d]);
    }

    #[test]
    fn lexicographic_keeps_the_input_order() {
        let moves = vec![seg((0, 0), (1, 0)), seg((0, 0), (0, 1))];

        assert_eq!(
            MoveOrdering::Lexicographic.order_moves(None, moves.clone()),
            moves
        );
        assert_eq!(MoveOrdering::BestFirst.order_moves(None, moves.clone()), moves);
    }
}
