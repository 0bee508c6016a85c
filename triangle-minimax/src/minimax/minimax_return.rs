use std::fmt;

use text_trees::StringTreeNode;

use crate::Segment;

use super::Depth;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What the search learned about one root candidate
///
/// Once a better candidate has been found, later subtrees are cut off as soon as they are proven
/// no better. Their reported value is then only an upper bound.
pub enum OptionValue {
    /// The subtree was searched to the full depth
    Exact(i32),
    /// The subtree was cut off, the true value is at most this
    AtMost(i32),
}

impl OptionValue {
    /// The reported number, exact or not
    pub fn value(&self) -> i32 {
        match self {
            OptionValue::Exact(v) | OptionValue::AtMost(v) => *v,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::Exact(v) => write!(f, "{v}"),
            OptionValue::AtMost(v) => write!(f, "<= {v}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// This is returned from a run of the search
///
/// The engine only acts on `best_move`. Everything else is there for debugging and tracing.
pub struct MinMaxReturn {
    /// The move to play
    pub best_move: Segment,
    /// Net triangles (ours minus theirs) we expect from `best_move` onwards
    pub value: i32,
    /// The depth the search was run to
    pub depth: Depth,
    /// Number of candidate moves examined across the whole tree
    pub nodes: u64,
    /// Every root candidate in the order it was examined
    pub options: Vec<(Segment, OptionValue)>,
}

impl MinMaxReturn {
    /// The value recorded for a root candidate, if it was examined
    pub fn value_of(&self, segment: &Segment) -> Option<OptionValue> {
        self.options
            .iter()
            .find(|(s, _)| s == segment)
            .map(|(_, v)| *v)
    }

    /// This returns a visual representation of the root of the search
    /// It shows the chosen value and depth, then each candidate with what we know about it
    pub fn to_text_tree(&self) -> String {
        let mut root = StringTreeNode::new(format!(
            "{} = {} (depth {}, {} nodes)",
            self.best_move, self.value, self.depth, self.nodes
        ));

        for (segment, value) in &self.options {
            root.push(format!("{segment} {value}"));
        }

        format!("{root}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seg(a: (i32, i32), b: (i32, i32)) -> Segment {
        Segment::new(a.into(), b.into()).unwrap()
    }

    fn sample() -> MinMaxReturn {
        MinMaxReturn {
            best_move: seg((0, 0), (1, 0)),
            value: 1,
            depth: Depth::Limited(2),
            nodes: 12,
            options: vec![
                (seg((0, 0), (1, 0)), OptionValue::Exact(1)),
                (seg((0, 0), (0, 1)), OptionValue::AtMost(-1)),
                (seg((0, 1), (1, 1)), OptionValue::AtMost(1)),
            ],
        }
    }

    #[test]
    fn looks_up_option_values() {
        let result = sample();

        assert_eq!(
            result.value_of(&seg((0, 0), (0, 1))),
            Some(OptionValue::AtMost(-1))
        );
        assert_eq!(result.value_of(&seg((1, 0), (1, 1))), None);
        assert_eq!(OptionValue::AtMost(-1).value(), -1);
    }

    #[test]
    fn text_tree_lists_every_option() {
        let tree = sample().to_text_tree();

        let first_line = tree.lines().next().unwrap();

        assert!(first_line.contains("(0, 0)-(1, 0) = 1 (depth 2, 12 nodes)"));
        assert!(tree.contains("(0, 0)-(0, 1) <= -1"));
        assert_eq!(tree.lines().count(), 4);
    }
}
