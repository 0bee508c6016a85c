use std::time::Duration;

use clap::ValueEnum;
use triangle_minimax::{
    minimax::{Depth, DepthPolicy, EngineOptions},
    score::ScoringRule,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum Scoring {
    PerTriangle,
    AtMostOne,
}

impl From<Scoring> for ScoringRule {
    fn from(scoring: Scoring) -> Self {
        match scoring {
            Scoring::PerTriangle => ScoringRule::PerTriangle,
            Scoring::AtMostOne => ScoringRule::AtMostOne,
        }
    }
}

/// Engine flags shared by the commands that run a search
#[derive(clap::Args, Debug, Clone)]
pub(crate) struct Options {
    /// Stop deepening after this many milliseconds. Searches straight to the policy depth when
    /// not given
    #[clap(short, long, value_parser)]
    time_budget_ms: Option<u64>,

    /// How closed triangles are turned into points
    #[clap(short, long, value_enum, default_value_t = Scoring::PerTriangle)]
    scoring: Scoring,

    /// Search every position to this depth instead of picking one from the number of moves
    /// available. Either a number of plies or `exhaustive`
    #[clap(short, long, value_parser = parse_depth)]
    depth: Option<Depth>,
}

impl Options {
    pub(crate) fn engine_options(&self) -> EngineOptions {
        EngineOptions {
            depth_policy: self
                .depth
                .map(DepthPolicy::fixed)
                .unwrap_or_default(),
            scoring: self.scoring.into(),
            time_budget: self.time_budget_ms.map(Duration::from_millis),
            ..Default::default()
        }
    }
}

fn parse_depth(s: &str) -> Result<Depth, String> {
    if s.eq_ignore_ascii_case("exhaustive") {
        return Ok(Depth::Exhaustive);
    }

    s.parse()
        .map(Depth::Limited)
        .map_err(|_| format!("`{s}` is neither a number of plies nor `exhaustive`"))
}
