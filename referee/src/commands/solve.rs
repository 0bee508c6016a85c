use std::{fs, path::PathBuf, time::Instant};

use color_eyre::eyre::{Result, WrapErr};
use triangle_minimax::{fixture::GameFixture, minimax::TriangleEngine};

use crate::options::Options;

#[derive(clap::Args, Debug)]
pub(crate) struct Solve {
    /// Position to solve, in the fixture JSON format
    #[clap(value_parser)]
    path: PathBuf,

    #[clap(flatten)]
    options: Options,
}

impl Solve {
    pub(crate) fn run(self) -> Result<()> {
        let contents = fs::read_to_string(&self.path)
            .wrap_err_with(|| format!("Couldn't read {}", self.path.display()))?;
        let fixture: GameFixture =
            serde_json::from_str(&contents).wrap_err("Not a valid fixture")?;

        let engine_options = self.options.engine_options();
        let mut engine = TriangleEngine::new(fixture.lattice()?, engine_options.clone());
        engine.sync(&fixture.lines)?;

        let remaining = engine.board().drawable().len();
        let max_depth = engine_options.depth_policy.depth_for(remaining);

        let started_at = Instant::now();
        let result = match engine_options.time_budget {
            Some(budget) => engine.deepened_minimax_until(max_depth, started_at + budget)?,
            None => engine.single_minimax(max_depth)?,
        };

        println!(
            "After {} lines, with {remaining} still drawable, the engine draws {} for {}",
            fixture.lines.len(),
            result.best_move,
            result.value
        );
        println!(
            "Searched to depth {} (aiming for {max_depth}) in {:?}",
            result.depth,
            started_at.elapsed()
        );
        println!();
        println!("{}", result.to_text_tree());

        Ok(())
    }
}
