use color_eyre::eyre::Result;
use itertools::Itertools;
use tracing::info;
use triangle_minimax::{
    board::Lattice,
    minimax::TriangleEngine,
    score::{closed_triangles, Party, Score},
    Segment,
};

use crate::options::Options;

#[derive(clap::Args, Debug)]
pub(crate) struct SelfPlay {
    /// Side length of the square lattice
    #[clap(short, long, value_parser, default_value_t = Lattice::REFERENCE_SIZE)]
    board_size: u32,

    /// Let the engine make the first move instead of its opponent
    #[clap(short, long)]
    engine_first: bool,

    #[clap(flatten)]
    options: Options,
}

impl SelfPlay {
    pub(crate) fn run(self) -> Result<()> {
        let lattice = Lattice::square(self.board_size)?;
        let engine_options = self.options.engine_options();

        let mut engine = TriangleEngine::new(lattice.clone(), engine_options.clone());
        let mut opponent = TriangleEngine::new(lattice.clone(), engine_options.clone());

        let mut history: Vec<Segment> = vec![];
        let mut score = Score::default();
        let mut to_move = if self.engine_first {
            Party::Engine
        } else {
            Party::Opponent
        };

        loop {
            let player = match to_move {
                Party::Engine => &mut engine,
                Party::Opponent => &mut opponent,
            };
            player.sync(&history)?;
            if player.board().drawable().is_empty() {
                break;
            }

            let chosen = player.select_move(&history)?;
            let closed = closed_triangles(&chosen, &lattice, &history);
            let points = engine_options
                .scoring
                .points(closed.len() as u32);
            score.credit(to_move, points);

            if closed.is_empty() {
                println!("{:>3}. {to_move:?} draws {chosen}", history.len() + 1);
            } else {
                println!(
                    "{:>3}. {to_move:?} draws {chosen}, closing {} for {points}",
                    history.len() + 1,
                    closed.iter().join(" and ")
                );
            }

            history.push(chosen);
            to_move = to_move.other();
        }

        info!(
            lines = history.len(),
            engine = score.engine,
            opponent = score.opponent,
            "Game over"
        );
        println!();
        println!(
            "Final score: engine {}, opponent {} (margin {:+})",
            score.engine,
            score.opponent,
            score.margin()
        );

        Ok(())
    }
}
