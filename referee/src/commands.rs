pub mod fixture;
pub mod self_play;
pub mod solve;

use fixture::Fixture;
use self_play::SelfPlay;
use solve::Solve;

use clap::Subcommand;
use color_eyre::eyre::Result;

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Pick a move for a stored position and show how every candidate scored
    Solve(Solve),
    /// Let two engines play a whole game against each other
    SelfPlay(SelfPlay),
    /// Write an empty position to start a fixture from
    Fixture(Fixture),
}

impl Command {
    pub fn run(self) -> Result<()> {
        match self {
            Command::Solve(s) => s.run()?,
            Command::SelfPlay(s) => s.run()?,
            Command::Fixture(f) => f.run()?,
        }

        Ok(())
    }
}
