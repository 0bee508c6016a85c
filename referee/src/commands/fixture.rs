use std::{fs::File, path::PathBuf};

use color_eyre::eyre::{Result, WrapErr};
use triangle_minimax::{board::Lattice, fixture::GameFixture};

#[derive(clap::Args, Debug)]
pub struct Fixture {
    /// Where to write the fixture
    #[clap(value_parser)]
    path: PathBuf,

    /// Side length of the square lattice
    #[clap(short, long, value_parser, default_value_t = Lattice::REFERENCE_SIZE)]
    board_size: u32,
}

impl Fixture {
    pub fn run(self) -> Result<()> {
        let fixture = GameFixture::empty(self.board_size);
        // Fail here rather than when the fixture is loaded
        fixture.lattice()?;

        let file = File::create(&self.path)
            .wrap_err_with(|| format!("Couldn't create {}", self.path.display()))?;
        serde_json::to_writer_pretty(file, &fixture)?;

        tracing::info!(path = %self.path.display(), board_size = self.board_size, "Wrote fixture");

        Ok(())
    }
}
