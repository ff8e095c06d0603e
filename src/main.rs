use archive_coords::cli::{run, Cli};
use archive_coords::error::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}
