// src/bin/cli.rs
use espn_mma_scrape::cli::{self, Action};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::parse_args(std::env::args().skip(1))? {
        Action::Help => print!("{}", cli::HELP),
        Action::Run(args) => cli::run(args)?,
    }
    Ok(())
}
