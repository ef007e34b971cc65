//! This crate contains the source code for the binary of the maze generator labyrinthe.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use labyrinthe::{
    generate_valid_maze_random, generate_valid_maze_seeded, install_logging, App, Args, LogSink,
};

fn main() -> Result<()> {
    install()?;
    let args = Args::parse();

    if args.print {
        install_logging(LogSink::Stderr)?;

        let config = args.maze_config()?;
        let maze = match args.seed {
            Some(seed) => generate_valid_maze_seeded(config, seed)?,
            None => generate_valid_maze_random(config)?,
        };
        print!("{maze}");

        return Ok(());
    }

    install_logging(args.log_file.as_deref().map_or(LogSink::Discard, LogSink::File))?;
    let mut app = App::from_args(&args)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
