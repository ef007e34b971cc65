//! Procedural perfect-maze generation with a breadth-first solver and a terminal viewer.
//!
//! Mazes are carved by randomized depth-first backtracking on a stride-two lattice, solved with
//! breadth-first search, and regenerated until the solution is long enough to be interesting. The
//! core entry point is [`generate_valid_maze`]; [`App`] is the ratatui front end that displays the
//! result and animates the search.
//!
//! ```no_run
//! use labyrinthe::{generate_valid_maze_seeded, MazeConfig};
//!
//! let config = MazeConfig::new(31, 21)?;
//! let maze = generate_valid_maze_seeded(config, 7)?;
//! assert!(maze.path.len() >= config.min_movements());
//! println!("{maze}");
//! # Ok::<(), labyrinthe::MazeError>(())
//! ```

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod config;
mod errors;
mod events;
mod generator;
mod grid;
mod logging;
mod pathfinding;
mod types;
mod ui;
mod validator;

pub use crate::{
    app::App,
    config::{
        min_movements, parse_color, Args, EndPolicy, MazeConfig, DEFAULT_HEIGHT,
        DEFAULT_MAX_ATTEMPTS, DEFAULT_WIDTH,
    },
    errors::MazeError,
    generator::{end_for, generate, Maze, START},
    grid::{Cell, Coord, Grid, MAX_DIMENSION, MIN_DIMENSION},
    logging::{install as install_logging, LogSink},
    pathfinding::shortest_path,
    validator::{
        generate_valid_maze, generate_valid_maze_random, generate_valid_maze_seeded, ValidMaze,
    },
};
