//! Bounded retry loop that only hands out mazes with a long enough solution.

use std::{collections::HashSet, fmt};

use rand::{rngs::StdRng, Rng, SeedableRng as _};
use tracing::{debug, info};

use crate::{
    config::MazeConfig,
    errors::MazeError,
    generator::{self, Maze},
    grid::{Cell, Coord, Grid},
    pathfinding,
};

/// A maze that passed validation, together with its solution.
///
/// This structure is the only thing the retry loop hands out. Its path is guaranteed to exist and
/// to hold at least [`MazeConfig::min_movements`] cells, and its config is the exact one the maze
/// was generated with.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidMaze {
    /// Settings the maze was generated with.
    pub config: MazeConfig,
    /// Carved grid.
    pub grid: Grid,
    /// Entry cell.
    pub start: Coord,
    /// Exit cell.
    pub end: Coord,
    /// Shortest path from `start` to `end` inclusive.
    ///
    /// This field lists every cell visited in order, so consecutive entries are orthogonal
    /// neighbours and both endpoints are counted.
    pub path: Vec<Coord>,
    /// Number of mazes generated to obtain this one, including itself.
    pub attempts: usize,
}

/// Reason a generated maze was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    /// The end cell cannot be reached from the start.
    NoPath,
    /// The solution exists but is shorter than required.
    TooShort {
        /// Number of cells on the solution.
        length: usize,
    },
}

/// Checks a freshly generated maze against the minimum solution length.
fn validate(maze: &Maze, min_movements: usize) -> Result<Vec<Coord>, Rejection> {
    let path = pathfinding::shortest_path(&maze.grid, maze.start, maze.end)
        .ok_or(Rejection::NoPath)?;

    if path.len() < min_movements {
        return Err(Rejection::TooShort { length: path.len() });
    }

    Ok(path)
}

/// Generates mazes until one has a solution of at least [`MazeConfig::min_movements`] cells.
///
/// Each attempt carves a brand new grid. Mazes whose end is unreachable or whose solution is too
/// short are discarded and the loop tries again, up to [`MazeConfig::max_attempts`] times.
///
/// # Errors
///
/// - [`MazeError::InvalidDimensions`] if the config describes a grid that is too small; this is
///   reported on the first attempt and not retried.
/// - [`MazeError::ValidationExhausted`] if every attempt was rejected.
pub fn generate_valid_maze<R: Rng + ?Sized>(
    config: MazeConfig,
    rng: &mut R,
) -> Result<ValidMaze, MazeError> {
    let min_movements = config.min_movements();

    for attempt in 1..=config.max_attempts() {
        let maze = generator::generate(&config, rng)?;

        match validate(&maze, min_movements) {
            Ok(path) => {
                info!(
                    width = config.width(),
                    height = config.height(),
                    attempts = attempt,
                    length = path.len(),
                    "accepted maze"
                );

                return Ok(ValidMaze {
                    config,
                    grid: maze.grid,
                    start: maze.start,
                    end: maze.end,
                    path,
                    attempts: attempt,
                });
            }
            Err(Rejection::NoPath) => {
                debug!(attempt, end = %maze.end, "rejected maze: end unreachable");
            }
            Err(Rejection::TooShort { length }) => {
                debug!(attempt, length, min_movements, "rejected maze: solution too short");
            }
        }
    }

    Err(MazeError::ValidationExhausted {
        attempts: config.max_attempts(),
    })
}

/// Same as [`generate_valid_maze`] with a generator seeded from `seed`.
///
/// Equal configs and seeds always produce equal mazes.
///
/// # Errors
///
/// See [`generate_valid_maze`].
pub fn generate_valid_maze_seeded(config: MazeConfig, seed: u64) -> Result<ValidMaze, MazeError> {
    generate_valid_maze(config, &mut StdRng::seed_from_u64(seed))
}

/// Same as [`generate_valid_maze`] with a generator seeded from the operating system.
///
/// This function is what the command line uses when no seed is given, so two runs almost never
/// produce the same maze.
///
/// # Errors
///
/// See [`generate_valid_maze`].
pub fn generate_valid_maze_random(config: MazeConfig) -> Result<ValidMaze, MazeError> {
    generate_valid_maze(config, &mut StdRng::from_os_rng())
}

impl ValidMaze {
    /// Number of steps on the solution.
    ///
    /// This function counts moves rather than cells, which is one less than the path length.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

impl fmt::Display for ValidMaze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let on_path: HashSet<Coord> = self.path.iter().copied().collect();
        let mut rows: Vec<Vec<char>> = (0..self.grid.height())
            .map(|_| Vec::with_capacity(self.grid.width()))
            .collect();

        for (coord, cell) in self.grid.enumerate_cells() {
            let glyph = if coord == self.start {
                'S'
            } else if coord == self.end {
                'E'
            } else if cell == Cell::Wall {
                '#'
            } else if on_path.contains(&coord) {
                '.'
            } else {
                ' '
            };

            if let Some(row) = rows.get_mut(coord.y) {
                row.push(glyph);
            }
        }

        for row in rows {
            writeln!(f, "{}", row.into_iter().collect::<String>())?;
        }

        Ok(())
    }
}
