//! Randomized depth-first maze carving.
//!
//! The carver walks a lattice of cells two apart, so a one-cell wall always separates parallel
//! corridors. Opening a lattice cell also opens the cell between it and the one it was reached
//! from, which makes the carved cells a spanning tree of the lattice rooted at the start cell.

use rand::Rng;
use tracing::trace;

use crate::{
    config::{EndPolicy, MazeConfig},
    errors::MazeError,
    grid::{Cell, Coord, Grid},
};

/// Column and row of the start cell.
///
/// This cell is the root of the carving stack. Both coordinates are even, so it sits on the
/// stride-two lattice for every accepted grid size.
pub const START: Coord = Coord::new(2, 2);

/// Lattice steps explored from the top of the carving stack.
const CARVE_STEPS: [(isize, isize); 4] = [(0, 2), (0, -2), (2, 0), (-2, 0)];

/// A freshly carved maze.
///
/// This structure has not been checked for solvability yet. The retry loop decides whether it is
/// kept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Maze {
    /// Carved grid.
    pub grid: Grid,
    /// Entry cell, always (2, 2).
    pub start: Coord,
    /// Exit cell, always `(width - 2, height - 2)`.
    pub end: Coord,
}

/// Exit cell for a maze of the given size.
///
/// This function places the exit one cell in from the bottom-right border. On odd dimensions that
/// cell is off the lattice, which is why the end policy exists.
#[must_use]
pub const fn end_for(width: usize, height: usize) -> Coord {
    Coord::new(width - 2, height - 2)
}

/// Carves a new maze as described by `config`.
///
/// The lattice is carved from [`START`] with an explicit stack: the top cell picks one of its
/// uncarved lattice neighbours uniformly at random, opens it and the cell in between, and pushes
/// it. A cell with no uncarved neighbours is popped. The end cell is then handled according to
/// [`MazeConfig::end_policy`].
///
/// # Errors
///
/// Returns [`MazeError::InvalidDimensions`] if the config describes a grid that is too small.
pub fn generate<R: Rng + ?Sized>(config: &MazeConfig, rng: &mut R) -> Result<Maze, MazeError> {
    let mut grid = Grid::new(config.width(), config.height())?;

    carve(&mut grid, rng);

    let end = end_for(config.width(), config.height());
    open(&mut grid, end);
    if config.end_policy() == EndPolicy::Connect {
        connect_end(&mut grid, end);
    }

    Ok(Maze {
        grid,
        start: START,
        end,
    })
}

/// Runs the backtracking carver over `grid` from [`START`].
fn carve<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut stack = vec![START];
    open(grid, START);

    while let Some(&current) = stack.last() {
        let candidates = uncarved_neighbours(grid, current);

        if candidates.is_empty() {
            let _ = stack.pop();
            continue;
        }

        let pick = rng.random_range(0..candidates.len());
        let Some(&(next, between)) = candidates.get(pick) else {
            continue;
        };

        open(grid, between);
        open(grid, next);
        stack.push(next);
    }
}

/// Lattice neighbours of `current` that are still walls and lie strictly inside the border.
///
/// Each entry pairs the neighbour with the cell between it and `current`.
fn uncarved_neighbours(grid: &Grid, current: Coord) -> Vec<(Coord, Coord)> {
    CARVE_STEPS
        .into_iter()
        .filter_map(|(dx, dy)| {
            let next = current.offset(dx, dy)?;
            let between = current.offset(dx / 2, dy / 2)?;
            let inside = (1..=grid.width() - 2).contains(&next.x)
                && (1..=grid.height() - 2).contains(&next.y);

            (inside && grid.cell(next) == Some(Cell::Wall)).then_some((next, between))
        })
        .collect()
}

/// Attaches an isolated end cell to the carved tree through one extra cell.
///
/// The bridge must touch exactly one carved cell besides the end, which keeps the carved cells a
/// tree. Nothing happens when the end already touches a corridor or no such bridge exists.
fn connect_end(grid: &mut Grid, end: Coord) {
    if grid.neighbours(end).any(|cell| grid.is_open(cell)) {
        return;
    }

    let bridge = grid.neighbours(end).find(|&candidate| {
        !grid.is_border(candidate)
            && grid
                .neighbours(candidate)
                .filter(|&cell| cell != end && grid.is_open(cell))
                .count()
                == 1
    });

    if let Some(bridge) = bridge {
        trace!(%end, %bridge, "bridging isolated end cell");
        open(grid, bridge);
    }
}

/// Marks `coord` as carved; every caller passes an in-bounds coordinate.
fn open(grid: &mut Grid, coord: Coord) {
    let _ = grid.set(coord, Cell::Open);
}

#[cfg(test)]
mod tests {
    use std::collections::{HashSet, VecDeque};

    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;

    /// Builds a config for the given size and end policy.
    fn config(width: usize, height: usize, end_policy: EndPolicy) -> MazeConfig {
        MazeConfig::new(width, height)
            .expect("test dimensions should be valid")
            .with_end_policy(end_policy)
    }

    /// Collects every open cell reachable from `from` through open cells.
    fn reachable(grid: &Grid, from: Coord) -> HashSet<Coord> {
        let mut seen = HashSet::from([from]);
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            for next in grid.neighbours(current) {
                if grid.is_open(next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        seen
    }

    /// Counts unordered pairs of orthogonally adjacent open cells.
    fn open_edges(grid: &Grid) -> usize {
        grid.open_cells()
            .map(|cell| {
                [(1, 0), (0, 1)]
                    .into_iter()
                    .filter_map(|(dx, dy)| cell.offset(dx, dy))
                    .filter(|&next| grid.is_open(next))
                    .count()
            })
            .sum()
    }

    #[test]
    fn test_default_size_generates() {
        let mut rng = StdRng::seed_from_u64(0);
        let maze = generate(&MazeConfig::default(), &mut rng).expect("50x50 should generate");

        assert_eq!(maze.grid.width(), 50);
        assert_eq!(maze.grid.height(), 50);
        assert_eq!(maze.end, Coord::new(48, 48));
    }

    #[test]
    fn test_start_and_end_are_open() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(17, 12, EndPolicy::Force), &mut rng)
                .expect("generation should succeed");

            assert_eq!(maze.start, Coord::new(2, 2));
            assert_eq!(maze.end, Coord::new(15, 10));
            assert!(maze.grid.is_open(maze.start));
            assert!(maze.grid.is_open(maze.end));
        }
    }

    #[test]
    fn test_border_stays_walled() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(15, 21, EndPolicy::Connect), &mut rng)
                .expect("generation should succeed");

            assert!(
                maze.grid
                    .enumerate_cells()
                    .filter(|(coord, _)| maze.grid.is_border(*coord))
                    .all(|(_, cell)| cell == Cell::Wall),
                "border must stay walled for seed {seed}"
            );
        }
    }

    #[test]
    fn test_carved_cells_are_connected() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(24, 18, EndPolicy::Connect), &mut rng)
                .expect("generation should succeed");

            let seen = reachable(&maze.grid, maze.start);
            assert_eq!(
                seen.len(),
                maze.grid.open_cells().count(),
                "every open cell should be reachable for seed {seed}"
            );
        }
    }

    #[test]
    fn test_carved_cells_form_a_tree() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(23, 19, EndPolicy::Connect), &mut rng)
                .expect("generation should succeed");

            let nodes = maze.grid.open_cells().count();
            assert_eq!(
                open_edges(&maze.grid) + 1,
                nodes,
                "a connected tree has one edge fewer than nodes (seed {seed})"
            );
        }
    }

    #[test]
    fn test_every_lattice_cell_is_carved() {
        let mut rng = StdRng::seed_from_u64(7);
        let maze = generate(&config(21, 21, EndPolicy::Force), &mut rng)
            .expect("generation should succeed");

        for y in (2..=19).step_by(2) {
            for x in (2..=19).step_by(2) {
                assert!(maze.grid.is_open(Coord::new(x, y)), "({x}, {y}) not carved");
            }
        }
    }

    #[test]
    fn test_forced_end_is_isolated_on_odd_dimensions() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(11, 13, EndPolicy::Force), &mut rng)
                .expect("generation should succeed");

            assert!(
                !maze
                    .grid
                    .neighbours(maze.end)
                    .any(|cell| maze.grid.is_open(cell)),
                "forced end should be an island for seed {seed}"
            );
        }
    }

    #[test]
    fn test_connected_end_is_reachable_on_odd_dimensions() {
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let maze = generate(&config(11, 13, EndPolicy::Connect), &mut rng)
                .expect("generation should succeed");

            assert!(reachable(&maze.grid, maze.start).contains(&maze.end));
            assert_eq!(open_edges(&maze.grid) + 1, maze.grid.open_cells().count());
        }
    }

    #[test]
    fn test_same_seed_same_maze() {
        let config = config(31, 27, EndPolicy::Connect);
        let first = generate(&config, &mut StdRng::seed_from_u64(99))
            .expect("generation should succeed");
        let second = generate(&config, &mut StdRng::seed_from_u64(99))
            .expect("generation should succeed");

        assert_eq!(first, second);
    }

    #[test]
    fn test_minimum_grid_terminates() {
        let mut rng = StdRng::seed_from_u64(1);
        let maze = generate(&config(5, 5, EndPolicy::Connect), &mut rng)
            .expect("generation should succeed");

        assert_eq!(
            maze.grid.open_cells().collect::<Vec<_>>(),
            vec![Coord::new(2, 2), Coord::new(2, 3), Coord::new(3, 3)]
        );
    }
}
