//! Pathfinding algorithm and animation module.
//!
//! This module contains the breadth-first shortest path search, the animation system that replays
//! the search in the terminal, and the coordinate transformation used to place maze cells on the
//! canvas.

use std::{
    collections::{hash_map::Entry, HashMap, VecDeque},
    time::{Duration, Instant},
};

use color_eyre::eyre::Result;

use crate::grid::{Coord, Grid};

/// Animation frame delay in milliseconds.
///
/// This constant controls the timing between animation steps in the search visualization. When a
/// redraw comes late, every step that became due in the meantime is applied at once, so the
/// animation speed does not depend on how often the terminal is polled.
pub(crate) const ANIMATION_FRAME_DELAY_MS: u64 = 8;

/// Outcome of a single breadth-first search.
struct Search {
    /// Cells in the order they were dequeued.
    order: Vec<Coord>,
    /// Shortest path from start to end inclusive, if one exists.
    path: Option<Vec<Coord>>,
}

/// Runs a breadth-first search over open cells from `start` towards `end`.
///
/// Neighbours are discovered in `+x, -x, +y, -y` order and each cell is enqueued at most once, the
/// first time it is seen. The first discovery is therefore also the closest one, and following the
/// recorded parents back from `end` yields a shortest path.
fn search(grid: &Grid, start: Coord, end: Coord) -> Search {
    if !grid.contains(start) || !grid.contains(end) {
        return Search {
            order: Vec::new(),
            path: None,
        };
    }

    let mut came_from: HashMap<Coord, Option<Coord>> = HashMap::from([(start, None)]);
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();

    while let Some(current) = queue.pop_front() {
        order.push(current);

        if current == end {
            return Search {
                order,
                path: Some(backtrack(&came_from, end)),
            };
        }

        for next in grid.neighbours(current) {
            if !grid.is_open(next) {
                continue;
            }
            if let Entry::Vacant(slot) = came_from.entry(next) {
                let _ = slot.insert(Some(current));
                queue.push_back(next);
            }
        }
    }

    Search { order, path: None }
}

/// Rebuilds the path ending at `end` from the parent links recorded by [`search`].
fn backtrack(came_from: &HashMap<Coord, Option<Coord>>, end: Coord) -> Vec<Coord> {
    let mut path = vec![end];
    let mut current = end;

    while let Some(&Some(parent)) = came_from.get(&current) {
        path.push(parent);
        current = parent;
    }

    path.reverse();
    path
}

/// Computes the shortest path between two cells through open cells.
///
/// Movement is four-directional and every step costs the same. The returned path runs from `start`
/// to `end` inclusive, so its length is the number of steps plus one. When `start == end` the path
/// holds that single cell.
///
/// Returns [`None`] when either coordinate lies outside the grid or `end` cannot be reached. An
/// unreachable end is an expected outcome rather than an error.
#[must_use]
pub fn shortest_path(grid: &Grid, start: Coord, end: Coord) -> Option<Vec<Coord>> {
    search(grid, start, end).path
}

/// Animation step types for pathfinding visualization.
///
/// This enumeration represents the different kinds of steps replayed by the in-game screen: first
/// the cells the search visited, then the solution it settled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AnimationStep {
    /// Mark a cell as visited by the search.
    Explore(Coord),
    /// Add a cell to the displayed solution path.
    Trace(Coord),
}

/// Records the steps of a breadth-first search for later visualization.
///
/// Every cell is recorded as [`AnimationStep::Explore`] in the order the search dequeued it,
/// followed by the solution path as [`AnimationStep::Trace`] steps when the end was reached.
pub(crate) fn record_search_steps(grid: &Grid, start: Coord, end: Coord) -> Vec<AnimationStep> {
    let Search { order, path } = search(grid, start, end);

    order
        .into_iter()
        .map(AnimationStep::Explore)
        .chain(path.into_iter().flatten().map(AnimationStep::Trace))
        .collect()
}

/// Animation state manager for pathfinding visualization.
///
/// This structure manages the animation state including timing, current step tracking, and the
/// cells displayed so far during the animated maze solving.
pub(crate) struct AnimationManager {
    /// Animation steps recorded during pathfinding.
    ///
    /// This field stores the sequence of steps produced by [`record_search_steps`]. An empty vector
    /// means the current maze has not been recorded yet.
    pub steps: Vec<AnimationStep>,
    /// Current step in the animation sequence.
    ///
    /// This field tracks the current position in the [`steps`](AnimationManager::steps) vector to
    /// determine which steps have been rendered and which are still pending.
    pub current_index: usize,
    /// Timestamp of the last animation update.
    pub last_update_time: Instant,
    /// Cells the search has visited so far in the animation.
    pub explored: Vec<Coord>,
    /// Solution cells traced so far in the animation.
    pub current_path: Vec<Coord>,
}

impl Default for AnimationManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationManager {
    /// Creates a new animation manager with default values.
    pub(crate) fn new() -> Self {
        Self {
            steps: Vec::new(),
            current_index: 0,
            last_update_time: Instant::now(),
            explored: Vec::new(),
            current_path: Vec::new(),
        }
    }

    /// Resets the animation state to the beginning.
    pub(crate) fn reset(&mut self) {
        self.current_index = 0;
        self.explored.clear();
        self.current_path.clear();
        self.last_update_time = Instant::now();
    }

    /// Clears all animation data and resets state.
    pub(crate) fn clear(&mut self) {
        self.steps.clear();
        self.reset();
    }

    /// Whether every recorded step has been applied.
    pub(crate) fn is_finished(&self) -> bool {
        self.current_index >= self.steps.len()
    }

    /// Applies up to `count` pending steps.
    pub(crate) fn advance(&mut self, count: usize) {
        for _ in 0..count {
            let Some(step) = self.steps.get(self.current_index) else {
                return;
            };

            match *step {
                AnimationStep::Explore(coord) => self.explored.push(coord),
                AnimationStep::Trace(coord) => self.current_path.push(coord),
            }

            self.current_index += 1;
        }
    }

    /// Updates the animation state based on timing and current progress.
    ///
    /// This method applies every step that became due since the last update. Once the sequence is
    /// complete the final state stays on screen.
    pub(crate) fn update(&mut self) {
        if self.is_finished() {
            return;
        }

        let delay = Duration::from_millis(ANIMATION_FRAME_DELAY_MS);
        let elapsed = self.last_update_time.elapsed();
        if elapsed < delay {
            return;
        }

        let due = elapsed.as_millis() / u128::from(ANIMATION_FRAME_DELAY_MS);
        self.advance(usize::try_from(due).unwrap_or(usize::MAX));
        self.last_update_time = Instant::now();
    }
}

/// Transforms maze coordinates to screen coordinates for canvas rendering.
///
/// This function converts maze coordinates (col, row) to screen coordinates (x, y) using the
/// standard transformation formulas: coordinate[i] = (n - 1) / 2 - i for rows (ascending order) and
/// coordinate[i] = i - (n - 1) / 2 for columns (descending order).
///
/// # Errors
///
/// This function returns an error if the grid or a coordinate does not fit in a `u16`.
pub(crate) fn transform_maze_to_screen_coords(
    maze_coords: &[Coord],
    grid: &Grid,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(grid.height())?);
    let cols_n = f64::from(u16::try_from(grid.width())?);

    maze_coords
        .iter()
        .map(|&Coord { x: col, y: row }| {
            // Row transformation: coordinate[i] = (n - 1) / 2 - i
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(row)?);

            // Column transformation: coordinate[i] = i - (n - 1) / 2
            let screen_x = f64::from(u16::try_from(col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}
