//! Grid model for the maze.
//!
//! This module holds the occupancy grid the generator carves into and the path finder walks over,
//! together with the coordinate type shared by every other module.

use std::fmt;

use crate::errors::MazeError;

/// Smallest accepted width or height.
///
/// Anything smaller leaves no room for the start cell at (2, 2) plus an enclosing border.
pub const MIN_DIMENSION: usize = 5;

/// Largest accepted width or height.
///
/// This caps a grid at a hundred million cells, which keeps both the cell storage and the
/// `width + height` threshold arithmetic far from overflow on every supported target.
pub const MAX_DIMENSION: usize = 10_000;

/// Checks that both dimensions lie within [`MIN_DIMENSION`] and [`MAX_DIMENSION`].
pub(crate) fn check_dimensions(width: usize, height: usize) -> Result<(), MazeError> {
    let range = MIN_DIMENSION..=MAX_DIMENSION;

    if range.contains(&width) && range.contains(&height) {
        Ok(())
    } else {
        Err(MazeError::InvalidDimensions { width, height })
    }
}

/// Occupancy state of a single grid cell.
///
/// This enumeration has exactly two states. Generation only ever turns walls into open cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Solid cell that cannot be walked through.
    Wall,
    /// Carved cell that belongs to the maze corridors.
    Open,
}

/// Zero-indexed grid position, `x` being the column and `y` the row.
///
/// This structure uses unsigned fields so it indexes the grid directly. Moves that would go below
/// zero are expressed through [`Coord::offset`], which reports them as [`None`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    /// Column index.
    pub x: usize,
    /// Row index.
    pub y: usize,
}

impl Coord {
    /// Builds a coordinate from a column and a row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the coordinate shifted by the given signed offsets.
    ///
    /// Yields [`None`] when the shift would move below zero on either axis.
    #[must_use]
    pub const fn offset(self, dx: isize, dy: isize) -> Option<Self> {
        let Some(x) = self.x.checked_add_signed(dx) else {
            return None;
        };
        let Some(y) = self.y.checked_add_signed(dy) else {
            return None;
        };

        Some(Self { x, y })
    }

    /// Number of single steps needed to go from `self` to `other` ignoring walls.
    #[must_use]
    pub const fn manhattan(self, other: Self) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Four-directional unit offsets in the order the path finder visits them.
pub(crate) const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

/// Rectangular occupancy grid.
///
/// Cells are stored row-major. Dimensions are fixed at construction and every cell starts as
/// [`Cell::Wall`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    /// Number of columns.
    width: usize,
    /// Number of rows.
    height: usize,
    /// Row-major cell storage of length `width * height`.
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid of the given size with every cell set to [`Cell::Wall`].
    ///
    /// This function allocates the whole row-major storage up front. The generator builds a fresh
    /// grid this way for every attempt, so no state leaks from one maze into the next.
    ///
    /// # Errors
    ///
    /// Returns [`MazeError::InvalidDimensions`] if either dimension is below [`MIN_DIMENSION`] or
    /// above [`MAX_DIMENSION`].
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        check_dimensions(width, height)?;

        Ok(Self {
            width,
            height,
            cells: vec![Cell::Wall; width * height],
        })
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Whether the coordinate lies inside the grid.
    #[must_use]
    pub const fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Whether the coordinate lies on the outermost ring of cells.
    ///
    /// This function assumes an in-bounds coordinate. Border cells are never carved, so a maze is
    /// always enclosed.
    #[must_use]
    pub const fn is_border(&self, coord: Coord) -> bool {
        coord.x == 0 || coord.y == 0 || coord.x == self.width - 1 || coord.y == self.height - 1
    }

    /// Flat storage index of an in-bounds coordinate.
    const fn index(&self, coord: Coord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.y * self.width + coord.x)
        } else {
            None
        }
    }

    /// Returns the cell at `coord`, or [`None`] when out of bounds.
    #[must_use]
    pub fn cell(&self, coord: Coord) -> Option<Cell> {
        self.index(coord)
            .and_then(|idx| self.cells.get(idx))
            .copied()
    }

    /// Whether `coord` is in bounds and carved.
    #[must_use]
    pub fn is_open(&self, coord: Coord) -> bool {
        self.cell(coord) == Some(Cell::Open)
    }

    /// Overwrites the cell at `coord`.
    ///
    /// This function is the only mutation the grid offers. The generator calls it to open cells.
    ///
    /// Returns `false` and leaves the grid untouched when `coord` is out of bounds.
    pub fn set(&mut self, coord: Coord, cell: Cell) -> bool {
        match self.index(coord).and_then(|idx| self.cells.get_mut(idx)) {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// In-bounds orthogonal neighbours of `coord`, in `+x, -x, +y, -y` order.
    pub fn neighbours(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(dx, dy)| coord.offset(dx, dy))
            .filter(move |next| self.contains(*next))
    }

    /// Every carved cell, scanned row by row.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Open)
            .map(move |(idx, _)| Coord::new(idx % self.width, idx / self.width))
    }

    /// Every cell with its coordinate, scanned row by row.
    pub fn enumerate_cells(&self) -> impl Iterator<Item = (Coord, Cell)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(move |(idx, cell)| (Coord::new(idx % self.width, idx / self.width), *cell))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width) {
            for cell in row {
                let glyph = match cell {
                    Cell::Wall => '#',
                    Cell::Open => ' ',
                };
                write!(f, "{glyph}")?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_all_walls() {
        let grid = Grid::new(7, 9).expect("7x9 is a valid size");

        assert_eq!(grid.width(), 7);
        assert_eq!(grid.height(), 9);
        assert!(grid.enumerate_cells().all(|(_, cell)| cell == Cell::Wall));
        assert_eq!(grid.open_cells().count(), 0);
    }

    #[test]
    fn test_width_four_is_rejected() {
        let result = Grid::new(4, 10);

        assert_eq!(
            result,
            Err(MazeError::InvalidDimensions {
                width: 4,
                height: 10
            })
        );
    }

    #[test]
    fn test_height_four_is_rejected() {
        assert!(Grid::new(10, 4).is_err());
    }

    #[test]
    fn test_minimum_size_is_accepted() {
        assert!(Grid::new(MIN_DIMENSION, MIN_DIMENSION).is_ok());
    }

    #[test]
    fn test_oversized_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(usize::MAX, 5),
            Err(MazeError::InvalidDimensions {
                width: usize::MAX,
                height: 5
            })
        );
        assert!(Grid::new(5, MAX_DIMENSION + 1).is_err());
        assert!(check_dimensions(MAX_DIMENSION, MAX_DIMENSION).is_ok());
    }

    #[test]
    fn test_set_and_read_back() {
        let mut grid = Grid::new(5, 5).expect("5x5 is a valid size");

        assert!(grid.set(Coord::new(2, 3), Cell::Open));
        assert!(grid.is_open(Coord::new(2, 3)));
        assert!(!grid.is_open(Coord::new(3, 2)));
        assert_eq!(grid.open_cells().collect::<Vec<_>>(), vec![Coord::new(2, 3)]);
    }

    #[test]
    fn test_set_out_of_bounds_is_ignored() {
        let mut grid = Grid::new(5, 5).expect("5x5 is a valid size");

        assert!(!grid.set(Coord::new(5, 0), Cell::Open));
        assert_eq!(grid.cell(Coord::new(5, 0)), None);
        assert_eq!(grid.open_cells().count(), 0);
    }

    #[test]
    fn test_border_detection() {
        let grid = Grid::new(6, 5).expect("6x5 is a valid size");

        assert!(grid.is_border(Coord::new(0, 2)));
        assert!(grid.is_border(Coord::new(5, 2)));
        assert!(grid.is_border(Coord::new(3, 4)));
        assert!(!grid.is_border(Coord::new(1, 1)));
    }

    #[test]
    fn test_neighbours_order_and_clipping() {
        let grid = Grid::new(5, 5).expect("5x5 is a valid size");

        let inner: Vec<Coord> = grid.neighbours(Coord::new(2, 2)).collect();
        assert_eq!(
            inner,
            vec![
                Coord::new(3, 2),
                Coord::new(1, 2),
                Coord::new(2, 3),
                Coord::new(2, 1)
            ]
        );

        let corner: Vec<Coord> = grid.neighbours(Coord::new(0, 0)).collect();
        assert_eq!(corner, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }

    #[test]
    fn test_coord_offset_and_distance() {
        let origin = Coord::new(0, 3);

        assert_eq!(origin.offset(-1, 0), None);
        assert_eq!(origin.offset(2, -1), Some(Coord::new(2, 2)));
        assert_eq!(origin.manhattan(Coord::new(4, 0)), 7);
        assert_eq!(Coord::new(1, 2).to_string(), "(1, 2)");
    }

    #[test]
    fn test_display_renders_walls_and_openings() {
        let mut grid = Grid::new(5, 5).expect("5x5 is a valid size");
        let _ = grid.set(Coord::new(2, 2), Cell::Open);

        assert_eq!(grid.to_string(), "#####\n#####\n## ##\n#####\n#####\n");
    }
}
