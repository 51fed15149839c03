//! Grid storage and the flattening convention shared by both engines.
//!
//! Cells are stored column-major: `index(x, y) = x * height + y`. Both the
//! interpreter and the generated code traverse `x` outer, `y` inner, which
//! visits cells in storage order.

use std::fmt;

use crate::error::GridError;
use crate::Cell;

/// Largest supported width or height.
pub const MAX_DIMENSION: usize = i16::MAX as usize;

/// Flattened index of cell `(x, y)` in a grid of the given height.
#[inline]
pub const fn cell_index(x: usize, y: usize, height: usize) -> usize {
    x * height + y
}

/// An owned `width` x `height` grid of cells.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// A grid with every cell zero.
    pub fn new(width: usize, height: usize) -> Result<Self, GridError> {
        check_dimension(width)?;
        check_dimension(height)?;
        Ok(Grid {
            width,
            height,
            cells: vec![0; width * height],
        })
    }

    /// Wrap an existing column-major cell buffer.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, GridError> {
        check_dimension(width)?;
        check_dimension(height)?;
        check_cell_count(width, height, cells.len())?;
        Ok(Grid {
            width,
            height,
            cells,
        })
    }

    /// Build a grid from rows of constant `x`, i.e. `columns[x][y]`.
    pub fn from_columns<const H: usize>(columns: &[[Cell; H]]) -> Result<Self, GridError> {
        let cells: Vec<Cell> = columns.iter().flatten().copied().collect();
        Self::from_cells(columns.len(), H, cells)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Do both grids have the same dimensions?
    #[inline]
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    pub fn into_cells(self) -> Vec<Cell> {
        self.cells
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        if x < self.width && y < self.height {
            self.cells.get(cell_index(x, y, self.height)).copied()
        } else {
            None
        }
    }

    /// Overwrite `(x, y)`. Returns `false` (and changes nothing) outside the grid.
    pub fn set(&mut self, x: usize, y: usize, value: Cell) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        match self.cells.get_mut(cell_index(x, y, self.height)) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// Validate that a raw buffer of `actual` cells fits a `width` x `height` grid.
pub(crate) fn check_cell_count(
    width: usize,
    height: usize,
    actual: usize,
) -> Result<(), GridError> {
    let expected = width * height;
    if actual == expected {
        Ok(())
    } else {
        Err(GridError::CellCount {
            width,
            height,
            expected,
            actual,
        })
    }
}

fn check_dimension(value: usize) -> Result<(), GridError> {
    if value > MAX_DIMENSION {
        Err(GridError::DimensionTooLarge {
            value,
            max: MAX_DIMENSION,
        })
    } else {
        Ok(())
    }
}

/// Prints one line per `x`, each value followed by a space.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.height == 0 {
            return Ok(());
        }
        for column in self.cells.chunks(self.height) {
            for value in column {
                write!(f, "{value} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Grid({}x{})", self.width, self.height)?;
        let columns: Vec<&[Cell]> = if self.height == 0 {
            Vec::new()
        } else {
            self.cells.chunks(self.height).collect()
        };
        f.debug_list().entries(columns).finish()
    }
}

/// Clamped Moore-neighbourhood bounds around one cell.
///
/// The block is the inclusive rectangle `[x_min, x_max] x [y_min, y_max]`
/// clipped to the grid (no wraparound). The centre cell lies inside the
/// rectangle and is skipped by [`NeighbourBounds::iter`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NeighbourBounds {
    pub x: usize,
    pub y: usize,
    pub x_min: usize,
    pub x_max: usize,
    pub y_min: usize,
    pub y_max: usize,
}

impl NeighbourBounds {
    /// Bounds for cell `(x, y)`, which must lie inside a `width` x `height` grid.
    pub fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        debug_assert!(x < width && y < height, "cell ({x}, {y}) outside grid");
        NeighbourBounds {
            x,
            y,
            x_min: x.saturating_sub(1),
            x_max: (x + 1).min(width.saturating_sub(1)),
            y_min: y.saturating_sub(1),
            y_max: (y + 1).min(height.saturating_sub(1)),
        }
    }

    /// Neighbour coordinates in traversal order: `x` ascending outer, `y`
    /// ascending inner, centre excluded.
    pub fn iter(self) -> impl Iterator<Item = (usize, usize)> {
        (self.x_min..=self.x_max)
            .flat_map(move |nx| (self.y_min..=self.y_max).map(move |ny| (nx, ny)))
            .filter(move |&(nx, ny)| nx != self.x || ny != self.y)
    }

    /// Number of neighbours [`NeighbourBounds::iter`] visits.
    pub fn count(self) -> usize {
        (self.x_max - self.x_min + 1) * (self.y_max - self.y_min + 1) - 1
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cell_index_is_column_major() {
        assert_eq!(cell_index(0, 0, 4), 0);
        assert_eq!(cell_index(0, 3, 4), 3);
        assert_eq!(cell_index(1, 0, 4), 4);
        assert_eq!(cell_index(2, 1, 4), 9);
    }

    #[test]
    fn test_from_columns() {
        let grid = Grid::from_columns(&[[1, 2, 3], [4, 5, 6]]).unwrap();
        assert_eq!(grid.width(), 2);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.cells(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(grid.get(1, 2), Some(6));
        assert_eq!(grid.get(2, 0), None);
    }

    #[test]
    fn test_from_cells_rejects_wrong_count() {
        assert_eq!(
            Grid::from_cells(2, 2, vec![0; 3]),
            Err(GridError::CellCount {
                width: 2,
                height: 2,
                expected: 4,
                actual: 3,
            })
        );
    }

    #[test]
    fn test_dimension_limit() {
        assert!(Grid::new(MAX_DIMENSION + 1, 1).is_err());
        assert!(Grid::new(1, MAX_DIMENSION + 1).is_err());
        assert!(Grid::new(0, 0).is_ok());
    }

    #[test]
    fn test_set_outside_grid() {
        let mut grid = Grid::new(2, 2).unwrap();
        assert!(grid.set(1, 1, 7));
        assert!(!grid.set(2, 0, 7));
        assert_eq!(grid.cells(), &[0, 0, 0, 7]);
    }

    #[test]
    fn test_display_one_line_per_x() {
        let grid = Grid::from_columns(&[[1, 2], [3, 4]]).unwrap();
        assert_eq!(grid.to_string(), "1 2 \n3 4 \n");
    }

    #[test]
    fn test_neighbour_counts() {
        // corner, edge, interior
        assert_eq!(NeighbourBounds::new(0, 0, 3, 3).count(), 3);
        assert_eq!(NeighbourBounds::new(1, 0, 3, 3).count(), 5);
        assert_eq!(NeighbourBounds::new(1, 1, 3, 3).count(), 8);
        assert_eq!(NeighbourBounds::new(0, 0, 1, 1).count(), 0);
    }

    #[test]
    fn test_neighbour_order() {
        let visited: Vec<_> = NeighbourBounds::new(0, 1, 2, 3).iter().collect();
        assert_eq!(visited, vec![(0, 0), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_neighbour_iter_matches_count() {
        for x in 0..4 {
            for y in 0..3 {
                let bounds = NeighbourBounds::new(x, y, 4, 3);
                assert_eq!(bounds.iter().count(), bounds.count());
            }
        }
    }
}
