//! Mapping between logical maze cells and positions in the rendered wall grid.
//!
//! A maze of `width x height` logical cells is encoded as a `(2 * width + 1) x (2 * height + 1)`
//! grid. Logical cell `(x, y)` sits at grid position `(2x + 1, 2y + 1)`, the slots between two
//! neighbouring cells are walls that can be opened, and the outer ring is always wall.
//!
//! All grid positions are `Dims(column, row)`.

use smallvec::SmallVec;

use crate::{dims::Dims, error::GeneratorError};

/// Axis-aligned direction from a cell to one of its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Bottom,
    Left,
    Top,
}

impl Direction {
    pub fn to_coord(self) -> Dims {
        match self {
            Direction::Right => Dims(1, 0),
            Direction::Bottom => Dims(0, 1),
            Direction::Left => Dims(-1, 0),
            Direction::Top => Dims(0, -1),
        }
    }

    /// `+x, +y, -x, -y`; neighbour enumeration follows this order.
    pub fn get_in_order() -> [Direction; 4] {
        [
            Direction::Right,
            Direction::Bottom,
            Direction::Left,
            Direction::Top,
        ]
    }
}

/// A removable wall between two adjacent cells, `from` always precedes `to` in row-major order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: Dims,
    pub to: Dims,
}

/// Logical cell grid of a single maze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    size: Dims,
}

impl Grid {
    /// Fails with [`GeneratorError::InvalidSize`] unless both dimensions are positive and with
    /// [`GeneratorError::TooLarge`] when the wall grid would not be addressable.
    pub fn new(size: Dims) -> Result<Self, GeneratorError> {
        if !size.all_positive() {
            return Err(GeneratorError::invalid_size(size));
        }

        let grid = Grid { size };
        grid.output_dims().ok_or_else(|| GeneratorError::too_large(size))?;

        Ok(grid)
    }

    pub fn size(&self) -> Dims {
        self.size
    }

    pub fn width(&self) -> usize {
        self.size.0 as usize
    }

    pub fn height(&self) -> usize {
        self.size.1 as usize
    }

    pub fn cell_count(&self) -> usize {
        self.width() * self.height()
    }

    /// Number of candidate edges, `w * (h - 1) + h * (w - 1)`.
    pub fn edge_count(&self) -> usize {
        let (w, h) = (self.width(), self.height());
        w * (h - 1) + h * (w - 1)
    }

    /// Most positions a wall grid may have, roughly a 2047x2047 cell maze.
    pub const MAX_TILES: usize = 1 << 24;

    /// Columns and rows of the wall grid, `None` on overflow or above [`Grid::MAX_TILES`].
    fn output_dims(&self) -> Option<(usize, usize)> {
        let cols = self.size.0.checked_mul(2)?.checked_add(1)? as usize;
        let rows = self.size.1.checked_mul(2)?.checked_add(1)? as usize;
        let tiles = cols.checked_mul(rows)?;

        (tiles <= Self::MAX_TILES).then_some((cols, rows))
    }

    /// Size of the wall grid as `Dims(columns, rows)`.
    pub fn output_size(&self) -> Dims {
        self.size * 2 + 1
    }

    pub fn contains(&self, pos: Dims) -> bool {
        pos.0 >= 0 && pos.1 >= 0 && pos.0 < self.size.0 && pos.1 < self.size.1
    }

    /// Dense id of a cell, `y * width + x`.
    pub fn cell_id(&self, pos: Dims) -> usize {
        debug_assert!(self.contains(pos));
        pos.1 as usize * self.width() + pos.0 as usize
    }

    pub fn cell_at(&self, id: usize) -> Dims {
        Dims((id % self.width()) as i32, (id / self.width()) as i32)
    }

    /// Grid position of a logical cell.
    pub fn cell_position(&self, pos: Dims) -> Dims {
        pos * 2 + 1
    }

    /// Grid position of the wall slot between two adjacent cells.
    pub fn wall_position(&self, a: Dims, b: Dims) -> Result<Dims, GeneratorError> {
        if (a - b).abs_sum() != 1 {
            return Err(GeneratorError::NotAdjacent(a, b));
        }

        // midpoint of the two cell positions, which are exactly two apart
        Ok(self.cell_position(a) + (b - a))
    }

    /// In-bounds neighbours of a cell, in [`Direction::get_in_order`] order.
    pub fn neighbors(&self, pos: Dims) -> SmallVec<[Dims; 4]> {
        Direction::get_in_order()
            .into_iter()
            .map(|dir| pos + dir.to_coord())
            .filter(|&n| self.contains(n))
            .collect()
    }

    /// Every pair of adjacent cells exactly once, row-major, `Right` before `Bottom` per cell.
    pub fn edges(&self) -> Vec<Edge> {
        let mut edges = Vec::with_capacity(self.edge_count());

        for from in Dims::iter_fill(Dims::ZERO, self.size) {
            for dir in [Direction::Right, Direction::Bottom] {
                let to = from + dir.to_coord();
                if self.contains(to) {
                    edges.push(Edge { from, to });
                }
            }
        }

        edges
    }
}
