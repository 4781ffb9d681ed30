use std::fmt;

use crate::{array::Array2D, dims::Dims, grid::Grid};

/// One position of the wall grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Path = 0,
    Wall = 1,
}

impl Tile {
    pub fn bit(self) -> u8 {
        self as u8
    }

    pub fn is_wall(self) -> bool {
        self == Tile::Wall
    }
}

/// Generated maze as a binary wall grid of `(2 * height + 1)` rows and `(2 * width + 1)` columns.
///
/// Positions are `Dims(column, row)`, see [`crate::grid`] for the layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeGrid {
    pub(crate) grid: Grid,
    pub(crate) tiles: Array2D<Tile>,
}

impl MazeGrid {
    /// Grid with the logical cells open and every other position walled.
    pub(crate) fn new_walled(grid: Grid) -> Self {
        let Dims(cols, rows) = grid.output_size();
        let mut tiles = Array2D::new(Tile::Wall, cols as usize, rows as usize);

        for cell in Dims::iter_fill(Dims::ZERO, grid.size()) {
            tiles[grid.cell_position(cell)] = Tile::Path;
        }

        MazeGrid { grid, tiles }
    }

    pub(crate) fn open(&mut self, pos: Dims) {
        self.tiles[pos] = Tile::Path;
    }

    /// Logical size, `Dims(width, height)`.
    pub fn size(&self) -> Dims {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.tiles.height()
    }

    pub fn cols(&self) -> usize {
        self.tiles.width()
    }

    pub fn tile(&self, pos: Dims) -> Option<Tile> {
        self.tiles.get(pos).copied()
    }

    /// Out of bounds positions count as walls.
    pub fn is_wall(&self, row: usize, col: usize) -> bool {
        self.tile(Dims(col as i32, row as i32))
            .map_or(true, Tile::is_wall)
    }

    pub fn tiles(&self) -> &Array2D<Tile> {
        &self.tiles
    }

    /// Grid position of the top-left cell, the conventional entry.
    pub fn start(&self) -> Dims {
        self.grid.cell_position(Dims::ZERO)
    }

    /// Grid position of the bottom-right cell, the conventional exit.
    pub fn end(&self) -> Dims {
        self.grid.cell_position(self.grid.size() - Dims::ONE)
    }

    /// Number of opened slots between cells.
    pub fn open_walls(&self) -> usize {
        self.grid
            .edges()
            .into_iter()
            .filter(|e| {
                self.grid
                    .wall_position(e.from, e.to)
                    .ok()
                    .and_then(|pos| self.tile(pos))
                    == Some(Tile::Path)
            })
            .count()
    }

    /// Whether there is no wall between two adjacent cells.
    pub fn is_connected(&self, a: Dims, b: Dims) -> bool {
        self.grid
            .wall_position(a, b)
            .ok()
            .and_then(|pos| self.tile(pos))
            == Some(Tile::Path)
    }

    /// Rows of `1` (wall) and `0` (path).
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.tiles
            .rows()
            .map(|row| row.iter().map(|t| t.bit()).collect())
            .collect()
    }
}

impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{}", tile.bit())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for MazeGrid {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeSeq as _;

        let mut seq = serializer.serialize_seq(Some(self.rows()))?;
        for row in self.tiles.rows() {
            let bits: Vec<u8> = row.iter().map(|t| t.bit()).collect();
            seq.serialize_element(&bits)?;
        }
        seq.end()
    }
}
