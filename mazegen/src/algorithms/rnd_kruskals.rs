use rand::{seq::SliceRandom as _, Rng};

use crate::{
    dims::Dims,
    disjoint_set::DisjointSet,
    error::GeneratorError,
    grid::{Edge, Grid},
    maze::MazeGrid,
};

/// Randomized Kruskal's algorithm.
///
/// All walls between adjacent cells are shuffled and then removed one by one, unless the two
/// cells are already connected. The result is always a spanning tree over the cells.
#[derive(Debug, Default, Clone, Copy)]
pub struct RndKruskals;

impl RndKruskals {
    pub fn generate<R: Rng + ?Sized>(
        &self,
        size: Dims,
        rng: &mut R,
    ) -> Result<MazeGrid, GeneratorError> {
        let grid = Grid::new(size)?;
        let mut maze = MazeGrid::new_walled(grid);

        let mut walls = grid.edges();
        walls.shuffle(rng);

        let mut sets = DisjointSet::new(grid.cell_count());
        for Edge { from, to } in walls {
            if sets.union(grid.cell_id(from), grid.cell_id(to)) {
                maze.open(grid.wall_position(from, to)?);
            }
        }
        debug_assert_eq!(sets.set_count(), 1);

        Ok(maze)
    }
}
