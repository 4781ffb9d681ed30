mod rnd_kruskals;

use rand::{thread_rng, Rng, SeedableRng as _};
use rayon::iter::{IntoParallelRefIterator as _, ParallelIterator as _};

use crate::{dims::Dims, error::GeneratorError, grid::Grid, maze::MazeGrid};
pub use rnd_kruskals::RndKruskals;

/// Random number generator used for anything, where determinism is required.
pub type Random = rand_xoshiro::Xoshiro256StarStar;

/// Generates a maze with randomness drawn from `rng`.
///
/// The same sequence of random draws always yields the same maze.
pub fn generate<R: Rng + ?Sized>(size: Dims, rng: &mut R) -> Result<MazeGrid, GeneratorError> {
    RndKruskals.generate(size, rng)
}

/// Maze together with the seed it was generated from.
#[derive(Debug, Clone)]
pub struct Generated {
    pub maze: MazeGrid,
    pub seed: u64,
}

/// Seeded front of the maze builder.
#[derive(Debug, Default, Clone)]
pub struct Generator {
    algorithm: RndKruskals,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates a maze from `seed`, or from a fresh random seed if none is given.
    pub fn generate(&self, size: Dims, seed: Option<u64>) -> Result<Generated, GeneratorError> {
        let seed = seed.unwrap_or_else(|| thread_rng().gen());
        let mut rng = Random::seed_from_u64(seed);

        let maze = self.algorithm.generate(size, &mut rng)?;
        Ok(Generated { maze, seed })
    }

    /// Generates one maze per seed in parallel, in the order of `seeds`.
    ///
    /// Every maze is identical to the one [`Generator::generate`] builds for the same seed.
    pub fn generate_many(
        &self,
        size: Dims,
        seeds: &[u64],
    ) -> Result<Vec<MazeGrid>, GeneratorError> {
        Grid::new(size)?;

        seeds
            .par_iter()
            .map(|&seed| {
                let mut rng = Random::seed_from_u64(seed);
                self.algorithm.generate(size, &mut rng)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::maze::Tile;

    const SIZES: [(i32, i32); 8] = [
        (1, 1),
        (2, 1),
        (1, 2),
        (2, 2),
        (3, 7),
        (10, 4),
        (15, 15),
        (31, 17),
    ];

    fn seeded(size: Dims, seed: u64) -> MazeGrid {
        generate(size, &mut Random::seed_from_u64(seed)).unwrap()
    }

    fn reachable_cells(maze: &MazeGrid) -> usize {
        let grid = maze.grid();
        let mut visited = vec![false; grid.cell_count()];
        let mut queue = VecDeque::from([Dims::ZERO]);
        visited[0] = true;

        let mut count = 0;
        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in grid.neighbors(cell) {
                let id = grid.cell_id(next);
                if !visited[id] && maze.is_connected(cell, next) {
                    visited[id] = true;
                    queue.push_back(next);
                }
            }
        }

        count
    }

    #[test]
    fn connected() {
        for (w, h) in SIZES {
            for seed in 0..5 {
                let maze = seeded(Dims(w, h), seed);
                assert_eq!(reachable_cells(&maze), (w * h) as usize, "{w}x{h} seed {seed}");
            }
        }
    }

    #[test]
    fn spanning_tree_wall_count() {
        for (w, h) in SIZES {
            for seed in 0..5 {
                let maze = seeded(Dims(w, h), seed);
                assert_eq!(maze.open_walls(), (w * h - 1) as usize, "{w}x{h} seed {seed}");

                // cells plus opened walls, nothing else is open
                let open = maze
                    .tiles()
                    .as_slice()
                    .iter()
                    .filter(|t| **t == Tile::Path)
                    .count();
                assert_eq!(open, (2 * w * h - 1) as usize);
            }
        }
    }

    #[test]
    fn border_is_walled() {
        for (w, h) in SIZES {
            let maze = seeded(Dims(w, h), 42);
            let (rows, cols) = (maze.rows(), maze.cols());
            assert_eq!((rows, cols), ((2 * h + 1) as usize, (2 * w + 1) as usize));

            for col in 0..cols {
                assert!(maze.is_wall(0, col));
                assert!(maze.is_wall(rows - 1, col));
            }
            for row in 0..rows {
                assert!(maze.is_wall(row, 0));
                assert!(maze.is_wall(row, cols - 1));
            }

            // even-even positions are corners between walls, never opened
            for row in (0..rows).step_by(2) {
                for col in (0..cols).step_by(2) {
                    assert!(maze.is_wall(row, col));
                }
            }
        }
    }

    #[test]
    fn deterministic_for_same_draws() {
        for (w, h) in SIZES {
            assert_eq!(seeded(Dims(w, h), 7), seeded(Dims(w, h), 7));
        }

        let generator = Generator::new();
        let a = generator.generate(Dims(12, 9), Some(99)).unwrap();
        let b = generator.generate(Dims(12, 9), Some(99)).unwrap();
        assert_eq!(a.seed, 99);
        assert_eq!(a.maze.to_bits(), b.maze.to_bits());
    }

    #[test]
    fn varies_between_draws() {
        let size = Dims(15, 15);
        let first = seeded(size, 1);
        let differing = (2..12).filter(|&seed| seeded(size, seed) != first).count();
        assert_eq!(differing, 10);

        let generator = Generator::new();
        let a = generator.generate(size, None).unwrap();
        let b = generator.generate(size, None).unwrap();
        assert_ne!(a.seed, b.seed);
        assert_ne!(a.maze, b.maze);
    }

    #[test]
    fn single_cell() {
        let maze = seeded(Dims(1, 1), 0);
        assert_eq!(maze.to_bits(), vec![vec![1, 1, 1], vec![1, 0, 1], vec![1, 1, 1]]);
        assert_eq!(maze.grid().edge_count(), 0);
        assert_eq!(maze.open_walls(), 0);
        assert_eq!(maze.start(), maze.end());
    }

    #[test]
    fn two_cells_always_joined() {
        for seed in 0..10 {
            let maze = seeded(Dims(2, 1), seed);
            assert_eq!(
                maze.to_bits(),
                vec![vec![1, 1, 1, 1, 1], vec![1, 0, 0, 0, 1], vec![1, 1, 1, 1, 1]]
            );
        }
    }

    #[test]
    fn fifteen_by_fifteen() {
        let maze = seeded(Dims(15, 15), 2024);
        assert_eq!((maze.rows(), maze.cols()), (31, 31));
        assert_eq!(maze.open_walls(), 224);
        assert_eq!(maze.start(), Dims(1, 1));
        assert_eq!(maze.end(), Dims(29, 29));
    }

    #[test]
    fn invalid_sizes_fail() {
        let mut rng = Random::seed_from_u64(0);
        for size in [Dims(0, 5), Dims(5, 0), Dims(-1, -1)] {
            assert_eq!(
                generate(size, &mut rng),
                Err(GeneratorError::invalid_size(size))
            );
        }
        assert!(Generator::new().generate(Dims(0, 0), Some(1)).is_err());
        assert!(Generator::new().generate_many(Dims(0, 3), &[1, 2]).is_err());
    }

    #[test]
    fn parallel_matches_sequential() {
        let generator = Generator::new();
        let seeds: Vec<u64> = (100..116).collect();
        let mazes = generator.generate_many(Dims(9, 6), &seeds).unwrap();

        assert_eq!(mazes.len(), seeds.len());
        for (maze, &seed) in mazes.iter().zip(&seeds) {
            assert_eq!(*maze, generator.generate(Dims(9, 6), Some(seed)).unwrap().maze);
        }
    }
}
