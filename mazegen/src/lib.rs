//! Perfect maze generation.
//!
//! Mazes are random spanning trees over a grid of cells, built with randomized Kruskal's
//! algorithm on top of a union-find forest. The output is a binary wall grid, see [`grid`] for
//! its layout.

pub mod algorithms;
pub mod array;
pub mod dims;
pub mod disjoint_set;
pub mod error;
pub mod grid;
pub mod maze;

pub use algorithms::{generate, Generated, Generator, Random, RndKruskals};
pub use dims::Dims;
pub use error::GeneratorError;
pub use maze::{MazeGrid, Tile};
