use thiserror::Error;

use crate::dims::Dims;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeneratorError {
    #[error("invalid maze size {width}x{height}, both dimensions must be positive")]
    InvalidSize { width: i32, height: i32 },
    #[error("maze size {width}x{height} is too large")]
    TooLarge { width: i32, height: i32 },
    #[error("cells {0:?} and {1:?} are not adjacent")]
    NotAdjacent(Dims, Dims),
}

impl GeneratorError {
    pub fn invalid_size(Dims(width, height): Dims) -> Self {
        GeneratorError::InvalidSize { width, height }
    }

    pub fn too_large(Dims(width, height): Dims) -> Self {
        GeneratorError::TooLarge { width, height }
    }
}
