use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use paste::paste;

/// Two-dimensional integer coordinates, `Dims(x, y)`.
///
/// Used both for logical cell positions and for sizes (`Dims(width, height)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims(pub i32, pub i32);

impl Dims {
    pub const ZERO: Dims = Dims(0, 0);
    pub const ONE: Dims = Dims(1, 1);

    /// Manhattan length of the vector.
    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }

    /// Whether both components are strictly positive.
    pub fn all_positive(self) -> bool {
        self.0 > 0 && self.1 > 0
    }

    /// Iterates over all positions in `[start, end)`, row by row.
    pub fn iter_fill(start: Dims, end: Dims) -> impl Iterator<Item = Dims> {
        (start.1..end.1).flat_map(move |y| (start.0..end.0).map(move |x| Dims(x, y)))
    }
}

impl Neg for Dims {
    type Output = Dims;

    fn neg(self) -> Dims {
        Dims(-self.0, -self.1)
    }
}

impl From<(i32, i32)> for Dims {
    fn from((x, y): (i32, i32)) -> Self {
        Dims(x, y)
    }
}

impl From<Dims> for (i32, i32) {
    fn from(dims: Dims) -> Self {
        (dims.0, dims.1)
    }
}

impl From<[i32; 2]> for Dims {
    fn from(arr: [i32; 2]) -> Self {
        Dims(arr[0], arr[1])
    }
}

impl From<Dims> for [i32; 2] {
    fn from(dims: Dims) -> Self {
        [dims.0, dims.1]
    }
}

macro_rules! impl_op {
    ($trait:ident, $op:ident) => {
        impl $trait for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: Dims) -> Dims {
                Dims(self.0.$op(other.0), self.1.$op(other.1))
            }
        }

        impl $trait<i32> for Dims {
            type Output = Dims;

            #[inline(always)]
            fn $op(self, other: i32) -> Dims {
                Dims(self.0.$op(other), self.1.$op(other))
            }
        }

        paste! {
            impl [<$trait Assign>] for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: Dims) {
                    *self = self.$op(other);
                }
            }

            impl [<$trait Assign>]<i32> for Dims {
                #[inline(always)]
                fn [<$op _assign>](&mut self, other: i32) {
                    *self = self.$op(other);
                }
            }
        }
    };
}

impl_op!(Add, add);
impl_op!(Sub, sub);
impl_op!(Mul, mul);
