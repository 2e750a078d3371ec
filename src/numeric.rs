//! 数值标量约束: 解算器对容量与费用类型的最小要求。
use std::cmp::Ordering;
use std::fmt::Debug;
use std::ops::Neg;

use num_traits::{Bounded, NumAssign, NumCast, PrimInt};

/// Capacity scalar carried by residual arcs.
///
/// Capacities are restricted to primitive integers so that bottleneck
/// subtraction stays exact; both supported solver instantiations use an
/// integer capacity with either an integer or a floating-point cost.
pub trait Capacity: PrimInt + NumAssign + Debug {
    /// View of a flow amount in the cost scalar, used when charging
    /// `marginal × pushed` to a running cost total.
    fn to_cost<D: Cost>(self) -> D {
        <D as NumCast>::from(self).expect("flow amount representable in the cost type")
    }
}

impl<T> Capacity for T where T: PrimInt + NumAssign + Debug {}

/// Cost scalar carried by residual arcs and vertex potentials.
///
/// Requires an additive identity, subtraction, negation (reverse arcs store
/// the negated cost), a total order and a maximum-value sentinel standing in
/// for an unreachable distance.
pub trait Cost:
    Copy + PartialEq + PartialOrd + Debug + NumAssign + NumCast + Neg<Output = Self> + Bounded
{
    /// Total order over values; IEEE floats use `total_cmp`.
    fn total_order(self, other: Self) -> Ordering;

    /// Unreachable-distance sentinel, never produced by arc arithmetic.
    fn infinite() -> Self {
        Self::max_value()
    }

    /// Lossy view used by tolerance checks and reports.
    fn to_f64(self) -> f64;
}

macro_rules! impl_cost_for_int {
    ($($t:ty)*) => {$(
        impl Cost for $t {
            fn total_order(self, other: Self) -> Ordering {
                Ord::cmp(&self, &other)
            }

            fn to_f64(self) -> f64 {
                self as f64
            }
        }
    )*};
}

impl_cost_for_int!(i16 i32 i64 i128 isize);

impl Cost for f32 {
    fn total_order(self, other: Self) -> Ordering {
        self.total_cmp(&other)
    }

    fn to_f64(self) -> f64 {
        <f64 as From<f32>>::from(self)
    }
}

impl Cost for f64 {
    fn total_order(self, other: Self) -> Ordering {
        self.total_cmp(&other)
    }

    fn to_f64(self) -> f64 {
        self
    }
}
