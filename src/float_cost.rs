use derive_more::Display;
use num_traits::SaturatingAdd;
use num_traits::Zero;
use num_traits::bounds::UpperBounded;
use ordered_float::OrderedFloat;

use crate::cost::Cost;

/// A totally ordered `f64` cost.
///
/// Grid searches need it since the Euclidean heuristic is irrational.
/// `NaN` sorts after every other value, so it never wins a frontier.
#[derive(Copy, Clone, Default, Debug, Display, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
#[display("{_0}")]
pub struct FloatCost(pub OrderedFloat<f64>);

impl Cost for FloatCost {
    /// `NaN` orders above everything, so it has to be ruled out by hand.
    #[inline(always)]
    fn is_valid_weight(&self) -> bool {
        !self.0.is_nan() && self.0 >= OrderedFloat(0.0)
    }
}

impl FloatCost {
    #[inline(always)]
    pub fn new(f: f64) -> Self {
        Self(OrderedFloat(f))
    }

    #[inline(always)]
    pub fn infinity() -> Self {
        Self(OrderedFloat(f64::INFINITY))
    }
}

impl std::ops::Add for FloatCost {
    type Output = Self;
    #[inline(always)]
    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}
impl std::ops::AddAssign for FloatCost {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

/// Floats saturate at infinity on their own.
impl SaturatingAdd for FloatCost {
    #[inline(always)]
    fn saturating_add(&self, rhs: &Self) -> Self {
        *self + *rhs
    }
}

impl Zero for FloatCost {
    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.0 == OrderedFloat(0.0)
    }
    #[inline(always)]
    fn zero() -> Self {
        Self::new(0.0)
    }
}
impl UpperBounded for FloatCost {
    #[inline(always)]
    fn max_value() -> Self {
        Self::infinity()
    }
}
