/// Accumulated path cost.
///
/// Costs are never negative. Searches start from `zero()`, add up edge
/// weights, and use `max_value()` as "not reached yet".
/// Edge weights are checked with [`Cost::is_valid_weight`] before a search
/// ever sees them.
pub trait Cost:
    Copy
    + std::fmt::Debug
    + std::fmt::Display
    + PartialEq
    + core::cmp::Eq
    + PartialOrd
    + Ord
    + num_traits::SaturatingAdd
    + num_traits::bounds::UpperBounded
    + num_traits::Zero
    + std::ops::Add<Self, Output = Self>
    + std::ops::AddAssign
{
    #[inline(always)]
    fn valid(&self) -> bool {
        *self != num_traits::bounds::UpperBounded::max_value()
    }

    /// Whether this is usable as an edge weight.
    #[inline(always)]
    fn is_valid_weight(&self) -> bool {
        *self >= Self::zero()
    }
}

impl Cost for u32 {}
impl Cost for u64 {}
