//! Search spaces.
//!
//! An explicit weighted graph over named vertices, and an implicit grid whose
//! cells are generated on demand.

pub mod graph;
pub mod grid;
pub mod romania;

/// Clamps into `[0, 1]`, `NaN` becoming `0`, so `random_bool` never panics.
pub(crate) fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
