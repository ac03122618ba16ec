use shadow_rs::shadow;

shadow!(build);

// Internals
// ---------
pub mod error;
pub mod heap_primitives;

// Costs
// -----
pub mod cost;
pub mod float_cost;

// Search space and search tree
// ----------------------------
pub mod search;
pub mod space;

// Data structures
// ---------------
pub mod data_structures;

// Problems
// --------
pub mod problems;

// Algorithms
// ----------
pub mod algorithms;
