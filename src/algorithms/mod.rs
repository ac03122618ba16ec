//! Implementation of search algorithms.
//!
//! Uninformed traversals run over any `Space`, A* is specialised to grids.

pub mod astar;
pub mod traversal;
