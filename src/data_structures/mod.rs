//! Containers backing the search frontiers.

pub mod frontier;
pub mod priority_queue;
