//! Road map of Romania, the classic route-finding example.
//!
//! Cities are abbreviated to two letters (`Bu` is Bucharest, `Ti` is
//! Timisoara); distances are in km.

use crate::problems::graph::Graph;

pub const CITIES: [&str; 20] = [
    "Or", "Ne", "Ze", "Ia", "Ar", "Si", "Fa", "Va", "Ri", "Ti", "Lu", "Pi", "Ur", "Hi", "Me", "Bu",
    "Dr", "Ef", "Cr", "Gi",
];

#[rustfmt::skip]
pub const ROADS: [(&str, &str, u32); 23] = [
    ("Or", "Ze", 71), ("Or", "Si", 151), ("Ne", "Ia", 87), ("Ze", "Ar", 75),
    ("Ia", "Va", 92), ("Ar", "Si", 140), ("Ar", "Ti", 118), ("Si", "Fa", 99),
    ("Si", "Ri", 80), ("Fa", "Bu", 211), ("Va", "Ur", 142), ("Ri", "Pi", 97),
    ("Ri", "Cr", 146), ("Ti", "Lu", 111), ("Lu", "Me", 70), ("Me", "Dr", 75),
    ("Dr", "Cr", 120), ("Cr", "Pi", 138), ("Pi", "Bu", 101), ("Bu", "Gi", 90),
    ("Bu", "Ur", 85), ("Ur", "Hi", 98), ("Hi", "Ef", 86),
];

/// The map as a graph.
pub fn map() -> Graph<u32> {
    // Fixed data, construction can't fail.
    match Graph::new(CITIES, ROADS) {
        Ok(g) => g,
        Err(e) => unreachable!("Romania map is malformed: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_is_connected() {
        let g = map();
        assert_eq!(g.vertex_count(), CITIES.len());
        assert_eq!(g.edge_count(), ROADS.len());
        for city in CITIES {
            assert!(g.ucs("Ar", city).is_ok(), "{city} is unreachable");
        }
    }
}
