#![no_main]

use libfuzzer_sys::fuzz_target;

use pathsearch::data_structures::frontier::Discipline;
use pathsearch::error::SearchError;
use pathsearch::problems::graph::Graph;

const VERTICES: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

// Every 3 bytes make an edge, the first 2 bytes pick the endpoints.
fuzz_target!(|data: &[u8]| {
    let Some((&[s, g], data)) = data.split_first_chunk::<2>() else {
        return;
    };
    let pick = |b: u8| VERTICES[usize::from(b) % VERTICES.len()];
    let edges = data
        .chunks_exact(3)
        .map(|e| (pick(e[0]), pick(e[1]), u32::from(e[2])));
    let Ok(graph) = Graph::new(VERTICES, edges) else {
        return;
    };

    let ucs = graph.ucs(pick(s), pick(g));
    for discipline in Discipline::ALL {
        match graph.search(pick(s), pick(g), discipline) {
            Ok(path) => {
                assert_eq!(path.start(), pick(s));
                assert_eq!(path.end(), pick(g));
                let ucs_cost = ucs.as_ref().map(|p| p.cost()).unwrap_or(u32::MAX);
                assert!(ucs_cost <= path.cost());
            }
            Err(e) => {
                assert_eq!(e, SearchError::NoPathFound);
                assert_eq!(ucs, Err(SearchError::NoPathFound));
            }
        }
    }
});
