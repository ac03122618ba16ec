use derive_more::Display;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::algorithms::traversal::TraversalSearch;
use crate::cost::Cost;
use crate::data_structures::frontier::Discipline;
use crate::error::SearchError;
use crate::error::SearchResult;
use crate::problems::clamp_probability;
use crate::space::Neighbours;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// Index of a vertex within its graph.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{_0}")]
pub struct VertexId(usize);
impl State for VertexId {}

/// One direction of an undirected edge.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Edge<C: Cost> {
    pub to: VertexId,
    pub weight: C,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Duplicate vertex '{0}'")]
    DuplicateVertex(String),
    #[error("Edge ({from}, {to}) references an unknown vertex")]
    DanglingEdge { from: String, to: String },
    #[error("Edge ({from}, {to}) has invalid weight {weight}, weights must be non-negative")]
    InvalidWeight {
        from: String,
        to: String,
        weight: String,
    },
}

/// An undirected weighted graph over named vertices.
///
/// Built once, read-only afterwards. Every edge is stored twice, once from
/// each endpoint, in insertion order.
#[derive(Clone)]
pub struct Graph<C: Cost> {
    names: Vec<String>,
    index: FxHashMap<String, VertexId>,
    adjacency: Vec<Vec<Edge<C>>>,
    edge_count: usize,
}

impl<C: Cost> Graph<C> {
    /// Builds a graph from unique vertex names and `(from, to, weight)` edges.
    ///
    /// Edges naming unknown vertices are rejected rather than skipped, and so
    /// are negative or `NaN` weights.
    pub fn new<V, S, E, A, B>(vertices: V, edges: E) -> Result<Self, GraphError>
    where
        V: IntoIterator<Item = S>,
        S: Into<String>,
        E: IntoIterator<Item = (A, B, C)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::empty();
        for name in vertices {
            graph.insert_vertex(name.into())?;
        }
        for (from, to, weight) in edges {
            let (from, to) = (from.as_ref(), to.as_ref());
            let (Some(a), Some(b)) = (graph.id(from), graph.id(to)) else {
                return Err(GraphError::DanglingEdge {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            };
            if !weight.is_valid_weight() {
                return Err(GraphError::InvalidWeight {
                    from: from.to_string(),
                    to: to.to_string(),
                    weight: weight.to_string(),
                });
            }
            graph.insert_edge(a, b, weight);
        }

        log::debug!(
            "Built graph with {} vertices and {} edges",
            graph.vertex_count(),
            graph.edge_count()
        );
        Ok(graph)
    }

    fn empty() -> Self {
        Self {
            names: vec![],
            index: FxHashMap::default(),
            adjacency: vec![],
            edge_count: 0,
        }
    }

    fn insert_vertex(&mut self, name: String) -> Result<VertexId, GraphError> {
        if self.index.contains_key(&name) {
            return Err(GraphError::DuplicateVertex(name));
        }
        let id = VertexId(self.names.len());
        self.index.insert(name.clone(), id);
        self.names.push(name);
        self.adjacency.push(vec![]);
        Ok(id)
    }

    fn insert_edge(&mut self, a: VertexId, b: VertexId, weight: C) {
        self.adjacency[a.0].push(Edge { to: b, weight });
        self.adjacency[b.0].push(Edge { to: a, weight });
        self.edge_count += 1;
    }

    #[inline(always)]
    pub fn id(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    /// Name of a vertex, `None` for ids issued by some other graph.
    #[inline(always)]
    pub fn name(&self, id: VertexId) -> Option<&str> {
        self.names.get(id.0).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn ids(&self) -> impl Iterator<Item = VertexId> + use<C> {
        (0..self.names.len()).map(VertexId)
    }

    #[inline(always)]
    pub fn vertex_count(&self) -> usize {
        self.names.len()
    }

    /// Number of undirected edges.
    #[inline(always)]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Edges leaving a vertex, in insertion order.
    pub fn edges(&self, id: VertexId) -> &[Edge<C>] {
        self.adjacency.get(id.0).map_or(&[], Vec::as_slice)
    }

    /// Weight of the cheapest edge between two vertices.
    pub fn weight(&self, from: VertexId, to: VertexId) -> Option<C> {
        self.adjacency
            .get(from.0)?
            .iter()
            .filter(|e| e.to == to)
            .map(|e| e.weight)
            .min()
    }

    /// Finds a path between two named vertices.
    ///
    /// The returned cost is the sum of the edge weights along the path, even
    /// for the disciplines that don't track cost while exploring.
    pub fn search(
        &self,
        start: &str,
        goal: &str,
        discipline: Discipline,
    ) -> SearchResult<Path<String, C>> {
        let start_id = self
            .id(start)
            .ok_or_else(|| SearchError::UnknownVertex(start.to_string()))?;
        let goal_id = self
            .id(goal)
            .ok_or_else(|| SearchError::UnknownVertex(goal.to_string()))?;

        let path = TraversalSearch::new(self, start_id, goal_id, discipline)?.run()?;
        Ok(path.map(|id| self.names[id.0].clone()))
    }

    pub fn bfs(&self, start: &str, goal: &str) -> SearchResult<Path<String, C>> {
        self.search(start, goal, Discipline::Fifo)
    }

    pub fn dfs(&self, start: &str, goal: &str) -> SearchResult<Path<String, C>> {
        self.search(start, goal, Discipline::Lifo)
    }

    pub fn ucs(&self, start: &str, goal: &str) -> SearchResult<Path<String, C>> {
        self.search(start, goal, Discipline::Priority)
    }
}

impl Graph<u32> {
    /// A reproducible random graph with vertices named `v0..vN`.
    ///
    /// Each vertex pair gets an edge with probability `edge_probability`,
    /// weighted uniformly within `1..=max_weight`. Probabilities outside
    /// `[0, 1]` are clamped, and `NaN` counts as `0`.
    pub fn random<R: rand::Rng>(
        r: &mut R,
        vertices: usize,
        edge_probability: f64,
        max_weight: u32,
    ) -> Self {
        let edge_probability = clamp_probability(edge_probability);
        let mut graph = Self::empty();
        for i in 0..vertices {
            let name = format!("v{i}");
            graph.names.push(name.clone());
            graph.index.insert(name, VertexId(i));
            graph.adjacency.push(vec![]);
        }
        for a in 0..vertices {
            for b in (a + 1)..vertices {
                if r.random_bool(edge_probability) {
                    let w = r.random_range(1..=max_weight.max(1));
                    graph.insert_edge(VertexId(a), VertexId(b), w);
                }
            }
        }
        graph
    }
}

impl<C: Cost> Space<VertexId, C> for Graph<C> {
    #[inline(always)]
    fn contains(&self, s: &VertexId) -> bool {
        s.0 < self.names.len()
    }

    fn neighbours(&self, s: &VertexId) -> Neighbours<VertexId, C> {
        self.adjacency[s.0]
            .iter()
            .map(|e| (e.to, e.weight))
            .collect()
    }

    #[inline(always)]
    fn cost(&self, from: &VertexId, to: &VertexId) -> Option<C> {
        self.weight(*from, *to)
    }
}

/// Adjacency matrix, `X` marking missing edges.
impl<C: Cost> std::fmt::Display for Graph<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let cell = |a: VertexId, b: VertexId| {
            self.weight(a, b)
                .map(|w| w.to_string())
                .unwrap_or_else(|| "X".to_string())
        };

        let mut width = self
            .names
            .iter()
            .map(|n| n.chars().count())
            .max()
            .unwrap_or(1);
        for a in self.ids() {
            for b in self.ids() {
                width = width.max(cell(a, b).chars().count());
            }
        }

        write!(f, "{:>width$}", "")?;
        for name in &self.names {
            write!(f, " {name:>width$}")?;
        }
        writeln!(f)?;
        for (a, name) in self.ids().zip(&self.names) {
            write!(f, "{name:>width$}")?;
            for b in self.ids() {
                write!(f, " {:>width$}", cell(a, b))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<C: Cost> std::fmt::Debug for Graph<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Graph(|V|={}, |E|={})",
            self.vertex_count(),
            self.edge_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand_chacha::ChaCha8Rng;
    use rand_chacha::rand_core::SeedableRng;

    use crate::float_cost::FloatCost;
    use crate::problems::romania;

    fn triangle() -> Graph<u32> {
        Graph::new(["A", "B", "C"], [("A", "B", 1), ("B", "C", 1), ("A", "C", 5)]).unwrap()
    }

    /// Shortest distances between every pair, `None` when disconnected.
    fn floyd_warshall(g: &Graph<u32>) -> Vec<Vec<Option<u32>>> {
        let n = g.vertex_count();
        let mut d = vec![vec![None; n]; n];
        for a in g.ids() {
            d[a.0][a.0] = Some(0);
            for e in g.edges(a) {
                let best = d[a.0][e.to.0].map_or(e.weight, |w: u32| w.min(e.weight));
                d[a.0][e.to.0] = Some(best);
            }
        }
        for k in 0..n {
            for i in 0..n {
                for j in 0..n {
                    if let (Some(ik), Some(kj)) = (d[i][k], d[k][j]) {
                        if d[i][j].is_none_or(|ij| ik + kj < ij) {
                            d[i][j] = Some(ik + kj);
                        }
                    }
                }
            }
        }
        d
    }

    fn resum(g: &Graph<u32>, path: &Path<String, u32>) -> u32 {
        path.states()
            .windows(2)
            .map(|w| g.weight(g.id(&w[0]).unwrap(), g.id(&w[1]).unwrap()).unwrap())
            .sum()
    }

    #[test]
    fn construction() {
        let g = triangle();
        assert_eq!(g.vertex_count(), 3);
        assert_eq!(g.edge_count(), 3);
        let a = g.id("A").unwrap();
        let c = g.id("C").unwrap();
        assert_eq!(g.name(a).unwrap(), "A");
        assert_eq!(g.weight(a, c), Some(5));
        assert_eq!(g.weight(c, a), Some(5));
        assert_eq!(g.edges(a).len(), 2);
        assert_eq!(g.id("D"), None);
    }

    #[test]
    fn duplicate_vertices_are_rejected() {
        let err = Graph::<u32>::new(["A", "B", "A"], Vec::<(&str, &str, u32)>::new());
        assert_eq!(err.unwrap_err(), GraphError::DuplicateVertex("A".to_string()));
    }

    #[test]
    fn dangling_edges_are_rejected() {
        let err = Graph::new(["A", "B"], [("A", "B", 1u32), ("B", "Z", 2)]);
        assert_eq!(
            err.unwrap_err(),
            GraphError::DanglingEdge {
                from: "B".to_string(),
                to: "Z".to_string()
            }
        );
    }

    #[test]
    fn invalid_weights_are_rejected() {
        let err = Graph::new(["A", "B"], [("A", "B", FloatCost::new(-1.0))]);
        assert!(matches!(err, Err(GraphError::InvalidWeight { .. })));

        let err = Graph::new(["A", "B"], [("A", "B", FloatCost::new(f64::NAN))]);
        assert_eq!(
            err.unwrap_err(),
            GraphError::InvalidWeight {
                from: "A".to_string(),
                to: "B".to_string(),
                weight: "NaN".to_string(),
            }
        );

        let g = Graph::new(["A", "B"], [("A", "B", FloatCost::new(0.0))]).unwrap();
        assert_eq!(g.ucs("A", "B").unwrap().cost(), FloatCost::new(0.0));
    }

    #[test]
    fn ids_from_other_graphs() {
        let big = Graph::new(["A", "B", "C", "D"], [("C", "D", 1u32)]).unwrap();
        let small = triangle();
        let d = big.id("D").unwrap();
        assert_eq!(big.name(d), Some("D"));
        assert_eq!(small.name(d), None);
        assert!(small.edges(d).is_empty());
        assert_eq!(small.weight(d, d), None);
    }

    #[test]
    fn random_clamps_edge_probability() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(Graph::random(&mut rng, 5, 1.5, 3).edge_count(), 10);
        assert_eq!(Graph::random(&mut rng, 5, -0.5, 3).edge_count(), 0);
        assert_eq!(Graph::random(&mut rng, 5, f64::NAN, 3).edge_count(), 0);
    }

    #[test]
    fn parallel_edges_use_the_cheapest() {
        let g = Graph::new(["A", "B"], [("A", "B", 7u32), ("A", "B", 3)]).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.weight(g.id("A").unwrap(), g.id("B").unwrap()), Some(3));
        assert_eq!(g.ucs("A", "B").unwrap().cost(), 3);
    }

    #[test]
    fn ucs_prefers_cheaper_detour() {
        let path = triangle().ucs("A", "C").unwrap();
        assert_eq!(path.states(), &["A", "B", "C"]);
        assert_eq!(path.cost(), 2);
    }

    #[test]
    fn bfs_prefers_fewer_hops() {
        let path = triangle().bfs("A", "C").unwrap();
        assert_eq!(path.states(), &["A", "C"]);
        assert_eq!(path.cost(), 5);
    }

    #[test]
    fn start_is_goal() {
        let g = triangle();
        for discipline in Discipline::ALL {
            let path = g.search("B", "B", discipline).unwrap();
            assert_eq!(path.states(), &["B"]);
            assert_eq!(path.cost(), 0);
        }
    }

    #[test]
    fn unknown_vertices() {
        let g = triangle();
        for discipline in Discipline::ALL {
            assert_eq!(
                g.search("Q", "A", discipline),
                Err(SearchError::UnknownVertex("Q".to_string()))
            );
            assert_eq!(
                g.search("A", "Q", discipline),
                Err(SearchError::UnknownVertex("Q".to_string()))
            );
        }
    }

    #[test]
    fn disconnected_has_no_path() {
        let g = Graph::new(["A", "B", "C", "D"], [("A", "B", 1u32), ("C", "D", 1)]).unwrap();
        for discipline in Discipline::ALL {
            assert_eq!(g.search("A", "D", discipline), Err(SearchError::NoPathFound));
        }
    }

    #[test]
    fn romania_bucharest_to_timisoara() {
        let g = romania::map();

        let bfs = g.bfs("Bu", "Ti").unwrap();
        assert_eq!(bfs.states(), &["Bu", "Fa", "Si", "Ar", "Ti"]);
        assert_eq!(bfs.cost(), 568);

        let ucs = g.ucs("Bu", "Ti").unwrap();
        assert_eq!(ucs.states(), &["Bu", "Pi", "Ri", "Si", "Ar", "Ti"]);
        assert_eq!(ucs.cost(), 536);

        let dfs = g.dfs("Bu", "Ti").unwrap();
        assert_eq!(dfs.start(), "Bu");
        assert_eq!(dfs.end(), "Ti");
        assert_eq!(resum(&g, &dfs), dfs.cost());
        assert!(dfs.cost() >= ucs.cost());
    }

    #[test]
    fn ucs_matches_floyd_warshall() {
        for seed in 0..30u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let g = Graph::random(&mut rng, 9, 0.3, 20);
            let d = floyd_warshall(&g);

            for a in g.ids() {
                for b in g.ids() {
                    let result = g.ucs(g.name(a).unwrap(), g.name(b).unwrap());
                    match d[a.0][b.0] {
                        Some(best) => {
                            let path = result.unwrap();
                            assert_eq!(path.cost(), best, "seed={seed} {a}->{b}");
                            assert_eq!(resum(&g, &path), path.cost());
                        }
                        None => assert_eq!(result, Err(SearchError::NoPathFound)),
                    }
                }
            }
        }
    }

    #[test]
    fn bfs_uses_fewest_vertices() {
        for seed in 0..30u64 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let weighted = Graph::random(&mut rng, 10, 0.25, 9);
            // Same topology, unit weights.
            let w = &weighted;
            let unit = Graph::new(
                w.names().to_vec(),
                w.ids().flat_map(|a| {
                    w.edges(a)
                        .iter()
                        .filter(move |e| a < e.to)
                        .map(move |e| (w.name(a).unwrap(), w.name(e.to).unwrap(), 1u32))
                }),
            )
            .unwrap();
            let hops = floyd_warshall(&unit);

            for a in weighted.ids() {
                for b in weighted.ids() {
                    let (from, to) = (weighted.name(a).unwrap(), weighted.name(b).unwrap());
                    match (weighted.bfs(from, to), hops[a.0][b.0]) {
                        (Ok(path), Some(h)) => {
                            assert_eq!(path.len() as u32, h, "seed={seed} {a}->{b}");
                            assert_eq!(resum(&weighted, &path), path.cost());
                        }
                        (Err(SearchError::NoPathFound), None) => {}
                        (result, h) => panic!("seed={seed} {a}->{b}: {result:?} vs {h:?}"),
                    }
                }
            }
        }
    }

    #[test]
    fn dfs_paths_are_valid() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let g = Graph::random(&mut rng, 12, 0.3, 9);
        let d = floyd_warshall(&g);
        for a in g.ids() {
            for b in g.ids() {
                match g.dfs(g.name(a).unwrap(), g.name(b).unwrap()) {
                    Ok(path) => {
                        assert_eq!(path.start(), g.name(a).unwrap());
                        assert_eq!(path.end(), g.name(b).unwrap());
                        assert_eq!(resum(&g, &path), path.cost());
                        assert!(path.cost() >= d[a.0][b.0].unwrap());
                    }
                    Err(e) => {
                        assert_eq!(e, SearchError::NoPathFound);
                        assert!(d[a.0][b.0].is_none());
                    }
                }
            }
        }
    }

    #[test]
    fn display_adjacency_table() {
        assert_eq!(
            format!("{}", triangle()),
            "  A B C\nA X 1 5\nB 1 X 1\nC 5 1 X\n"
        );
        assert_eq!(format!("{:?}", triangle()), "Graph(|V|=3, |E|=3)");
    }
}
