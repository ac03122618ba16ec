use std::fmt::Debug;

use log::debug;
use log::trace;
use rustc_hash::FxHashSet;

use crate::cost::Cost;
use crate::data_structures::frontier::Discipline;
use crate::data_structures::frontier::Frontier;
use crate::error::SearchError;
use crate::error::SearchResult;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// Uninformed search over a [`Space`], one skeleton for BFS, DFS and UCS.
///
/// Every push creates a fresh search node, so a state may be queued more
/// than once. Entries for states closed in the meantime are skipped when
/// dequeued instead of being removed from the frontier.
pub struct TraversalSearch<'s, Sp, St, C>
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    space: &'s Sp,
    start: St,
    goal: St,

    search_tree: SearchTree<St, C>,
    /// Keyed by `g`. Only the priority discipline looks at the key.
    open: Frontier<SearchTreeIndex, C>,
    closed: FxHashSet<St>,

    expansions: usize,
}

impl<'s, Sp, St, C> TraversalSearch<'s, Sp, St, C>
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    /// Prepares a search, failing if the space doesn't know either endpoint.
    pub fn new(space: &'s Sp, start: St, goal: St, discipline: Discipline) -> SearchResult<Self> {
        for s in [&start, &goal] {
            if !space.contains(s) {
                return Err(SearchError::UnknownVertex(format!("{s:?}")));
            }
        }

        Ok(Self {
            space,
            start,
            goal,
            search_tree: SearchTree::new(),
            open: Frontier::new(discipline),
            closed: FxHashSet::default(),
            expansions: 0,
        })
    }

    #[inline(always)]
    pub fn discipline(&self) -> Discipline {
        self.open.discipline()
    }

    /// Number of states closed so far.
    #[inline(always)]
    pub fn expansions(&self) -> usize {
        self.expansions
    }

    /// Searches until the goal is dequeued or the frontier runs dry.
    pub fn run(mut self) -> SearchResult<Path<St, C>> {
        debug!(
            "{} from {:?} to {:?}",
            self.discipline().search_name(),
            self.start,
            self.goal
        );

        let root = self
            .search_tree
            .push(SearchTreeNode::new(self.start, None, C::zero(), C::zero()));
        self.open.enqueue(root, C::zero());

        while !self.open.is_empty() {
            let node_index = self.open.dequeue()?;
            let state = *self.search_tree[node_index].state();
            let g = self.search_tree[node_index].g();

            if state == self.goal {
                let path = self.search_tree.path(self.space, node_index)?;
                debug!(
                    "{} reached {:?} after {} expansions: {} steps, cost {}",
                    self.discipline().search_name(),
                    self.goal,
                    self.expansions,
                    path.len(),
                    path.cost()
                );
                return Ok(path);
            }

            if !self.closed.insert(state) {
                continue;
            }
            self.search_tree[node_index].close();
            self.expansions += 1;
            trace!("Expanding {state:?} (g={g}, {})", node_index);

            for (s, c) in self.space.neighbours(&state) {
                if self.closed.contains(&s) {
                    continue;
                }
                let neigh_g = g.saturating_add(&c);
                let neigh_index = self
                    .search_tree
                    .push(SearchTreeNode::new(s, Some(node_index), neigh_g, neigh_g));
                self.open.enqueue(neigh_index, neigh_g);
            }
        }

        debug!(
            "{} exhausted the frontier after {} expansions",
            self.discipline().search_name(),
            self.expansions
        );
        Err(SearchError::NoPathFound)
    }
}

impl<Sp, St, C> Debug for TraversalSearch<'_, Sp, St, C>
where
    Sp: Space<St, C>,
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("TraversalSearch")
            .field("discipline", &self.discipline())
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("search_tree", &self.search_tree)
            .field("open", &self.open.len())
            .field("closed", &self.closed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indoc::indoc;

    use crate::float_cost::FloatCost;
    use crate::problems::graph::Graph;
    use crate::problems::grid::Grid;
    use crate::problems::grid::GridCell;
    use crate::problems::grid::GridProblem;

    fn diamond() -> Graph<u32> {
        // A - B - D is cheaper than A - C - D, but C is discovered first from A.
        Graph::new(
            ["A", "C", "B", "D"],
            [("A", "C", 5), ("A", "B", 1), ("C", "D", 1), ("B", "D", 1)],
        )
        .unwrap()
    }

    fn run(g: &Graph<u32>, from: &str, to: &str, discipline: Discipline) -> Path<String, u32> {
        g.search(from, to, discipline).unwrap()
    }

    #[test]
    fn every_discipline_handles_start_is_goal() {
        let g = diamond();
        for discipline in Discipline::ALL {
            let path = run(&g, "B", "B", discipline);
            assert_eq!(path.states(), &["B".to_string()]);
            assert_eq!(path.cost(), 0);
        }
    }

    #[test]
    fn disciplines_differ_on_diamond() {
        let g = diamond();
        assert_eq!(run(&g, "A", "D", Discipline::Fifo).states(), &["A", "C", "D"]);
        assert_eq!(run(&g, "A", "D", Discipline::Fifo).cost(), 6);
        assert_eq!(run(&g, "A", "D", Discipline::Lifo).states(), &["A", "B", "D"]);
        assert_eq!(run(&g, "A", "D", Discipline::Priority).states(), &["A", "B", "D"]);
        assert_eq!(run(&g, "A", "D", Discipline::Priority).cost(), 2);
    }

    #[test]
    fn unknown_states_are_rejected() {
        let g = diamond();
        let grid = Grid::open(2, 2).unwrap();
        let r = TraversalSearch::new(
            &grid,
            GridCell::new(0, 0),
            GridCell::new(2, 0),
            Discipline::Fifo,
        );
        assert!(matches!(r, Err(SearchError::UnknownVertex(_))));
        assert!(matches!(
            g.search("A", "Z", Discipline::Lifo),
            Err(SearchError::UnknownVertex(v)) if v == "Z"
        ));
    }

    #[test]
    fn walled_off_goal_has_no_path() {
        let problem = GridProblem::try_from(indoc! {"
            S.#..
            ..#..
            ###.G
        "})
        .unwrap();
        for discipline in Discipline::ALL {
            let search =
                TraversalSearch::new(problem.grid(), problem.start(), problem.goal(), discipline)
                    .unwrap();
            assert_eq!(search.run(), Err(SearchError::NoPathFound));
        }
    }

    #[test]
    fn bfs_and_ucs_agree_on_unit_grids() {
        let problem = GridProblem::try_from(indoc! {"
            S....
            ####.
            .....
            .####
            ....G
        "})
        .unwrap();
        let search = |d| {
            TraversalSearch::new(problem.grid(), problem.start(), problem.goal(), d)
                .unwrap()
                .run()
                .unwrap()
        };
        let bfs = search(Discipline::Fifo);
        let ucs = search(Discipline::Priority);
        assert_eq!(bfs.cost(), ucs.cost());
        assert_eq!(ucs.cost(), FloatCost::new(ucs.len() as f64));
        // Diagonals cut the corners of the serpentine.
        assert_eq!(ucs.len(), 12);
    }

    #[test]
    fn dfs_path_is_connected() {
        let grid = Grid::open(4, 6).unwrap();
        let path = TraversalSearch::new(
            &grid,
            GridCell::new(0, 0),
            GridCell::new(3, 5),
            Discipline::Lifo,
        )
        .unwrap()
        .run()
        .unwrap();
        assert_eq!(*path.start(), GridCell::new(0, 0));
        assert_eq!(*path.end(), GridCell::new(3, 5));
        assert!(path.states().windows(2).all(|w| w[0].is_adjacent(&w[1])));
        assert_eq!(path.cost(), FloatCost::new(path.len() as f64));
    }
}
