use std::fmt::Debug;
use std::marker::PhantomData;

use log::debug;
use log::trace;
use log::warn;
use rustc_hash::FxHashMap;

use crate::data_structures::priority_queue::PriorityQueue;
use crate::error::SearchError;
use crate::error::SearchResult;
use crate::problems::grid::EuclideanDistance;
use crate::problems::grid::Grid;
use crate::problems::grid::GridCell;
use crate::problems::grid::GridCost;
use crate::problems::grid::GridError;
use crate::problems::grid::GridHeuristic;
use crate::search::SearchTree;
use crate::search::SearchTreeIndex;
use crate::search::SearchTreeNode;
use crate::space::Path;
use crate::space::Space;

/// A frontier entry as seen from outside the search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OpenCell {
    pub cell: GridCell,
    pub g: GridCost,
    pub f: GridCost,
}

/// Outcome of a single [`AStarSearch::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// Still going. Open cells are listed best first, closed cells in the
    /// order they were expanded.
    Searching {
        open: Vec<OpenCell>,
        closed: Vec<GridCell>,
    },
    Done { path: Path<GridCell, GridCost> },
}

impl StepResult {
    #[inline(always)]
    pub fn is_done(&self) -> bool {
        matches!(self, StepResult::Done { .. })
    }
}

/// A* over an 8-connected [`Grid`], advanced one expansion at a time.
///
/// The search keeps all of its state between calls to [`Self::step`], so a
/// caller can interleave steps with its own work and stop whenever it wants.
///
/// The frontier has no decrease-key. Improving a cell pushes a new entry and
/// the outdated one is skipped once it surfaces.
pub struct AStarSearch<'g, H = EuclideanDistance>
where
    H: GridHeuristic,
{
    grid: &'g Grid,
    start: GridCell,
    goal: GridCell,

    /// All the Search Nodes, at most one per cell.
    search_tree: SearchTree<GridCell, GridCost>,
    /// Finds the Search Node of a cell, if it was ever reached.
    node_map: FxHashMap<GridCell, SearchTreeIndex>,
    /// Keyed by `f`, ties go to the earliest push.
    open: PriorityQueue<SearchTreeIndex, GridCost>,
    /// Expanded cells in expansion order.
    closed: Vec<GridCell>,

    finished: bool,

    _phantom_heuristic: PhantomData<H>,
}

impl<'g> AStarSearch<'g, EuclideanDistance> {
    /// Prepares a search guided by the straight-line distance to the goal.
    pub fn new(grid: &'g Grid, start: GridCell, goal: GridCell) -> Result<Self, GridError> {
        Self::with_heuristic(grid, start, goal)
    }
}

impl<'g, H> AStarSearch<'g, H>
where
    H: GridHeuristic,
{
    pub fn with_heuristic(
        grid: &'g Grid,
        start: GridCell,
        goal: GridCell,
    ) -> Result<Self, GridError> {
        for cell in [start, goal] {
            if !grid.in_bounds(&cell) {
                return Err(GridError::OutOfBounds(cell));
            }
        }
        if grid.is_blocked(&start) {
            warn!("Searching from {start}, a blocked cell");
        }
        debug!(
            "A* from {start} to {goal} on {grid:?} using {}",
            std::any::type_name::<H>()
        );

        let mut search = Self {
            grid,
            start,
            goal,
            search_tree: SearchTree::new(),
            node_map: FxHashMap::default(),
            open: PriorityQueue::with_capacity(64),
            closed: vec![],
            finished: false,
            _phantom_heuristic: PhantomData,
        };
        // The start is ranked by 0, not by its heuristic.
        search.push_new(start, None, GridCost::new(0.0), GridCost::new(0.0));

        Ok(search)
    }

    #[inline(always)]
    pub fn start(&self) -> GridCell {
        self.start
    }

    #[inline(always)]
    pub fn goal(&self) -> GridCell {
        self.goal
    }

    /// Number of cells expanded so far.
    #[inline(always)]
    pub fn expansions(&self) -> usize {
        self.closed.len()
    }

    /// Whether a path was found or ruled out.
    #[inline(always)]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Expands the best open cell.
    ///
    /// Returns [`StepResult::Done`] once the goal is generated, and
    /// [`SearchError::NoPathFound`] when nothing is left to expand. Either
    /// ends the search, so stepping again fails with
    /// [`SearchError::AlreadyCompleted`].
    pub fn step(&mut self) -> SearchResult<StepResult> {
        if self.finished {
            return Err(SearchError::AlreadyCompleted);
        }

        let Some(node_index) = self.pop() else {
            debug!("A* exhausted the frontier after {} expansions", self.expansions());
            self.finished = true;
            return Err(SearchError::NoPathFound);
        };
        let cell = *self.search_tree[node_index].state();
        let g = self.search_tree[node_index].g();

        if cell == self.goal {
            return self.finish(node_index);
        }

        self.search_tree[node_index].close();
        self.closed.push(cell);
        trace!("Expanding {cell} (g={g}, f={})", self.search_tree[node_index].f());

        for (n, c) in self.grid.neighbours(&cell) {
            let neigh_g = g + c;
            if n == self.goal {
                let goal_index = self.push_new(n, Some(node_index), neigh_g, neigh_g);
                return self.finish(goal_index);
            }

            let neigh_f = neigh_g + H::h(&n, &self.goal);
            match self.node_map.get(&n) {
                Some(&neigh_index) => {
                    let neigh = &mut self.search_tree[neigh_index];
                    if neigh.is_closed() || neigh_f >= neigh.f() {
                        continue;
                    }
                    // Found a better path to an open cell.
                    neigh.reach(node_index, neigh_g, neigh_f);
                    self.open.push(neigh_index, neigh_f);
                }
                None => {
                    self.push_new(n, Some(node_index), neigh_g, neigh_f);
                }
            }
        }

        Ok(StepResult::Searching {
            open: self.open_snapshot(),
            closed: self.closed.clone(),
        })
    }

    /// Steps until the search finishes.
    pub fn run(&mut self) -> SearchResult<Path<GridCell, GridCost>> {
        loop {
            if let StepResult::Done { path } = self.step()? {
                return Ok(path);
            }
        }
    }

    /// Live frontier entries, best first.
    pub fn open_snapshot(&self) -> Vec<OpenCell> {
        self.open
            .ranked()
            .into_iter()
            .map(|(i, f)| (&self.search_tree[*i], f))
            .filter(|(node, f)| !node.is_closed() && node.f() == *f)
            .map(|(node, f)| OpenCell {
                cell: *node.state(),
                g: node.g(),
                f,
            })
            .collect()
    }

    pub fn write_stats<W: std::io::Write>(&self, mut out: W) -> std::io::Result<()> {
        use thousands::Separable;

        writeln!(out, "AStarSearch Stats:")?;
        writeln!(
            out,
            "  - |Nodes|:  {}",
            self.search_tree.len().separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Open|:   {} ({} live)",
            self.open.len().separate_with_commas(),
            self.open_snapshot().len().separate_with_commas()
        )?;
        writeln!(
            out,
            "  - |Closed|: {}",
            self.closed.len().separate_with_commas()
        )?;
        Ok(())
    }

    fn finish(&mut self, goal_index: SearchTreeIndex) -> SearchResult<StepResult> {
        self.finished = true;
        let path = self.search_tree.path(self.grid, goal_index)?;
        debug!(
            "A* reached {} after {} expansions: {path}",
            self.goal,
            self.expansions()
        );
        Ok(StepResult::Done { path })
    }

    /// Pops the best entry whose cell is still open.
    #[must_use]
    fn pop(&mut self) -> Option<SearchTreeIndex> {
        while let Some((node_index, _f)) = self.open.pop() {
            if !self.search_tree[node_index].is_closed() {
                return Some(node_index);
            }
        }
        None
    }

    fn push_new(
        &mut self,
        cell: GridCell,
        parent: Option<SearchTreeIndex>,
        g: GridCost,
        f: GridCost,
    ) -> SearchTreeIndex {
        debug_assert!(!self.node_map.contains_key(&cell));
        let node_index = self
            .search_tree
            .push(SearchTreeNode::new(cell, parent, g, f));
        self.node_map.insert(cell, node_index);
        self.open.push(node_index, f);
        node_index
    }
}

impl<H> Iterator for AStarSearch<'_, H>
where
    H: GridHeuristic,
{
    type Item = SearchResult<StepResult>;

    /// Yields every step, stopping after the one that finishes the search.
    fn next(&mut self) -> Option<Self::Item> {
        (!self.finished).then(|| self.step())
    }
}

impl<H> Debug for AStarSearch<'_, H>
where
    H: GridHeuristic,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AStarSearch")
            .field("grid", &self.grid)
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("search_tree", &self.search_tree)
            .field("open", &self.open.len())
            .field("closed", &self.closed.len())
            .field("finished", &self.finished)
            .finish()
    }
}
