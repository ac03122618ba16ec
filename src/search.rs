use derive_more::Display;

use crate::cost::Cost;
use crate::error::SearchError;
use crate::error::SearchResult;
use crate::space::Path;
use crate::space::Space;
use crate::space::State;

/// A reference to a `SearchTreeNode<St, C>`.
///
/// Parents are referenced by index rather than by pointer. The tree is only
/// ever walked backwards, from a node to the root.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[display("#{index}")]
pub struct SearchTreeIndex {
    index: usize,
}

impl SearchTreeIndex {
    #[inline(always)]
    fn new(index: usize) -> Self {
        Self { index }
    }
}

/// A search record for a single State.
#[derive(Debug, Clone)]
pub struct SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub(crate) parent: Option<SearchTreeIndex>,
    pub(crate) state: St,
    /// Best known cost from the root.
    pub(crate) g: C,
    /// Rank used by the frontier. `g` plus whatever estimate the search adds.
    pub(crate) f: C,
    pub(crate) closed: bool,
}

impl<St, C> SearchTreeNode<St, C>
where
    St: State,
    C: Cost,
{
    pub fn new(s: St, parent: Option<SearchTreeIndex>, g: C, f: C) -> Self {
        Self {
            parent,
            state: s,
            g,
            f,
            closed: false,
        }
    }

    /// Gives this Node a better path through a new parent.
    pub fn reach(&mut self, new_parent: SearchTreeIndex, g: C, f: C) {
        debug_assert!(f < self.f);
        debug_assert!(!self.closed, "Closed nodes are final");
        self.parent = Some(new_parent);
        self.g = g;
        self.f = f;
    }

    pub fn close(&mut self) {
        debug_assert!(!self.closed);
        self.closed = true;
    }

    #[inline(always)]
    pub fn state(&self) -> &St {
        &self.state
    }
    #[inline(always)]
    pub fn parent(&self) -> Option<SearchTreeIndex> {
        self.parent
    }
    #[inline(always)]
    pub fn g(&self) -> C {
        self.g
    }
    #[inline(always)]
    pub fn f(&self) -> C {
        self.f
    }
    #[inline(always)]
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

/// All the Search Nodes of a search run.
///
/// Naturally forms a Search Forest as each node may have a parent Node. It
/// only grows, so indices stay valid for the whole run.
pub struct SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    nodes: Vec<SearchTreeNode<St, C>>,
}

impl<St, C> SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    #[must_use]
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    #[inline(always)]
    pub fn push(&mut self, node: SearchTreeNode<St, C>) -> SearchTreeIndex {
        let index = SearchTreeIndex::new(self.nodes.len());
        debug_assert!(
            node.parent.is_none_or(|p| p < index),
            "Parents must exist before their children"
        );
        self.nodes.push(node);
        index
    }

    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Rebuilds the path from the root to `node_index`.
    ///
    /// Walks the parent links back to the root, then reverses the walk. The
    /// cost is recomputed by looking up each step in the space, so it is
    /// exactly the sum of the step costs along the returned path.
    pub fn path<Sp>(&self, space: &Sp, mut node_index: SearchTreeIndex) -> SearchResult<Path<St, C>>
    where
        Sp: Space<St, C>,
    {
        let mut path = Path::<St, C>::new_from_start(*self[node_index].state());

        while let Some(parent_index) = self[node_index].parent {
            debug_assert!(node_index != parent_index);
            let s = self[node_index].state();
            let p = self[parent_index].state();
            let c: C = space.cost(p, s).ok_or_else(|| SearchError::MissingEdge {
                from: format!("{p:?}"),
                to: format!("{s:?}"),
            })?;

            path.append(*p, c);
            node_index = parent_index;
        }

        path.reverse();
        Ok(path)
    }
}

impl<St, C> Default for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn default() -> Self {
        Self::new()
    }
}

impl<St, C> std::ops::Index<SearchTreeIndex> for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    type Output = SearchTreeNode<St, C>;

    #[inline(always)]
    fn index(&self, index: SearchTreeIndex) -> &Self::Output {
        &self.nodes[index.index]
    }
}

impl<St, C> std::ops::IndexMut<SearchTreeIndex> for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    #[inline(always)]
    fn index_mut(&mut self, index: SearchTreeIndex) -> &mut SearchTreeNode<St, C> {
        &mut self.nodes[index.index]
    }
}

impl<St, C> std::fmt::Debug for SearchTree<St, C>
where
    St: State,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "SearchTree{{({} nodes)}}", self.len())
    }
}
