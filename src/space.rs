use std::fmt::Debug;
use std::hash::Hash;

use smallvec::SmallVec;

use crate::cost::Cost;

const MAX_ELEMENTS_DISPLAYED: usize = 20;

pub trait State: Copy + Clone + Debug + PartialEq + Eq + Hash {}

/// Reachable states from a given one, along with the cost of getting there.
///
/// Grids produce at most 8, graph vertices with a higher degree spill to the
/// heap.
pub type Neighbours<St, C> = SmallVec<[(St, C); 8]>;

/// A read-only search space.
///
/// Searches borrow the space, so it can be reused (but not concurrently
/// searched) after a search finishes.
pub trait Space<St, C>: std::fmt::Debug
where
    St: State,
    C: Cost,
{
    /// Verify is a State belongs to this space.
    fn contains(&self, s: &St) -> bool;

    /// Expands a State.
    ///
    /// The order is deterministic and defines tie-breaking in every search.
    fn neighbours(&self, s: &St) -> Neighbours<St, C>;

    /// Cost of the cheapest direct step between two states, if any.
    fn cost(&self, from: &St, to: &St) -> Option<C>;
}

/// A path through a space, from `start` to `end`.
///
/// The cost is always the sum of the step costs along `states`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Path<St, C>
where
    St: Clone + Debug,
    C: Cost,
{
    states: Vec<St>,
    cost: C,
}

impl<St, C> Path<St, C>
where
    St: Clone + Debug,
    C: Cost,
{
    #[inline(always)]
    pub fn new_from_start(start: St) -> Self {
        Self {
            states: vec![start],
            cost: C::zero(),
        }
    }

    /// Extends the path by one step.
    #[inline(always)]
    pub fn append(&mut self, s: St, c: C) {
        self.states.push(s);
        self.cost = self.cost.saturating_add(&c);
    }

    /// Reverses the Path.
    ///
    /// Useful when naturally reconstructing paths in reverse. The cost is
    /// unchanged as steps are undirected.
    pub fn reverse(&mut self) {
        self.states.reverse();
    }

    /// Number of steps taken.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len() - 1
    }

    /// Whether start and end are the same.
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn start(&self) -> &St {
        &self.states[0]
    }

    #[inline(always)]
    pub fn end(&self) -> &St {
        &self.states[self.states.len() - 1]
    }

    #[inline(always)]
    pub fn states(&self) -> &[St] {
        &self.states
    }

    #[inline(always)]
    pub fn cost(&self) -> C {
        self.cost
    }

    pub fn into_states(self) -> Vec<St> {
        self.states
    }

    /// Translates every state, keeping the cost.
    pub fn map<T, F>(self, f: F) -> Path<T, C>
    where
        T: Clone + Debug,
        F: FnMut(St) -> T,
    {
        Path {
            states: self.states.into_iter().map(f).collect(),
            cost: self.cost,
        }
    }
}

impl<St, C> std::fmt::Display for Path<St, C>
where
    St: Clone + Debug + std::fmt::Display,
    C: Cost,
{
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Path({}, ", self.cost)?;
        for (i, s) in self.states.iter().take(MAX_ELEMENTS_DISPLAYED).enumerate() {
            if i > 0 {
                write!(f, " → ")?;
            }
            write!(f, "{s}")?;
        }
        if self.states.len() > MAX_ELEMENTS_DISPLAYED {
            write!(f, " → …")?;
        }
        write!(f, ")")
    }
}
