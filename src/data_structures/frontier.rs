use std::collections::VecDeque;
use std::fmt::Debug;

use derive_more::Display;
use thiserror::Error;

use crate::data_structures::priority_queue::PriorityQueue;

/// Taking from an empty frontier.
///
/// Searches check for emptiness before taking, so this signals a defect.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Dequeue from an empty {0} queue")]
pub struct EmptyQueueError(pub Discipline);

/// The rule governing dequeue order.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash)]
pub enum Discipline {
    /// First in, first out. Breadth-first exploration.
    #[display("FIFO")]
    Fifo,
    /// Last in, first out. Depth-first exploration.
    #[display("LIFO")]
    Lifo,
    /// Smallest key first, earliest insertion on ties. Uniform-cost exploration.
    #[display("PRIO")]
    Priority,
}

impl Discipline {
    pub const ALL: [Discipline; 3] = [Discipline::Fifo, Discipline::Lifo, Discipline::Priority];

    /// Conventional name of the search this discipline drives.
    pub fn search_name(&self) -> &'static str {
        match self {
            Discipline::Fifo => "BFS",
            Discipline::Lifo => "DFS",
            Discipline::Priority => "UCS",
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown discipline '{0}'. Use fifo/bfs, lifo/dfs or priority/ucs")]
pub struct ParseDisciplineError(String);

impl std::str::FromStr for Discipline {
    type Err = ParseDisciplineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fifo" | "bfs" => Ok(Discipline::Fifo),
            "lifo" | "dfs" => Ok(Discipline::Lifo),
            "prio" | "priority" | "ucs" => Ok(Discipline::Priority),
            _ => Err(ParseDisciplineError(s.to_string())),
        }
    }
}

/// A discipline-parameterised queue.
///
/// Keys are only used by [`Discipline::Priority`]; the structural disciplines
/// accept and ignore them so that callers can treat every frontier alike.
#[derive(Debug, Clone)]
pub enum Frontier<T, K>
where
    T: Debug,
    K: Ord + Copy + Debug,
{
    Fifo(VecDeque<T>),
    Lifo(Vec<T>),
    Priority(PriorityQueue<T, K>),
}

impl<T, K> Frontier<T, K>
where
    T: Debug,
    K: Ord + Copy + Debug,
{
    #[must_use]
    pub fn new(discipline: Discipline) -> Self {
        match discipline {
            Discipline::Fifo => Frontier::Fifo(VecDeque::new()),
            Discipline::Lifo => Frontier::Lifo(Vec::new()),
            Discipline::Priority => Frontier::Priority(PriorityQueue::new()),
        }
    }

    pub fn discipline(&self) -> Discipline {
        match self {
            Frontier::Fifo(_) => Discipline::Fifo,
            Frontier::Lifo(_) => Discipline::Lifo,
            Frontier::Priority(_) => Discipline::Priority,
        }
    }

    #[inline(always)]
    pub fn enqueue(&mut self, item: T, key: K) {
        match self {
            Frontier::Fifo(q) => q.push_back(item),
            Frontier::Lifo(q) => q.push(item),
            Frontier::Priority(q) => q.push(item, key),
        }
    }

    #[inline(always)]
    pub fn dequeue(&mut self) -> Result<T, EmptyQueueError> {
        let item = match self {
            Frontier::Fifo(q) => q.pop_front(),
            Frontier::Lifo(q) => q.pop(),
            Frontier::Priority(q) => q.pop().map(|(item, _key)| item),
        };
        item.ok_or(EmptyQueueError(self.discipline()))
    }

    /// The item `dequeue` would return next.
    pub fn peek(&self) -> Result<&T, EmptyQueueError> {
        let item = match self {
            Frontier::Fifo(q) => q.front(),
            Frontier::Lifo(q) => q.last(),
            Frontier::Priority(q) => q.peek().map(|(item, _key)| item),
        };
        item.ok_or(EmptyQueueError(self.discipline()))
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        match self {
            Frontier::Fifo(q) => q.len(),
            Frontier::Lifo(q) => q.len(),
            Frontier::Priority(q) => q.len(),
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
