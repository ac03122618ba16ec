use std::cmp::min;
use std::fmt::Debug;

use crate::heap_primitives::min_index;

const HEAP_ARITY: usize = 4usize;
#[inline(always)]
#[must_use]
fn up(i: usize) -> usize {
    crate::heap_primitives::index_parent::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_left(i: usize) -> usize {
    crate::heap_primitives::index_first_child::<HEAP_ARITY>(i)
}
#[inline(always)]
#[must_use]
fn down_right(i: usize) -> usize {
    crate::heap_primitives::index_last_child::<HEAP_ARITY>(i)
}

/// The ranking tuple of a queued item.
///
/// We prefer smaller keys, and tie-break for earlier insertions, which keeps
/// searches deterministic across runs.
///
/// ```
/// use pathsearch::data_structures::priority_queue::Rank;
///
/// assert!(Rank::new(1u32, 7) < Rank::new(2u32, 0));
/// assert!(Rank::new(1u32, 0) < Rank::new(1u32, 1));
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Rank<K: Ord> {
    key: K,
    seq: u64,
}

impl<K: Ord + Copy> Rank<K> {
    pub fn new(key: K, seq: u64) -> Self {
        Self { key, seq }
    }
}

/// A heap node carries just ranking information and the queued item.
#[derive(Debug, Clone)]
struct HeapNode<T, K: Ord> {
    rank: Rank<K>,
    item: T,
}

impl<T, K: Ord> PartialEq for HeapNode<T, K> {
    #[inline(always)]
    fn eq(&self, other: &Self) -> bool {
        self.rank.eq(&other.rank)
    }
}
impl<T, K: Ord> PartialOrd for HeapNode<T, K> {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.rank.cmp(&other.rank))
    }
}

/// A stable min-heap.
///
/// There's no decrease-key. Improving an item means pushing it again and
/// letting the caller discard the stale entry once it surfaces.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T, K: Ord> {
    heap: Vec<HeapNode<T, K>>,
    /// Insertion counter. Never reused, so ranks are unique.
    next_seq: u64,
}

impl<T, K> Default for PriorityQueue<T, K>
where
    T: Debug,
    K: Ord + Copy + Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, K> PriorityQueue<T, K>
where
    T: Debug,
    K: Ord + Copy + Debug,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: vec![],
            next_seq: 0,
        }
    }
    #[must_use]
    pub fn with_capacity(s: usize) -> Self {
        Self {
            heap: Vec::with_capacity(s),
            next_seq: 0,
        }
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn push(&mut self, item: T, key: K) {
        let rank = Rank::new(key, self.next_seq);
        self.next_seq += 1;

        let heap_index = self.heap.len(); // Future heap_index
        self.heap.push(HeapNode { rank, item });
        self.sift_up(heap_index);

        self.verify_heap();
    }

    pub fn pop(&mut self) -> Option<(T, K)> {
        let last = self.heap.len().checked_sub(1)?;
        self.heap.swap(0, last);
        let node = self.heap.pop()?;
        if !self.heap.is_empty() {
            self.sift_down(0);
        }

        self.verify_heap();
        Some((node.item, node.rank.key))
    }

    pub fn peek(&self) -> Option<(&T, K)> {
        self.heap.first().map(|n| (&n.item, n.rank.key))
    }

    /// All queued entries from best to worst.
    pub fn ranked(&self) -> Vec<(&T, K)> {
        let mut nodes: Vec<&HeapNode<T, K>> = self.heap.iter().collect();
        nodes.sort_unstable_by(|l, r| l.rank.cmp(&r.rank));
        nodes.into_iter().map(|n| (&n.item, n.rank.key)).collect()
    }

    /// Raises a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_up(&mut self, mut pos: usize) -> usize {
        debug_assert!(pos < self.heap.len(), "Index out of bounds...");

        while pos > 0 {
            let parent = up(pos);
            if self.heap[parent].rank <= self.heap[pos].rank {
                break;
            }
            self.heap.swap(parent, pos);
            pos = parent;
        }
        pos
    }

    /// Lowers a node
    /// Returns it's new index
    #[inline(always)]
    fn sift_down(&mut self, mut pos: usize) -> usize {
        let len = self.heap.len();
        debug_assert!(pos < len, "Index out of bounds...");

        loop {
            // Find the best child
            let mut child = down_left(pos);
            if child >= len {
                break;
            }
            debug_assert_eq!(child + HEAP_ARITY, down_right(pos) + 1);
            child += min_index(&self.heap[child..min(child + HEAP_ARITY, len)]);

            if self.heap[pos].rank <= self.heap[child].rank {
                break;
            }
            self.heap.swap(pos, child);
            pos = child;
        }
        pos
    }

    #[inline(always)]
    #[cfg(not(feature = "verify"))]
    pub(crate) fn verify_heap(&self) {
        // All good... (hopefully)
    }

    #[inline(always)]
    #[cfg(feature = "verify")]
    pub(crate) fn verify_heap(&self) {
        // Every node goes after its parent node, if any.
        for i in 1..self.heap.len() {
            let p = up(i);
            assert!(
                self.heap[p].rank <= self.heap[i].rank,
                "Node[{p}]={:?} !<= child [{i}]={:?}. Out of heap of len={}",
                self.heap[p].rank,
                self.heap[i].rank,
                self.heap.len(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heap_works() {
        let mut heap = PriorityQueue::<&str, u32>::new();
        assert!(heap.is_empty());
        assert_eq!(heap.pop(), None);

        heap.push("aoeu", 3);
        assert_eq!(heap.peek(), Some((&"aoeu", 3)));
        assert_eq!(heap.pop(), Some(("aoeu", 3)));
        assert!(heap.is_empty());
    }

    #[test]
    fn heap_sorts() {
        let mut heap = PriorityQueue::<char, u32>::new();
        for (item, key) in [('c', 3), ('e', 5), ('f', 6), ('a', 1), ('d', 4), ('b', 2)] {
            heap.push(item, key);
        }
        assert_eq!(heap.len(), 6);

        let order: String = std::iter::from_fn(|| heap.pop().map(|(c, _)| c)).collect();
        assert_eq!(order, "abcdef");
    }

    #[test]
    fn ties_pop_in_insertion_order() {
        let mut heap = PriorityQueue::<u32, u32>::new();
        for i in 0..50 {
            heap.push(i, i % 3);
        }

        let mut last: Option<(u32, u32)> = None;
        while let Some((item, key)) = heap.pop() {
            if let Some((last_item, last_key)) = last {
                assert!(last_key < key || (last_key == key && last_item < item));
            }
            last = Some((item, key));
        }
    }

    #[test]
    fn ranked_snapshot() {
        let mut heap = PriorityQueue::<char, u32>::new();
        heap.push('x', 2);
        heap.push('y', 1);
        heap.push('z', 2);

        let ranked: Vec<(char, u32)> = heap.ranked().into_iter().map(|(c, k)| (*c, k)).collect();
        assert_eq!(ranked, vec![('y', 1), ('x', 2), ('z', 2)]);
        // Snapshots don't consume.
        assert_eq!(heap.len(), 3);
    }

    #[test]
    fn reinserted_items_keep_both_entries() {
        let mut heap = PriorityQueue::<char, u32>::new();
        heap.push('a', 5);
        heap.push('a', 2);
        assert_eq!(heap.pop(), Some(('a', 2)));
        assert_eq!(heap.pop(), Some(('a', 5)));
    }
}
