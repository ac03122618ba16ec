// Heap intrinsic operations implemented externally.
//
// A d-ary heap is a tree-like structure where every subtree's root has a
// better rank than all the other nodes in the subtree, stored in an array
// that's traversed in a non-linear way. With `A = 4`,
//
// ```text
//                              0
//         1            2               3               4
//    5 6 7 8     9 10 11 12     13 14 15 16     17 18 19 20
// ```
//
// The last level will often be incomplete.

/// The parent node
///
/// ```
/// use pathsearch::heap_primitives::index_parent;
/// assert_eq!(index_parent::<2>(1), 0);
/// assert_eq!(index_parent::<2>(2), 0);
/// assert_eq!(index_parent::<2>(6), 2);
/// assert_eq!(index_parent::<4>(4), 0);
/// assert_eq!(index_parent::<4>(5), 1);
/// assert_eq!(index_parent::<4>(20), 4);
/// ```
#[inline(always)]
#[must_use]
pub fn index_parent<const A: usize>(i: usize) -> usize {
    debug_assert!(i != 0, "The root has no parent");
    (i - 1) / A
}

/// The first (left-most) child
///
/// ```
/// use pathsearch::heap_primitives::index_first_child;
/// assert_eq!(index_first_child::<2>(0), 1);
/// assert_eq!(index_first_child::<2>(3), 7);
/// assert_eq!(index_first_child::<4>(0), 1);
/// assert_eq!(index_first_child::<4>(2), 9);
/// ```
#[inline(always)]
#[must_use]
pub fn index_first_child<const A: usize>(i: usize) -> usize {
    (A * i) + 1
}

/// The last (right-most) child
///
/// ```
/// use pathsearch::heap_primitives::index_last_child;
/// assert_eq!(index_last_child::<2>(0), 2);
/// assert_eq!(index_last_child::<2>(6), 14);
/// assert_eq!(index_last_child::<4>(0), 4);
/// assert_eq!(index_last_child::<4>(4), 20);
/// ```
#[inline(always)]
#[must_use]
pub fn index_last_child<const A: usize>(i: usize) -> usize {
    A * (i + 1)
}

/// Index of the smallest element. Ties go to the left-most one.
///
/// ```
/// use pathsearch::heap_primitives::min_index;
/// assert_eq!(min_index(&[3, 1, 2, 1]), 1);
/// assert_eq!(min_index(&[0]), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn min_index<T: PartialOrd>(xs: &[T]) -> usize {
    debug_assert!(!xs.is_empty());

    let mut min_i = 0;
    for (i, x) in xs.iter().enumerate().skip(1) {
        if *x < xs[min_i] {
            min_i = i;
        }
    }
    min_i
}
