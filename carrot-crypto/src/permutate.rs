//! In-place reordering of output slices without heap allocation.

// Resolved slots are tagged in the top bit of their order entry while cycles are followed, so
// `order` needs no companion bitmap. Every index is below `isize::MAX`, so the bit is free.
const RESOLVED_BIT: usize = !(usize::MAX >> 1);

/// Rearranges `data` so that `data'[k] = data[order[k]]`, leaving `order` unchanged.
///
/// # Panics
///
/// If the lengths differ, or in debug builds if `order` is not a permutation of `0..data.len()`.
pub(crate) fn gather_in_place<T>(order: &mut [usize], data: &mut [T]) {
    assert_eq!(order.len(), data.len());
    debug_assert!(order.iter().all(|idx| *idx < data.len()));

    for start in 0..data.len() {
        if order[start] & RESOLVED_BIT != 0 {
            continue;
        }

        // walk the cycle through `start`, pulling each slot's source into it
        let mut dst = start;
        let mut src = order[start];
        while src != start {
            data.swap(dst, src);
            order[dst] |= RESOLVED_BIT;
            dst = src;
            src = order[dst];
        }
        order[dst] |= RESOLVED_BIT;
    }

    for idx in order.iter_mut() {
        debug_assert!(*idx & RESOLVED_BIT != 0);
        *idx &= !RESOLVED_BIT;
    }
}

/// Fills `order` with the indices of `items` sorted by `key`
pub(crate) fn sorting_order<T, K: Ord + ?Sized>(
    items: &[T],
    order: &mut [usize],
    key: impl Fn(&T) -> &K,
) {
    assert_eq!(order.len(), items.len());
    order.iter_mut().enumerate().for_each(|(i, idx)| *idx = i);
    order.sort_unstable_by(|a, b| key(&items[*a]).cmp(key(&items[*b])));
}
