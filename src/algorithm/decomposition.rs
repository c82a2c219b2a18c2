//! Sub-kernel enumeration for back-off
//!
//! A kernel is decomposed by repeatedly deactivating its outermost active
//! cells. Only cells on the highest active distance shell are removed at each
//! step, which keeps the family much smaller than the power set while still
//! reaching the fully inactive kernel. The resulting sequence is sorted by
//! descending predecessor count so callers can try the most specific context
//! first.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::trace;

use crate::algorithm::cache::SubKernelCache;
use crate::spatial::Kernel;

/// Ordered back-off family of `kernel`
///
/// The first element is `kernel` itself and the last is the fully inactive
/// kernel of the same side. Predecessor counts never increase along the
/// sequence. Ties keep the order in which the recursive union first met each
/// kernel, so the result is reproducible.
///
/// Every family computed on the way, including those of intermediate
/// kernels, is stored in `cache`.
pub fn sub_kernels(kernel: &Kernel, cache: &mut SubKernelCache) -> Arc<[Kernel]> {
    if let Some(family) = cache.lookup(kernel) {
        return family;
    }

    let family: Arc<[Kernel]> = decompose(kernel, cache).into();
    trace!(
        predecessors = kernel.predecessor_count(),
        family = family.len(),
        "sub-kernel family computed"
    );
    cache.insert(kernel.clone(), family)
}

fn decompose(kernel: &Kernel, cache: &mut SubKernelCache) -> Vec<Kernel> {
    if kernel.is_fully_inactive() {
        return vec![kernel.clone()];
    }

    let distance = kernel.highest_distance();

    // Union by value, first occurrence wins
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for (row, col) in Kernel::shell(distance) {
        if !kernel.is_active(row, col) {
            continue;
        }
        let reduced = kernel.without(row, col);
        for sub_kernel in sub_kernels(&reduced, cache).iter() {
            if !seen.contains(sub_kernel) {
                seen.insert(sub_kernel.clone());
                candidates.push(sub_kernel.clone());
            }
        }
    }

    let mut family = Vec::with_capacity(candidates.len() + 1);
    family.push(kernel.clone());
    family.extend(candidates);

    // Stable sort keeps the union order among equal counts
    family.sort_by_key(|sub_kernel| std::cmp::Reverse(sub_kernel.predecessor_count()));
    family
}
