//! Fast bucket-mapping strategy: walk buckets in descending size order,
//! greedily assign each the smallest `val_b` that clashes with nothing
//! placed so far. No backtracking — a bucket that can't be placed fails
//! the whole attempt immediately, leaving it to the driver to retry
//! with a new salt.

use crate::graph::HashGraph;
use crate::key::Key;

use super::{bucket_fits, Solution};

/// Try to solve the graph without backtracking. Returns `None` if some
/// bucket has no candidate `val_b` in `0..256` that avoids every slot
/// already taken.
pub fn solve(graph: &HashGraph, keys: &[Key], scramble_table: &[u32; 256], smax: u32) -> Option<Solution> {
    let mut val_b = vec![0u32; graph.buckets.len()];
    let mut occupied = vec![false; smax.max(1) as usize];

    for &b in &graph.buckets_by_descending_size() {
        let bucket = &graph.buckets[b];
        if bucket.keys.is_empty() {
            continue;
        }

        let placed = (0u32..256).find_map(|candidate| {
            bucket_fits(&bucket.keys, keys, candidate, scramble_table, smax, &occupied)
                .map(|slots| (candidate, slots))
        });

        match placed {
            Some((candidate, slots)) => {
                for slot in slots {
                    occupied[slot as usize] = true;
                }
                val_b[b] = candidate;
            }
            None => return None,
        }
    }

    Some(Solution { val_b })
}
