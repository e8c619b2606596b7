//! Slow bucket-mapping strategy: like [`super::fast`], but when a
//! bucket's only candidates collide with already-placed buckets, try
//! evicting and re-placing those buckets elsewhere (an augmenting
//! path) before giving up. Trades time for a better chance of finding
//! a minimal mapping, and is the strategy that actually benefits from
//! minimality — the tight `[0, nkeys)` range leaves fewer free slots
//! for the fast strategy's one-shot placement to land in.

use crate::graph::HashGraph;
use crate::key::Key;
use crate::params::MAX_AUGMENT_DEPTH;

use super::Solution;

#[derive(Clone)]
struct State {
    occupied: Vec<Option<usize>>,
    val_b: Vec<Option<u32>>,
    slots_by_bucket: Vec<Option<Vec<u32>>>,
}

/// Try to solve the graph, backtracking over augmenting re-placements
/// up to [`MAX_AUGMENT_DEPTH`] deep. Returns `None` if no placement is
/// found within that budget.
pub fn solve(graph: &HashGraph, keys: &[Key], scramble_table: &[u32; 256], smax: u32) -> Option<Solution> {
    let nbuckets = graph.buckets.len();
    let mut state = State {
        occupied: vec![None; smax.max(1) as usize],
        val_b: vec![None; nbuckets],
        slots_by_bucket: vec![None; nbuckets],
    };

    for &b in &graph.buckets_by_descending_size() {
        if graph.buckets[b].keys.is_empty() {
            state.val_b[b] = Some(0);
            continue;
        }
        if !place(b, graph, keys, scramble_table, smax, &mut state, 0) {
            return None;
        }
    }

    Some(Solution {
        val_b: state.val_b.into_iter().map(|v| v.unwrap_or(0)).collect(),
    })
}

/// Slots a candidate `val_b` would occupy for `bucket`, or `None` if
/// two of the bucket's own keys would collide with each other.
fn candidate_slots(
    bucket_keys: &[u32],
    keys: &[Key],
    candidate: u32,
    scramble_table: &[u32; 256],
    smax: u32,
) -> Option<Vec<u32>> {
    let scrambled = scramble_table[(candidate & 0xff) as usize];
    let mut slots = Vec::with_capacity(bucket_keys.len());
    for &idx in bucket_keys {
        let slot = keys[idx as usize].hash_a.wrapping_add(scrambled) % smax.max(1);
        if slots.contains(&slot) {
            return None;
        }
        slots.push(slot);
    }
    Some(slots)
}

fn place(
    bucket_idx: usize,
    graph: &HashGraph,
    keys: &[Key],
    scramble_table: &[u32; 256],
    smax: u32,
    state: &mut State,
    depth: u32,
) -> bool {
    let bucket_keys = &graph.buckets[bucket_idx].keys;

    for candidate in 0u32..256 {
        let Some(slots) = candidate_slots(bucket_keys, keys, candidate, scramble_table, smax) else {
            continue;
        };

        let owners: Vec<usize> = slots
            .iter()
            .filter_map(|&s| state.occupied[s as usize])
            .collect::<std::collections::BTreeSet<_>>()
            .into_iter()
            .collect();

        if owners.is_empty() {
            commit(bucket_idx, candidate, &slots, state);
            return true;
        }

        if depth >= MAX_AUGMENT_DEPTH {
            continue;
        }

        let snapshot = state.clone();
        commit(bucket_idx, candidate, &slots, state);

        let mut ok = true;
        for owner in owners {
            evict(owner, state);
            if !place(owner, graph, keys, scramble_table, smax, state, depth + 1) {
                ok = false;
                break;
            }
        }

        if ok {
            return true;
        }
        *state = snapshot;
    }

    false
}

fn commit(bucket_idx: usize, candidate: u32, slots: &[u32], state: &mut State) {
    for &s in slots {
        state.occupied[s as usize] = Some(bucket_idx);
    }
    state.val_b[bucket_idx] = Some(candidate);
    state.slots_by_bucket[bucket_idx] = Some(slots.to_vec());
}

/// Clear `bucket_idx`'s claim on its recorded slots — but only the
/// ones it still actually owns. `commit(bucket_idx, ...)` above may
/// already have overwritten some of `bucket_idx`'s former slots with
/// its own ownership mark before this eviction runs (the very
/// collision that triggered the augmenting path), so blindly clearing
/// every recorded slot would erase that fresher claim too, leaving a
/// slot two buckets both believe they occupy.
fn evict(bucket_idx: usize, state: &mut State) {
    if let Some(slots) = state.slots_by_bucket[bucket_idx].take() {
        for s in slots {
            if state.occupied[s as usize] == Some(bucket_idx) {
                state.occupied[s as usize] = None;
            }
        }
    }
    state.val_b[bucket_idx] = None;
}
