//! Hash graph builder: the conceptual bipartite graph connecting each
//! key's `a`-vertex to its `b`-vertex, represented implicitly through
//! per-bucket key lists rather than a materialized edge list — a key
//! *is* an edge.

/// One bucket per value of `b` (the original's `bstuff`). Holds the
/// indices into the key slice of every key that hashes to this `b`,
/// plus the solved offset once the mapping solver has run.
#[derive(Debug, Clone, Default)]
pub struct Bucket {
    pub b: u32,
    pub keys: Vec<u32>,
    pub val_b: u32,
}

/// The hash graph for one accepted `(alen, blen, salt)` choice.
#[derive(Debug, Clone)]
pub struct HashGraph {
    pub buckets: Vec<Bucket>,
    /// For each `a`-vertex, the distinct `b`-values reachable from it —
    /// used by the slow solver to find neighbors when augmenting.
    pub a_incidence: Vec<Vec<u32>>,
}

impl HashGraph {
    /// Build the graph from keys whose `hash_a`/`hash_b` have already
    /// been filled in by the chooser.
    pub fn build(keys: &[crate::key::Key], alen: u32, blen: u32) -> HashGraph {
        let mut buckets: Vec<Bucket> = (0..blen)
            .map(|b| Bucket {
                b,
                keys: Vec::new(),
                val_b: 0,
            })
            .collect();
        let mut a_incidence: Vec<Vec<u32>> = vec![Vec::new(); alen as usize];

        for (idx, key) in keys.iter().enumerate() {
            buckets[key.hash_b as usize].keys.push(idx as u32);
            let neighbors = &mut a_incidence[key.hash_a as usize];
            if !neighbors.contains(&key.hash_b) {
                neighbors.push(key.hash_b);
            }
        }

        HashGraph {
            buckets,
            a_incidence,
        }
    }

    /// Buckets ordered by descending key count, the order both solver
    /// strategies process buckets in: larger buckets are harder to
    /// place, so place them while the most output slots are still
    /// free.
    pub fn buckets_by_descending_size(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.buckets.len()).collect();
        order.sort_by(|&a, &b| {
            self.buckets[b]
                .keys
                .len()
                .cmp(&self.buckets[a].keys.len())
                .then(a.cmp(&b))
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{Key, KeyData};

    fn key(hash_a: u32, hash_b: u32, hash_c: u32) -> Key {
        Key {
            data: KeyData::Bytes(Vec::new()),
            hash_a,
            hash_b,
            hash_c,
        }
    }

    #[test]
    fn groups_keys_by_b() {
        let keys = vec![key(0, 1, 0), key(1, 1, 0), key(2, 0, 0)];
        let graph = HashGraph::build(&keys, 3, 2);
        assert_eq!(graph.buckets[0].keys, vec![2]);
        assert_eq!(graph.buckets[1].keys, vec![0, 1]);
    }

    #[test]
    fn descending_order_puts_largest_bucket_first() {
        let keys = vec![key(0, 0, 0), key(1, 0, 0), key(2, 1, 0)];
        let graph = HashGraph::build(&keys, 3, 2);
        let order = graph.buckets_by_descending_size();
        assert_eq!(order[0], 0);
    }

    #[test]
    fn a_incidence_records_distinct_neighbors() {
        let keys = vec![key(0, 0, 0), key(0, 1, 0), key(0, 0, 0)];
        let graph = HashGraph::build(&keys, 1, 2);
        assert_eq!(graph.a_incidence[0].len(), 2);
    }
}
