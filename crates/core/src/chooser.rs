//! Initial-hash chooser: pick `alen`/`blen`/`smax` and a salt such that
//! the mixer, restricted to those bit-slices, produces no `(a, b)`
//! collisions across the key set.

use crate::error::PhashError;
use crate::key::{HashKind, Key, KeyData, Mode};
use crate::mixer;
use crate::params::{self, Perfect, Sizing, RETRY_HEX, RETRY_STRING};

/// The result of a successful chooser run: sizing, the accepted salt,
/// and the keys with `hash_a`/`hash_b`/`hash_c` filled in.
#[derive(Debug, Clone)]
pub struct ChosenHash {
    pub sizing: Sizing,
    pub salt: u32,
    pub keys: Vec<Key>,
}

/// Run the chooser to completion: size the problem, then search salts
/// until one yields a collision-free `(a, b)` projection or the retry
/// budget is exhausted.
pub fn choose(keys: Vec<Key>, mode: Mode, perfect: Perfect) -> Result<ChosenHash, PhashError> {
    choose_from(keys, mode, perfect, 0)
}

/// Like [`choose`], but start the salt search at `start_salt` — used by
/// the driver to resume past salts a failed solver attempt already
/// tried, rather than restarting from zero.
pub fn choose_from(
    mut keys: Vec<Key>,
    mode: Mode,
    perfect: Perfect,
    start_salt: u32,
) -> Result<ChosenHash, PhashError> {
    let nkeys = keys.len() as u32;
    let sizing = params::size_for(nkeys, perfect);

    let retries = match mode.hash_kind() {
        HashKind::Int => RETRY_HEX,
        HashKind::Str | HashKind::InlineStr => RETRY_STRING,
        HashKind::Ab => 1,
    };

    for attempt in 0..retries {
        let salt = start_salt.wrapping_add(attempt);
        project(&mut keys, mode, sizing, salt);

        match find_collision(&keys) {
            None => {
                return Ok(ChosenHash {
                    sizing,
                    salt,
                    keys,
                });
            }
            Some((i, j)) => {
                // A collision on (hash_a, hash_b) between two keys with
                // identical raw data can never be resolved by trying
                // another salt — mixing the same bytes under the same
                // salt always produces the same triple. Report it
                // immediately instead of burning the whole retry budget
                // to rediscover the same fact. AB/ABDEC pairs are
                // dictated by the input either way, so any collision
                // there is fatal regardless of whether the data matches.
                if mode.ab_is_fixed() || keys[i].data == keys[j].data {
                    return Err(PhashError::DuplicateKey(format!(
                        "{} / {}",
                        keys[i].display(),
                        keys[j].display()
                    )));
                }
                // otherwise: try the next salt
            }
        }
    }

    Err(PhashError::ChooserExhausted {
        attempts: retries,
        blen: sizing.blen,
    })
}

/// Mix every key under `salt` and slice the result onto
/// `hash_a ∈ [0, alen)`, `hash_b ∈ [0, blen)`, `hash_c` (untruncated).
///
/// `salt` is the attempt counter (0, 1, 2, ...); the mixer is actually
/// seeded with `salt * GOLDEN_RATIO` (see [`crate::codegen`]'s
/// `PHASHSALT`) so small, easily-confused attempt numbers still spread
/// out into well-distributed seeds.
fn project(keys: &mut [Key], mode: Mode, sizing: Sizing, salt: u32) {
    let a_mask = sizing.alen - 1;
    let b_mask = sizing.blen - 1;
    let seed = salt.wrapping_mul(mixer::GOLDEN_RATIO);

    for key in keys.iter_mut() {
        match (&key.data, mode.hash_kind()) {
            (KeyData::Pair(a, b), HashKind::Ab) => {
                key.hash_a = a & a_mask;
                key.hash_b = b & b_mask;
                key.hash_c = 0;
            }
            (KeyData::Bytes(bytes), HashKind::Str) => {
                let (a, b, c) = mixer::mix_bytes(bytes, seed);
                key.hash_a = a & a_mask;
                key.hash_b = b & b_mask;
                key.hash_c = c;
            }
            (KeyData::Bytes(bytes), HashKind::InlineStr) => {
                let val = mixer::rolling_hash(bytes, seed);
                key.hash_a = val & a_mask;
                key.hash_b = val & b_mask;
                key.hash_c = val;
            }
            (KeyData::Int(v), HashKind::Int) => {
                let (a, b, c) = mixer::mix_word(*v, seed);
                key.hash_a = a & a_mask;
                key.hash_b = b & b_mask;
                key.hash_c = c;
            }
            _ => unreachable!("Key/Mode pairing is established at read time"),
        }
    }
}

/// Find the first pair of distinct keys sharing `(hash_a, hash_b)`, if
/// any. O(n log n) via a sort rather than the original's O(n^2) scan.
fn find_collision(keys: &[Key]) -> Option<(usize, usize)> {
    let mut order: Vec<usize> = (0..keys.len()).collect();
    order.sort_by_key(|&i| (keys[i].hash_a, keys[i].hash_b));

    for w in order.windows(2) {
        let (i, j) = (w[0], w[1]);
        if keys[i].hash_a == keys[j].hash_a && keys[i].hash_b == keys[j].hash_b {
            return Some((i, j));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::read_keys;

    #[test]
    fn accepts_distinct_string_keys() {
        let keys = read_keys(b"cat\ndog\nbat\n" as &[u8], Mode::Normal).unwrap();
        let chosen = choose(keys, Mode::Normal, Perfect::Minimal).unwrap();
        assert_eq!(chosen.keys.len(), 3);
        let mut seen = std::collections::HashSet::new();
        for k in &chosen.keys {
            assert!(seen.insert((k.hash_a, k.hash_b)));
        }
    }

    #[test]
    fn empty_input_chooses_trivially() {
        let keys = read_keys(b"" as &[u8], Mode::Normal).unwrap();
        let chosen = choose(keys, Mode::Normal, Perfect::Minimal).unwrap();
        assert!(chosen.keys.is_empty());
    }

    #[test]
    fn ab_mode_duplicate_pair_is_fatal() {
        let keys = read_keys(b"1 1\n1 1\n" as &[u8], Mode::Ab).unwrap();
        let err = choose(keys, Mode::Ab, Perfect::Minimal).unwrap_err();
        assert!(matches!(err, PhashError::DuplicateKey(_)));
    }

    #[test]
    fn ab_mode_distinct_pairs_pass_through_unmixed() {
        let keys = read_keys(b"0 0\n1 1\n2 2\n3 3\n" as &[u8], Mode::Ab).unwrap();
        let chosen = choose(keys, Mode::Ab, Perfect::Minimal).unwrap();
        for (k, expected) in chosen.keys.iter().zip(0u32..) {
            assert_eq!(k.hash_a, expected & (chosen.sizing.alen - 1));
        }
    }
}
