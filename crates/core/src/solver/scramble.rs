//! The `scramble[]` table: a fixed permutation-like lookup used to turn
//! the bucket solver's small, bucket-local `val_b` choice into a
//! well-distributed offset somewhere in `[0, smax)`.

use crate::mixer;

/// Seed fed to the mixer to derive `scramble[]`. Arbitrary but fixed —
/// every run of this generator must produce the same table, since it
/// gets baked into emitted C source that downstream builds compile
/// once and keep around.
const SCRAMBLE_SEED: u32 = 0x1a2b_3c4d;

/// Build the 256-entry scramble table, masked to `[0, smax)`: `tab[]`
/// stores a raw `val_b` in `0..256` (always byte-sized, independent of
/// `smax`), and `scramble[val_b]` maps it into the hash's actual
/// output range. Masking at build time means the emitted table's
/// element width can be chosen from `smax` alone, with no extra `% smax`
/// needed in the generated C.
pub fn build(smax: u32) -> [u32; 256] {
    let mask = smax.saturating_sub(1);
    let mut table = [0u32; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        let (a, _, _) = mixer::mix_word(i as u32, SCRAMBLE_SEED);
        *slot = if smax == 0 { 0 } else { a & mask };
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_deterministic() {
        assert_eq!(build(256), build(256));
    }

    #[test]
    fn entries_fit_within_smax() {
        let table = build(64);
        assert!(table.iter().all(|&v| v < 64));
    }

    #[test]
    fn entries_are_not_trivially_identity() {
        let table = build(1 << 20);
        assert_ne!(table[1], 1);
    }
}
