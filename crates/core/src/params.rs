//! Tuned constants and sizing rules for the perfect hash generator.
//!
//! These are not user-facing configuration — the generator's only
//! configuration surface is the CLI mode/perfect/speed flags — so they
//! live here as plain constants and a sizing function rather than
//! behind a config struct.

/// Threshold above which `scramble[]` is emitted as its own lookup
/// table (`ub2`/`ub4`) instead of being folded directly into `tab[]`.
pub const USE_SCRAMBLE: u32 = 4096;

/// Retry budget for salts when hashing 32-bit integer keys (HEX/DECIMAL
/// modes) — these have a much smaller key space to search for a
/// collision-free `(a, b)` projection than strings do, so fewer retries
/// are needed before the search is declared hopeless.
pub const RETRY_HEX: u32 = 2;

/// Retry budget for salts when hashing byte-string keys (NORMAL/INLINE
/// modes).
pub const RETRY_STRING: u32 = 20;

/// Bound on augmenting-path recursion depth in the slow solver before a
/// bucket placement is abandoned.
pub const MAX_AUGMENT_DEPTH: u32 = 5000;

/// Bound on how many times the driver restarts the chooser after a
/// solver failure before giving up entirely.
pub const MAX_SOLVER_RETRIES: u32 = 6;

/// Whether the generated range is the tightly-packed minimal range
/// `[0, nkeys)` or the next power of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Perfect {
    Minimal,
    NonMinimal,
}

/// Which bucket-solving strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speed {
    Fast,
    Slow,
}

/// The three derived sizing parameters for a given key count and mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sizing {
    /// `a` ranges over `[0, alen)`, a power of two.
    pub alen: u32,
    /// `b` ranges over `[0, blen)`, a power of two.
    pub blen: u32,
    /// The hash's output range, `[0, smax)`.
    pub smax: u32,
}

/// Smallest power of two `>= n` (`n = 0` maps to `1`, matching the
/// degenerate empty-input case).
pub fn next_pow2(n: u32) -> u32 {
    if n <= 1 {
        1
    } else {
        1u32 << (32 - (n - 1).leading_zeros())
    }
}

/// Derive `alen`/`blen`/`smax` from the key count and minimality mode.
///
/// `smax` is `nkeys` exactly for minimal hashes — the image must be
/// precisely `[0, nkeys)`, which is generally not a power of two, so
/// the solver packs into that tight range using the slow augmenting
/// search and the emitted code falls back to `%` instead of a bitmask
/// (see `codegen::render_function`) — or equal to `alen` (a power of
/// two) for non-minimal ones, which can use a cheap bitmask. `blen`
/// follows a hand-tuned table: roughly `nkeys / 4` for small key sets,
/// scaling toward `nkeys` as the set grows, so that buckets stay small
/// enough for the fast solver's forest assumption to hold in practice
/// while keeping `tab[]` compact.
pub fn size_for(nkeys: u32, perfect: Perfect) -> Sizing {
    let alen = next_pow2(nkeys.max(1));

    let blen = if nkeys == 0 {
        1
    } else {
        blen_for(nkeys)
    };

    match perfect {
        Perfect::Minimal => Sizing {
            alen,
            blen,
            smax: nkeys.max(1),
        },
        Perfect::NonMinimal => Sizing {
            alen,
            blen,
            smax: alen,
        },
    }
}

/// Hand-tuned `blen` table: small key sets get a quarter as many
/// buckets as keys (plenty of room for the fast solver's forest to
/// stay acyclic), larger sets taper toward a ratio of 1:1 so `tab[]`
/// doesn't grow needlessly large relative to the key count. All
/// results are rounded up to a power of two, since `b` is bit-sliced
/// out of the mixer's output.
fn blen_for(nkeys: u32) -> u32 {
    let ratio_num: u32 = if nkeys <= 8 {
        1
    } else if nkeys <= 4096 {
        1
    } else if nkeys <= 65536 {
        1
    } else {
        3
    };
    let ratio_den: u32 = if nkeys <= 8 {
        1
    } else if nkeys <= 4096 {
        4
    } else if nkeys <= 65536 {
        2
    } else {
        4
    };

    let raw = (nkeys.saturating_mul(ratio_num) / ratio_den).max(1);
    next_pow2(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_pow2_boundaries() {
        assert_eq!(next_pow2(0), 1);
        assert_eq!(next_pow2(1), 1);
        assert_eq!(next_pow2(2), 2);
        assert_eq!(next_pow2(3), 4);
        assert_eq!(next_pow2(1024), 1024);
        assert_eq!(next_pow2(1025), 2048);
    }

    #[test]
    fn minimal_smax_is_nkeys_exactly() {
        let s = size_for(3, Perfect::Minimal);
        assert_eq!(s.smax, 3);
        let s = size_for(256, Perfect::Minimal);
        assert_eq!(s.smax, 256);
        let s = size_for(1000, Perfect::Minimal);
        assert_eq!(s.smax, 1000);
    }

    #[test]
    fn non_minimal_smax_equals_alen() {
        let s = size_for(1000, Perfect::NonMinimal);
        assert_eq!(s.smax, s.alen);
        assert_eq!(s.smax, 1024);
    }

    #[test]
    fn blen_is_always_a_power_of_two() {
        for n in [0, 1, 2, 3, 7, 8, 9, 100, 1000, 100_000] {
            let s = size_for(n, Perfect::Minimal);
            assert_eq!(s.blen & (s.blen - 1), 0, "blen {} not a power of two for n={n}", s.blen);
        }
    }

    #[test]
    fn empty_input_sizing_is_degenerate() {
        let s = size_for(0, Perfect::Minimal);
        assert_eq!(s.smax, 1);
        assert_eq!(s.blen, 1);
    }
}
