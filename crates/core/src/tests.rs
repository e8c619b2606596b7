//! End-to-end scenarios exercising the full chooser → graph → solver →
//! codegen pipeline through [`crate::driver::generate`], the way
//! `crates/cli` drives it from stdin.

use crate::driver::generate;
use crate::key::{read_keys, Mode};
use crate::params::{Perfect, Speed};

fn assert_generated_is_self_consistent(header: &str, source: &str, nkeys: u32) {
    assert!(header.contains(&format!("PHASHNKEYS {nkeys}")));
    assert!(source.contains("phash"));
    assert!(source.ends_with("}\n"));
}

#[test]
fn three_short_string_keys() {
    let keys = read_keys(b"cat\ndog\nbat\n" as &[u8], Mode::Normal).unwrap();
    let generated = generate(keys, Mode::Normal, Perfect::Minimal, Speed::Slow).unwrap();
    assert_generated_is_self_consistent(&generated.header, &generated.source, 3);
}

#[test]
fn two_hundred_fifty_six_decimal_integers() {
    let text: String = (0..256).map(|i| format!("{i}\n")).collect();
    let keys = read_keys(text.as_bytes(), Mode::Decimal).unwrap();
    let generated = generate(keys, Mode::Decimal, Perfect::Minimal, Speed::Fast).unwrap();
    assert_generated_is_self_consistent(&generated.header, &generated.source, 256);
}

#[test]
fn duplicate_string_key_is_fatal() {
    // Two lines with identical text hash identically under every salt
    // (mixing the same bytes with the same salt always gives the same
    // triple), so this can never be resolved by retrying — it's a
    // duplicate-key error, not an incidental (a, b) collision between
    // two different keys.
    use crate::error::PhashError;
    let keys = read_keys(b"cat\ncat\ndog\n" as &[u8], Mode::Normal).unwrap();
    let err = generate(keys, Mode::Normal, Perfect::Minimal, Speed::Slow).unwrap_err();
    assert!(matches!(err, PhashError::DuplicateKey(_)));
}

#[test]
fn empty_input_produces_a_degenerate_but_valid_pair_of_files() {
    let keys = read_keys(b"" as &[u8], Mode::Normal).unwrap();
    let generated = generate(keys, Mode::Normal, Perfect::Minimal, Speed::Fast).unwrap();
    assert_generated_is_self_consistent(&generated.header, &generated.source, 0);
}

#[test]
fn ab_mode_duplicate_pair_is_rejected() {
    use crate::error::PhashError;
    let keys = read_keys(b"1 1\n1 1\n" as &[u8], Mode::Ab).unwrap();
    let err = generate(keys, Mode::Ab, Perfect::Minimal, Speed::Fast).unwrap_err();
    assert!(matches!(err, PhashError::DuplicateKey(_)));
}

#[test]
fn non_minimal_perfect_hash_widens_the_range_to_a_power_of_two() {
    let keys = read_keys(b"cat\ndog\nbat\nrat\nhat\n" as &[u8], Mode::Normal).unwrap();
    let nkeys = keys.len() as u32;
    let generated = generate(keys, Mode::Normal, Perfect::NonMinimal, Speed::Slow).unwrap();
    assert!(generated.header.contains("PHASHRANGE 8"));
    assert_eq!(generated.nkeys, nkeys);
}

#[test]
fn hex_mode_parses_and_hashes_u32_keys() {
    let keys = read_keys(b"1\nff\n100\ndeadbeef\n" as &[u8], Mode::Hex).unwrap();
    let generated = generate(keys, Mode::Hex, Perfect::Minimal, Speed::Slow).unwrap();
    assert_generated_is_self_consistent(&generated.header, &generated.source, 4);
}
