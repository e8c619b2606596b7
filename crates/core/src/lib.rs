//! # phash-core
//!
//! Generates a minimal (or non-minimal) perfect hash for a fixed set of
//! keys, Bob Jenkins's two-level construction: mix every key under a
//! trial salt until the resulting `(a, b)` pairs are collision-free,
//! then solve a bucket-to-offset mapping so that `a + scramble[val_b]`
//! lands every key on a distinct slot.
//!
//! This crate is the algorithm only — no file I/O, no argument
//! parsing, no stdin. The `perfect` binary is the CLI front end.
//!
//! ```rust
//! use phash_core::{driver, key, params};
//!
//! let keys = key::read_keys(b"cat\ndog\nbat\n" as &[u8], key::Mode::Normal).unwrap();
//! let generated = driver::generate(
//!     keys,
//!     key::Mode::Normal,
//!     params::Perfect::Minimal,
//!     params::Speed::Slow,
//! ).unwrap();
//! assert!(generated.header.contains("PHASHNKEYS"));
//! ```

pub mod chooser;
pub mod codegen;
pub mod driver;
pub mod error;
pub mod graph;
pub mod key;
pub mod mixer;
pub mod params;
pub mod solver;

pub use driver::{generate, Generated};
pub use error::PhashError;

#[cfg(test)]
mod tests;
