//! Error kinds for the perfect hash generator, in the order the driver
//! encounters them: input parsing, duplicate keys, chooser exhaustion,
//! solver exhaustion, then I/O.

use thiserror::Error;

/// Everything that can go wrong while generating a perfect hash.
///
/// Every variant is fatal — none is recoverable in-band, matching the
/// original generator's all-or-nothing `driver()`.
#[derive(Debug, Error)]
pub enum PhashError {
    #[error("line {line}: {reason}")]
    InputParse { line: usize, reason: String },

    #[error("duplicate key: {0:?}")]
    DuplicateKey(String),

    #[error(
        "couldn't find perfect hash after trying {attempts} salts; try increasing blen (currently {blen})"
    )]
    ChooserExhausted { attempts: u32, blen: u32 },

    #[error("couldn't find perfect hash after {attempts} solver attempts")]
    SolverExhausted { attempts: u32 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
