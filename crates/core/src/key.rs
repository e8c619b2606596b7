//! Key reading: parse stdin per mode into a key list carrying raw text
//! plus the `(a, b, c)` bucket coordinates the chooser fills in later.

use std::io::BufRead;

use crate::error::PhashError;

/// Line longer than this (including the newline) is a parse error. The
/// original generator silently truncated at `MAXKEYLEN`; this one
/// treats an overlong line as malformed input instead.
pub const MAXKEYLEN: usize = 30;

/// Input-format mode, selected by the CLI's mode flag. A plain Rust sum
/// type standing in for the original's `hashform` struct and enum
/// discriminant pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Opaque byte string, hashed by the mixer.
    Normal,
    /// Opaque byte string; caller has already hashed it, we only pick
    /// a salt (the emitted `phash` takes a pre-hashed `ub4`).
    Inline,
    /// One 32-bit integer, hex-encoded.
    Hex,
    /// One 32-bit integer, decimal-encoded.
    Decimal,
    /// `"aaaa bbbb"`, hex-encoded; `(a, b)` used directly, `c = 0`.
    Ab,
    /// Same as [`Mode::Ab`], decimal-encoded.
    AbDec,
}

/// Whether this mode's keys are hashed as strings via the full mixer,
/// as strings via the cheap rolling hash, as a single integer word, or
/// supplied directly as an `(a, b)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashKind {
    Str,
    InlineStr,
    Int,
    Ab,
}

impl Mode {
    pub fn hash_kind(self) -> HashKind {
        match self {
            Mode::Normal => HashKind::Str,
            Mode::Inline => HashKind::InlineStr,
            Mode::Hex | Mode::Decimal => HashKind::Int,
            Mode::Ab | Mode::AbDec => HashKind::Ab,
        }
    }

    /// Whether a collision on `(hash_a, hash_b)` during the chooser's
    /// scan is a fatal user error (the pair was dictated by the input)
    /// rather than a reason to retry with a new salt.
    pub fn ab_is_fixed(self) -> bool {
        matches!(self, Mode::Ab | Mode::AbDec)
    }
}

/// The raw payload carried by a key, shaped by the mode it was read in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyData {
    Bytes(Vec<u8>),
    Int(u32),
    Pair(u32, u32),
}

/// One input line plus its derived bucket coordinates.
///
/// `hash_a`/`hash_b`/`hash_c` are zeroed until the chooser has picked
/// `alen`/`blen`/`salt` and projected the mixer's output onto them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key {
    pub data: KeyData,
    pub hash_a: u32,
    pub hash_b: u32,
    pub hash_c: u32,
}

impl Key {
    fn new(data: KeyData) -> Self {
        Key {
            data,
            hash_a: 0,
            hash_b: 0,
            hash_c: 0,
        }
    }

    /// The original key text, for diagnostics naming the offending line.
    pub fn display(&self) -> String {
        match &self.data {
            KeyData::Bytes(b) => String::from_utf8_lossy(b).into_owned(),
            KeyData::Int(v) => v.to_string(),
            KeyData::Pair(a, b) => format!("{a} {b}"),
        }
    }
}

/// Read keys from `input` per `mode`.
///
/// Empty input is legal — an empty `Vec` is returned, and the rest of
/// the pipeline degenerates gracefully at the `nkeys = 0` boundary.
///
/// Reads raw bytes (`read_until`) rather than `BufRead::lines`, which
/// requires valid UTF-8: NORMAL/INLINE keys are "opaque bytes" per
/// spec.md §4.2/§6 (the original reads them with `fgets`), so a key
/// containing a non-UTF-8 byte must still parse, not surface as an I/O
/// error.
pub fn read_keys(mut input: impl BufRead, mode: Mode) -> Result<Vec<Key>, PhashError> {
    let mut keys = Vec::new();
    let mut buf = Vec::new();
    let mut lineno = 0usize;

    loop {
        buf.clear();
        let n = input.read_until(b'\n', &mut buf).map_err(PhashError::Io)?;
        if n == 0 {
            break;
        }
        lineno += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
        }

        if buf.contains(&0) {
            return Err(PhashError::InputParse {
                line: lineno,
                reason: "embedded NUL byte".into(),
            });
        }
        if buf.len() + 1 > MAXKEYLEN {
            return Err(PhashError::InputParse {
                line: lineno,
                reason: format!("line exceeds MAXKEYLEN ({MAXKEYLEN})"),
            });
        }

        let data = parse_line(&buf, mode, lineno)?;
        keys.push(Key::new(data));
    }

    Ok(keys)
}

fn parse_line(line: &[u8], mode: Mode, lineno: usize) -> Result<KeyData, PhashError> {
    let err = |reason: &str| PhashError::InputParse {
        line: lineno,
        reason: reason.to_string(),
    };

    match mode {
        Mode::Normal | Mode::Inline => Ok(KeyData::Bytes(line.to_vec())),
        Mode::Hex | Mode::Decimal | Mode::Ab | Mode::AbDec => {
            // These four modes are textual-numeric, not opaque bytes,
            // so rejecting non-UTF-8 content here (rather than in
            // Normal/Inline) is the right place for that restriction.
            let text =
                std::str::from_utf8(line).map_err(|_| err("expected ASCII text for this mode"))?;
            match mode {
                Mode::Hex => {
                    let word = text.trim();
                    u32::from_str_radix(word, 16)
                        .map(KeyData::Int)
                        .map_err(|_| err("expected a hex u32"))
                }
                Mode::Decimal => {
                    let word = text.trim();
                    word.parse::<u32>()
                        .map(KeyData::Int)
                        .map_err(|_| err("expected a decimal u32"))
                }
                Mode::Ab => {
                    let (a, b) = split_pair(text).ok_or_else(|| err("expected \"aaaa bbbb\""))?;
                    let a = u32::from_str_radix(a, 16).map_err(|_| err("expected hex a"))?;
                    let b = u32::from_str_radix(b, 16).map_err(|_| err("expected hex b"))?;
                    Ok(KeyData::Pair(a, b))
                }
                Mode::AbDec => {
                    let (a, b) = split_pair(text).ok_or_else(|| err("expected \"aaaa bbbb\""))?;
                    let a: u32 = a.parse().map_err(|_| err("expected decimal a"))?;
                    let b: u32 = b.parse().map_err(|_| err("expected decimal b"))?;
                    Ok(KeyData::Pair(a, b))
                }
                Mode::Normal | Mode::Inline => unreachable!(),
            }
        }
    }
}

fn split_pair(line: &str) -> Option<(&str, &str)> {
    let mut parts = line.split_whitespace();
    let a = parts.next()?;
    let b = parts.next()?;
    Some((a, b))
}
