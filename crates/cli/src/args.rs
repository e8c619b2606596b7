//! Parses the legacy `-{NnIiHhDdAaBb}{MmPp}{FfSs}` flag cluster.
//!
//! clap's derive model can't express "one optional string positional
//! whose characters are themselves independent flags", so `Cli` only
//! captures the raw string (plus `--help`/`--version`, which clap
//! handles natively) and [`parse_flags`] does the rest by hand, the
//! same single pass over `argv[1]` the original `main()` used.

use clap::Parser;

use phash_core::key::Mode;
use phash_core::params::{Perfect, Speed};

#[derive(Parser, Debug)]
#[command(name = "perfect", author, version, about = "Generate a minimal/perfect hash function (phash.h, phash.c) for keys read from stdin", long_about = None)]
pub struct Cli {
    /// Flag cluster, e.g. `-NMF`. See `-h` for the letters and their meaning.
    ///
    /// Every spec-defined invocation starts with `-`, which clap would
    /// otherwise treat as an unrecognized option on a bare positional;
    /// `allow_hyphen_values` lets it through to `parse_flags` instead.
    #[arg(allow_hyphen_values = true)]
    pub flags: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub perfect: Perfect,
    pub speed: Speed,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            mode: Mode::Normal,
            perfect: Perfect::Minimal,
            speed: Speed::Slow,
        }
    }
}

/// Parse the flag cluster, if any. `Ok(None)` means "no arguments" —
/// use the default [`Options`]. `Err(())` means the arguments were
/// malformed and usage should be printed (not a fatal error: the
/// original exits successfully after `usage_error()`).
pub fn parse_flags(arg: Option<&str>) -> Result<Options, ()> {
    let arg = match arg {
        None => return Ok(Options::default()),
        Some(a) => a,
    };

    let mut chars = arg.chars();
    if chars.next() != Some('-') {
        return Err(());
    }

    let mut opts = Options::default();
    let mut mode_given = false;
    let mut minimal_given = false;
    let mut speed_given = false;

    for c in chars {
        match c {
            'n' | 'N' | 'i' | 'I' | 'h' | 'H' | 'd' | 'D' | 'a' | 'A' | 'b' | 'B' => {
                if mode_given {
                    return Err(());
                }
                opts.mode = match c {
                    'n' | 'N' => Mode::Normal,
                    'i' | 'I' => Mode::Inline,
                    'h' | 'H' => Mode::Hex,
                    'd' | 'D' => Mode::Decimal,
                    'a' | 'A' => Mode::Ab,
                    'b' | 'B' => Mode::AbDec,
                    _ => unreachable!(),
                };
                mode_given = true;
            }
            'm' | 'M' | 'p' | 'P' => {
                if minimal_given {
                    return Err(());
                }
                opts.perfect = match c {
                    'm' | 'M' => Perfect::Minimal,
                    'p' | 'P' => Perfect::NonMinimal,
                    _ => unreachable!(),
                };
                minimal_given = true;
            }
            'f' | 'F' | 's' | 'S' => {
                if speed_given {
                    return Err(());
                }
                opts.speed = match c {
                    'f' | 'F' => Speed::Fast,
                    's' | 'S' => Speed::Slow,
                    _ => unreachable!(),
                };
                speed_given = true;
            }
            _ => return Err(()),
        }
    }

    Ok(opts)
}

pub const USAGE: &str = "\
Usage: perfect [-{NnIiHhDdAaBb}{MmPp}{FfSs}] < key.txt
The input is a list of keys, one key per line.
Only one of NnIiHhDdAaBb and one of MmPp may be specified.
  N,n: normal mode, key is any string (default).
  I,i: initial hash for ASCII char strings.
The initial hash must be
  hash = PHASHSALT;
  for (i=0; i<keylength; ++i) {
    hash = (hash ^ key[i]) + ((hash<<26)+(hash>>6));
  }
Note that this can be inlined in any user loop that walks
through the key anyways, eliminating the loop overhead.
  H,h: Keys are 4-byte integers in hex in this format:
ffffffff
This is good for optimizing switch statement compilation.
  D,d: Same as H,h, except in decimal not hexadecimal.
  A,a: An (A,B) pair is supplied in hex in this format:
aaa bbb
  B,b: Same as A,a, except in decimal not hexadecimal.
This mode does nothing but find the values of tab[].
  M,m: Minimal perfect hash. Hash will be in 0..nkeys-1 (default).
  P,p: Perfect hash. Hash will be in 0..n-1, where n >= nkeys
and n is a power of 2. Will probably use a smaller tab[].
  F,f: Fast mode. Generate the perfect hash fast.
  S,s: Slow mode. Spend time finding a good perfect hash.
";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_is_the_default() {
        assert_eq!(parse_flags(None), Ok(Options::default()));
    }

    #[test]
    fn combines_mode_perfect_and_speed() {
        let opts = parse_flags(Some("-HPF")).unwrap();
        assert_eq!(opts.mode, Mode::Hex);
        assert_eq!(opts.perfect, Perfect::NonMinimal);
        assert_eq!(opts.speed, Speed::Fast);
    }

    #[test]
    fn is_case_insensitive() {
        let opts = parse_flags(Some("-hpf")).unwrap();
        assert_eq!(opts.mode, Mode::Hex);
        assert_eq!(opts.perfect, Perfect::NonMinimal);
        assert_eq!(opts.speed, Speed::Fast);
    }

    #[test]
    fn rejects_missing_leading_dash() {
        assert!(parse_flags(Some("NMF")).is_err());
    }

    #[test]
    fn rejects_two_mode_letters() {
        assert!(parse_flags(Some("-NH")).is_err());
    }

    #[test]
    fn rejects_unknown_letters() {
        assert!(parse_flags(Some("-NZ")).is_err());
    }

    #[test]
    fn single_letter_clusters_are_fine() {
        assert_eq!(parse_flags(Some("-A")).unwrap().mode, Mode::Ab);
    }

    // Drives the real clap entry point rather than calling `parse_flags`
    // directly, so a regression in the `Cli` derive (e.g. clap treating
    // a leading `-` as an unknown option) actually fails a test instead
    // of only showing up at runtime.
    #[test]
    fn clap_accepts_every_spec_flag_cluster() {
        for cluster in ["-NM", "-DM", "-NP", "-A", "-HPF", "-B"] {
            let cli = Cli::parse_from(["perfect", cluster]);
            assert_eq!(cli.flags.as_deref(), Some(cluster), "failed to parse {cluster}");
            assert!(parse_flags(cli.flags.as_deref()).is_ok());
        }
    }

    #[test]
    fn clap_accepts_no_arguments() {
        let cli = Cli::parse_from(["perfect"]);
        assert_eq!(cli.flags, None);
    }
}
