//! `perfect`: generate a minimal or non-minimal perfect hash function
//! for a fixed set of keys read from stdin, writing `phash.h` and
//! `phash.c` to the current directory.

mod args;

use std::fs;
use std::io;

use anyhow::{Context, Result};
use clap::Parser;

use phash_core::{driver, key};

fn main() {
    let cli = args::Cli::parse();

    match args::parse_flags(cli.flags.as_deref()) {
        Ok(opts) => {
            if let Err(e) = run(opts) {
                let msg = format!("Error: {e}");
                println!("{msg}");
                eprintln!("{msg}");
                std::process::exit(1);
            }
        }
        Err(()) => print!("{}", args::USAGE),
    }
}

fn run(opts: args::Options) -> Result<()> {
    let stdin = io::stdin();
    let keys = key::read_keys(stdin.lock(), opts.mode).context("reading keys")?;
    println!("Read in {} keys", keys.len());

    let generated = driver::generate(keys, opts.mode, opts.perfect, opts.speed)
        .context("finding a perfect hash")?;

    fs::write("phash.h", &generated.header).context("writing phash.h")?;
    println!("Wrote phash.h");

    fs::write("phash.c", &generated.source).context("writing phash.c")?;
    println!("Wrote phash.c");

    println!("Cleaned up");
    Ok(())
}
