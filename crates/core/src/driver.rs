//! Orchestrates a full run: choose an initial hash, build the graph,
//! solve the bucket mapping, and render the two output files. Bundles
//! everything the CLI needs to write to disk plus the progress line
//! count it must print.

use crate::chooser::{self, ChosenHash};
use crate::codegen;
use crate::error::PhashError;
use crate::graph::HashGraph;
use crate::key::{Key, Mode};
use crate::params::{Perfect, Speed, MAX_SOLVER_RETRIES};
use crate::solver::{fast, scramble, slow, Solution};

/// Everything the CLI writes out after a successful run.
pub struct Generated {
    pub header: String,
    pub source: String,
    pub nkeys: u32,
}

/// Run the full pipeline. If the chosen solver can't place every
/// bucket, retry with a fresh salt (continuing the search rather than
/// restarting it) up to [`MAX_SOLVER_RETRIES`] times before giving up.
pub fn generate(keys: Vec<Key>, mode: Mode, perfect: Perfect, speed: Speed) -> Result<Generated, PhashError> {
    let nkeys = keys.len() as u32;

    let mut chosen = chooser::choose(keys, mode, perfect)?;
    let mut attempts = 0;

    loop {
        match try_solve(&chosen, speed) {
            Some((solution, scramble_table)) => {
                let header = codegen::render_header(mode, chosen.sizing, nkeys, chosen.salt);
                let source = codegen::render_source(mode, chosen.sizing, &solution, &scramble_table, chosen.salt);
                return Ok(Generated { header, source, nkeys });
            }
            None => {
                attempts += 1;
                if attempts >= MAX_SOLVER_RETRIES {
                    return Err(PhashError::SolverExhausted { attempts });
                }
                chosen = chooser::choose_from(chosen.keys, mode, perfect, chosen.salt + 1)?;
            }
        }
    }
}

fn try_solve(chosen: &ChosenHash, speed: Speed) -> Option<(Solution, [u32; 256])> {
    let graph = HashGraph::build(&chosen.keys, chosen.sizing.alen, chosen.sizing.blen);
    let table = scramble::build(chosen.sizing.smax);

    let solution = match speed {
        Speed::Fast => fast::solve(&graph, &chosen.keys, &table, chosen.sizing.smax),
        Speed::Slow => slow::solve(&graph, &chosen.keys, &table, chosen.sizing.smax),
    }?;

    Some((solution, table))
}
