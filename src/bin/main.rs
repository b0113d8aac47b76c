use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use packed_symmetric::data::linear_algebra::error::PackingError;
use packed_symmetric::data::linear_algebra::packing::{coordinate_of, nr_pairs, offset_of, pack, pairs, unpack};
use packed_symmetric::data::linear_algebra::symmetric::PackedSymmetric;

/// Index arithmetic for symmetric matrices stored without their diagonal.
#[derive(Parser)]
#[command(version, author = "Bram van den Heuvel <bram@vandenheuvel.online>")]
struct Opts {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Position of coordinate (i, j) in the packed array
    Offset {
        /// Order of the matrix
        n: usize,
        i: usize,
        j: usize,
    },
    /// Coordinate of the value stored at an offset
    Coordinate {
        /// Order of the matrix
        n: usize,
        offset: usize,
    },
    /// Pack and unpack a matrix of order n and verify every off-diagonal value
    Check {
        /// Order of the matrix
        n: usize,
    },
    /// Print the offset of every coordinate as a table
    Show {
        /// Order of the matrix
        n: usize,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let opts = Opts::parse();
    match run(opts.command) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("{}", error);
            ExitCode::FAILURE
        },
    }
}

/// Execute a command, returning whether all checks passed.
fn run(command: Command) -> Result<bool, PackingError> {
    match command {
        Command::Offset { n, i, j } => {
            println!("{}", offset_of(n, i, j)?);
            Ok(true)
        },
        Command::Coordinate { n, offset } => {
            let (i, j) = coordinate_of(n, offset)?;
            println!("({}, {})", i, j);
            Ok(true)
        },
        Command::Check { n } => check(n),
        Command::Show { n } => {
            let len = nr_pairs(n).ok_or(PackingError::OrderTooLarge { order: n })?;
            let offsets = PackedSymmetric::new((0..len).collect(), n)?;
            print!("{}", offsets);
            Ok(true)
        },
    }
}

/// Pack the matrix with values `1` up to `n * n` and compare every off-diagonal value.
fn check(n: usize) -> Result<bool, PackingError> {
    let matrix = (0..n)
        .map(|i| (0..n).map(|j| (i * n + j + 1) as u64).collect::<Vec<_>>())
        .collect::<Vec<_>>();
    let packed = pack(&matrix, n)?;
    info!(order = n, len = packed.len(), "packed test matrix");

    let mut nr_mismatches = 0;
    for (i, j) in pairs(n) {
        let offset = offset_of(n, i, j)?;
        if packed[offset] != matrix[i][j] || coordinate_of(n, offset)? != (i, j) {
            println!("({}, {})", i, j);
            nr_mismatches += 1;
        }
    }

    let dense = unpack(&packed, n, 0)?;
    for (i, j) in pairs(n) {
        if dense[i][j] != matrix[i][j] || dense[j][i] != matrix[i][j] {
            println!("({}, {}) after unpacking", i, j);
            nr_mismatches += 1;
        }
    }
    debug!(order = n, nr_mismatches, "checked all coordinates");

    if nr_mismatches == 0 {
        println!("All {} coordinates of a matrix of order {} are consistent.", packed.len(), n);
    }

    Ok(nr_mismatches == 0)
}
