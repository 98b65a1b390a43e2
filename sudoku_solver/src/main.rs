//! Command line front end for the sudoku engine: parses a puzzle
//! file, solves it, and writes the result in the documented text format.

mod io;

use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};

/// `sudoku_solver -f <path> [-i <name>] [-n <workers>]`
///
/// `-i`/`--input` is a legacy alias for `-f`; clap validates flag shapes
/// and generates usage text, but precedence between `-f` and `-i` is
/// order-sensitive ("last one wins"), which clap's derive API can't
/// express between two distinct flags — so [`resolve_input_path`] walks
/// the raw argv ahead of clap to pick the winner.
#[derive(Parser)]
#[command(name = "sudoku_solver", disable_help_flag = true)]
struct Args {
    /// Input puzzle file.
    #[arg(short = 'f', value_name = "PATH")]
    file: Option<PathBuf>,

    /// Legacy alias for `-f`; overrides it if given later on the command line.
    /// Only used by clap for shape validation — [`resolve_input_path`]
    /// determines the actual winning value from raw argv order.
    #[arg(short = 'i', long = "input", value_name = "NAME")]
    #[allow(dead_code)]
    input: Option<PathBuf>,

    /// Worker count hint, fed to the rayon thread pool.
    #[arg(short = 'n', default_value_t = 1)]
    workers: usize,

    /// Print usage and exit.
    #[arg(short = '?', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,
}

/// Scan the raw command-line arguments to resolve which of `-f <path>`
/// and `-i`/`--input <name>` should win: the flag whose value appears
/// later on the line takes precedence.
fn resolve_input_path(raw_args: &[String]) -> Option<PathBuf> {
    let mut winner = None;
    let mut iter = raw_args.iter().peekable();
    while let Some(arg) = iter.next() {
        let is_f = arg == "-f";
        let is_i = arg == "-i" || arg == "--input";
        if is_f || is_i {
            if let Some(value) = iter.peek() {
                winner = Some(PathBuf::from((*value).clone()));
            }
        }
    }
    winner
}

fn print_usage() {
    eprintln!("Usage: sudoku_solver -f <path> [-i <name>] [-n <workers>]");
    eprintln!();
    eprintln!("  -f <path>           input puzzle file");
    eprintln!("  -i, --input <name>  legacy alias for -f (last one wins)");
    eprintln!("  -n <workers>        worker count hint (default 1)");
    eprintln!("  -?, --help          print this message");
}

/// Returns `anyhow::Result<()>` at the binary boundary, but the usage/I-O/
/// parse exit codes are mapped explicitly with [`std::process::exit`]
/// rather than left to anyhow's default (always 1 on `Err`) — the `-1`
/// exit code has no representation in that default.
fn main() -> anyhow::Result<()> {
    env_logger::init();

    // clap's derive API has no bare `-?` short flag (it collides with
    // clap's own help shorthand), so rewrite it to `--help` before parsing.
    let raw_args: Vec<String> = std::env::args().collect();
    let rewritten: Vec<String> = raw_args
        .iter()
        .map(|a| if a == "-?" { "--help".to_string() } else { a.clone() })
        .collect();

    let args = match Args::try_parse_from(&rewritten) {
        Ok(args) => args,
        Err(_) => {
            print_usage();
            anyhow::bail!("bad usage");
        }
    };

    if args.help {
        print_usage();
        anyhow::bail!("help requested");
    }

    let input_path = match resolve_input_path(&raw_args[1..]).or(args.file) {
        Some(path) => path,
        None => {
            print_usage();
            anyhow::bail!("missing -f/-i");
        }
    };

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.workers)
        .build_global()
    {
        warn!("failed to size the worker pool to {}: {e}", args.workers);
    }

    run(&input_path)
}

fn run(input_path: &std::path::Path) -> anyhow::Result<()> {
    let (n, digits) = match io::read_puzzle(input_path) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(-1);
        }
    };

    info!("solving a box-side {n} puzzle loaded from {}", input_path.display());

    let solution = match sudoku_engine::solve_digits(n, &digits) {
        Ok(solution) => solution,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(-1);
        }
    };

    let Some(solution) = solution else {
        println!("No Solution");
        return Ok(());
    };

    match io::write_solution(input_path, n, &solution.digits()) {
        Ok(path) => {
            info!("solution written to {}", path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(-1);
        }
    }
}
