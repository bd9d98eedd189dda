//! Polyomino Packing Solver
//!
//! Command-line front end: reads a board size and a sequence of piece types,
//! searches for a packing on a worker thread, and prints the filled board.

use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};
use thiserror::Error;

use packer::{PackError, PieceCatalog, PieceType, Solution, Solver};

/// Packs polyomino pieces onto a square board.
#[derive(Parser)]
#[command(name = "packer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase log output (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a packing of the given pieces.
    Solve {
        /// Side length of the square board.
        #[arg(short, long, allow_negative_numbers = true)]
        size: i32,

        /// Give up after this many seconds.
        #[arg(short, long)]
        timeout: Option<u64>,

        /// Piece types to place, in order (e.g. `1 2 6` or `1,2,6`).
        #[arg(value_delimiter = ',', num_args = 0..)]
        pieces: Vec<PieceType>,
    },
    /// List the available pieces.
    Pieces,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Command::Solve {
            size,
            timeout,
            pieces,
        }) => run_solve(size, pieces, timeout.map(Duration::from_secs)),
        Some(Command::Pieces) | None => {
            print!("{}", format_catalog(PieceCatalog::standard()));
            ExitCode::SUCCESS
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Failures of a solve run from the command line.
#[derive(Debug, PartialEq, Eq, Error)]
enum RunError {
    #[error(transparent)]
    Pack(#[from] PackError),

    #[error("solver thread stopped without a result")]
    WorkerLost,
}

/// Solves on a worker thread and prints the outcome.
fn run_solve(size: i32, pieces: Vec<PieceType>, timeout: Option<Duration>) -> ExitCode {
    match solve_on_worker(size, pieces, timeout) {
        Ok(solution) if solution.found => {
            print!("{}", solution.board);
            ExitCode::SUCCESS
        }
        Ok(_) => {
            println!("No solution found for the selected pieces and board size");
            ExitCode::from(1)
        }
        Err(RunError::Pack(PackError::Cancelled)) => {
            eprintln!("Gave up: no packing found within the time limit");
            ExitCode::from(2)
        }
        Err(e) => {
            eprintln!("Cannot solve: {}", e);
            ExitCode::from(2)
        }
    }
}

/// Runs the search off the main thread, cancelling it if `timeout` passes.
fn solve_on_worker(
    size: i32,
    pieces: Vec<PieceType>,
    timeout: Option<Duration>,
) -> Result<Solution, RunError> {
    let cancel = Arc::new(AtomicBool::new(false));
    let (sender, receiver) = mpsc::channel();

    let worker_cancel = Arc::clone(&cancel);
    thread::spawn(move || {
        let solver = Solver::new(PieceCatalog::standard()).with_cancel_flag(worker_cancel);
        // the receiver only goes away once main has stopped waiting
        let _ = sender.send(solver.solve(size, &pieces));
    });

    wait_for_result(&receiver, &cancel, timeout)
}

/// Waits for the worker's result, setting `cancel` once `timeout` passes.
///
/// A worker that hangs up without sending anything has panicked.
fn wait_for_result(
    receiver: &mpsc::Receiver<Result<Solution, PackError>>,
    cancel: &AtomicBool,
    timeout: Option<Duration>,
) -> Result<Solution, RunError> {
    let received = match timeout {
        Some(limit) => match receiver.recv_timeout(limit) {
            Ok(result) => Ok(result),
            Err(mpsc::RecvTimeoutError::Timeout) => {
                log::warn!("no result after {:?}, cancelling search", limit);
                cancel.store(true, Ordering::Relaxed);
                receiver.recv()
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => Err(mpsc::RecvError),
        },
        None => receiver.recv(),
    };

    match received {
        Ok(result) => Ok(result?),
        Err(mpsc::RecvError) => {
            log::error!("solver thread exited without a result");
            Err(RunError::WorkerLost)
        }
    }
}

/// Formats the catalog as a numbered list of shape pictures.
fn format_catalog(catalog: &PieceCatalog) -> String {
    let mut output = String::new();
    for (piece_type, shape) in catalog.iter() {
        output.push_str(&format!(
            "Piece {} ({} cells):\n",
            piece_type,
            shape.cell_count()
        ));
        output.push_str(&shape.picture());
        output.push('\n');
    }
    output
}
