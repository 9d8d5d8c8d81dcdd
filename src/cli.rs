//! Command-line interface: position analysis and self-play.
//!
//! The search core does no I/O; everything user-visible lives here.

use std::fmt;

use chrono::Local;
use rand::Rng;

use crate::board::error::FenError;
use crate::board::{Board, Move, VALUE_MATE, VALUE_MATE_IN_MAX_PLY};
use crate::search::log::StdoutLogger;
use crate::search::Engine;

/// Default time budget for `--analyze`, in milliseconds.
const DEFAULT_ANALYZE_TIME_MS: u64 = 1_000;
/// Depth cap handed to the driver for both commands.
const CLI_MAX_DEPTH: i32 = 20;
/// Self-play search depth, matching the shallow per-move budgets.
const PLAY_MAX_DEPTH: i32 = 10;
/// Plies of opening randomization in self-play.
const RANDOM_OPENING_PLIES: u32 = 6;
/// Chance (percent) that an opening ply plays a random move.
const RANDOM_OPENING_CHANCE: u32 = 30;

pub const USAGE: &str = "Usage:
  minchess --analyze <FEN> [time_ms]
  minchess --play <games> <max_ply> <white_ms> <black_ms>";

/// CLI-level failures, each mapped to a nonzero exit by `main`.
#[derive(Debug)]
pub enum CliError {
    MissingCommand,
    UnknownCommand(String),
    MissingArgument(&'static str),
    InvalidNumber(String),
    InvalidFen(FenError),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingCommand => write!(f, "no command given"),
            CliError::UnknownCommand(cmd) => write!(f, "unknown command: {cmd}"),
            CliError::MissingArgument(what) => write!(f, "missing argument: {what}"),
            CliError::InvalidNumber(arg) => write!(f, "not a number: {arg}"),
            CliError::InvalidFen(err) => write!(f, "bad FEN: {err}"),
        }
    }
}

impl std::error::Error for CliError {}

impl From<FenError> for CliError {
    fn from(err: FenError) -> Self {
        CliError::InvalidFen(err)
    }
}

/// Dispatch a command line (program name already stripped).
pub fn run(args: &[String]) -> Result<(), CliError> {
    let command = args.first().ok_or(CliError::MissingCommand)?;
    match command.as_str() {
        "--analyze" => cmd_analyze(&args[1..]),
        "--play" => cmd_play(&args[1..]),
        other => Err(CliError::UnknownCommand(other.to_string())),
    }
}

/// Split `--analyze` arguments into a FEN string and an optional trailing
/// time budget.
///
/// A FEN may arrive as one quoted argument or split across several words,
/// and its own trailing fields are numeric. A final number is read as the
/// time budget only when what precedes it is unambiguously a complete
/// position: a single argument that parses on its own, or at least six
/// whitespace-separated FEN fields.
fn split_fen_and_time(args: &[String]) -> (String, u64) {
    if args.len() >= 2 {
        if let Ok(time_ms) = args[args.len() - 1].parse::<u64>() {
            let head = &args[..args.len() - 1];
            let fen = head.join(" ");
            let fields = fen.split_whitespace().count();
            let unambiguous = (head.len() == 1 || fields >= 6) && Board::try_from_fen(&fen).is_ok();
            if unambiguous {
                return (fen, time_ms);
            }
        }
    }
    (args.join(" "), DEFAULT_ANALYZE_TIME_MS)
}

fn cmd_analyze(args: &[String]) -> Result<(), CliError> {
    if args.is_empty() {
        return Err(CliError::MissingArgument("FEN"));
    }

    let (fen, time_ms) = split_fen_and_time(args);
    let mut board = Board::try_from_fen(&fen)?;

    println!("Static eval: {}", board.evaluate());

    let mut engine = Engine::default();
    let mut logger = StdoutLogger;
    let report = engine.search_with(&mut board, CLI_MAX_DEPTH, time_ms, &mut logger);

    print!("Evaluation: ");
    if report.score >= VALUE_MATE_IN_MAX_PLY {
        println!("Mate in {}", (VALUE_MATE - report.score + 1) / 2);
    } else if report.score <= -VALUE_MATE_IN_MAX_PLY {
        println!("Mated in {}", (VALUE_MATE + report.score) / 2);
    } else {
        println!("{}", report.score);
    }
    println!("Best move: {}", report.best_move);
    println!("Depth: {} Nodes: {}", report.depth, report.nodes);

    Ok(())
}

fn parse_number<T: std::str::FromStr>(args: &[String], idx: usize, what: &'static str) -> Result<T, CliError> {
    let arg = args.get(idx).ok_or(CliError::MissingArgument(what))?;
    arg.parse().map_err(|_| CliError::InvalidNumber(arg.clone()))
}

fn cmd_play(args: &[String]) -> Result<(), CliError> {
    let games: u32 = parse_number(args, 0, "game count")?;
    let max_ply: u32 = parse_number(args, 1, "max ply")?;
    let white_ms: u64 = parse_number(args, 2, "white movetime")?;
    let black_ms: u64 = parse_number(args, 3, "black movetime")?;

    let mut rng = rand::thread_rng();
    let mut engine = Engine::default();
    let mut total_depth: u64 = 0;
    let mut total_moves: u64 = 0;

    for game in 0..games {
        let mut board = Board::new();

        println!("[Event \"Engine Self-Play\"]");
        println!("[Site \"minchess\"]");
        println!("[Date \"{}\"]", Local::now().format("%Y.%m.%d"));
        println!("[Round \"{}\"]", game + 1);
        println!("[White \"minchess\"]");
        println!("[Black \"minchess\"]");

        let mut movetext = String::new();
        let mut ply: u32 = 0;
        let mut result = "*";

        while ply < max_ply {
            // A dash of opening variety so games do not repeat verbatim
            if ply < RANDOM_OPENING_PLIES && rng.gen_range(0..100) < RANDOM_OPENING_CHANCE {
                let moves = board.generate_moves();
                if moves.is_empty() {
                    result = game_over_result(&board);
                    break;
                }
                let mv = moves[rng.gen_range(0..moves.len())];
                push_move_text(&mut movetext, ply, mv);
                board.make_move(mv);
                ply += 1;
                continue;
            }

            let time_ms = if board.white_to_move() { white_ms } else { black_ms };
            let report = engine.search(&mut board, PLAY_MAX_DEPTH, time_ms);
            total_depth += report.depth as u64;
            total_moves += 1;

            if report.best_move == Move::NONE {
                result = game_over_result(&board);
                break;
            }

            if board.is_draw() {
                result = "1/2-1/2";
                break;
            }

            push_move_text(&mut movetext, ply, report.best_move);
            board.make_move(report.best_move);
            ply += 1;
        }

        if ply >= max_ply {
            result = "1/2-1/2";
        }

        println!("[Result \"{result}\"]");
        println!();
        println!("{movetext}{result}");
        println!();
    }

    if total_moves > 0 {
        println!(
            "Average depth: {:.2}",
            total_depth as f64 / total_moves as f64
        );
    }

    Ok(())
}

/// PGN result tag for a side-to-move with no legal moves.
fn game_over_result(board: &Board) -> &'static str {
    if board.in_check(board.side_to_move()) {
        if board.white_to_move() {
            "0-1"
        } else {
            "1-0"
        }
    } else {
        "1/2-1/2"
    }
}

fn push_move_text(movetext: &mut String, ply: u32, mv: Move) {
    use fmt::Write;

    if ply % 2 == 0 {
        let _ = write!(movetext, "{}. ", ply / 2 + 1);
    }
    let _ = write!(movetext, "{mv} ");
}
