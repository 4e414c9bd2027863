//! Command-line driver: read `go <depth>` plus FEN fields from stdin,
//! run the fixed-depth search, and print one line per iteration with
//! the move, score, root move count, timing, and depth figures.
//!
//! The wall-clock and nodes-per-second columns are informational; with
//! the same seed, FEN, and depth every other column reproduces
//! byte for byte. A FEN the parser rejects exits with code 1; any
//! token other than `go` (or end of input) ends the loop normally.
//!
//! Usage:
//!   goshawk [--hash <MiB>] [--seed <u64>]

use std::io::Read;
use std::process::exit;
use std::time::Instant;

use goshawk::engine::Engine;
use goshawk::search::SearchOutcome;
use goshawk::utils::format_move;

fn parse_flag(args: &[String], flag: &str, default: u64) -> u64 {
    match args.iter().position(|a| a == flag) {
        Some(i) => match args.get(i + 1).and_then(|v| v.parse().ok()) {
            Some(v) => v,
            None => {
                eprintln!("{} needs an unsigned integer", flag);
                exit(2);
            }
        },
        None => default,
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let hash_megabytes = parse_flag(&args, "--hash", 4) as usize;
    let seed = parse_flag(&args, "--seed", 1);

    let mut engine = Engine::new(hash_megabytes, seed);

    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        eprintln!("input error");
        exit(1);
    }
    let mut tokens = input.split_whitespace();

    while let Some(token) = tokens.next() {
        if token != "go" {
            break;
        }
        let depth: u32 = match tokens.next().and_then(|t| t.parse().ok()) {
            Some(d) => d,
            None => {
                eprintln!("go needs a depth");
                exit(1);
            }
        };
        let fen_fields: Vec<&str> = tokens.by_ref().take(6).collect();
        let fen = fen_fields.join(" ");
        if let Err(e) = engine.set_position(&fen) {
            eprintln!("fen error: {}", e);
            exit(1);
        }

        println!();
        println!("go depth {}", depth);

        // The report closure formats against the root position.
        let root = engine.board.clone();
        let start = Instant::now();
        let mut total_seconds = 0.0;
        let outcome = engine.deepen(depth, |r| {
            let seconds = start.elapsed().as_secs_f64();
            total_seconds = seconds;
            let ms = seconds * 1000.0;
            let knps = if ms > 0.0 { r.nodes as f64 / ms } else { 0.0 };
            println!(
                "{:<10}\tscore={:+5} : moves={:2} :: {:4.1}s {:5}KN ({:6.1}KNps) [{:2}/{:2}]",
                format_move(&root, r.best_move),
                r.score,
                r.root_moves,
                seconds,
                r.nodes / 1000,
                knps,
                r.depth,
                r.sel_depth,
            );
        });

        match outcome {
            SearchOutcome::Checkmated => println!("checkmate, side to move loses"),
            SearchOutcome::Stalemate => println!("stalemate"),
            SearchOutcome::FiftyMoveDraw => println!("draw by fifty-move rule"),
            SearchOutcome::BestMove(mv) => {
                println!("best move {}", format_move(&root, mv));
                println!("total time : {:4.1}s", total_seconds);
            }
        }
    }

    exit(0);
}
