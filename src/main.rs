//! # crossword
//!
//! `crossword` fills a crossword grid with words from a word list. Each slot of
//! the grid is a variable, each word of matching length a candidate value, and
//! every crossing a constraint that the two words agree on the shared letter.
//! No word may appear twice.
//!
//! Solving runs in two phases:
//! 1.  **Consistency**: words of the wrong length are dropped (node consistency),
//!     then AC-3 removes words with no compatible partner in a crossing slot.
//! 2.  **Search**: backtracking over the remaining candidates, by default
//!     choosing the slot with the fewest candidates (ties to the slot with the
//!     most crossings) and trying the least constraining word first.
//!
//! ## Usage
//!
//! ```sh
//! crossword <STRUCTURE> <WORDS> [OUTPUT]
//! crossword file --structure data/structure0.txt --words data/words0.txt [--output out.txt]
//! crossword text --structure "#___#\n#_##_\n#_##_\n#_##_\n#____" --words "ONE SIX SEVEN FIVE NINE"
//! crossword dir --path data --words data/words0.txt
//! crossword completions bash
//! ```
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Enable debug logging (default: `false`). `RUST_LOG` overrides it.
//! -   `-v, --verify <BOOL>`: Check the solution against every constraint (default: `true`).
//! -   `-s, --stats <BOOL>`: Print statistics (default: `true`).
//! -   `-p, --print-solution`: List the word chosen for every slot (default: `false`).
//! -   `--variable-selection`: `mrv-degree` (default), `fixed-order` or `random`.
//! -   `--value-ordering`: `least-constraining` (default) or `lexical`.
//! -   `--inference`: `none` (default), `forward-checking` or `mac`.
//!
//! A puzzle without a solution prints `No solution.` and exits successfully.
//! Unreadable or empty inputs are reported on stderr with exit status 1.

use crate::command_line::cli::{solve_dir, solve_files, solve_text, Cli, Commands};
use clap::{CommandFactory, Parser};
use env_logger::Env;

mod command_line;

/// Global allocator using `tikv-jemallocator` for memory usage tracking.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn init_logging(debug: bool) {
    let level = if debug { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

/// Parses command-line arguments and dispatches to the matching handler.
fn main() {
    let cli = Cli::parse();

    let debug = match &cli.command {
        Some(
            Commands::File { common, .. }
            | Commands::Text { common, .. }
            | Commands::Dir { common, .. },
        ) => common.debug,
        Some(Commands::Completions { .. }) | None => cli.common.debug,
    };
    init_logging(debug);

    let result = match cli.command {
        Some(Commands::File {
            structure,
            words,
            output,
            common,
        }) => solve_files(&structure, &words, output.as_deref(), &common),

        Some(Commands::Text {
            structure,
            words,
            common,
        }) => solve_text(&structure, &words, &common),

        Some(Commands::Dir {
            path,
            words,
            common,
        }) => solve_dir(&path, &words, &common),

        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "crossword", &mut std::io::stdout());
            Ok(())
        }

        None => match (cli.structure, cli.words) {
            (Some(structure), Some(words)) => {
                solve_files(&structure, &words, cli.output.as_deref(), &cli.common)
            }
            _ => Err("Usage: crossword <STRUCTURE> <WORDS> [OUTPUT]".to_string()),
        },
    };

    if let Err(e) = result {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
