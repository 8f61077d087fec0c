#![allow(clippy::cast_precision_loss)]

use crossword_csp::crossword::{Crossword, ParseError};
use crossword_csp::csp::assignment::Solution;
use crossword_csp::csp::backtracking::Backtracking;
use crossword_csp::csp::inference::InferenceType;
use crossword_csp::csp::model::ConstraintModel;
use crossword_csp::csp::solver::{DynamicConfig, SolutionStats, Solver};
use crossword_csp::csp::value_ordering::ValueOrderingType;
use crossword_csp::csp::variable_selection::VariableSelectionType;
use clap::{ArgAction, Args, Parser, Subcommand};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the crossword solver.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "crossword",
    version,
    about = "Fills a crossword grid from a word list",
    args_conflicts_with_subcommands = true
)]
pub(crate) struct Cli {
    /// Structure file: one row per line, `_` for a cell to fill.
    /// Used when no subcommand is given.
    pub structure: Option<PathBuf>,

    /// Word file: one word per line.
    pub words: Option<PathBuf>,

    /// Optional file to write the filled grid to.
    pub output: Option<PathBuf>,

    /// Specifies the subcommand to execute (e.g. `file`, `text`, `dir`).
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve a puzzle given as a structure file and a word file.
    File {
        /// Path to the structure file.
        #[arg(long)]
        structure: PathBuf,

        /// Path to the word file.
        #[arg(long)]
        words: PathBuf,

        /// Write the filled grid to this file.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve a puzzle given as plain text.
    Text {
        /// Grid rows separated by newlines or a literal `\n` (e.g. "#___#\n#_##_").
        #[arg(long)]
        structure: String,

        /// Whitespace-separated words (e.g. "ONE TWO THREE").
        #[arg(long)]
        words: String,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Solve every `structure*.txt` file under a directory against one word file.
    Dir {
        /// Directory to search.
        #[arg(long)]
        path: PathBuf,

        /// Path to the word file.
        #[arg(long)]
        words: PathBuf,

        /// Common options for this subcommand.
        #[command(flatten)]
        common: CommonOptions,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across different subcommands.
#[derive(Args, Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub(crate) struct CommonOptions {
    /// Enable debug logging of the consistency and search phases.
    #[arg(short, long, default_value_t = false)]
    pub(crate) debug: bool,

    /// Check the found solution against every constraint.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) verify: bool,

    /// Print problem and search statistics after solving.
    #[arg(short, long, default_value_t = true, action = ArgAction::Set)]
    pub(crate) stats: bool,

    /// Print the word chosen for every slot.
    #[arg(short, long, default_value_t = false)]
    pub(crate) print_solution: bool,

    /// How the next slot to fill is chosen.
    #[arg(long, default_value_t = VariableSelectionType::MrvDegree)]
    pub(crate) variable_selection: VariableSelectionType,

    /// In which order a slot's candidate words are tried.
    #[arg(long, default_value_t = ValueOrderingType::LeastConstraining)]
    pub(crate) value_ordering: ValueOrderingType,

    /// Pruning performed after each assignment.
    #[arg(long, default_value_t = InferenceType::None)]
    pub(crate) inference: InferenceType,
}

impl Default for CommonOptions {
    fn default() -> Self {
        Self {
            debug: false,
            verify: true,
            stats: true,
            print_solution: false,
            variable_selection: VariableSelectionType::default(),
            value_ordering: ValueOrderingType::default(),
            inference: InferenceType::default(),
        }
    }
}

/// Builds a solver with the strategies named in `common`.
pub(crate) fn get_solver(
    common: &CommonOptions,
    model: ConstraintModel,
    puzzle: &Crossword,
) -> Backtracking<DynamicConfig> {
    Backtracking::<DynamicConfig>::from_parts(
        model,
        puzzle.words(),
        common.variable_selection.to_impl(),
        common.value_ordering.to_impl(),
        common.inference,
    )
}

/// Solves a structure file against a word file.
///
/// # Errors
///
/// If either file cannot be read or parsed, or the output cannot be written.
pub(crate) fn solve_files(
    structure: &Path,
    words: &Path,
    output: Option<&Path>,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let puzzle = Crossword::from_files(structure, words).map_err(|e| describe(&e, structure, words))?;
    let parse_time = time.elapsed();

    solve_and_report(&puzzle, common, Some(structure), output, parse_time)
}

/// Solves a puzzle given as text on the command line.
///
/// # Errors
///
/// If the structure or the word list is empty.
pub(crate) fn solve_text(structure: &str, words: &str, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let structure = structure.replace("\\n", "\n");
    let puzzle = Crossword::from_text(&structure, words).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    solve_and_report(&puzzle, common, None, None, parse_time)
}

/// Solves every structure file below `path` against the word file `words`.
///
/// Files are selected by name: `structure*.txt`. Anything else is skipped.
///
/// # Errors
///
/// If `path` is not a directory, or any selected puzzle fails to parse.
pub(crate) fn solve_dir(path: &Path, words: &Path, common: &CommonOptions) -> Result<(), String> {
    if !path.is_dir() {
        return Err(format!("Provided path is not a directory: {}", path.display()));
    }

    for entry in walkdir::WalkDir::new(path)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
    {
        let file_path = entry.path();
        if !file_path.is_file() || !is_structure_file(file_path) {
            debug!("Skipping {}", file_path.display());
            continue;
        }

        solve_files(file_path, words, None, common)?;
    }

    Ok(())
}

fn is_structure_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "txt")
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.starts_with("structure"))
}

fn describe(error: &ParseError, structure: &Path, words: &Path) -> String {
    match error {
        ParseError::Io(e) => format!(
            "Unable to read {} or {}: {e}",
            structure.display(),
            words.display()
        ),
        ParseError::EmptyWordList => format!("Error parsing {}: {error}", words.display()),
        other => format!("Error parsing {}: {other}", structure.display()),
    }
}

/// Runs the solver and reports the time taken.
pub(crate) fn solve(
    puzzle: &Crossword,
    model: ConstraintModel,
    label: Option<&Path>,
    common: &CommonOptions,
) -> (Option<Solution>, Duration, SolutionStats) {
    if let Some(name) = label {
        println!("Solving: {}", name.display());
    }

    debug!(
        "{} slot(s), {} crossing(s), {} word(s)",
        model.len(),
        model.arcs().len() / 2,
        puzzle.words().len()
    );

    let time = Instant::now();
    let mut solver = get_solver(common, model, puzzle);
    let sol = solver.solve();
    let elapsed = time.elapsed();

    info!("solved in {elapsed:?}");
    (sol, elapsed, solver.stats())
}

/// Checks a solution against the model it was found for.
///
/// # Errors
///
/// If the solution breaks a constraint.
pub(crate) fn verify_solution(model: &ConstraintModel, sol: Option<&Solution>) -> Result<(), String> {
    if let Some(solution) = sol {
        let ok = solution.verify(model);
        println!("Verified: {ok}");
        if !ok {
            return Err("Solution failed verification!".to_string());
        }
    }
    Ok(())
}

/// Solves a parsed puzzle and prints statistics, the grid, and any requested extras.
///
/// # Errors
///
/// If the puzzle does not form a valid model, the solution fails verification,
/// or the output file cannot be written.
pub(crate) fn solve_and_report(
    puzzle: &Crossword,
    common: &CommonOptions,
    label: Option<&Path>,
    output: Option<&Path>,
    parse_time: Duration,
) -> Result<(), String> {
    let model = puzzle.to_model().map_err(|e| e.to_string())?;

    let (sol, elapsed, solver_stats) = solve(puzzle, model.clone(), label, common);
    let (allocated_mib, resident_mib) = memory_usage();

    if common.verify {
        verify_solution(&model, sol.as_ref())?;
    }

    if common.stats {
        print_stats(
            parse_time,
            elapsed,
            puzzle,
            &model,
            &solver_stats,
            allocated_mib,
            resident_mib,
        );
    }

    let Some(solution) = sol else {
        println!("No solution.");
        return Ok(());
    };

    if common.print_solution {
        print!("{solution}");
    }
    print!("{}", puzzle.render(&solution));

    if let Some(path) = output {
        puzzle
            .save(&solution, path)
            .map_err(|e| format!("Unable to write {}: {e}", path.display()))?;
        println!("Written to: {}", path.display());
    }

    Ok(())
}

/// Allocated and resident memory in MiB, as reported by jemalloc.
fn memory_usage() -> (f64, f64) {
    if epoch::advance().is_err() {
        return (0.0, 0.0);
    }
    let allocated_bytes = stats::allocated::read().unwrap_or(0);
    let resident_bytes = stats::resident::read().unwrap_or(0);

    (
        allocated_bytes as f64 / (1024.0 * 1024.0),
        resident_bytes as f64 / (1024.0 * 1024.0),
    )
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Helper function to print a statistic line that includes a rate (value/second).
pub(crate) fn stat_line_with_rate(label: &str, value: usize, elapsed: f64) {
    let rate = if elapsed > 0.0 {
        value as f64 / elapsed
    } else {
        0.0
    };
    println!("|  {label:<20} {value:>12} ({rate:>9.0}/sec)  |");
}

/// Prints a summary of problem and search statistics.
pub(crate) fn print_stats(
    parse_time: Duration,
    elapsed: Duration,
    puzzle: &Crossword,
    model: &ConstraintModel,
    s: &SolutionStats,
    allocated: f64,
    resident: f64,
) {
    let elapsed_secs = elapsed.as_secs_f64();
    let structure = puzzle.structure();

    println!("\n=======================[ Problem Statistics ]=========================");
    stat_line("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64()));
    stat_line(
        "Grid",
        format!("{} x {}", structure.height(), structure.width()),
    );
    stat_line("Slots", model.len());
    stat_line("Crossings", model.arcs().len() / 2);
    stat_line("Words", puzzle.words().len());

    println!("========================[ Search Statistics ]========================");
    stat_line("Pruned by node consistency", s.node_pruned);
    stat_line_with_rate("Arcs processed", s.arcs_processed, elapsed_secs);
    stat_line("Revisions", s.revisions);
    stat_line("Values pruned", s.values_pruned);
    stat_line_with_rate("Assignments", s.assignments, elapsed_secs);
    stat_line_with_rate("Backtracks", s.backtracks, elapsed_secs);
    stat_line("Rejected candidates", s.rejected);
    stat_line("Inference wipeouts", s.inference_wipeouts);
    stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
    stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    stat_line("CPU time (s)", format!("{elapsed_secs:.3}"));
    println!("=====================================================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_positional_invocation() {
        let cli = Cli::parse_from(["crossword", "s.txt", "w.txt", "out.txt"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.structure, Some(PathBuf::from("s.txt")));
        assert_eq!(cli.words, Some(PathBuf::from("w.txt")));
        assert_eq!(cli.output, Some(PathBuf::from("out.txt")));
        assert!(cli.common.verify);
    }

    #[test]
    fn test_strategy_flags() {
        let cli = Cli::parse_from([
            "crossword",
            "text",
            "--structure",
            "___",
            "--words",
            "CAT",
            "--variable-selection",
            "fixed-order",
            "--value-ordering",
            "lexical",
            "--inference",
            "mac",
            "--stats",
            "false",
        ]);
        let Some(Commands::Text { common, .. }) = cli.command else {
            panic!("expected the text subcommand");
        };
        assert_eq!(common.variable_selection, VariableSelectionType::FixedOrder);
        assert_eq!(common.value_ordering, ValueOrderingType::Lexical);
        assert_eq!(common.inference, InferenceType::Mac);
        assert!(!common.stats);
    }

    #[test]
    fn test_structure_file_names() {
        assert!(is_structure_file(Path::new("data/structure0.txt")));
        assert!(!is_structure_file(Path::new("data/words0.txt")));
        assert!(!is_structure_file(Path::new("data/structure0.png")));
    }

    #[test]
    fn test_solve_text_reports_unsatisfiable_without_error() {
        let common = CommonOptions {
            stats: false,
            ..CommonOptions::default()
        };
        assert!(solve_text("___", "AB CD", &common).is_ok());
        assert!(solve_text("", "AB", &common).is_err());
    }
}
