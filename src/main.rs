use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::WrapErr;
use log::{LevelFilter, debug};
use optimal_solver::{
    CornerPatternDatabase, CornerState, CubeState, EdgeState, MoveHistory, OptimalSolver,
    SolverConfig,
    puzzle::{format_moves, parse_moves, random_moves},
};
use std::{io, num::ParseIntError, path::PathBuf};

/// Finds optimal half turn metric solutions to the 3x3x3 Rubik's Cube
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Solver configuration file, in TOML format
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Only record corner states up to this many moves from solved
    #[arg(long, value_name = "DEPTH")]
    depth_limit: Option<u8>,

    /// The longest solution to search for
    #[arg(long, value_name = "MOVES")]
    max_length: Option<u8>,

    /// Increase logging verbosity (can be repeated)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve the cube reached by applying a move sequence to a solved cube.
    /// Without moves, reads one sequence per line from stdin until EOF or
    /// `exit`.
    Solve {
        /// The scramble, e.g. "orange90CW white180 blue90CCW"
        moves: Vec<String>,
    },
    /// Solve a random scramble
    Scramble {
        /// How many random moves to apply
        #[arg(short, long, default_value_t = 10)]
        length: usize,
        /// Seed for a reproducible scramble
        #[arg(short, long)]
        seed: Option<u64>,
    },
    /// Solve a cube given as packed corner and edge words
    State {
        /// The packed corner state, in decimal or with a 0x or 0b prefix
        #[arg(value_parser = parse_word)]
        corners: u64,
        /// The packed edge state, in decimal or with a 0x or 0b prefix
        #[arg(value_parser = parse_word)]
        edges: u64,
    },
}

fn parse_word(s: &str) -> Result<u64, ParseIntError> {
    let s = s.replace('_', "");
    if let Some(hex) = s.strip_prefix("0x") {
        u64::from_str_radix(hex, 16)
    } else if let Some(binary) = s.strip_prefix("0b") {
        u64::from_str_radix(binary, 2)
    } else {
        s.parse()
    }
}

fn solve_and_print(
    solver: &OptimalSolver<'_>,
    state: CubeState,
    max_length: u8,
) -> color_eyre::Result<()> {
    debug!("Solving\n{state}");
    let mut history = MoveHistory::new(usize::from(max_length.max(1)))?;
    let stats = solver.try_solve(state, &mut history)?;
    println!("Solution ({} moves): {history}", history.len());
    debug!(
        "Visited {} nodes over {} iterations",
        stats.nodes_visited, stats.iterations
    );
    Ok(())
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    pretty_env_logger::formatted_builder()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .parse_default_env()
        .init();

    let mut config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .wrap_err_with(|| format!("Failed to load {}", path.display()))?,
        None => SolverConfig::default(),
    };
    if let Some(depth_limit) = cli.depth_limit {
        config.pruning.depth_limit = Some(depth_limit);
    }
    if let Some(max_length) = cli.max_length {
        config.search.max_solution_length = max_length;
    }
    let max_length = config.search.max_solution_length;

    let pattern_database = CornerPatternDatabase::generate(&config.pruning)?;
    let solver = OptimalSolver::new(&pattern_database).with_search_config(config.search);

    match cli.command {
        Commands::Solve { moves } if moves.is_empty() => {
            for line in io::stdin().lines() {
                let line = line?;
                let line = line.trim();
                if line == "exit" {
                    break;
                }
                if line.is_empty() {
                    continue;
                }
                let result = parse_moves(line)
                    .map_err(color_eyre::Report::from)
                    .and_then(|scramble| {
                        let state = CubeState::SOLVED.apply_moves(&scramble);
                        solve_and_print(&solver, state, max_length)
                    });
                if let Err(e) = result {
                    eprintln!("{e}");
                }
            }
        }
        Commands::Solve { moves } => {
            let scramble = parse_moves(&moves.join(" "))?;
            let state = CubeState::SOLVED.apply_moves(&scramble);
            solve_and_print(&solver, state, max_length)?;
        }
        Commands::Scramble { length, seed } => {
            let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
            let scramble = random_moves(length, &mut rng);
            println!("Scramble ({length} moves): {}", format_moves(&scramble));
            let state = CubeState::SOLVED.apply_moves(&scramble);
            solve_and_print(&solver, state, max_length)?;
        }
        Commands::State { corners, edges } => {
            let state = CubeState::new(CornerState::from_raw(corners), EdgeState::from_raw(edges));
            solve_and_print(&solver, state, max_length)?;
        }
    }
    Ok(())
}
