use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hexfall::{
    read_problem, read_records, replay_solution, solve_problem, write_placements, write_record,
    SolveOptions, SolverKind, DEFAULT_PHRASES,
};
use hexfall_engine::{parse_phrase_list, CancelToken, Game};
use hexfall_eval::EvalWeights;
use log::{info, warn};

#[derive(Parser, Debug)]
#[command(version, about = "Hex-grid falling-block puzzle solver")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play seeds of a problem and print solutions as JSON.
    Solve {
        /// Problem file; stdin when omitted.
        #[arg(long)]
        problem: Option<PathBuf>,
        /// Seeds to play, by position in the source list. All when omitted.
        #[arg(long = "seed-index")]
        seed_index: Vec<usize>,
        #[arg(long, value_enum, default_value_t = SolverKind::Greedy)]
        solver: SolverKind,
        #[arg(long, value_enum, default_value_t = Weights::Kamineko)]
        weights: Weights,
        #[arg(long, default_value_t = 1)]
        depth: usize,
        #[arg(long, default_value_t = 8)]
        width: usize,
        #[arg(long, default_value = "hexfall")]
        tag: String,
        /// Comma separated power phrases counted in `_score`.
        #[arg(short, long, default_value = DEFAULT_PHRASES)]
        phrases: String,
        /// Print the best solution so far every this many steps.
        #[arg(long)]
        flush_every: Option<usize>,
    },
    /// Replay solutions and print one score per line.
    Score {
        #[arg(long)]
        problem: PathBuf,
        /// JSON array of solution records.
        #[arg(long)]
        output: PathBuf,
        #[arg(short, long, default_value = DEFAULT_PHRASES)]
        phrases: String,
        /// Add the phrase bonus to each score.
        #[arg(long)]
        phrase_score: bool,
        /// Exit with failure if any solution is illegal.
        #[arg(long)]
        report_error: bool,
    },
    /// Print the first unit of a game and every placement it can lock in
    /// to stdout, as text.
    Bfs {
        #[arg(long)]
        problem: Option<PathBuf>,
        #[arg(long = "seed-index", default_value_t = 0)]
        seed_index: usize,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Weights {
    Kamineko,
    Osaka,
    Duralmin,
    Yasaka,
}

impl From<Weights> for EvalWeights {
    fn from(weights: Weights) -> Self {
        match weights {
            Weights::Kamineko => EvalWeights::kamineko(),
            Weights::Osaka => EvalWeights::osaka(),
            Weights::Duralmin => EvalWeights::duralmin(),
            Weights::Yasaka => EvalWeights::yasaka(),
        }
    }
}

fn main() -> Result<ExitCode> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            problem,
            seed_index,
            solver,
            weights,
            depth,
            width,
            tag,
            phrases,
            flush_every,
        } => {
            let options = SolveOptions {
                solver,
                depth,
                width,
                weights: weights.into(),
                tag,
                phrases: parse_phrase_list(&phrases),
                flush_every,
            };
            solve(problem, seed_index, &options)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Score {
            problem,
            output,
            phrases,
            phrase_score,
            report_error,
        } => score(problem, output, &phrases, phrase_score, report_error),
        Commands::Bfs {
            problem,
            seed_index,
        } => {
            bfs(problem, seed_index)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn solve(problem: Option<PathBuf>, seed_index: Vec<usize>, options: &SolveOptions) -> Result<()> {
    let data = read_problem(problem.as_deref())?;
    let seed_indices = if seed_index.is_empty() {
        (0..data.source_seeds().len()).collect()
    } else {
        seed_index
    };

    let cancel = CancelToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.request_stop())
            .context("failed to install Ctrl-C handler")?;
    }

    info!(
        "problem {}: {} seeds with {:?}",
        data.id(),
        seed_indices.len(),
        options.solver
    );
    let records = solve_problem(&data, &seed_indices, options, &cancel, |record| {
        if let Err(err) = write_record(io::stdout().lock(), record) {
            warn!("failed to write intermediate result: {err:#}");
        }
    })?;
    for record in &records {
        write_record(io::stdout().lock(), record)?;
    }
    Ok(())
}

fn score(
    problem: PathBuf,
    output: PathBuf,
    phrases: &str,
    phrase_score: bool,
    report_error: bool,
) -> Result<ExitCode> {
    let data = read_problem(Some(&problem))?;
    let records = read_records(&output)?;
    let phrases = parse_phrase_list(phrases);

    let mut failed = false;
    for record in &records {
        if record.problem_id != data.id() {
            bail!(
                "solution for problem {} does not match problem {}",
                record.problem_id,
                data.id()
            );
        }
        let replay = replay_solution(&data, record.seed, &record.solution, &phrases)
            .with_context(|| format!("cannot replay seed {}", record.seed))?;
        if replay.error {
            warn!("seed {}: illegal solution", record.seed);
            failed = true;
        } else if !replay.finished {
            info!("seed {}: game not finished", record.seed);
        }
        let score = if phrase_score {
            replay.score()
        } else {
            replay.move_score
        };
        println!("{score}");
    }

    if failed && report_error {
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

fn bfs(problem: Option<PathBuf>, seed_index: usize) -> Result<()> {
    let data = read_problem(problem.as_deref())?;
    let game = Game::new(&data, seed_index)?;
    info!("{} reachable placements", game.reachable_placements().len());
    write_placements(io::stdout().lock(), &game)
}
