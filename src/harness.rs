//! Drives solver sessions over the seeds of a problem.

use clap::ValueEnum;
use hexfall_core::{encode_commands, Command};
use hexfall_engine::{CancelToken, Game, GameData, LoadError};
use hexfall_eval::{EvalWeights, HeuristicScorer};
use hexfall_search::{
    BeamSearch, DfsSolver, GameBeam, GreedySolver, LineTargetSolver, PieceByPiece, Session,
};
use log::info;
#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::output::OutputRecord;
use crate::replay::replay_commands;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SolverKind {
    /// Best immediate placement.
    #[default]
    Greedy,
    /// Exhaustive lookahead `depth` units deep.
    Dfs,
    /// Per-unit beam of `width` games, `depth` units deep.
    Beam,
    /// Beam of `width` whole games.
    GameBeam,
    /// Fill the fullest row that can still be completed. Ignores weights.
    LineTarget,
}

#[derive(Clone, Debug)]
pub struct SolveOptions {
    pub solver: SolverKind,
    pub depth: usize,
    pub width: usize,
    pub weights: EvalWeights,
    pub tag: String,
    pub phrases: Vec<String>,
    /// Emit the current best every this many steps.
    pub flush_every: Option<usize>,
}

impl Default for SolveOptions {
    fn default() -> Self {
        Self {
            solver: SolverKind::Greedy,
            depth: 1,
            width: 8,
            weights: EvalWeights::kamineko(),
            tag: "hexfall".to_string(),
            phrases: Vec::new(),
            flush_every: None,
        }
    }
}

impl SolverKind {
    pub fn session<'a>(self, options: &SolveOptions) -> Box<dyn Session<'a> + 'a> {
        let scorer = HeuristicScorer::new(options.weights.clone());
        match self {
            SolverKind::Greedy => Box::new(PieceByPiece::new(GreedySolver::new(scorer))),
            SolverKind::Dfs => Box::new(PieceByPiece::new(DfsSolver::with_scorer(
                options.depth,
                scorer,
            ))),
            SolverKind::Beam => Box::new(PieceByPiece::new(BeamSearch::with_scorer(
                options.width,
                options.depth,
                scorer,
            ))),
            SolverKind::GameBeam => Box::new(GameBeam::with_scorer(options.width, scorer)),
            SolverKind::LineTarget => Box::new(PieceByPiece::new(LineTargetSolver::new())),
        }
    }
}

/// Step `session` until it is done or a stop is requested, calling `flush`
/// with the best answer whenever a flush is requested or `flush_every`
/// steps have passed. A flush requested before the first step is honoured
/// after it. Returns the final best answer and its game score.
pub fn run_session<'a, F>(
    session: &mut dyn Session<'a>,
    cancel: &CancelToken,
    flush_every: Option<usize>,
    mut flush: F,
) -> (Vec<Command>, i64)
where
    F: FnMut(&[Command], i64),
{
    let mut steps = 0usize;
    let mut flushes_seen = 0;
    loop {
        if session.next(cancel) {
            break;
        }
        steps += 1;
        if cancel.should_stop() {
            info!("stop requested after {steps} steps, score {}", session.best_score());
            break;
        }
        let periodic = flush_every.is_some_and(|n| n > 0 && steps % n == 0);
        if cancel.take_flush(&mut flushes_seen) || periodic {
            flush(session.best_commands(), session.best_score());
        }
    }
    (session.best_commands().to_vec(), session.best_score())
}

fn record(data: &GameData, seed: u32, commands: &[Command], options: &SolveOptions) -> OutputRecord {
    let solution = encode_commands(commands);
    let replay = replay_commands(data, seed, commands, &solution, &options.phrases);
    OutputRecord {
        problem_id: data.id(),
        seed,
        tag: options.tag.clone(),
        solution,
        score: replay.score(),
    }
}

/// Play every seed in `seed_indices` and return one record per seed, in
/// order. Intermediate flushes go to `sink`.
pub fn solve_problem<F>(
    data: &GameData,
    seed_indices: &[usize],
    options: &SolveOptions,
    cancel: &CancelToken,
    sink: F,
) -> Result<Vec<OutputRecord>, LoadError>
where
    F: Fn(&OutputRecord) + Sync,
{
    let seeds = seed_indices
        .iter()
        .map(|&index| data.seed(index))
        .collect::<Result<Vec<_>, _>>()?;

    let solve_one = |&seed: &u32| -> OutputRecord {
        let mut session = options.solver.session(options);
        session.add_game(Game::with_seed(data, seed));
        let (commands, score) =
            run_session(session.as_mut(), cancel, options.flush_every, |commands, _| {
                sink(&record(data, seed, commands, options));
            });
        let result = record(data, seed, &commands, options);
        info!(
            "problem {} seed {seed}: score {score}, with phrases {} ({} commands)",
            data.id(),
            result.score,
            commands.len()
        );
        result
    };

    #[cfg(feature = "rayon")]
    let records = seeds.par_iter().map(solve_one).collect();
    #[cfg(not(feature = "rayon"))]
    let records = seeds.iter().map(solve_one).collect();

    Ok(records)
}
