use hexfall_core::Command;
use hexfall_engine::{CancelToken, Game};
use hexfall_eval::{EvalWeights, GameScorer, HeuristicScorer};
use log::debug;

use crate::{apply_placement, Session};

#[derive(Clone)]
struct GamePath<'a> {
    game: Game<'a>,
    finished: bool,
    score: i64,
    commands: Vec<Command>,
}

/// Beam over whole games: each step advances every surviving path by one
/// unit and keeps the best `width` paths.
pub struct GameBeam<'a, S = HeuristicScorer> {
    pub width: usize,
    pub scorer: S,
    paths: Vec<GamePath<'a>>,
}

impl<'a> GameBeam<'a> {
    pub fn new(width: usize) -> Self {
        Self::with_scorer(width, HeuristicScorer::new(EvalWeights::kamineko()))
    }
}

impl<'a, S: GameScorer> GameBeam<'a, S> {
    pub fn with_scorer(width: usize, scorer: S) -> Self {
        Self {
            width: width.max(1),
            scorer,
            paths: Vec::new(),
        }
    }

    fn best(&self) -> Option<&GamePath<'a>> {
        // First of equals, matching the kept order.
        self.paths
            .iter()
            .reduce(|best, path| if path.score > best.score { path } else { best })
    }
}

impl<'a, S: GameScorer> Session<'a> for GameBeam<'a, S> {
    fn add_game(&mut self, game: Game<'a>) {
        self.paths.clear();
        self.paths.push(GamePath {
            finished: game.is_finished(),
            game,
            score: 0,
            commands: Vec::new(),
        });
    }

    fn next(&mut self, cancel: &CancelToken) -> bool {
        if cancel.should_stop() {
            return self.best().map_or(true, |p| p.finished);
        }

        let mut next_paths: Vec<GamePath<'a>> = Vec::new();
        for path in &self.paths {
            if path.finished {
                next_paths.push(path.clone());
                continue;
            }
            let results = path.game.reachable_placements_with(cancel);
            if results.is_empty() {
                next_paths.push(path.clone());
                continue;
            }
            for result in results {
                let (game, finished) = apply_placement(&path.game, &result);
                let score = self.scorer.score(&game, finished);
                let mut commands = path.commands.clone();
                commands.extend_from_slice(&result.commands);
                next_paths.push(GamePath {
                    game,
                    finished,
                    score,
                    commands,
                });
            }
        }

        next_paths.sort_by(|a, b| b.score.cmp(&a.score));
        next_paths.truncate(self.width);
        self.paths = next_paths;

        match self.best() {
            Some(best) => {
                debug!(
                    "game beam: {} paths, best {} (game {}) after {} units",
                    self.paths.len(),
                    best.score,
                    best.game.score(),
                    best.game.spawned_count()
                );
                best.finished
            }
            None => true,
        }
    }

    fn best_commands(&self) -> &[Command] {
        self.best()
            .map(|p| p.commands.as_slice())
            .unwrap_or_default()
    }

    fn best_score(&self) -> i64 {
        self.best().map_or(0, |p| p.game.score())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GreedySolver, PieceByPiece};
    use hexfall_engine::GameData;

    const PROBLEM: &str = r#"{
        "id": 4, "width": 5, "height": 6,
        "filled": [{"x": 0, "y": 5}, {"x": 1, "y": 5}, {"x": 4, "y": 5}],
        "units": [
            {"members": [{"x": 0, "y": 0}], "pivot": {"x": 0, "y": 0}},
            {"members": [{"x": 0, "y": 0}, {"x": 1, "y": 0}], "pivot": {"x": 0, "y": 0}},
            {"members": [{"x": 0, "y": 0}, {"x": 0, "y": 1}, {"x": 1, "y": 1}], "pivot": {"x": 0, "y": 1}}
        ],
        "sourceLength": 10, "sourceSeeds": [0, 17]
    }"#;

    fn play<'a>(session: &mut dyn Session<'a>, game: Game<'a>) {
        session.add_game(game);
        let cancel = CancelToken::new();
        for _ in 0..1000 {
            if session.next(&cancel) {
                return;
            }
        }
        panic!("session did not finish");
    }

    #[test]
    fn test_width_one_plays_like_greedy() {
        let data = GameData::from_json(PROBLEM).expect("valid problem");
        for seed in 0..2 {
            let mut beam = GameBeam::new(1);
            play(&mut beam, Game::new(&data, seed).expect("seed exists"));

            let greedy = GreedySolver::new(HeuristicScorer::new(EvalWeights::kamineko()));
            let mut pieces = PieceByPiece::new(greedy);
            play(&mut pieces, Game::new(&data, seed).expect("seed exists"));

            assert_eq!(beam.best_commands(), pieces.best_commands());
            assert_eq!(beam.best_score(), pieces.best_score());
        }
    }

    #[test]
    fn test_best_path_replays_to_its_score() {
        let data = GameData::from_json(PROBLEM).expect("valid problem");
        let mut beam = GameBeam::new(6);
        play(&mut beam, Game::new(&data, 1).expect("seed exists"));

        let mut replay = Game::new(&data, 1).expect("seed exists");
        replay.run_sequence(beam.best_commands());
        assert!(replay.is_finished());
        assert!(!replay.is_error());
        assert_eq!(replay.score(), beam.best_score());
    }

    #[test]
    fn test_stop_keeps_current_best() {
        let data = GameData::from_json(PROBLEM).expect("valid problem");
        let mut beam = GameBeam::new(3);
        beam.add_game(Game::new(&data, 0).expect("seed exists"));
        let cancel = CancelToken::new();
        assert!(!beam.next(&cancel));
        let commands = beam.best_commands().to_vec();
        assert!(!commands.is_empty());

        cancel.request_stop();
        beam.next(&cancel);
        assert_eq!(beam.best_commands(), commands.as_slice());
    }
}
