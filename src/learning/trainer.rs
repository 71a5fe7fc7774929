//! Self-play TD(0) trainer
//!
//! Each episode is played forward to completion, building the full state
//! history, and then walked backward once to propagate the outcome:
//!
//! 1. Start from an empty board with a random first player.
//! 2. At every turn either explore (uniform random legal move) or exploit
//!    (the move whose successor is worth most to the mover).
//! 3. At the terminal board, store the outcome for the player about to move:
//!    0.5 for a tie, 0.0 otherwise, since the player who just moved won.
//! 4. From the last move back to the first, move each state's value a
//!    fraction α of the way toward its successor's value for the same player.

use rand::{Rng, SeedableRng, rngs::StdRng};

use super::{
    config::TrainingConfig,
    exploration::ExplorationSchedule,
    policy::greedy_move,
    report::{EpisodeSummary, ExplorationCounts, TrainingReport},
    value_table::ValueTable,
};
use crate::{
    Error, Result,
    ports::Observer,
    tictactoe::{BoardState, Episode, GameOutcome, Player},
    types::Position,
};

fn build_rng(seed: Option<u64>) -> StdRng {
    if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_rng(&mut rand::rng())
    }
}

/// Outcome value for the player about to move in a terminal `state`.
///
/// In self-play the player to move at a terminal board never won (the
/// winner made the last move), so this is 0.5 for a tie and 0.0 for a loss.
/// A hand-built board where the mover owns the line gets 1.0. Returns `None`
/// for a game still in progress.
pub fn terminal_reward(state: &BoardState) -> Option<f64> {
    match state.winner()? {
        GameOutcome::Tie => Some(0.5),
        GameOutcome::Win(winner) if winner == state.to_move => Some(1.0),
        GameOutcome::Win(_) => Some(0.0),
    }
}

/// One TD(0) step: pull the mover's value of `state` toward what `next` is worth to them.
///
/// The player to move in `state` is the player who just moved in `next`, so
/// the target is `value_for_opponent(next)`.
pub fn backup(table: &mut ValueTable, state: &BoardState, next: &BoardState, learning_rate: f64) {
    let current = table.value_for_mover(state);
    let target = table.value_for_opponent(next);
    table.set_value_for_mover(state, current + learning_rate * (target - current));
}

/// A self-play game together with how often each side explored
#[derive(Debug, Clone)]
pub struct PlayedEpisode {
    pub episode: Episode,
    pub exploratory_moves: ExplorationCounts,
}

/// The learned table and the session totals
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub table: ValueTable,
    pub report: TrainingReport,
}

/// Owns everything a training session mutates: table, schedule, RNG and episode counter
#[derive(Debug)]
pub struct SelfPlayTrainer {
    config: TrainingConfig,
    table: ValueTable,
    schedule: ExplorationSchedule,
    rng: StdRng,
    episode_index: usize,
}

impl SelfPlayTrainer {
    /// Create a trainer with an empty table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the configuration is invalid.
    pub fn new(config: TrainingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            schedule: config.exploration_schedule(),
            rng: build_rng(config.seed),
            table: ValueTable::new(),
            episode_index: 0,
            config,
        })
    }

    /// Continue learning from an existing table instead of an empty one
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = table;
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    pub fn table(&self) -> &ValueTable {
        &self.table
    }

    pub fn into_table(self) -> ValueTable {
        self.table
    }

    pub fn schedule(&self) -> &ExplorationSchedule {
        &self.schedule
    }

    /// Index of the next episode to be played
    pub fn episode_index(&self) -> usize {
        self.episode_index
    }

    /// Start a fresh session: empty table, initial exploration rate, reseeded RNG
    pub fn reset(&mut self) {
        self.table.clear();
        self.schedule.reset();
        self.rng = build_rng(self.config.seed);
        self.episode_index = 0;
    }

    fn choose_move(
        &mut self,
        state: &BoardState,
        explored: &mut ExplorationCounts,
    ) -> Result<Position> {
        let legal = state.legal_moves();
        if legal.is_empty() {
            return Err(Error::NoLegalMoves {
                state: state.encode(),
            });
        }

        if self
            .schedule
            .should_explore(&mut self.rng, state.to_move, self.episode_index)
        {
            explored.record(state.to_move);
            return Ok(legal[self.rng.random_range(0..legal.len())]);
        }

        let table = &mut self.table;
        greedy_move(state, |successor| table.value_for_opponent(successor))?.ok_or_else(|| {
            Error::NoLegalMoves {
                state: state.encode(),
            }
        })
    }

    /// Play one game to the end without learning from it
    pub fn play_episode(&mut self) -> Result<PlayedEpisode> {
        let first_player = if self.rng.random_bool(0.5) {
            Player::O
        } else {
            Player::X
        };

        let initial = BoardState::new(first_player);
        let mut state = initial;
        let mut moves = Vec::with_capacity(9);
        let mut exploratory_moves = ExplorationCounts::default();

        while !state.is_terminal() {
            let position = self.choose_move(&state, &mut exploratory_moves)?;
            state = state.apply_move(position)?;
            moves.push(position);
        }

        Ok(PlayedEpisode {
            episode: Episode::replay(initial, &moves)?,
            exploratory_moves,
        })
    }

    /// Store the outcome at a terminal board and return the stored value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidEpisode`] if the board is not terminal.
    pub fn assign_terminal_reward(&mut self, terminal: &BoardState) -> Result<f64> {
        let reward = terminal_reward(terminal).ok_or_else(|| Error::InvalidEpisode {
            message: format!("{} is not a terminal board", terminal.encode()),
        })?;
        self.table.set_value_for_mover(terminal, reward);
        Ok(reward)
    }

    /// Back up every transition of `episode`, latest first
    pub fn backup_episode(&mut self, episode: &Episode) {
        for (state, next) in episode.transitions_reversed() {
            backup(&mut self.table, state, next, self.config.learning_rate);
        }
    }

    /// Play, reward, back up and decay: one full training step
    pub fn run_episode(&mut self) -> Result<EpisodeSummary> {
        let exploration_rate = self.schedule.current_rate();
        let played = self.play_episode()?;
        let episode = &played.episode;

        self.assign_terminal_reward(&episode.final_state())?;

        let backed_up = self.episode_index < self.config.backup_cutoff;
        if backed_up {
            self.backup_episode(episode);
        } else if self.episode_index == self.config.backup_cutoff {
            log::debug!("backups disabled from episode {}", self.episode_index);
        }

        self.schedule.decay();

        let summary = EpisodeSummary {
            episode_index: self.episode_index,
            first_player: episode.first_player(),
            outcome: episode.outcome(),
            moves: episode.len(),
            exploratory_moves: played.exploratory_moves,
            exploration_rate,
            backed_up,
        };
        log::trace!(
            "episode {}: {} in {} moves (explored X:{} O:{})",
            summary.episode_index,
            summary.outcome,
            summary.moves,
            summary.exploratory_moves.x,
            summary.exploratory_moves.o
        );

        self.episode_index += 1;
        Ok(summary)
    }

    /// Run episodes until the budget is spent or an observer asks to stop
    pub fn run(&mut self, observers: &mut [Box<dyn Observer>]) -> Result<TrainingReport> {
        for observer in observers.iter_mut() {
            observer.on_training_start(&self.config)?;
        }
        log::info!(
            "training for {} episodes (alpha={}, decay={}, X explores until {}, O until {}, backups until {})",
            self.config.episodes,
            self.config.learning_rate,
            self.config.exploration_decay,
            self.config.x_exploration_cutoff,
            self.config.o_exploration_cutoff,
            self.config.backup_cutoff
        );

        let mut report = TrainingReport::default();
        while self.episode_index < self.config.episodes {
            let summary = self.run_episode()?;
            report.record(&summary);

            for observer in observers.iter_mut() {
                observer.on_episode_end(&summary, &self.table)?;
            }

            if observers.iter().any(|observer| observer.should_stop()) {
                report.stopped_early = self.episode_index < self.config.episodes;
                if report.stopped_early {
                    log::info!("stopping early after episode {}", summary.episode_index);
                }
                break;
            }
        }

        report.final_exploration_rate = self.schedule.current_rate();
        report.table_size = self.table.len();

        for observer in observers.iter_mut() {
            observer.on_training_end(&report)?;
        }
        log::info!(
            "training finished: {} episodes, X wins {}, O wins {}, ties {}, {} states learned",
            report.episodes,
            report.x_wins,
            report.o_wins,
            report.ties,
            report.table_size
        );

        Ok(report)
    }
}

/// Run a full training session and return the learned table.
///
/// # Examples
///
/// ```
/// use tictactoe_td::learning::{TrainingConfig, train};
///
/// let outcome = train(TrainingConfig::for_episodes(200).with_seed(7)).unwrap();
/// assert_eq!(outcome.report.episodes, 200);
/// assert!(!outcome.table.is_empty());
/// ```
pub fn train(config: TrainingConfig) -> Result<TrainingOutcome> {
    train_with_observers(config, &mut [])
}

/// [`train`], reporting progress to `observers`
pub fn train_with_observers(
    config: TrainingConfig,
    observers: &mut [Box<dyn Observer>],
) -> Result<TrainingOutcome> {
    let mut trainer = SelfPlayTrainer::new(config)?;
    let report = trainer.run(observers)?;
    Ok(TrainingOutcome {
        table: trainer.into_table(),
        report,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(index: usize) -> Position {
        Position::new(index).unwrap()
    }

    fn replay(first: Player, moves: &[usize]) -> Episode {
        let moves: Vec<_> = moves.iter().map(|&m| pos(m)).collect();
        Episode::replay(BoardState::new(first), &moves).unwrap()
    }

    #[test]
    fn test_terminal_reward_is_for_player_about_to_move() {
        // X completes the top row; O is to move and has lost.
        let x_win = replay(Player::X, &[0, 3, 1, 4, 2]).final_state();
        assert_eq!(x_win.winner(), Some(GameOutcome::Win(Player::X)));
        assert_eq!(x_win.to_move, Player::O);
        assert_eq!(terminal_reward(&x_win), Some(0.0));

        let tie = replay(Player::X, &[0, 1, 2, 4, 3, 5, 7, 6, 8]).final_state();
        assert_eq!(terminal_reward(&tie), Some(0.5));

        assert_eq!(terminal_reward(&BoardState::new(Player::X)), None);
    }

    #[test]
    fn test_assign_terminal_reward_pins_winner_perspective() {
        let mut trainer = SelfPlayTrainer::new(TrainingConfig::for_episodes(1)).unwrap();
        let terminal = replay(Player::O, &[0, 3, 1, 4, 2]).final_state();
        assert_eq!(terminal.winner(), Some(GameOutcome::Win(Player::O)));

        let reward = trainer.assign_terminal_reward(&terminal).unwrap();
        assert_eq!(reward, 0.0);

        let mut table = trainer.into_table();
        // X is to move and lost; O, who just moved, won.
        assert_eq!(table.value_for_mover(&terminal), 0.0);
        assert_eq!(table.value_for_opponent(&terminal), 1.0);
    }

    #[test]
    fn test_assign_terminal_reward_rejects_open_board() {
        let mut trainer = SelfPlayTrainer::new(TrainingConfig::for_episodes(1)).unwrap();
        assert!(
            trainer
                .assign_terminal_reward(&BoardState::new(Player::X))
                .is_err()
        );
    }

    #[test]
    fn test_backup_moves_value_toward_successor() {
        let mut table = ValueTable::new();
        let state = BoardState::new(Player::X);
        let next = state.apply_move(pos(4)).unwrap();
        table.set_value_for_mover(&next, 0.2);

        backup(&mut table, &state, &next, 0.5);

        // 0.5 + 0.5 * ((1 - 0.2) - 0.5) = 0.65
        assert!((table.value_for_mover(&state) - 0.65).abs() < 1e-12);
    }

    #[test]
    fn test_backup_episode_runs_latest_first() {
        let config = TrainingConfig::for_episodes(1).with_learning_rate(1.0);
        let mut trainer = SelfPlayTrainer::new(config).unwrap();
        let episode = replay(Player::X, &[0, 3, 1, 4, 2]);

        trainer
            .assign_terminal_reward(&episode.final_state())
            .unwrap();
        trainer.backup_episode(&episode);

        // With alpha = 1 the outcome propagates all the way back in one pass,
        // alternating between the loser's and the winner's perspective.
        let table = trainer.table();
        let expected = [1.0, 0.0, 1.0, 0.0, 1.0, 0.0];
        for (state, value) in episode.states().iter().zip(expected) {
            assert_eq!(table.peek(state), value, "state {}", state.encode());
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_training() {
        let config = TrainingConfig::for_episodes(10).with_learning_rate(0.0);
        assert!(matches!(
            SelfPlayTrainer::new(config),
            Err(Error::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_played_episode_is_consistent() {
        let config = TrainingConfig::for_episodes(1)
            .with_exploration_cutoffs(1, 1)
            .with_seed(3);
        let mut trainer = SelfPlayTrainer::new(config).unwrap();
        let played = trainer.play_episode().unwrap();
        let replayed =
            Episode::replay(played.episode.initial_state(), played.episode.moves()).unwrap();

        assert_eq!(replayed, played.episode);
        assert!(played.episode.final_state().is_terminal());
        // exploration rate starts at 1.0, so every move explores
        let explored = played.exploratory_moves.x + played.exploratory_moves.o;
        assert_eq!(explored, played.episode.len());
    }

    #[test]
    fn test_same_seed_same_session() {
        let config = TrainingConfig::for_episodes(300).with_seed(11);
        let a = train(config.clone()).unwrap();
        let b = train(config).unwrap();

        assert_eq!(a.report, b.report);
        assert_eq!(a.table.len(), b.table.len());
        for (state, value) in &a.table {
            assert_eq!(b.table.peek(state), *value);
        }
    }

    #[test]
    fn test_reset_replays_identically() {
        let mut trainer =
            SelfPlayTrainer::new(TrainingConfig::for_episodes(50).with_seed(5)).unwrap();
        let first = trainer.run(&mut []).unwrap();
        trainer.reset();
        assert!(trainer.table().is_empty());
        let second = trainer.run(&mut []).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_backups_past_cutoff() {
        let config = TrainingConfig::for_episodes(100)
            .with_exploration_cutoffs(100, 100)
            .with_exploration_decay(0.999_999)
            .with_backup_cutoff(0)
            .with_seed(9);
        let outcome = train(config).unwrap();

        // Only terminal boards were written; with near-certain exploration
        // almost no greedy lookups happen, and those insert the default.
        for (state, &value) in &outcome.table {
            if state.is_terminal() {
                assert!(value == 0.0 || value == 0.5, "{} -> {value}", state.encode());
            } else {
                assert_eq!(value, 0.5, "{} was backed up", state.encode());
            }
        }
    }

    #[test]
    fn test_without_exploration_play_is_deterministic() {
        let config = TrainingConfig::for_episodes(20)
            .with_initial_exploration_rate(0.0)
            .with_backup_cutoff(0)
            .with_seed(1);
        let mut trainer = SelfPlayTrainer::new(config).unwrap();

        let mut by_first_player: Vec<(Player, Vec<Position>)> = Vec::new();
        for _ in 0..20 {
            let played = trainer.play_episode().unwrap();
            assert_eq!(played.exploratory_moves, ExplorationCounts::default());
            let first = played.episode.first_player();
            match by_first_player.iter().find(|(p, _)| *p == first) {
                Some((_, moves)) => assert_eq!(moves.as_slice(), played.episode.moves()),
                None => by_first_player.push((first, played.episode.moves().to_vec())),
            }
        }
    }

    #[test]
    fn test_exploration_cutoffs_apply_per_player() {
        let config = TrainingConfig::for_episodes(100)
            .with_exploration_cutoffs(100, 0)
            .with_seed(21);
        let report = train(config).unwrap().report;

        assert_eq!(report.exploratory_moves.o, 0);
        assert!(report.exploratory_moves.x > 0);

        let config = TrainingConfig::for_episodes(100)
            .with_exploration_cutoffs(0, 100)
            .with_seed(21);
        let report = train(config).unwrap().report;

        assert_eq!(report.exploratory_moves.x, 0);
        assert!(report.exploratory_moves.o > 0);
    }

    struct StopAfter {
        remaining: usize,
    }

    impl Observer for StopAfter {
        fn on_episode_end(&mut self, _summary: &EpisodeSummary, _table: &ValueTable) -> Result<()> {
            self.remaining = self.remaining.saturating_sub(1);
            Ok(())
        }

        fn should_stop(&self) -> bool {
            self.remaining == 0
        }
    }

    #[test]
    fn test_observer_can_stop_session() {
        let mut observers: Vec<Box<dyn Observer>> = vec![Box::new(StopAfter { remaining: 7 })];
        let outcome =
            train_with_observers(TrainingConfig::for_episodes(100).with_seed(2), &mut observers)
                .unwrap();

        assert_eq!(outcome.report.episodes, 7);
        assert!(outcome.report.stopped_early);
    }
}
