//! Observer implementations for self-play training
//!
//! Observers allow composable data collection during training without coupling
//! training logic to specific output formats.

use std::{fs::File, num::NonZeroUsize, path::Path};

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    learning::{EpisodeSummary, ExplorationCounts, TrainingConfig, TrainingReport, ValueTable},
    ports::Observer,
    tictactoe::{BoardState, GameOutcome, Player},
    types::{CELL_COUNT, Position},
};

/// Progress bar observer - Shows training progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} T:{}", self.x_wins, self.o_wins, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_training_start(&mut self, config: &TrainingConfig) -> Result<()> {
        let pb = ProgressBar::new(config.episodes as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} episodes ({msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_episode_end(&mut self, summary: &EpisodeSummary, _table: &ValueTable) -> Result<()> {
        match summary.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(summary.episode_index as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_training_end(&mut self, _report: &TrainingReport) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// Totals for one window of consecutive episodes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    /// Index of the last episode in the window
    pub last_episode: usize,
    pub episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub exploratory_moves: ExplorationCounts,
    /// Exploration rate in effect for the window's last episode
    pub exploration_rate: f64,
}

impl WindowStats {
    fn record(&mut self, summary: &EpisodeSummary) {
        self.last_episode = summary.episode_index;
        self.episodes += 1;
        match summary.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
        self.exploratory_moves.add(summary.exploratory_moves);
        self.exploration_rate = summary.exploration_rate;
    }
}

/// Window statistics observer - logs outcome counts every `window` episodes
///
/// A window in which X never won extends O's perfect streak; any X win
/// resets it. With [`stop_after_perfect_windows`] set, training is asked to
/// stop once the streak reaches that many windows.
///
/// [`stop_after_perfect_windows`]: StatsObserver::stop_after_perfect_windows
pub struct StatsObserver {
    window: usize,
    current: WindowStats,
    history: Vec<WindowStats>,
    perfect_streak: usize,
    stop_after: Option<NonZeroUsize>,
}

impl StatsObserver {
    pub const DEFAULT_WINDOW: usize = 10_000;
    /// Streak length at which the command-line trainer stops by default
    pub const DEFAULT_PERFECT_WINDOWS: NonZeroUsize = NonZeroUsize::MIN.saturating_add(2);

    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
            current: WindowStats::default(),
            history: Vec::new(),
            perfect_streak: 0,
            stop_after: None,
        }
    }

    pub fn stop_after_perfect_windows(mut self, windows: NonZeroUsize) -> Self {
        self.stop_after = Some(windows);
        self
    }

    /// Completed windows, oldest first
    pub fn history(&self) -> &[WindowStats] {
        &self.history
    }

    pub fn perfect_streak(&self) -> usize {
        self.perfect_streak
    }

    fn close_window(&mut self) {
        let stats = std::mem::take(&mut self.current);
        if stats.x_wins == 0 {
            self.perfect_streak += 1;
        } else {
            self.perfect_streak = 0;
        }

        log::info!(
            "episodes to {}: X wins {}, O wins {}, ties {}, random moves X {} O {}, exploration {:.6}, O perfect streak {}",
            stats.last_episode + 1,
            stats.x_wins,
            stats.o_wins,
            stats.ties,
            stats.exploratory_moves.x,
            stats.exploratory_moves.o,
            stats.exploration_rate,
            self.perfect_streak
        );
        self.history.push(stats);
    }
}

impl Observer for StatsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary, _table: &ValueTable) -> Result<()> {
        self.current.record(summary);
        if self.current.episodes == self.window {
            self.close_window();
        }
        Ok(())
    }

    fn on_training_end(&mut self, _report: &TrainingReport) -> Result<()> {
        if self.current.episodes > 0 {
            log::debug!(
                "partial window of {} episodes: X wins {}, O wins {}, ties {}",
                self.current.episodes,
                self.current.x_wins,
                self.current.o_wins,
                self.current.ties
            );
        }
        Ok(())
    }

    fn should_stop(&self) -> bool {
        self.stop_after
            .is_some_and(|limit| self.perfect_streak >= limit.get())
    }
}

/// First-move weights observer - writes window-averaged opening values as TSV
///
/// Every episode the nine opening values for `first_player` are read from the
/// table; every `window` episodes their averages are written as one row:
/// the episode count followed by one column per cell, 1 to 9.
pub struct FirstMoveWeightsObserver {
    writer: csv::Writer<File>,
    first_player: Player,
    window: usize,
    sums: [f64; CELL_COUNT],
    samples: usize,
}

impl FirstMoveWeightsObserver {
    pub const DEFAULT_WINDOW: usize = 1_000;

    pub fn new<P: AsRef<Path>>(path: P, window: usize) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path.as_ref())?;
        let mut header = vec!["episode".to_string()];
        header.extend(Position::all().map(|p| p.to_string()));
        writer.write_record(&header)?;

        Ok(Self {
            writer,
            first_player: Player::O,
            window: window.max(1),
            sums: [0.0; CELL_COUNT],
            samples: 0,
        })
    }

    pub fn with_first_player(mut self, player: Player) -> Self {
        self.first_player = player;
        self
    }

    fn write_row(&mut self, episodes: usize) -> Result<()> {
        let mut row = vec![episodes.to_string()];
        row.extend(
            self.sums
                .iter()
                .map(|sum| format!("{:.6}", sum / self.samples as f64)),
        );
        self.writer.write_record(&row)?;
        self.sums = [0.0; CELL_COUNT];
        self.samples = 0;
        Ok(())
    }
}

impl Observer for FirstMoveWeightsObserver {
    fn on_episode_end(&mut self, summary: &EpisodeSummary, table: &ValueTable) -> Result<()> {
        let opening = BoardState::new(self.first_player);
        for position in Position::all() {
            let after = opening.apply_move(position)?;
            self.sums[position.index()] += table.peek_opponent(&after);
        }
        self.samples += 1;

        if self.samples == self.window {
            self.write_row(summary.episode_index + 1)?;
        }
        Ok(())
    }

    fn on_training_end(&mut self, _report: &TrainingReport) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| Error::io("flush first-move weights", e))
    }
}
