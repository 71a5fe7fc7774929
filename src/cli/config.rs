//! Shared argument groups for CLI commands

use std::{num::NonZeroUsize, path::PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use crate::{
    learning::{SavedValueTable, TrainingConfig, ValueTable},
    pipeline::{ProgressObserver, StatsObserver, TrainingPipeline},
    tictactoe::Player,
};

/// Clap value parser for `x` / `o` flags
pub(crate) fn parse_player(value: &str) -> std::result::Result<Player, String> {
    Player::parse(value, "command-line flag").map_err(|e| e.to_string())
}

/// Training hyperparameters; cutoffs default to fractions of `--episodes`
#[derive(Args, Debug, Clone)]
pub struct TrainingArgs {
    /// Number of self-play episodes
    #[arg(long, short = 'n', default_value_t = 200_000)]
    pub episodes: usize,

    /// TD step size (alpha), in (0, 1]
    #[arg(long, alias = "alpha", default_value_t = 0.8)]
    pub learning_rate: f64,

    /// Exploration probability for the first episode
    #[arg(long, default_value_t = 1.0)]
    pub exploration: f64,

    /// Per-episode multiplicative exploration decay
    #[arg(long, default_value_t = 0.99999)]
    pub decay: f64,

    /// Episode index from which X stops exploring (default: 80% of episodes)
    #[arg(long)]
    pub x_cutoff: Option<usize>,

    /// Episode index from which O stops exploring (default: 60% of episodes)
    #[arg(long)]
    pub o_cutoff: Option<usize>,

    /// Episode index from which backups stop (default: the O cutoff)
    #[arg(long)]
    pub backup_cutoff: Option<usize>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Episodes per statistics window
    #[arg(long, default_value_t = StatsObserver::DEFAULT_WINDOW)]
    pub stats_window: usize,

    /// Stop once X has failed to win this many statistics windows in a row
    #[arg(long, default_value_t = StatsObserver::DEFAULT_PERFECT_WINDOWS)]
    pub stop_after_perfect_windows: NonZeroUsize,

    /// Always play the full episode budget
    #[arg(long)]
    pub no_early_stop: bool,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl TrainingArgs {
    pub fn to_config(&self) -> TrainingConfig {
        let defaults = TrainingConfig::for_episodes(self.episodes);
        let o_cutoff = self.o_cutoff.unwrap_or(defaults.o_exploration_cutoff);
        let x_cutoff = self.x_cutoff.unwrap_or(defaults.x_exploration_cutoff);

        let config = defaults
            .with_learning_rate(self.learning_rate)
            .with_initial_exploration_rate(self.exploration)
            .with_exploration_decay(self.decay)
            .with_exploration_cutoffs(x_cutoff, o_cutoff)
            .with_backup_cutoff(self.backup_cutoff.unwrap_or(o_cutoff));

        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }

    /// Perfect-window streak that ends training, unless early stop is off
    pub fn early_stop(&self) -> Option<NonZeroUsize> {
        (!self.no_early_stop).then_some(self.stop_after_perfect_windows)
    }

    /// Pipeline with window statistics and the progress bar attached
    pub fn pipeline(&self) -> TrainingPipeline {
        let mut stats = StatsObserver::new(self.stats_window);
        if let Some(windows) = self.early_stop() {
            stats = stats.stop_after_perfect_windows(windows);
        }
        let mut pipeline = TrainingPipeline::new(self.to_config()).with_observer(Box::new(stats));
        if !self.no_progress {
            pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
        }
        pipeline
    }
}

/// Where a command gets its value table: a saved file, or a fresh training run
#[derive(Args, Debug, Clone)]
pub struct TableSource {
    /// Saved table (MessagePack) to load instead of training
    #[arg(long, short = 't')]
    pub table: Option<PathBuf>,

    #[command(flatten)]
    pub training: TrainingArgs,
}

impl TableSource {
    pub fn load(&self) -> Result<ValueTable> {
        if let Some(path) = &self.table {
            let saved = SavedValueTable::load_from_file(path)
                .with_context(|| format!("Failed to load table: {}", path.display()))?;
            log::info!(
                "loaded {} states from {}",
                saved.entries.len(),
                path.display()
            );
            return Ok(saved.to_table()?);
        }

        let outcome = self
            .training
            .pipeline()
            .run()
            .context("Training failed")?;
        Ok(outcome.table)
    }
}
