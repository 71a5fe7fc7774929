//! Observer port - abstraction for training observation and data collection
//!
//! This port defines the interface for observing a self-play training
//! session, allowing progress display, statistics logging and weight dumps
//! without coupling the trainer to any output format.

use crate::{
    Result,
    learning::{EpisodeSummary, TrainingConfig, TrainingReport, ValueTable},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(config)` - once, after the configuration is validated
/// 2. `on_episode_end(summary, table)` - after every episode, once its
///    backups have been applied
/// 3. `on_training_end(report)` - once, after the last episode
///
/// Between episodes the trainer asks every observer [`should_stop`]; the
/// first `true` ends the session after the episode that just finished.
///
/// # Examples
///
/// ```no_run
/// use tictactoe_td::{
///     learning::{EpisodeSummary, ValueTable},
///     ports::Observer,
/// };
///
/// struct EpisodeCounter {
///     episodes: usize,
/// }
///
/// impl Observer for EpisodeCounter {
///     fn on_episode_end(
///         &mut self,
///         _summary: &EpisodeSummary,
///         _table: &ValueTable,
///     ) -> tictactoe_td::Result<()> {
///         self.episodes += 1;
///         Ok(())
///     }
/// }
/// ```
///
/// [`should_stop`]: Observer::should_stop
pub trait Observer: Send {
    /// Called when training starts.
    fn on_training_start(&mut self, _config: &TrainingConfig) -> Result<()> {
        Ok(())
    }

    /// Called after each episode with the updated table.
    fn on_episode_end(&mut self, _summary: &EpisodeSummary, _table: &ValueTable) -> Result<()> {
        Ok(())
    }

    /// Called when training completes, including after an early stop.
    fn on_training_end(&mut self, _report: &TrainingReport) -> Result<()> {
        Ok(())
    }

    /// Request a cooperative stop after the current episode.
    fn should_stop(&self) -> bool {
        false
    }
}
