//! Training session configuration.

use serde::{Deserialize, Serialize};

use super::exploration::ExplorationSchedule;
use crate::{Error, Result};

/// Fraction of the episode budget during which O may explore.
const O_EXPLORATION_FRACTION: f64 = 0.6;
/// Fraction of the episode budget during which X may explore.
const X_EXPLORATION_FRACTION: f64 = 0.8;

/// Configuration for a self-play training session.
///
/// Every knob of the learner is here; nothing in the training loop is a
/// hardcoded constant. Defaults reproduce the long reference run: 200,000
/// episodes, learning rate 0.8, exploration decaying from 1.0 by 0.99999 per
/// episode, O exploring for the first 60% of the run, X for the first 80%,
/// and backups stopping together with O's exploration.
///
/// # Examples
///
/// ```
/// use tictactoe_td::learning::TrainingConfig;
///
/// let config = TrainingConfig::for_episodes(5_000)
///     .with_learning_rate(0.5)
///     .with_seed(42);
/// assert_eq!(config.o_exploration_cutoff, 3_000);
/// assert_eq!(config.x_exploration_cutoff, 4_000);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Step size α of the TD(0) update, in (0, 1]
    pub learning_rate: f64,
    /// Exploration probability for the first episode, in [0, 1]
    pub initial_exploration_rate: f64,
    /// Multiplicative decay applied after each episode, in (0, 1)
    pub exploration_decay: f64,
    /// X never explores from this episode index on
    pub x_exploration_cutoff: usize,
    /// O never explores from this episode index on
    pub o_exploration_cutoff: usize,
    /// Backups are skipped from this episode index on
    pub backup_cutoff: usize,
    /// Total number of self-play episodes
    pub episodes: usize,
    /// Random seed for reproducible runs
    pub seed: Option<u64>,
}

impl TrainingConfig {
    /// Default rates, with cutoffs scaled to an episode budget.
    pub fn for_episodes(episodes: usize) -> Self {
        let o_cutoff = (episodes as f64 * O_EXPLORATION_FRACTION) as usize;
        let x_cutoff = (episodes as f64 * X_EXPLORATION_FRACTION) as usize;
        Self {
            learning_rate: 0.8,
            initial_exploration_rate: 1.0,
            exploration_decay: 0.99999,
            x_exploration_cutoff: x_cutoff,
            o_exploration_cutoff: o_cutoff,
            backup_cutoff: o_cutoff,
            episodes,
            seed: None,
        }
    }

    pub fn with_learning_rate(mut self, learning_rate: f64) -> Self {
        self.learning_rate = learning_rate;
        self
    }

    pub fn with_initial_exploration_rate(mut self, rate: f64) -> Self {
        self.initial_exploration_rate = rate;
        self
    }

    pub fn with_exploration_decay(mut self, decay: f64) -> Self {
        self.exploration_decay = decay;
        self
    }

    /// Set both players' exploration cutoffs.
    pub fn with_exploration_cutoffs(mut self, x_cutoff: usize, o_cutoff: usize) -> Self {
        self.x_exploration_cutoff = x_cutoff;
        self.o_exploration_cutoff = o_cutoff;
        self
    }

    pub fn with_backup_cutoff(mut self, cutoff: usize) -> Self {
        self.backup_cutoff = cutoff;
        self
    }

    /// Set the random seed for deterministic behavior.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every parameter before any episode runs.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] naming the first offending parameter.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidConfiguration { message });

        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return invalid(format!(
                "learning rate must be in (0, 1], got {}",
                self.learning_rate
            ));
        }
        if !(0.0..=1.0).contains(&self.initial_exploration_rate) {
            return invalid(format!(
                "initial exploration rate must be in [0, 1], got {}",
                self.initial_exploration_rate
            ));
        }
        if !(self.exploration_decay > 0.0 && self.exploration_decay < 1.0) {
            return invalid(format!(
                "exploration decay must be in (0, 1), got {}",
                self.exploration_decay
            ));
        }
        if self.episodes == 0 {
            return invalid("episode budget must be at least 1".to_string());
        }
        Ok(())
    }

    /// Build the exploration schedule described by this configuration.
    pub fn exploration_schedule(&self) -> ExplorationSchedule {
        ExplorationSchedule::new(
            self.initial_exploration_rate,
            self.exploration_decay,
            self.x_exploration_cutoff,
            self.o_exploration_cutoff,
        )
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self::for_episodes(200_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_reference_run() {
        let config = TrainingConfig::default();
        assert_eq!(config.episodes, 200_000);
        assert_eq!(config.o_exploration_cutoff, 120_000);
        assert_eq!(config.x_exploration_cutoff, 160_000);
        assert_eq!(config.backup_cutoff, 120_000);
        assert_eq!(config.learning_rate, 0.8);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_learning_rate_out_of_range() {
        for rate in [0.0, -0.1, 1.5, f64::NAN] {
            let err = TrainingConfig::default()
                .with_learning_rate(rate)
                .validate()
                .unwrap_err();
            assert!(err.to_string().contains("learning rate"), "{err}");
        }
        assert!(TrainingConfig::default().with_learning_rate(1.0).validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_exploration_parameters() {
        assert!(
            TrainingConfig::default()
                .with_initial_exploration_rate(1.2)
                .validate()
                .is_err()
        );
        assert!(
            TrainingConfig::default()
                .with_exploration_decay(1.0)
                .validate()
                .is_err()
        );
        assert!(
            TrainingConfig::default()
                .with_exploration_decay(0.0)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn test_rejects_empty_budget() {
        let err = TrainingConfig::for_episodes(0).validate().unwrap_err();
        assert!(err.to_string().contains("episode budget"));
    }

    #[test]
    fn test_schedule_uses_config() {
        let config = TrainingConfig::for_episodes(10).with_initial_exploration_rate(0.5);
        let schedule = config.exploration_schedule();
        assert_eq!(schedule.current_rate(), 0.5);
        assert_eq!(schedule.cutoff(crate::tictactoe::Player::O), 6);
        assert_eq!(schedule.cutoff(crate::tictactoe::Player::X), 8);
    }
}
