//! Decaying epsilon-greedy exploration with per-player cutoffs

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::tictactoe::Player;

/// Probability of playing a random move instead of the best known one
///
/// The rate starts at `initial_rate` and is multiplied by `decay` after every
/// episode. Independently, each player stops exploring altogether once the
/// episode index reaches its cutoff. Giving O a lower cutoff than X lets O
/// settle into pure exploitation while X keeps playing loosely, so O's record
/// against X shows whether the table has learned anything.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplorationSchedule {
    initial_rate: f64,
    rate: f64,
    decay: f64,
    x_cutoff: usize,
    o_cutoff: usize,
}

impl ExplorationSchedule {
    pub fn new(initial_rate: f64, decay: f64, x_cutoff: usize, o_cutoff: usize) -> Self {
        Self {
            initial_rate,
            rate: initial_rate,
            decay,
            x_cutoff,
            o_cutoff,
        }
    }

    /// Current exploration probability
    pub fn current_rate(&self) -> f64 {
        self.rate
    }

    /// Episode index from which `player` no longer explores
    pub fn cutoff(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_cutoff,
            Player::O => self.o_cutoff,
        }
    }

    /// Decide whether `player` explores on this move.
    ///
    /// One uniform sample is always drawn, even past the player's cutoff, so
    /// the random stream does not depend on the cutoffs.
    pub fn should_explore<R: Rng>(
        &self,
        rng: &mut R,
        player: Player,
        episode_index: usize,
    ) -> bool {
        let sample: f64 = rng.random();
        sample < self.rate && episode_index < self.cutoff(player)
    }

    /// Apply one episode's worth of decay
    pub fn decay(&mut self) {
        self.rate *= self.decay;
    }

    /// Restore the initial rate
    pub fn reset(&mut self) {
        self.rate = self.initial_rate;
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_full_rate_always_explores_before_cutoff() {
        let schedule = ExplorationSchedule::new(1.0, 0.99, 10, 10);
        let mut rng = StdRng::seed_from_u64(1);
        for episode in 0..10 {
            assert!(schedule.should_explore(&mut rng, Player::X, episode));
            assert!(schedule.should_explore(&mut rng, Player::O, episode));
        }
    }

    #[test]
    fn test_cutoffs_are_per_player() {
        let schedule = ExplorationSchedule::new(1.0, 0.99, 100, 50);
        let mut rng = StdRng::seed_from_u64(2);
        assert!(schedule.should_explore(&mut rng, Player::X, 50));
        assert!(!schedule.should_explore(&mut rng, Player::O, 50));
        assert!(!schedule.should_explore(&mut rng, Player::X, 100));
    }

    #[test]
    fn test_zero_rate_never_explores() {
        let schedule = ExplorationSchedule::new(0.0, 0.99, 100, 100);
        let mut rng = StdRng::seed_from_u64(3);
        assert!((0..1000).all(|_| !schedule.should_explore(&mut rng, Player::X, 0)));
    }

    #[test]
    fn test_sample_drawn_past_cutoff() {
        let schedule = ExplorationSchedule::new(1.0, 0.99, 0, 0);
        let mut a = StdRng::seed_from_u64(4);
        let mut b = StdRng::seed_from_u64(4);

        assert!(!schedule.should_explore(&mut a, Player::X, 5));
        let _: f64 = b.random();
        assert_eq!(a.random::<u64>(), b.random::<u64>());
    }

    #[test]
    fn test_decay_is_monotonic_and_positive() {
        let mut schedule = ExplorationSchedule::new(1.0, 0.9, 10, 10);
        let mut previous = schedule.current_rate();
        for _ in 0..100 {
            schedule.decay();
            assert!(schedule.current_rate() < previous);
            assert!(schedule.current_rate() > 0.0);
            previous = schedule.current_rate();
        }
        assert!((schedule.current_rate() - 0.9f64.powi(100)).abs() < 1e-12);

        schedule.reset();
        assert_eq!(schedule.current_rate(), 1.0);
    }
}
