//! Per-episode summaries and the end-of-session training report

use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    tictactoe::{GameOutcome, Player},
};

/// Number of exploratory (random) moves each player made
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplorationCounts {
    pub x: usize,
    pub o: usize,
}

impl ExplorationCounts {
    pub fn record(&mut self, player: Player) {
        match player {
            Player::X => self.x += 1,
            Player::O => self.o += 1,
        }
    }

    pub fn add(&mut self, other: ExplorationCounts) {
        self.x += other.x;
        self.o += other.o;
    }
}

/// What observers learn about one finished self-play episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeSummary {
    /// 0-based episode index within the session
    pub episode_index: usize,
    pub first_player: Player,
    pub outcome: GameOutcome,
    pub moves: usize,
    pub exploratory_moves: ExplorationCounts,
    /// Exploration rate in effect while the episode was played
    pub exploration_rate: f64,
    /// Whether the backward pass ran for this episode
    pub backed_up: bool,
}

/// Totals for a whole training session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub episodes: usize,
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
    pub exploratory_moves: ExplorationCounts,
    pub final_exploration_rate: f64,
    pub table_size: usize,
    /// True when an observer ended the session before the episode budget ran out
    pub stopped_early: bool,
}

impl TrainingReport {
    pub fn record(&mut self, summary: &EpisodeSummary) {
        self.episodes += 1;
        match summary.outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
        self.exploratory_moves.add(summary.exploratory_moves);
    }

    /// Wins for `player`
    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    /// Fraction of episodes that ended in a tie
    pub fn tie_rate(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.ties as f64 / self.episodes as f64
        }
    }

    /// Save report to a pretty JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create report {}", path.display()), e))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }
}
