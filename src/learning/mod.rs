//! Temporal-difference learning of board-state values through self-play
//!
//! The [`ValueTable`] holds win estimates for the player to move, the
//! [`SelfPlayTrainer`] plays games against itself and backs outcomes up
//! through them, and the policy helpers read a trained table back out as
//! move recommendations.

pub mod config;
pub mod exploration;
pub mod policy;
pub mod report;
pub mod serialization;
pub mod trainer;
pub mod value_table;

pub use config::TrainingConfig;
pub use exploration::ExplorationSchedule;
pub use policy::{
    LineStep, MoveValue, best_line, best_move, move_value, move_values, opening_values,
    ranked_moves,
};
pub use report::{EpisodeSummary, ExplorationCounts, TrainingReport};
pub use serialization::SavedValueTable;
pub use trainer::{
    PlayedEpisode, SelfPlayTrainer, TrainingOutcome, backup, terminal_reward, train,
    train_with_observers,
};
pub use value_table::{DEFAULT_VALUE, ValueTable};
