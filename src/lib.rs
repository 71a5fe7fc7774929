//! Temporal-difference self-play learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - Board representation with symmetry (D4) equivalence
//! - A value table over board states shared across symmetric positions
//! - A TD(0) self-play trainer with decaying epsilon-greedy exploration
//! - Observers for progress, window statistics and opening-value dumps
//! - Table persistence and a small CLI

pub mod cli;
pub mod error;
pub mod learning;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod types;

pub use error::{Error, Result};
pub use learning::{SelfPlayTrainer, TrainingConfig, ValueTable, train};
pub use tictactoe::{BoardState, GameOutcome, Player};
pub use types::Position;
