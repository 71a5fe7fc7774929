//! Training pipeline and the observers that report on it
//!
//! This module provides:
//! - A pipeline wiring a self-play trainer to any number of observers
//! - A progress bar, per-window statistics with optional early stop, and a
//!   first-move weights file

pub mod observers;
pub mod training;

// Re-export observer implementations (adapters)
pub use observers::{FirstMoveWeightsObserver, ProgressObserver, StatsObserver, WindowStats};
pub use training::TrainingPipeline;

pub use crate::ports::Observer;
