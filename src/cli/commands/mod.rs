//! Subcommand implementations; each exposes its clap args and an `execute`

pub mod best_line;
pub mod play;
pub mod train;
pub mod weights;
