//! Train command - Run a self-play session and save what was learned

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use crate::{
    cli::{
        config::TrainingArgs,
        output::{print_kv, print_report, print_section},
    },
    learning::{SavedValueTable, opening_values},
    pipeline::FirstMoveWeightsObserver,
    tictactoe::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train a value table by self-play")]
pub struct TrainArgs {
    #[command(flatten)]
    pub training: TrainingArgs,

    /// Output file for the learned table (MessagePack)
    #[arg(long, short = 'O')]
    pub output: Option<PathBuf>,

    /// Also write the table as `state<TAB>value` rows
    #[arg(long)]
    pub tsv: Option<PathBuf>,

    /// Optional path for writing the training report as JSON
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Optional TSV file of window-averaged opening values for O
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Episodes per row of the weights file
    #[arg(long, default_value_t = FirstMoveWeightsObserver::DEFAULT_WINDOW)]
    pub weights_window: usize,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let config = args.training.to_config();
    config.validate()?;

    let mut pipeline = args.training.pipeline();

    if let Some(path) = &args.weights {
        let observer = FirstMoveWeightsObserver::new(path, args.weights_window)
            .with_context(|| format!("Failed to create weights file: {}", path.display()))?;
        pipeline = pipeline.with_observer(Box::new(observer));
    }

    let outcome = pipeline.run().context("Training failed")?;

    print_section("Training complete");
    print_report(&outcome.report);

    println!("\nOpening values for X:");
    for mv in opening_values(&outcome.table, Player::X)? {
        print_kv(&format!("cell {}", mv.position), &format!("{:.4}", mv.value));
    }

    if args.output.is_some() || args.tsv.is_some() {
        let saved = SavedValueTable::from_table(&outcome.table)
            .with_config(config.clone())
            .with_report(outcome.report.clone());

        if let Some(path) = &args.output {
            saved
                .save_to_file(path)
                .with_context(|| format!("Failed to save table: {}", path.display()))?;
            log::info!("saved {} states to {}", saved.entries.len(), path.display());
            println!("\nTable saved to {}", path.display());
        }
        if let Some(path) = &args.tsv {
            saved
                .write_tsv(path)
                .with_context(|| format!("Failed to write TSV: {}", path.display()))?;
            println!("Table exported to {}", path.display());
        }
    }

    if let Some(path) = &args.report {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        outcome
            .report
            .save(path)
            .with_context(|| format!("Failed to write report: {}", path.display()))?;
        println!("Report written to {}", path.display());
    }

    Ok(())
}
