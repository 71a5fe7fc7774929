//! Training pipeline: a trainer plus the observers watching it

use crate::{
    Result,
    learning::{SelfPlayTrainer, TrainingConfig, TrainingOutcome, ValueTable},
    ports::Observer,
};

/// Self-play training session with attached observers
pub struct TrainingPipeline {
    config: TrainingConfig,
    table: Option<ValueTable>,
    observers: Vec<Box<dyn Observer>>,
}

impl TrainingPipeline {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            table: None,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Resume from a previously learned table instead of starting empty
    pub fn with_table(mut self, table: ValueTable) -> Self {
        self.table = Some(table);
        self
    }

    pub fn config(&self) -> &TrainingConfig {
        &self.config
    }

    /// Run the session to completion or until an observer stops it
    pub fn run(mut self) -> Result<TrainingOutcome> {
        let mut trainer = SelfPlayTrainer::new(self.config)?;
        if let Some(table) = self.table.take() {
            log::debug!("resuming from a table of {} states", table.len());
            trainer = trainer.with_table(table);
        }

        let report = trainer.run(&mut self.observers)?;
        Ok(TrainingOutcome {
            table: trainer.into_table(),
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use super::*;
    use crate::pipeline::StatsObserver;

    #[test]
    fn test_pipeline_runs_with_observers() {
        let outcome = TrainingPipeline::new(TrainingConfig::for_episodes(40).with_seed(4))
            .with_observer(Box::new(StatsObserver::new(10)))
            .run()
            .unwrap();

        assert_eq!(outcome.report.episodes, 40);
        assert_eq!(
            outcome.report.x_wins + outcome.report.o_wins + outcome.report.ties,
            40
        );
        assert_eq!(outcome.report.table_size, outcome.table.len());
    }

    #[test]
    fn test_pipeline_early_stop() {
        // A one-episode window closes perfect as soon as X fails to win once.
        let outcome = TrainingPipeline::new(TrainingConfig::for_episodes(10_000).with_seed(8))
            .with_observer(Box::new(StatsObserver::new(1).stop_after_perfect_windows(NonZeroUsize::MIN)))
            .run()
            .unwrap();

        assert!(outcome.report.stopped_early);
        assert!(outcome.report.episodes < 10_000);
        assert_eq!(outcome.report.x_wins, outcome.report.episodes - 1);
    }

    #[test]
    fn test_pipeline_resumes_table() {
        let first = TrainingPipeline::new(TrainingConfig::for_episodes(30).with_seed(1))
            .run()
            .unwrap();
        let size = first.table.len();

        let second = TrainingPipeline::new(TrainingConfig::for_episodes(30).with_seed(2))
            .with_table(first.table)
            .run()
            .unwrap();
        assert!(second.table.len() >= size);
    }
}
