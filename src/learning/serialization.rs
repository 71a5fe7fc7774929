//! Saving and restoring learned value tables.
//!
//! The binary format is MessagePack holding `(label, value)` pairs, where a
//! label is [`BoardState::encode`] text. A tab-separated dump of the same
//! pairs is available for inspection in a spreadsheet.

use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use serde::{Deserialize, Serialize};

use super::{config::TrainingConfig, report::TrainingReport, value_table::ValueTable};
use crate::{Error, Result, tictactoe::BoardState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedValueTable {
    pub version: u32,
    /// Sorted by label
    pub entries: Vec<(String, f64)>,
    pub config: Option<TrainingConfig>,
    pub report: Option<TrainingReport>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TsvRow {
    state: String,
    value: f64,
}

impl SavedValueTable {
    pub const VERSION: u32 = 1;

    pub fn from_table(table: &ValueTable) -> Self {
        let mut entries: Vec<_> = table
            .iter()
            .map(|(state, &value)| (state.encode(), value))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Self {
            version: Self::VERSION,
            entries,
            config: None,
            report: None,
        }
    }

    pub fn with_config(mut self, config: TrainingConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_report(mut self, report: TrainingReport) -> Self {
        self.report = Some(report);
        self
    }

    /// Rebuild the table, checking the format version and every label.
    pub fn to_table(&self) -> Result<ValueTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedTableVersion {
                found: self.version,
                expected: Self::VERSION,
            });
        }

        let mut table = ValueTable::new();
        for (label, value) in &self.entries {
            table.insert_raw(BoardState::from_label(label)?, *value);
        }
        Ok(table)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .map_err(|e| Error::io(format!("create table {}", path.display()), e))?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, self)?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .map_err(|e| Error::io(format!("open table {}", path.display()), e))?;
        Ok(rmp_serde::decode::from_read(BufReader::new(file))?)
    }

    /// Write `state<TAB>value` rows with a header line
    pub fn write_tsv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let mut writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_path(path)?;
        for (state, value) in &self.entries {
            writer.serialize(TsvRow {
                state: state.clone(),
                value: *value,
            })?;
        }
        writer
            .flush()
            .map_err(|e| Error::io(format!("flush {}", path.display()), e))?;
        Ok(())
    }

    /// Read a dump written by [`write_tsv`](Self::write_tsv); config and report are not kept there
    pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .from_path(path.as_ref())?;
        let entries = reader
            .deserialize::<TsvRow>()
            .map(|row| row.map(|row| (row.state, row.value)))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Self {
            version: Self::VERSION,
            entries,
            config: None,
            report: None,
        })
    }
}
