use clap::Parser;
use tempfile::tempdir;
use tictactoe_td::{
    cli::commands::{
        train::{TrainArgs, execute},
        weights,
    },
    learning::SavedValueTable,
};

fn parse_args<I, T>(args: I) -> TrainArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    TrainArgs::parse_from(args)
}

#[test]
fn train_writes_table_report_and_weights() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("table.msgpack");
    let tsv_path = tmp.path().join("table.tsv");
    let report_path = tmp.path().join("reports").join("run.json");
    let weights_path = tmp.path().join("weights.tsv");

    let args = parse_args([
        "tictactoe-td-train",
        "--episodes",
        "300",
        "--seed",
        "5",
        "--no-progress",
        "--output",
        table_path.to_str().unwrap(),
        "--tsv",
        tsv_path.to_str().unwrap(),
        "--report",
        report_path.to_str().unwrap(),
        "--weights",
        weights_path.to_str().unwrap(),
        "--weights-window",
        "100",
    ]);

    execute(args).expect("training should succeed");

    let contents = std::fs::read_to_string(&report_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["episodes"], 300);
    assert_eq!(parsed["stopped_early"], false);

    let saved = SavedValueTable::load_from_file(&table_path).unwrap();
    let config = saved.config.clone().unwrap();
    assert_eq!(config.episodes, 300);
    assert_eq!(config.o_exploration_cutoff, 180);
    assert_eq!(config.seed, Some(5));
    let table = saved.to_table().unwrap();
    assert_eq!(parsed["table_size"], table.len());

    let dumped = SavedValueTable::read_tsv(&tsv_path).unwrap();
    assert_eq!(dumped.entries, saved.entries);

    let weights = std::fs::read_to_string(&weights_path).unwrap();
    let rows: Vec<_> = weights.lines().collect();
    assert_eq!(rows.len(), 4, "header plus one row per 100 episodes");
    assert!(rows[3].starts_with("300\t"));
}

#[test]
fn train_rejects_bad_learning_rate() {
    let args = parse_args(["tictactoe-td-train", "-n", "10", "--alpha", "0", "--no-progress"]);
    assert!(execute(args).is_err());
}

#[test]
fn weights_reads_saved_table() {
    let tmp = tempdir().unwrap();
    let table_path = tmp.path().join("table.msgpack");
    execute(parse_args([
        "tictactoe-td-train",
        "-n",
        "50",
        "--seed",
        "1",
        "--no-progress",
        "-O",
        table_path.to_str().unwrap(),
    ]))
    .unwrap();

    let args = weights::WeightsArgs::parse_from([
        "tictactoe-td-weights",
        "X...O...._X",
        "--table",
        table_path.to_str().unwrap(),
    ]);
    weights::execute(args).expect("weights on a saved table");

    let bad = weights::WeightsArgs::parse_from([
        "tictactoe-td-weights",
        "XXXXXXXXX",
        "--table",
        table_path.to_str().unwrap(),
    ]);
    assert!(weights::execute(bad).is_err());
}
