//! Output formatting for CLI

use crate::{
    learning::{LineStep, MoveValue, TrainingReport},
    tictactoe::{BoardState, Player},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(40));
    println!("{title}");
    println!("{}", "=".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Label/value rows shown after a training session
pub fn report_rows(report: &TrainingReport) -> Vec<(String, String)> {
    let mut rows = vec![("Episodes".to_string(), format_number(report.episodes))];
    for player in Player::ALL {
        rows.push((format!("{player} wins"), format_number(report.wins(player))));
    }
    rows.push((
        "Ties".to_string(),
        format!(
            "{} ({:.1}%)",
            format_number(report.ties),
            report.tie_rate() * 100.0
        ),
    ));
    rows.push((
        "Random moves".to_string(),
        format!(
            "X {} / O {}",
            format_number(report.exploratory_moves.x),
            format_number(report.exploratory_moves.o)
        ),
    ));
    rows.push((
        "Final exploration".to_string(),
        format!("{:.6}", report.final_exploration_rate),
    ));
    rows.push(("States learned".to_string(), format_number(report.table_size)));
    if report.stopped_early {
        rows.push(("Stopped early".to_string(), "yes".to_string()));
    }
    rows
}

pub fn print_report(report: &TrainingReport) {
    for (key, value) in report_rows(report) {
        print_kv(&key, &value);
    }
}

/// Move values laid out on the board; occupied cells show their mark
pub fn format_move_grid(state: &BoardState, moves: &[MoveValue]) -> String {
    let mut cells: Vec<String> = state
        .cells
        .iter()
        .map(|cell| format!("{:>6}", cell.to_char()))
        .collect();
    for mv in moves {
        cells[mv.position.index()] = format!("{:>6.3}", mv.value);
    }
    cells
        .chunks(3)
        .map(|row| row.join(" "))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn print_line(steps: &[LineStep]) {
    for (ply, step) in steps.iter().enumerate() {
        println!(
            "\nMove {} ({} to play, chooses {}):",
            ply + 1,
            step.state.to_move,
            step.chosen
        );
        println!("{}", format_move_grid(&step.state, &step.ranked));
    }
}
