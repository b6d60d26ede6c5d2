//! Pipeline board commands: `hireboard board`.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use console::style;

use hireboard::board_config::BoardConfig;
use hireboard::pipeline::{Board, DropOutcome, PipelineTracker, StderrNotifier};
use hireboard::store::open_store;

async fn load_tracker(config: &BoardConfig) -> Result<PipelineTracker> {
    let store = open_store(config)?;
    let tracker = PipelineTracker::with_board(
        store,
        Arc::new(StderrNotifier),
        Board::with_headers(config.headers()),
    );
    tracker
        .load()
        .await
        .context("Failed to load the pipeline board")?;
    Ok(tracker)
}

pub async fn cmd_board_show(config: &BoardConfig) -> Result<()> {
    let tracker = load_tracker(config).await?;
    print_board(&tracker.snapshot());
    Ok(())
}

pub async fn cmd_board_move(config: &BoardConfig, candidate: i64, position: usize) -> Result<()> {
    let tracker = load_tracker(config).await?;

    match tracker.drag_and_drop(candidate, position).await? {
        DropOutcome::Ignored => {
            println!("Candidate {} is not on the board; nothing moved.", candidate);
        }
        DropOutcome::Moved {
            candidate_id,
            from,
            to,
            status,
        } => {
            println!(
                "{} candidate {}: {} → {} (status \"{}\")",
                style("Moved").green().bold(),
                candidate_id,
                from,
                to,
                status
            );
            println!();
            print_board(&tracker.snapshot());
        }
        DropOutcome::RolledBack {
            candidate_id,
            error,
            ..
        } => {
            print_board(&tracker.snapshot());
            bail!("Move of candidate {} was rolled back: {}", candidate_id, error);
        }
    }
    Ok(())
}

pub(crate) fn print_board(board: &Board) {
    println!("{}", style("Pipeline").bold().cyan());
    println!();
    for column in board.columns() {
        println!(
            "{} {} {}",
            style(format!("[{}]", column.position)).dim(),
            style(&column.header).bold(),
            style(format!("({})", column.count)).dim()
        );
        for card in &column.cards {
            let score = card
                .score
                .map(|s| format!("{:.0}", s))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "    #{:<4} {:<28} {:>4}  {}",
                card.candidate_id, card.name, score, card.opening_label
            );
            if !card.skills.is_empty() {
                println!("          {}", style(card.skills.join(", ")).dim());
            }
        }
    }
    println!();
    let summary: Vec<String> = board.summary().iter().map(|c| c.to_string()).collect();
    println!(
        "{} {}  (total {})",
        style("Summary:").bold(),
        summary.join(" | "),
        board.total()
    );
}
