//! Upcoming interviews: `hireboard interviews`.

use anyhow::Result;
use console::style;

use hireboard::board_config::BoardConfig;
use hireboard::store::open_store;
use hireboard::util::today_in_luanda;

pub async fn cmd_interviews(config: &BoardConfig, limit: Option<usize>) -> Result<()> {
    let store = open_store(config)?;
    let limit = limit.unwrap_or_else(|| config.upcoming_limit());
    let interviews = store.upcoming_interviews(today_in_luanda(), limit).await?;

    if interviews.is_empty() {
        println!("Nenhuma entrevista agendada.");
        return Ok(());
    }

    for interview in &interviews {
        println!(
            "{}  {}",
            style(interview.scheduled_display()).bold(),
            style(format!("[{}]", interview.status_label())).cyan()
        );
        println!(
            "    {} · {}",
            interview.candidate_label(),
            interview.opening_label()
        );
        println!("    Interviewer: {}", interview.interviewer_label());
        if let Some(notes) = interview.notes.as_deref().filter(|n| !n.trim().is_empty()) {
            println!("    {}", style(notes).dim());
        }
    }
    Ok(())
}
