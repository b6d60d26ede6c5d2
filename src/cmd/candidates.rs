//! Candidate table command: `hireboard candidates`.

use anyhow::Result;
use console::style;
use tracing::warn;

use hireboard::board_config::BoardConfig;
use hireboard::pipeline::OpeningLookup;
use hireboard::store::open_store;

pub async fn cmd_candidates_list(config: &BoardConfig) -> Result<()> {
    let store = open_store(config)?;
    let candidates = store.list_candidates().await?;
    let lookup = match store.list_openings().await {
        Ok(openings) => OpeningLookup::from_openings(&openings),
        Err(e) => {
            warn!(error = %e, "failed to load openings; using raw opening labels");
            OpeningLookup::default()
        }
    };

    if candidates.is_empty() {
        println!("No candidates found.");
        return Ok(());
    }

    println!(
        "{}",
        style(format!(
            "{:<5} {:<24} {:<28} {:<24} {:>5}  {}",
            "ID", "Name", "Email", "Address", "Score", "Suggested opening"
        ))
        .bold()
    );
    for candidate in &candidates {
        println!(
            "{:<5} {:<24} {:<28} {:<24} {:>5}  {}",
            candidate.id,
            candidate.name,
            candidate.email.as_deref().unwrap_or("-"),
            candidate.address.as_deref().unwrap_or("-"),
            candidate
                .score
                .map(|s| format!("{:.0}", s))
                .unwrap_or_else(|| "-".to_string()),
            lookup.label_for(candidate.suggested_opening.as_ref()),
        );
    }
    println!();
    println!("{} candidate(s)", candidates.len());
    Ok(())
}
