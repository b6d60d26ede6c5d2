//! Dashboard counters: `hireboard metrics`.

use anyhow::Result;
use console::style;

use hireboard::board_config::BoardConfig;
use hireboard::dashboard::DashboardMetrics;
use hireboard::store::open_store;

pub async fn cmd_metrics(config: &BoardConfig) -> Result<()> {
    let store = open_store(config)?;
    let metrics = DashboardMetrics::collect(store.as_ref()).await?;
    println!("{} {}", style("Candidates:").bold(), metrics.candidates);
    println!("{} {}", style("Open openings:").bold(), metrics.open_openings);
    Ok(())
}
