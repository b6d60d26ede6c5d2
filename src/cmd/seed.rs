//! Fixture import: `hireboard seed`.

use std::path::Path;

use anyhow::{Context, Result, bail};

use hireboard::board_config::{Backend, BoardConfig};
use hireboard::store::sqlite::{RecruitDb, SeedData};

pub fn cmd_seed(config: &BoardConfig, file: &Path) -> Result<()> {
    if config.backend() != Backend::Sqlite {
        bail!(
            "Seeding is only supported for the sqlite backend (current backend: {})",
            config.backend()
        );
    }

    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read seed file: {}", file.display()))?;
    let seed: SeedData = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse seed file: {}", file.display()))?;

    let db_path = config.db_path();
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    let db = RecruitDb::new(&db_path)?;
    let report = db.import(&seed)?;

    println!(
        "Imported {} opening(s), {} candidate(s), {} interview(s) into {}",
        report.openings,
        report.candidates,
        report.interviews,
        db_path.display()
    );
    Ok(())
}
