//! Backing table store for candidates, openings and interviews.
//!
//! Every dashboard operation is a direct passthrough to a `Store`. Two
//! implementations exist:
//!
//! | Module   | Backend                                                   |
//! |----------|-----------------------------------------------------------|
//! | `sqlite` | Local SQLite file (development, tests, offline use)       |
//! | `rest`   | Hosted PostgREST-style table API (`/rest/v1/<table>`)      |
//!
//! Relation shapes returned by the hosted API (single object vs. list) are
//! normalized inside the adapter, so callers only ever see `Option<T>`.

pub mod models;
pub mod rest;
pub mod sqlite;

use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

use crate::board_config::{Backend, BoardConfig, ENV_STORE_URL};
use crate::errors::StoreError;
pub use models::{Candidate, Interview, Opening, OpeningDraft, OpeningRef};

/// Abstraction over the table store.
/// Real implementations: `SqliteStore`, `RestStore`.
#[async_trait]
pub trait Store: Send + Sync {
    /// All candidates, in store order.
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError>;

    async fn count_candidates(&self) -> Result<usize, StoreError>;

    /// All openings, newest (highest id) first.
    async fn list_openings(&self) -> Result<Vec<Opening>, StoreError>;

    async fn count_open_openings(&self) -> Result<usize, StoreError>;

    async fn create_opening(&self, draft: &OpeningDraft) -> Result<Opening, StoreError>;

    async fn update_opening(&self, id: i64, draft: &OpeningDraft) -> Result<Opening, StoreError>;

    async fn delete_opening(&self, id: i64) -> Result<(), StoreError>;

    /// Interviews scheduled on or after `from`, earliest first.
    async fn upcoming_interviews(
        &self,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Interview>, StoreError>;

    /// Set a candidate's stored status label.
    async fn update_candidate_status(&self, id: i64, status: &str) -> Result<(), StoreError>;
}

/// Open the store selected by `config`.
pub fn open_store(config: &BoardConfig) -> Result<Arc<dyn Store>> {
    match config.backend() {
        Backend::Sqlite => {
            let path = config.db_path();
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
            debug!(path = %path.display(), "opening sqlite store");
            let store = sqlite::SqliteStore::open(&path)
                .with_context(|| format!("Failed to open database: {}", path.display()))?;
            Ok(Arc::new(store))
        }
        Backend::Rest => {
            let url = config.rest_url().with_context(|| {
                format!(
                    "REST backend needs store.rest.url in hireboard.toml or {}",
                    ENV_STORE_URL
                )
            })?;
            let api_key = config.api_key()?;
            debug!(%url, "using rest store");
            Ok(Arc::new(rest::RestStore::new(url, api_key)))
        }
    }
}
