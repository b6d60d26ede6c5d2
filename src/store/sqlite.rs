use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{Connection, params};
use serde::Deserialize;

use super::Store;
use super::models::*;
use crate::errors::StoreError;

/// Async-safe handle to the local recruitment database.
///
/// Wraps `RecruitDb` behind `Arc<Mutex>` and runs all access on tokio's
/// blocking thread pool via `spawn_blocking`, so synchronous SQLite I/O
/// never ties up async worker threads.
#[derive(Clone)]
pub struct SqliteStore {
    inner: Arc<std::sync::Mutex<RecruitDb>>,
}

impl SqliteStore {
    pub fn new(db: RecruitDb) -> Self {
        Self {
            inner: Arc::new(std::sync::Mutex::new(db)),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(RecruitDb::new(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(RecruitDb::new_in_memory()?))
    }

    /// Run a closure with access to the database on a blocking thread.
    /// All data passed into `f` must be owned (`'static`).
    pub async fn call<F, R>(&self, f: F) -> Result<R, StoreError>
    where
        F: FnOnce(&RecruitDb) -> Result<R> + Send + 'static,
        R: Send + 'static,
    {
        let db = self.inner.clone();
        tokio::task::spawn_blocking(move || {
            let guard = db.lock().map_err(|_| StoreError::LockPoisoned)?;
            f(&guard).map_err(StoreError::Database)
        })
        .await
        .map_err(|e| StoreError::Database(anyhow::anyhow!("DB task panicked: {}", e)))?
    }

    /// Acquire the database mutex synchronously. Used for seeding and tests.
    pub fn lock_sync(&self) -> Result<std::sync::MutexGuard<'_, RecruitDb>> {
        self.inner
            .lock()
            .map_err(|e| anyhow::anyhow!("DB lock poisoned: {}", e))
    }
}

#[async_trait]
impl Store for SqliteStore {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        self.call(|db| db.list_candidates()).await
    }

    async fn count_candidates(&self) -> Result<usize, StoreError> {
        self.call(|db| db.count_candidates()).await
    }

    async fn list_openings(&self) -> Result<Vec<Opening>, StoreError> {
        self.call(|db| db.list_openings()).await
    }

    async fn count_open_openings(&self) -> Result<usize, StoreError> {
        self.call(|db| db.count_open_openings()).await
    }

    async fn create_opening(&self, draft: &OpeningDraft) -> Result<Opening, StoreError> {
        draft.validate().map_err(StoreError::Invalid)?;
        let draft = draft.clone();
        self.call(move |db| db.create_opening(&draft)).await
    }

    async fn update_opening(&self, id: i64, draft: &OpeningDraft) -> Result<Opening, StoreError> {
        draft.validate().map_err(StoreError::Invalid)?;
        let draft = draft.clone();
        self.call(move |db| db.update_opening(id, &draft))
            .await?
            .ok_or(StoreError::NotFound {
                table: "openings",
                id,
            })
    }

    async fn delete_opening(&self, id: i64) -> Result<(), StoreError> {
        match self.call(move |db| db.delete_opening(id)).await? {
            true => Ok(()),
            false => Err(StoreError::NotFound {
                table: "openings",
                id,
            }),
        }
    }

    async fn upcoming_interviews(
        &self,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Interview>, StoreError> {
        self.call(move |db| db.upcoming_interviews(from, limit)).await
    }

    async fn update_candidate_status(&self, id: i64, status: &str) -> Result<(), StoreError> {
        let status = status.to_string();
        match self
            .call(move |db| db.update_candidate_status(id, &status))
            .await?
        {
            true => Ok(()),
            false => Err(StoreError::NotFound {
                table: "candidates",
                id,
            }),
        }
    }
}

// ── Seed data ─────────────────────────────────────────────────────────

/// Fixture format accepted by `RecruitDb::import` (`hireboard seed`).
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub openings: Vec<NewOpening>,
    #[serde(default)]
    pub candidates: Vec<NewCandidate>,
    #[serde(default)]
    pub interviews: Vec<NewInterview>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewOpening {
    pub id: Option<i64>,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
    pub opened_at: Option<String>,
    pub closes_at: Option<String>,
    pub admin_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewCandidate {
    pub id: Option<i64>,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub score: Option<f64>,
    pub opening_id: Option<i64>,
    pub suggested_opening: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NewInterview {
    pub id: Option<i64>,
    pub scheduled_at: Option<String>,
    pub status: Option<String>,
    pub interviewer: Option<String>,
    pub notes: Option<String>,
    pub opening_id: Option<i64>,
    pub candidate_id: Option<i64>,
}

/// Counts of rows written by `RecruitDb::import`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SeedReport {
    pub openings: usize,
    pub candidates: usize,
    pub interviews: usize,
}

pub struct RecruitDb {
    conn: Connection,
}

impl RecruitDb {
    /// Open (or create) a SQLite database at the given path and run migrations.
    pub fn new(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).context("Failed to open SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Create an in-memory SQLite database (for testing).
    pub fn new_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory SQLite database")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    fn init(&self) -> Result<()> {
        self.conn
            .execute_batch("PRAGMA foreign_keys = ON;")
            .context("Failed to enable foreign keys")?;
        self.run_migrations().context("Failed to run migrations")?;
        Ok(())
    }

    fn run_migrations(&self) -> Result<()> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS openings (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    title TEXT NOT NULL,
                    description TEXT,
                    requirements TEXT,
                    status TEXT NOT NULL DEFAULT 'aberta',
                    opened_at TEXT NOT NULL DEFAULT (datetime('now')),
                    closes_at TEXT,
                    admin_id INTEGER
                );

                CREATE TABLE IF NOT EXISTS candidates (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    name TEXT NOT NULL,
                    email TEXT,
                    address TEXT,
                    status TEXT,
                    score REAL,
                    opening_id INTEGER REFERENCES openings(id) ON DELETE SET NULL,
                    suggested_opening TEXT,
                    skills TEXT NOT NULL DEFAULT '[]'
                );

                CREATE TABLE IF NOT EXISTS interviews (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    scheduled_at TEXT,
                    status TEXT,
                    interviewer TEXT,
                    notes TEXT,
                    opening_id INTEGER REFERENCES openings(id) ON DELETE SET NULL,
                    candidate_id INTEGER REFERENCES candidates(id) ON DELETE SET NULL
                );

                CREATE INDEX IF NOT EXISTS idx_candidates_opening ON candidates(opening_id);
                CREATE INDEX IF NOT EXISTS idx_interviews_scheduled ON interviews(scheduled_at);
                ",
            )
            .context("Failed to create tables")?;
        Ok(())
    }

    // ── Candidates ────────────────────────────────────────────────────

    pub fn list_candidates(&self) -> Result<Vec<Candidate>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT id, name, email, address, status, score, opening_id, suggested_opening, skills
                 FROM candidates ORDER BY id",
            )
            .context("Failed to prepare list_candidates")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(CandidateRow {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    address: row.get(3)?,
                    status: row.get(4)?,
                    score: row.get(5)?,
                    opening_id: row.get(6)?,
                    suggested_opening: row.get(7)?,
                    skills: row.get(8)?,
                })
            })
            .context("Failed to query candidates")?;
        let mut candidates = Vec::new();
        for row in rows {
            let r = row.context("Failed to read candidate row")?;
            candidates.push(r.into_candidate()?);
        }
        Ok(candidates)
    }

    pub fn count_candidates(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM candidates", [], |row| row.get(0))
            .context("Failed to count candidates")?;
        Ok(count as usize)
    }

    pub fn insert_candidate(&self, candidate: &NewCandidate) -> Result<i64> {
        let skills =
            serde_json::to_string(&candidate.skills).context("Failed to encode skills")?;
        self.conn
            .execute(
                "INSERT INTO candidates (id, name, email, address, status, score, opening_id, suggested_opening, skills)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    candidate.id,
                    candidate.name,
                    candidate.email,
                    candidate.address,
                    candidate.status,
                    candidate.score,
                    candidate.opening_id,
                    candidate.suggested_opening,
                    skills,
                ],
            )
            .context("Failed to insert candidate")?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Returns `false` when no candidate has the given id.
    pub fn update_candidate_status(&self, id: i64, status: &str) -> Result<bool> {
        let count = self
            .conn
            .execute(
                "UPDATE candidates SET status = ?1 WHERE id = ?2",
                params![status, id],
            )
            .context("Failed to update candidate status")?;
        Ok(count > 0)
    }

    pub fn candidate_status(&self, id: i64) -> Result<Option<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT status FROM candidates WHERE id = ?1")
            .context("Failed to prepare candidate_status")?;
        let mut rows = stmt
            .query_map(params![id], |row| row.get::<_, Option<String>>(0))
            .context("Failed to query candidate status")?;
        match rows.next() {
            Some(row) => Ok(row.context("Failed to read candidate status")?),
            None => Ok(None),
        }
    }

    // ── Openings ──────────────────────────────────────────────────────

    pub fn list_openings(&self) -> Result<Vec<Opening>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT o.id, o.title, o.description, o.requirements, o.status, o.opened_at, o.closes_at, o.admin_id,
                        (SELECT COUNT(*) FROM candidates c WHERE c.opening_id = o.id)
                 FROM openings o ORDER BY o.id DESC",
            )
            .context("Failed to prepare list_openings")?;
        let rows = stmt
            .query_map([], row_to_opening)
            .context("Failed to query openings")?;
        let mut openings = Vec::new();
        for row in rows {
            openings.push(row.context("Failed to read opening row")?);
        }
        Ok(openings)
    }

    pub fn get_opening(&self, id: i64) -> Result<Option<Opening>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT o.id, o.title, o.description, o.requirements, o.status, o.opened_at, o.closes_at, o.admin_id,
                        (SELECT COUNT(*) FROM candidates c WHERE c.opening_id = o.id)
                 FROM openings o WHERE o.id = ?1",
            )
            .context("Failed to prepare get_opening")?;
        let mut rows = stmt
            .query_map(params![id], row_to_opening)
            .context("Failed to query opening")?;
        match rows.next() {
            Some(row) => Ok(Some(row.context("Failed to read opening row")?)),
            None => Ok(None),
        }
    }

    pub fn count_open_openings(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row(
                "SELECT COUNT(*) FROM openings WHERE status = 'aberta'",
                [],
                |row| row.get(0),
            )
            .context("Failed to count open openings")?;
        Ok(count as usize)
    }

    pub fn create_opening(&self, draft: &OpeningDraft) -> Result<Opening> {
        self.conn
            .execute(
                "INSERT INTO openings (title, description, requirements, closes_at, admin_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    draft.title,
                    draft.description,
                    draft.requirements,
                    draft.closes_on.map(|d| d.format("%Y-%m-%d").to_string()),
                    draft.admin_id,
                ],
            )
            .context("Failed to insert opening")?;
        let id = self.conn.last_insert_rowid();
        self.get_opening(id)?.context("Opening not found after insert")
    }

    /// Returns `None` when no opening has the given id.
    pub fn update_opening(&self, id: i64, draft: &OpeningDraft) -> Result<Option<Opening>> {
        let count = self
            .conn
            .execute(
                "UPDATE openings SET title = ?1, description = ?2, requirements = ?3, closes_at = ?4, admin_id = ?5
                 WHERE id = ?6",
                params![
                    draft.title,
                    draft.description,
                    draft.requirements,
                    draft.closes_on.map(|d| d.format("%Y-%m-%d").to_string()),
                    draft.admin_id,
                    id,
                ],
            )
            .context("Failed to update opening")?;
        if count == 0 {
            return Ok(None);
        }
        self.get_opening(id)
    }

    pub fn delete_opening(&self, id: i64) -> Result<bool> {
        let count = self
            .conn
            .execute("DELETE FROM openings WHERE id = ?1", params![id])
            .context("Failed to delete opening")?;
        Ok(count > 0)
    }

    pub fn insert_opening(&self, opening: &NewOpening) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO openings (id, title, description, requirements, status, opened_at, closes_at, admin_id)
                 VALUES (?1, ?2, ?3, ?4, COALESCE(?5, 'aberta'), COALESCE(?6, datetime('now')), ?7, ?8)",
                params![
                    opening.id,
                    opening.title,
                    opening.description,
                    opening.requirements,
                    opening.status,
                    opening.opened_at,
                    opening.closes_at,
                    opening.admin_id,
                ],
            )
            .context("Failed to insert opening")?;
        Ok(self.conn.last_insert_rowid())
    }

    // ── Interviews ────────────────────────────────────────────────────

    pub fn upcoming_interviews(&self, from: NaiveDate, limit: usize) -> Result<Vec<Interview>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT i.id, i.scheduled_at, i.status, i.interviewer, i.notes, o.title, c.name
                 FROM interviews i
                 LEFT JOIN openings o ON o.id = i.opening_id
                 LEFT JOIN candidates c ON c.id = i.candidate_id
                 WHERE i.scheduled_at >= ?1
                 ORDER BY i.scheduled_at ASC
                 LIMIT ?2",
            )
            .context("Failed to prepare upcoming_interviews")?;
        let rows = stmt
            .query_map(
                params![from.format("%Y-%m-%d").to_string(), limit as i64],
                |row| {
                    Ok(Interview {
                        id: row.get(0)?,
                        scheduled_at: row.get(1)?,
                        status: row.get(2)?,
                        interviewer: row.get(3)?,
                        notes: row.get(4)?,
                        opening_title: row.get(5)?,
                        candidate_name: row.get(6)?,
                    })
                },
            )
            .context("Failed to query interviews")?;
        let mut interviews = Vec::new();
        for row in rows {
            interviews.push(row.context("Failed to read interview row")?);
        }
        Ok(interviews)
    }

    pub fn insert_interview(&self, interview: &NewInterview) -> Result<i64> {
        self.conn
            .execute(
                "INSERT INTO interviews (id, scheduled_at, status, interviewer, notes, opening_id, candidate_id)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    interview.id,
                    interview.scheduled_at,
                    interview.status,
                    interview.interviewer,
                    interview.notes,
                    interview.opening_id,
                    interview.candidate_id,
                ],
            )
            .context("Failed to insert interview")?;
        Ok(self.conn.last_insert_rowid())
    }

    // ── Seeding ───────────────────────────────────────────────────────

    /// Insert a fixture in one transaction: openings, then candidates, then
    /// interviews, so references resolve.
    pub fn import(&self, seed: &SeedData) -> Result<SeedReport> {
        // Safety: SqliteStore's Mutex already guarantees single-threaded access.
        let tx = self
            .conn
            .unchecked_transaction()
            .context("Failed to begin transaction")?;
        for opening in &seed.openings {
            self.insert_opening(opening)?;
        }
        for candidate in &seed.candidates {
            self.insert_candidate(candidate)?;
        }
        for interview in &seed.interviews {
            self.insert_interview(interview)?;
        }
        tx.commit().context("Failed to commit seed data")?;
        Ok(SeedReport {
            openings: seed.openings.len(),
            candidates: seed.candidates.len(),
            interviews: seed.interviews.len(),
        })
    }
}

fn row_to_opening(row: &rusqlite::Row<'_>) -> rusqlite::Result<Opening> {
    let count: i64 = row.get(8)?;
    Ok(Opening {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        requirements: row.get(3)?,
        status: row.get(4)?,
        opened_at: row.get(5)?,
        closes_at: row.get(6)?,
        admin_id: row.get(7)?,
        candidate_count: count as usize,
    })
}

// ── Internal row types for DB deserialization ────────────────────────

struct CandidateRow {
    id: i64,
    name: String,
    email: Option<String>,
    address: Option<String>,
    status: Option<String>,
    score: Option<f64>,
    opening_id: Option<i64>,
    suggested_opening: Option<String>,
    skills: String,
}

impl CandidateRow {
    fn into_candidate(self) -> Result<Candidate> {
        let skills: Vec<String> = serde_json::from_str(&self.skills)
            .with_context(|| format!("Invalid skills JSON for candidate {}", self.id))?;
        let suggested_opening = match self.opening_id {
            Some(id) => Some(OpeningRef::Id(id)),
            None => self.suggested_opening.as_deref().and_then(OpeningRef::parse),
        };
        Ok(Candidate {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            status: self.status,
            score: self.score,
            suggested_opening,
            skills,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Result<RecruitDb> {
        let db = RecruitDb::new_in_memory()?;
        let seed: SeedData = serde_json::from_str(
            r#"{
                "openings": [
                    {"id": 1, "title": "Backend Developer"},
                    {"id": 2, "title": "Designer", "status": "fechada"}
                ],
                "candidates": [
                    {"name": "Ana", "status": "Triagem", "score": 82, "opening_id": 1, "skills": ["rust", "sql"]},
                    {"name": "Bruno", "suggested_opening": "Analista de Dados"},
                    {"name": "Carla", "status": "contratado", "opening_id": 1}
                ],
                "interviews": [
                    {"scheduled_at": "2026-01-10T09:00:00Z", "opening_id": 1, "candidate_id": 1},
                    {"scheduled_at": "2026-02-01T10:00:00Z", "opening_id": 2, "candidate_id": 2, "status": "Confirmada"},
                    {"scheduled_at": "2025-12-01T10:00:00Z", "candidate_id": 3}
                ]
            }"#,
        )?;
        let report = db.import(&seed)?;
        assert_eq!(
            report,
            SeedReport {
                openings: 2,
                candidates: 3,
                interviews: 3
            }
        );
        Ok(db)
    }

    #[test]
    fn test_create_database_and_run_migrations() -> Result<()> {
        let db = RecruitDb::new_in_memory()?;
        assert!(db.list_candidates()?.is_empty());
        assert!(db.list_openings()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_list_candidates_in_insert_order() -> Result<()> {
        let db = seeded()?;
        let candidates = db.list_candidates()?;
        let names: Vec<&str> = candidates.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Ana", "Bruno", "Carla"]);
        assert_eq!(candidates[0].skills, vec!["rust", "sql"]);
        assert_eq!(candidates[0].suggested_opening, Some(OpeningRef::Id(1)));
        assert_eq!(
            candidates[1].suggested_opening,
            Some(OpeningRef::Text("Analista de Dados".into()))
        );
        assert_eq!(candidates[1].status, None);
        assert_eq!(db.count_candidates()?, 3);
        Ok(())
    }

    #[test]
    fn test_update_candidate_status() -> Result<()> {
        let db = seeded()?;
        assert!(db.update_candidate_status(2, "oferta enviada")?);
        assert_eq!(db.candidate_status(2)?, Some("oferta enviada".into()));
        assert!(!db.update_candidate_status(99, "triagem")?);
        Ok(())
    }

    #[test]
    fn test_list_openings_newest_first_with_counts() -> Result<()> {
        let db = seeded()?;
        let openings = db.list_openings()?;
        assert_eq!(openings.len(), 2);
        assert_eq!(openings[0].id, 2);
        assert_eq!(openings[1].id, 1);
        assert_eq!(openings[1].candidate_count, 2);
        assert_eq!(openings[0].candidate_count, 0);
        assert_eq!(db.count_open_openings()?, 1);
        Ok(())
    }

    #[test]
    fn test_open_count_requires_exact_status() -> Result<()> {
        let db = RecruitDb::new_in_memory()?;
        for (id, status) in [(1, Some("aberta")), (2, Some("")), (3, Some("fechada")), (4, None)] {
            db.insert_opening(&NewOpening {
                id: Some(id),
                title: format!("Opening {}", id),
                status: status.map(String::from),
                ..Default::default()
            })?;
        }
        // No status defaults to open; a blank one does not count.
        assert_eq!(db.count_open_openings()?, 2);
        Ok(())
    }

    #[test]
    fn test_create_update_delete_opening() -> Result<()> {
        let db = RecruitDb::new_in_memory()?;
        let mut draft = OpeningDraft::new("QA Engineer");
        draft.closes_on = NaiveDate::from_ymd_opt(2026, 11, 30);
        let created = db.create_opening(&draft)?;
        assert_eq!(created.title, "QA Engineer");
        assert_eq!(created.status_label(), "aberta");
        assert_eq!(created.closes_at.as_deref(), Some("2026-11-30"));
        assert_eq!(created.admin_id, Some(1));

        draft.title = "Senior QA Engineer".into();
        let updated = db.update_opening(created.id, &draft)?.expect("opening exists");
        assert_eq!(updated.title, "Senior QA Engineer");
        assert!(db.update_opening(999, &draft)?.is_none());

        assert!(db.delete_opening(created.id)?);
        assert!(!db.delete_opening(created.id)?);
        assert!(db.get_opening(created.id)?.is_none());
        Ok(())
    }

    #[test]
    fn test_delete_opening_detaches_candidates() -> Result<()> {
        let db = seeded()?;
        assert!(db.delete_opening(1)?);
        let candidates = db.list_candidates()?;
        assert_eq!(candidates[0].suggested_opening, None);
        Ok(())
    }

    #[test]
    fn test_upcoming_interviews_filters_sorts_and_limits() -> Result<()> {
        let db = seeded()?;
        let from = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let upcoming = db.upcoming_interviews(from, 7)?;
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].candidate_name.as_deref(), Some("Ana"));
        assert_eq!(upcoming[0].opening_title.as_deref(), Some("Backend Developer"));
        assert_eq!(upcoming[1].status_label(), "Confirmada");

        let limited = db.upcoming_interviews(from, 1)?;
        assert_eq!(limited.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_store_trait_maps_missing_rows_to_not_found() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store.update_candidate_status(5, "triagem").await.unwrap_err();
        assert!(err.is_not_found());
        let err = store.delete_opening(5).await.unwrap_err();
        assert!(err.is_not_found());
        let err = store
            .update_opening(5, &OpeningDraft::new("x"))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_store_trait_rejects_blank_title() {
        let store = SqliteStore::open_in_memory().unwrap();
        let err = store
            .create_opening(&OpeningDraft::new(" "))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Invalid(_)));
    }
}
