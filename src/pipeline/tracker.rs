use std::sync::{Arc, Mutex};

use serde::Serialize;
use tracing::{debug, error, info, warn};

use super::board::{Board, OpeningLookup};
use super::drag::{DragPayload, DragSession, DropEffect, lock_board};
use super::stage::{STAGES, Stage};
use crate::errors::PipelineError;
use crate::store::Store;

/// Synchronous operator alerts (the "alert box").
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

/// Writes alerts to stderr. Used by the CLI.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("{} {}", console::style("!").red().bold(), message);
    }
}

/// Sends alerts to the log. Used by the HTTP server, which also returns
/// each alert inside its own drop response.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!(alert = %message, "operator alert");
    }
}

/// Keeps alerts in memory. Used by tests.
#[derive(Default)]
pub struct RecordingNotifier {
    alerts: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.alerts.lock().unwrap_or_else(|p| p.into_inner()))
    }
}

impl Notifier for RecordingNotifier {
    fn alert(&self, message: &str) {
        self.alerts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .push(message.to_string());
    }
}

/// Outcome of a board load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub candidates: usize,
    pub openings: usize,
    /// True when openings could not be fetched and labels fell back to raw
    /// values.
    pub openings_degraded: bool,
}

/// Outcome of a drop on a stage column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum DropOutcome {
    /// Payload did not name a rendered card; nothing happened.
    Ignored,
    /// Store accepted the new status; board recounted.
    Moved {
        candidate_id: i64,
        from: Stage,
        to: Stage,
        status: String,
    },
    /// Store rejected the write; board was reloaded from the store.
    RolledBack {
        candidate_id: i64,
        error: String,
        /// Text shown to the operator for this drop.
        alert: String,
    },
}

/// A card already moved on the board whose status write is still pending.
#[derive(Debug, Clone, PartialEq)]
struct PendingMove {
    candidate_id: i64,
    status: String,
    from: Stage,
    to: Stage,
}

/// Pipeline board driver: loads the board from the store and applies
/// drag-and-drop stage transitions with optimistic update and reload-based
/// rollback.
pub struct PipelineTracker {
    store: Arc<dyn Store>,
    notifier: Arc<dyn Notifier>,
    board: Arc<Mutex<Board>>,
}

impl PipelineTracker {
    pub fn new(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_board(store, notifier, Board::new())
    }

    pub fn with_board(store: Arc<dyn Store>, notifier: Arc<dyn Notifier>, board: Board) -> Self {
        Self {
            store,
            notifier,
            board: Arc::new(Mutex::new(board)),
        }
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    /// Copy of the current board.
    pub fn snapshot(&self) -> Board {
        lock_board(&self.board).clone()
    }

    /// Fetch candidates and openings and rebuild every column.
    ///
    /// A failed candidate fetch leaves the board untouched. A failed opening
    /// fetch only degrades suggested-opening labels.
    pub async fn load(&self) -> Result<LoadSummary, PipelineError> {
        let candidates = match self.store.list_candidates().await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, "failed to load candidates; board left unchanged");
                return Err(PipelineError::LoadFailed(e));
            }
        };

        let (lookup, openings_degraded) = match self.store.list_openings().await {
            Ok(openings) => (OpeningLookup::from_openings(&openings), false),
            Err(e) => {
                warn!(error = %e, "failed to load openings; using raw opening labels");
                (OpeningLookup::default(), true)
            }
        };

        lock_board(&self.board).rebuild(&candidates, &lookup);

        let summary = LoadSummary {
            candidates: candidates.len(),
            openings: lookup.len(),
            openings_degraded,
        };
        info!(
            candidates = summary.candidates,
            openings = summary.openings,
            "pipeline board loaded"
        );
        Ok(summary)
    }

    /// Start dragging a card (`idle → dragging`). Dropping the returned
    /// session ends the drag.
    pub fn begin_drag(&self, candidate_id: i64) -> Result<DragSession, PipelineError> {
        DragSession::begin(self.board.clone(), candidate_id)
    }

    /// Drag entered the column at `position`: accept as a move and highlight.
    pub fn drag_over(&self, position: usize) -> Result<DropEffect, PipelineError> {
        let mut board = lock_board(&self.board);
        let column = board
            .column_mut(position)
            .ok_or(PipelineError::UnknownColumn { position })?;
        column.highlighted = true;
        Ok(DropEffect::Move)
    }

    /// Drag left the column at `position`.
    pub fn drag_leave(&self, position: usize) -> Result<(), PipelineError> {
        let mut board = lock_board(&self.board);
        let column = board
            .column_mut(position)
            .ok_or(PipelineError::UnknownColumn { position })?;
        column.highlighted = false;
        Ok(())
    }

    /// Handle a drop on the column at `position`.
    ///
    /// The card moves immediately; the column header text is written to the
    /// store as the candidate's status. Counters are recomputed from the
    /// board once the write settles. On write failure the operator is
    /// alerted and the whole board is reloaded.
    pub async fn drop_on(
        &self,
        position: usize,
        payload: &DragPayload,
    ) -> Result<DropOutcome, PipelineError> {
        match self.place_card(position, payload)? {
            Some(pending) => Ok(self.commit(pending).await),
            None => Ok(DropOutcome::Ignored),
        }
    }

    /// Synchronous half of a drop: clear the highlight, read the header and
    /// move the card. `None` when the payload names no rendered card.
    fn place_card(
        &self,
        position: usize,
        payload: &DragPayload,
    ) -> Result<Option<PendingMove>, PipelineError> {
        let mut board = lock_board(&self.board);
        let column = board
            .column_mut(position)
            .ok_or(PipelineError::UnknownColumn { position })?;
        column.highlighted = false;
        let header = column.header.clone();

        let Some(candidate_id) = payload.candidate_id() else {
            debug!(payload = %payload.candidate_id, "drop ignored: unreadable payload");
            return Ok(None);
        };
        let Some(mv) = board.move_card(candidate_id, position) else {
            debug!(candidate_id, "drop ignored: card not on board");
            return Ok(None);
        };
        Ok(Some(PendingMove {
            candidate_id,
            status: header,
            from: STAGES[mv.from],
            to: STAGES[mv.to],
        }))
    }

    /// Await the status write for a placed card and settle the board.
    async fn commit(&self, pending: PendingMove) -> DropOutcome {
        let PendingMove {
            candidate_id,
            status,
            from,
            to,
        } = pending;
        match self.store.update_candidate_status(candidate_id, &status).await {
            Ok(()) => {
                lock_board(&self.board).recount();
                info!(candidate_id, from = %from, to = %to, status = %status, "candidate moved");
                DropOutcome::Moved {
                    candidate_id,
                    from,
                    to,
                    status,
                }
            }
            Err(e) => {
                error!(candidate_id, error = %e, "failed to update candidate stage");
                let alert = format!("Erro ao mover candidato: {}", e);
                self.notifier.alert(&alert);
                if let Err(reload) = self.load().await {
                    error!(error = %reload, "reload after failed move also failed");
                }
                DropOutcome::RolledBack {
                    candidate_id,
                    error: e.to_string(),
                    alert,
                }
            }
        }
    }

    /// Full gesture: drag start, drag-over, drop, drag end.
    ///
    /// The drag ends as soon as the card is placed, before the status write
    /// is awaited, so the moved card is visible and other drags may start
    /// while the write is in flight.
    pub async fn drag_and_drop(
        &self,
        candidate_id: i64,
        position: usize,
    ) -> Result<DropOutcome, PipelineError> {
        if Stage::from_position(position).is_none() {
            return Err(PipelineError::UnknownColumn { position });
        }
        let session = match self.begin_drag(candidate_id) {
            Ok(session) => session,
            Err(PipelineError::CardNotRendered { .. }) => {
                debug!(candidate_id, "drag ignored: card not on board");
                return Ok(DropOutcome::Ignored);
            }
            Err(e) => return Err(e),
        };
        self.drag_over(position)?;
        let placed = self.place_card(position, session.payload());
        session.end();
        match placed? {
            Some(pending) => Ok(self.commit(pending).await),
            None => Ok(DropOutcome::Ignored),
        }
    }
}
