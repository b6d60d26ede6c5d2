use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::board::Board;
use crate::errors::PipelineError;

/// Per-card drag lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// What a drop target signals back on drag-over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DropEffect {
    Move,
}

/// Data carried from the dragged card to the drop target: the candidate id
/// as plain text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    pub candidate_id: String,
}

impl DragPayload {
    pub fn for_candidate(candidate_id: i64) -> Self {
        Self {
            candidate_id: candidate_id.to_string(),
        }
    }

    pub fn candidate_id(&self) -> Option<i64> {
        self.candidate_id.trim().parse().ok()
    }
}

pub(crate) fn lock_board(board: &Mutex<Board>) -> MutexGuard<'_, Board> {
    // Poisoning is ignored: the next rebuild overwrites the whole board.
    board.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A live drag gesture.
///
/// Created by `DragSession::begin` (`idle → dragging`). The card returns to
/// `idle` and becomes visible again when the session is ended or dropped,
/// whatever happened to the drop.
pub struct DragSession {
    board: Arc<Mutex<Board>>,
    candidate_id: i64,
    payload: DragPayload,
}

impl DragSession {
    /// Start dragging a rendered card. Fails if the card is not on the board
    /// or another drag is live.
    pub fn begin(board: Arc<Mutex<Board>>, candidate_id: i64) -> Result<Self, PipelineError> {
        {
            let mut guard = lock_board(&board);
            if let Some(active) = guard.active_drag() {
                return Err(PipelineError::DragInProgress { active });
            }
            let card = guard
                .card_mut(candidate_id)
                .ok_or(PipelineError::CardNotRendered { candidate_id })?;
            card.drag = DragState::Dragging;
            card.hidden = true;
            guard.set_active_drag(Some(candidate_id));
        }
        tracing::debug!(candidate_id, "drag started");
        Ok(Self {
            board,
            candidate_id,
            payload: DragPayload::for_candidate(candidate_id),
        })
    }

    pub fn candidate_id(&self) -> i64 {
        self.candidate_id
    }

    pub fn payload(&self) -> &DragPayload {
        &self.payload
    }

    /// End the drag explicitly.
    pub fn end(self) {}
}

impl Drop for DragSession {
    fn drop(&mut self) {
        let mut guard = lock_board(&self.board);
        // The card may have been replaced by a reload; only the fresh copy
        // (already idle) exists then.
        if let Some(card) = guard.card_mut(self.candidate_id) {
            card.drag = DragState::Idle;
            card.hidden = false;
        }
        if guard.active_drag() == Some(self.candidate_id) {
            guard.set_active_drag(None);
        }
        tracing::debug!(candidate_id = self.candidate_id, "drag ended");
    }
}
