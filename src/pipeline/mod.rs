//! Candidate pipeline board.
//!
//! Each candidate sits in exactly one of six ordered stage columns. The
//! board is rebuilt from the store on load and mutated locally on drop;
//! a failed stage write is rolled back by reloading everything.
//!
//! | Module    | Responsibility                                             |
//! |-----------|------------------------------------------------------------|
//! | `stage`   | Stage table and status classification                      |
//! | `board`   | Columns, cards, counters and opening labels                |
//! | `drag`    | Per-card drag state machine and transfer payload           |
//! | `tracker` | Board loading, drop handling and operator alerts           |

pub mod board;
pub mod drag;
pub mod stage;
pub mod tracker;

pub use board::{Board, Card, Column, OpeningLookup};
pub use drag::{DragPayload, DragSession, DragState, DropEffect};
pub use stage::{STAGES, Stage};
pub use tracker::{
    DropOutcome, LoadSummary, Notifier, PipelineTracker, RecordingNotifier, StderrNotifier,
    TracingNotifier,
};
