use std::collections::HashMap;

use serde::Serialize;

use super::drag::DragState;
use super::stage::{STAGES, Stage};
use crate::store::models::{Candidate, NO_OPENING_LABEL, Opening, OpeningRef};

/// Opening id → title, used to label a card's suggested opening.
#[derive(Debug, Clone, Default)]
pub struct OpeningLookup {
    titles: HashMap<i64, String>,
}

impl OpeningLookup {
    pub fn from_openings(openings: &[Opening]) -> Self {
        Self {
            titles: openings.iter().map(|o| (o.id, o.title.clone())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    /// Resolve a suggested-opening reference to display text.
    ///
    /// Known ids resolve to the opening title; anything else degrades to the
    /// raw stored value, and a missing reference to a placeholder.
    pub fn label_for(&self, reference: Option<&OpeningRef>) -> String {
        let Some(reference) = reference else {
            return NO_OPENING_LABEL.to_string();
        };
        if let Some(title) = reference.as_id().and_then(|id| self.titles.get(&id)) {
            return title.clone();
        }
        let raw = reference.raw();
        if raw.trim().is_empty() {
            NO_OPENING_LABEL.to_string()
        } else {
            raw
        }
    }
}

/// A candidate as placed on the board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub candidate_id: i64,
    pub name: String,
    pub score: Option<f64>,
    pub opening_label: String,
    pub skills: Vec<String>,
    pub hidden: bool,
    pub drag: DragState,
}

impl Card {
    pub fn from_candidate(candidate: &Candidate, lookup: &OpeningLookup) -> Self {
        Self {
            candidate_id: candidate.id,
            name: candidate.name.clone(),
            score: candidate.score,
            opening_label: lookup.label_for(candidate.suggested_opening.as_ref()),
            skills: candidate.skills.clone(),
            hidden: false,
            drag: DragState::Idle,
        }
    }
}

/// One stage column: header, cards in display order and the counter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub stage: Stage,
    pub position: usize,
    /// Display text of the column header. This is the label written back to
    /// the store when a card is dropped here.
    pub header: String,
    pub cards: Vec<Card>,
    pub count: usize,
    pub highlighted: bool,
}

/// Result of moving a card between columns, as zero-based column indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardMove {
    pub from: usize,
    pub to: usize,
}

impl CardMove {
    pub fn is_same_column(&self) -> bool {
        self.from == self.to
    }
}

/// In-memory board: six stage columns plus a separately-addressed summary
/// group mirroring their counts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Board {
    columns: Vec<Column>,
    summary: [usize; 6],
    active_drag: Option<i64>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self::with_headers(STAGES.map(|s| s.as_str().to_string()))
    }

    pub fn with_headers(headers: [String; 6]) -> Self {
        let columns = STAGES
            .iter()
            .zip(headers)
            .map(|(stage, header)| Column {
                stage: *stage,
                position: stage.position(),
                header,
                cards: Vec::new(),
                count: 0,
                highlighted: false,
            })
            .collect();
        Self {
            columns,
            summary: [0; 6],
            active_drag: None,
        }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column by one-based position.
    pub fn column(&self, position: usize) -> Option<&Column> {
        position.checked_sub(1).and_then(|idx| self.columns.get(idx))
    }

    pub(crate) fn column_mut(&mut self, position: usize) -> Option<&mut Column> {
        position
            .checked_sub(1)
            .and_then(|idx| self.columns.get_mut(idx))
    }

    /// Summary counters, indexed by zero-based column index.
    pub fn summary(&self) -> &[usize; 6] {
        &self.summary
    }

    pub fn counts(&self) -> [usize; 6] {
        let mut counts = [0; 6];
        for (idx, column) in self.columns.iter().enumerate() {
            counts[idx] = column.count;
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.columns.iter().map(|c| c.count).sum()
    }

    pub fn active_drag(&self) -> Option<i64> {
        self.active_drag
    }

    pub(crate) fn set_active_drag(&mut self, candidate_id: Option<i64>) {
        self.active_drag = candidate_id;
    }

    /// Build cards for `candidates` (in the given order) and replace every
    /// column's contents, then recount.
    pub fn rebuild(&mut self, candidates: &[Candidate], lookup: &OpeningLookup) {
        for column in &mut self.columns {
            column.cards.clear();
            column.highlighted = false;
        }
        self.active_drag = None;
        for candidate in candidates {
            let stage = Stage::classify(candidate.status.as_deref());
            self.columns[stage.index()]
                .cards
                .push(Card::from_candidate(candidate, lookup));
        }
        self.recount();
    }

    /// Locate a rendered card: `(column index, card index)`.
    pub fn locate(&self, candidate_id: i64) -> Option<(usize, usize)> {
        self.columns.iter().enumerate().find_map(|(col_idx, column)| {
            column
                .cards
                .iter()
                .position(|card| card.candidate_id == candidate_id)
                .map(|card_idx| (col_idx, card_idx))
        })
    }

    pub fn card(&self, candidate_id: i64) -> Option<&Card> {
        self.locate(candidate_id)
            .map(|(col, idx)| &self.columns[col].cards[idx])
    }

    pub(crate) fn card_mut(&mut self, candidate_id: i64) -> Option<&mut Card> {
        self.locate(candidate_id)
            .map(|(col, idx)| &mut self.columns[col].cards[idx])
    }

    /// Move a card to the end of the column at `position`. A card already in
    /// that column keeps its place. Counters are not touched; call
    /// `recount` once the move is settled.
    pub fn move_card(&mut self, candidate_id: i64, position: usize) -> Option<CardMove> {
        let to = position.checked_sub(1).filter(|idx| *idx < self.columns.len())?;
        let (from, card_idx) = self.locate(candidate_id)?;
        if from != to {
            let card = self.columns[from].cards.remove(card_idx);
            self.columns[to].cards.push(card);
        }
        Some(CardMove { from, to })
    }

    /// Reflect the current column contents into every counter.
    pub fn recount(&mut self) {
        for (idx, column) in self.columns.iter_mut().enumerate() {
            column.count = column.cards.len();
            self.summary[idx] = column.count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(id: i64, status: Option<&str>) -> Candidate {
        Candidate {
            id,
            name: format!("Candidate {}", id),
            email: None,
            address: None,
            status: status.map(String::from),
            score: Some(50.0),
            suggested_opening: None,
            skills: Vec::new(),
        }
    }

    fn opening(id: i64, title: &str) -> Opening {
        Opening {
            id,
            title: title.to_string(),
            description: None,
            requirements: None,
            status: None,
            opened_at: None,
            closes_at: None,
            admin_id: None,
            candidate_count: 0,
        }
    }

    #[test]
    fn test_new_board_has_six_empty_columns_with_stage_headers() {
        let board = Board::new();
        assert_eq!(board.columns().len(), 6);
        for (idx, column) in board.columns().iter().enumerate() {
            assert_eq!(column.position, idx + 1);
            assert_eq!(column.header, STAGES[idx].as_str());
            assert_eq!(column.count, 0);
        }
        assert_eq!(board.summary(), &[0; 6]);
    }

    #[test]
    fn test_rebuild_places_cards_in_store_order() {
        let mut board = Board::new();
        let candidates = vec![
            candidate(1, Some("triagem")),
            candidate(2, None),
            candidate(3, Some("Triagem")),
            candidate(4, Some("desconhecido")),
        ];
        board.rebuild(&candidates, &OpeningLookup::default());

        let screening: Vec<i64> = board.columns()[1]
            .cards
            .iter()
            .map(|c| c.candidate_id)
            .collect();
        assert_eq!(screening, vec![1, 3]);
        assert_eq!(board.counts(), [2, 2, 0, 0, 0, 0]);
        assert_eq!(board.summary(), &[2, 2, 0, 0, 0, 0]);
        assert_eq!(board.total(), candidates.len());
    }

    #[test]
    fn test_rebuild_clears_previous_contents() {
        let mut board = Board::new();
        board.rebuild(&[candidate(1, None), candidate(2, None)], &OpeningLookup::default());
        board.rebuild(&[candidate(3, Some("contratado"))], &OpeningLookup::default());
        assert!(board.locate(1).is_none());
        assert_eq!(board.counts(), [0, 0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_move_card_appends_to_target_and_keeps_counts_until_recount() {
        let mut board = Board::new();
        board.rebuild(
            &[candidate(1, None), candidate(2, None), candidate(3, Some("entrevista técnica"))],
            &OpeningLookup::default(),
        );
        let mv = board.move_card(1, 3).unwrap();
        assert_eq!(mv, CardMove { from: 0, to: 2 });
        assert_eq!(board.columns()[2].cards.last().unwrap().candidate_id, 1);
        assert_eq!(board.counts(), [2, 0, 1, 0, 0, 0]);
        board.recount();
        assert_eq!(board.counts(), [1, 0, 2, 0, 0, 0]);
        assert_eq!(board.summary(), &[1, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn test_move_card_same_column_keeps_position() {
        let mut board = Board::new();
        board.rebuild(&[candidate(1, None), candidate(2, None)], &OpeningLookup::default());
        let mv = board.move_card(1, 1).unwrap();
        assert!(mv.is_same_column());
        assert_eq!(board.locate(1), Some((0, 0)));
    }

    #[test]
    fn test_move_card_unknown_candidate_or_column() {
        let mut board = Board::new();
        board.rebuild(&[candidate(1, None)], &OpeningLookup::default());
        assert!(board.move_card(42, 2).is_none());
        assert!(board.move_card(1, 0).is_none());
        assert!(board.move_card(1, 7).is_none());
        assert_eq!(board.locate(1), Some((0, 0)));
    }

    #[test]
    fn test_lookup_labels() {
        let lookup = OpeningLookup::from_openings(&[opening(1, "Backend Developer")]);
        assert_eq!(lookup.label_for(Some(&OpeningRef::Id(1))), "Backend Developer");
        assert_eq!(
            lookup.label_for(Some(&OpeningRef::Text("1".into()))),
            "Backend Developer"
        );
        assert_eq!(lookup.label_for(Some(&OpeningRef::Id(9))), "9");
        assert_eq!(
            lookup.label_for(Some(&OpeningRef::Text("Designer".into()))),
            "Designer"
        );
        assert_eq!(lookup.label_for(None), NO_OPENING_LABEL);
    }

    #[test]
    fn test_custom_headers() {
        let headers = [
            "Aplicado", "Triagem", "Entrevista Técnica", "Adequação à Cultura",
            "Oferta Enviada", "Contratado",
        ]
        .map(String::from);
        let board = Board::with_headers(headers);
        assert_eq!(board.column(3).unwrap().header, "Entrevista Técnica");
        assert_eq!(board.column(3).unwrap().stage, Stage::TechnicalInterview);
        assert!(board.column(0).is_none());
    }
}
