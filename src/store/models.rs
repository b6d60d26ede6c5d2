use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::util::format_timestamp;

pub const NO_OPENING_LABEL: &str = "Sem vaga sugerida";
pub const DEFAULT_OPENING_STATUS: &str = "aberta";
pub const DEFAULT_INTERVIEW_STATUS: &str = "Agendada";
pub const UNKNOWN_OPENING_LABEL: &str = "Vaga não encontrada";
pub const UNKNOWN_CANDIDATE_LABEL: &str = "Candidato não encontrado";
pub const UNKNOWN_INTERVIEWER_LABEL: &str = "Não definido";
pub const UNSCHEDULED_LABEL: &str = "Data não definida";

/// A candidate's suggested opening, stored either as an opening id or as
/// free text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OpeningRef {
    Id(i64),
    Text(String),
}

impl OpeningRef {
    /// Parse a stored text value. Numeric text becomes an id; blank text is
    /// treated as no reference.
    pub fn parse(raw: &str) -> Option<OpeningRef> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        match trimmed.parse::<i64>() {
            Ok(id) => Some(OpeningRef::Id(id)),
            Err(_) => Some(OpeningRef::Text(trimmed.to_string())),
        }
    }

    pub fn as_id(&self) -> Option<i64> {
        match self {
            OpeningRef::Id(id) => Some(*id),
            OpeningRef::Text(text) => text.trim().parse().ok(),
        }
    }

    /// Raw stored value as display text.
    pub fn raw(&self) -> String {
        match self {
            OpeningRef::Id(id) => id.to_string(),
            OpeningRef::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Free-text stage label as stored; normalized by `Stage::classify`.
    pub status: Option<String>,
    /// Suitability score, 0-100.
    pub score: Option<f64>,
    pub suggested_opening: Option<OpeningRef>,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub requirements: Option<String>,
    pub status: Option<String>,
    pub opened_at: Option<String>,
    pub closes_at: Option<String>,
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub candidate_count: usize,
}

impl Opening {
    pub fn status_label(&self) -> &str {
        self.status
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_OPENING_STATUS)
    }

    pub fn is_open(&self) -> bool {
        self.status_label() == DEFAULT_OPENING_STATUS
    }

    pub fn closes_at_display(&self) -> String {
        format_timestamp(self.closes_at.as_deref())
    }

    pub fn opened_at_display(&self) -> String {
        format_timestamp(self.opened_at.as_deref())
    }
}

/// Fields an operator supplies when creating or editing an opening.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub requirements: String,
    pub closes_on: Option<NaiveDate>,
    #[serde(default = "default_admin_id")]
    pub admin_id: i64,
}

fn default_admin_id() -> i64 {
    1
}

impl OpeningDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            requirements: String::new(),
            closes_on: None,
            admin_id: default_admin_id(),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Opening title must not be empty".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: i64,
    pub scheduled_at: Option<String>,
    pub status: Option<String>,
    pub interviewer: Option<String>,
    pub notes: Option<String>,
    pub opening_title: Option<String>,
    pub candidate_name: Option<String>,
}

impl Interview {
    pub fn status_label(&self) -> &str {
        non_blank(self.status.as_deref()).unwrap_or(DEFAULT_INTERVIEW_STATUS)
    }

    /// `"Em Andamento"` → `"em-andamento"`.
    pub fn status_slug(&self) -> String {
        self.status_label()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }

    pub fn interviewer_label(&self) -> &str {
        non_blank(self.interviewer.as_deref()).unwrap_or(UNKNOWN_INTERVIEWER_LABEL)
    }

    pub fn opening_label(&self) -> &str {
        non_blank(self.opening_title.as_deref()).unwrap_or(UNKNOWN_OPENING_LABEL)
    }

    pub fn candidate_label(&self) -> &str {
        non_blank(self.candidate_name.as_deref()).unwrap_or(UNKNOWN_CANDIDATE_LABEL)
    }

    pub fn scheduled_display(&self) -> String {
        match self.scheduled_at.as_deref() {
            Some(raw) if !raw.trim().is_empty() => format_timestamp(Some(raw)),
            _ => UNSCHEDULED_LABEL.to_string(),
        }
    }
}

/// A related record embedded by the hosted store, which may arrive as a
/// single object or as a list depending on the relationship shape.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Related<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Related<T> {
    pub fn into_first(self) -> Option<T> {
        match self {
            Related::Many(items) => items.into_iter().next(),
            Related::One(item) => Some(item),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Related::Many(items) => items.len(),
            Related::One(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Collapse an optional relation into at most one record.
pub fn first_related<T>(related: Option<Related<T>>) -> Option<T> {
    related.and_then(Related::into_first)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Title {
        #[serde(rename = "Titulo")]
        title: Option<String>,
    }

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(rename = "Vagas")]
        opening: Option<Related<Title>>,
    }

    #[test]
    fn test_opening_ref_parse() {
        assert_eq!(OpeningRef::parse("12"), Some(OpeningRef::Id(12)));
        assert_eq!(
            OpeningRef::parse(" Backend Developer "),
            Some(OpeningRef::Text("Backend Developer".into()))
        );
        assert_eq!(OpeningRef::parse("  "), None);
    }

    #[test]
    fn test_opening_ref_deserializes_number_or_text() {
        let id: OpeningRef = serde_json::from_str("7").unwrap();
        assert_eq!(id, OpeningRef::Id(7));
        let text: OpeningRef = serde_json::from_str("\"Designer\"").unwrap();
        assert_eq!(text, OpeningRef::Text("Designer".into()));
        assert_eq!(OpeningRef::Text("9".into()).as_id(), Some(9));
    }

    #[test]
    fn test_related_object_list_and_null() {
        let one: Row = serde_json::from_str(r#"{"Vagas": {"Titulo": "Dev"}}"#).unwrap();
        let many: Row = serde_json::from_str(r#"{"Vagas": [{"Titulo": "Dev"}]}"#).unwrap();
        let empty: Row = serde_json::from_str(r#"{"Vagas": []}"#).unwrap();
        let null: Row = serde_json::from_str(r#"{"Vagas": null}"#).unwrap();

        let expected = Some(Title {
            title: Some("Dev".into()),
        });
        assert_eq!(first_related(one.opening), expected);
        assert_eq!(first_related(many.opening), expected);
        assert_eq!(first_related(empty.opening), None);
        assert_eq!(first_related(null.opening), None);
    }

    #[test]
    fn test_interview_placeholders() {
        let interview = Interview {
            id: 1,
            scheduled_at: None,
            status: None,
            interviewer: Some(" ".into()),
            notes: None,
            opening_title: None,
            candidate_name: None,
        };
        assert_eq!(interview.status_label(), "Agendada");
        assert_eq!(interview.interviewer_label(), "Não definido");
        assert_eq!(interview.opening_label(), "Vaga não encontrada");
        assert_eq!(interview.candidate_label(), "Candidato não encontrado");
        assert_eq!(interview.scheduled_display(), "Data não definida");
    }

    #[test]
    fn test_interview_status_slug() {
        let interview = Interview {
            id: 1,
            scheduled_at: None,
            status: Some("Em  Andamento".into()),
            interviewer: None,
            notes: None,
            opening_title: None,
            candidate_name: None,
        };
        assert_eq!(interview.status_slug(), "em-andamento");
    }

    #[test]
    fn test_opening_status_defaults_to_open() {
        let opening = Opening {
            id: 1,
            title: "Dev".into(),
            description: None,
            requirements: None,
            status: None,
            opened_at: None,
            closes_at: None,
            admin_id: None,
            candidate_count: 0,
        };
        assert_eq!(opening.status_label(), "aberta");
        assert!(opening.is_open());
        assert_eq!(opening.closes_at_display(), "");
    }

    #[test]
    fn test_draft_validation() {
        assert!(OpeningDraft::new("Backend").validate().is_ok());
        assert!(OpeningDraft::new("   ").validate().is_err());
        assert_eq!(OpeningDraft::new("x").admin_id, 1);
    }
}
