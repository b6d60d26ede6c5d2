//! Hosted table store adapter (PostgREST-style `/rest/v1/<table>` API).
//!
//! Table and column names follow the hosted schema (`candidatos`, `Vagas`,
//! `Entrevistas`). Embedded relations may come back as an object or a list
//! depending on the relationship; both are collapsed to `Option<T>` here via
//! `Related::into_first`.

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::Store;
use super::models::*;
use crate::errors::StoreError;

pub const CANDIDATES_TABLE: &str = "candidatos";
pub const OPENINGS_TABLE: &str = "Vagas";
pub const INTERVIEWS_TABLE: &str = "Entrevistas";

/// Opening columns plus embedded candidate ids, used to fill `candidate_count`.
const OPENING_SELECT: &str = "*,candidatos(id)";

pub struct RestStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl RestStore {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, self.table_url(table))
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    async fn fetch<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, StoreError> {
        let resp = builder.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                message,
            });
        }
        resp.json::<T>().await.map_err(|e| StoreError::Decode {
            what: "store response".to_string(),
            message: e.to_string(),
        })
    }
}

#[async_trait]
impl Store for RestStore {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, StoreError> {
        let records: Vec<CandidateRecord> = self
            .fetch(
                self.request(Method::GET, CANDIDATES_TABLE)
                    .query(&[("select", "*")]),
            )
            .await?;
        Ok(records.into_iter().map(CandidateRecord::into_candidate).collect())
    }

    async fn count_candidates(&self) -> Result<usize, StoreError> {
        let ids: Vec<IdOnly> = self
            .fetch(
                self.request(Method::GET, CANDIDATES_TABLE)
                    .query(&[("select", "id")]),
            )
            .await?;
        Ok(ids.len())
    }

    async fn list_openings(&self) -> Result<Vec<Opening>, StoreError> {
        let records: Vec<OpeningRecord> = self
            .fetch(
                self.request(Method::GET, OPENINGS_TABLE)
                    .query(&[("select", OPENING_SELECT), ("order", "id.desc")]),
            )
            .await?;
        Ok(records.into_iter().map(OpeningRecord::into_opening).collect())
    }

    async fn count_open_openings(&self) -> Result<usize, StoreError> {
        let filter = format!("eq.{}", DEFAULT_OPENING_STATUS);
        let ids: Vec<IdOnly> = self
            .fetch(
                self.request(Method::GET, OPENINGS_TABLE)
                    .query(&[("select", "id"), ("status_vagas", filter.as_str())]),
            )
            .await?;
        Ok(ids.len())
    }

    async fn create_opening(&self, draft: &OpeningDraft) -> Result<Opening, StoreError> {
        draft.validate().map_err(StoreError::Invalid)?;
        let records: Vec<OpeningRecord> = self
            .fetch(
                self.request(Method::POST, OPENINGS_TABLE)
                    .query(&[("select", OPENING_SELECT)])
                    .header("Prefer", "return=representation")
                    .json(&[OpeningPayload::from(draft)]),
            )
            .await?;
        records
            .into_iter()
            .next()
            .map(OpeningRecord::into_opening)
            .ok_or_else(|| StoreError::Decode {
                what: "created opening".to_string(),
                message: "empty representation".to_string(),
            })
    }

    async fn update_opening(&self, id: i64, draft: &OpeningDraft) -> Result<Opening, StoreError> {
        draft.validate().map_err(StoreError::Invalid)?;
        let filter = format!("eq.{}", id);
        let records: Vec<OpeningRecord> = self
            .fetch(
                self.request(Method::PATCH, OPENINGS_TABLE)
                    .query(&[("id", filter.as_str()), ("select", OPENING_SELECT)])
                    .header("Prefer", "return=representation")
                    .json(&OpeningPayload::from(draft)),
            )
            .await?;
        records
            .into_iter()
            .next()
            .map(OpeningRecord::into_opening)
            .ok_or(StoreError::NotFound {
                table: "openings",
                id,
            })
    }

    async fn delete_opening(&self, id: i64) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        let deleted: Vec<IdOnly> = self
            .fetch(
                self.request(Method::DELETE, OPENINGS_TABLE)
                    .query(&[("id", filter.as_str())])
                    .header("Prefer", "return=representation"),
            )
            .await?;
        if deleted.is_empty() {
            return Err(StoreError::NotFound {
                table: "openings",
                id,
            });
        }
        Ok(())
    }

    async fn upcoming_interviews(
        &self,
        from: NaiveDate,
        limit: usize,
    ) -> Result<Vec<Interview>, StoreError> {
        let from = format!("gte.{}", from.format("%Y-%m-%d"));
        let limit = limit.to_string();
        let records: Vec<InterviewRecord> = self
            .fetch(
                self.request(Method::GET, INTERVIEWS_TABLE).query(&[
                    ("select", "*,Vagas(Titulo),candidatos(nome)"),
                    ("Data", from.as_str()),
                    ("order", "Data.asc"),
                    ("limit", limit.as_str()),
                ]),
            )
            .await?;
        Ok(records.into_iter().map(InterviewRecord::into_interview).collect())
    }

    async fn update_candidate_status(&self, id: i64, status: &str) -> Result<(), StoreError> {
        let filter = format!("eq.{}", id);
        let updated: Vec<IdOnly> = self
            .fetch(
                self.request(Method::PATCH, CANDIDATES_TABLE)
                    .query(&[("id", filter.as_str())])
                    .header("Prefer", "return=representation")
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        if updated.is_empty() {
            return Err(StoreError::NotFound {
                table: "candidates",
                id,
            });
        }
        Ok(())
    }
}

// ── Wire records ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
struct IdOnly {
    #[allow(dead_code)]
    id: i64,
}

#[derive(Debug, Deserialize)]
struct TitleOnly {
    #[serde(rename = "Titulo")]
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
struct NameOnly {
    #[serde(rename = "nome")]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateRecord {
    id: i64,
    #[serde(rename = "nome", default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(rename = "Endereco", default)]
    address: Option<String>,
    #[serde(rename = "nota", default)]
    score: Option<f64>,
    #[serde(rename = "vaga_sugerida", default)]
    suggested_opening: Option<OpeningRef>,
    #[serde(default)]
    status: Option<String>,
    #[serde(rename = "habilidades", alias = "skills", default)]
    skills: Option<Vec<String>>,
}

impl CandidateRecord {
    fn into_candidate(self) -> Candidate {
        let suggested_opening = match self.suggested_opening {
            Some(OpeningRef::Text(text)) => OpeningRef::parse(&text),
            other => other,
        };
        Candidate {
            id: self.id,
            name: self.name.unwrap_or_default(),
            email: self.email,
            address: self.address,
            status: self.status,
            score: self.score,
            suggested_opening,
            skills: self.skills.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OpeningRecord {
    id: i64,
    #[serde(rename = "Titulo", default)]
    title: Option<String>,
    #[serde(rename = "Descricao", default)]
    description: Option<String>,
    #[serde(rename = "Requisitos", default)]
    requirements: Option<String>,
    #[serde(rename = "status_vagas", default)]
    status: Option<String>,
    #[serde(rename = "data_abertura", default)]
    opened_at: Option<String>,
    #[serde(rename = "data_encerramento", default)]
    closes_at: Option<String>,
    #[serde(rename = "AdminID", default)]
    admin_id: Option<i64>,
    #[serde(rename = "candidatos", default)]
    candidates: Option<Related<IdOnly>>,
}

impl OpeningRecord {
    fn into_opening(self) -> Opening {
        Opening {
            id: self.id,
            title: self.title.unwrap_or_default(),
            description: self.description,
            requirements: self.requirements,
            status: self.status,
            opened_at: self.opened_at,
            closes_at: self.closes_at,
            admin_id: self.admin_id,
            candidate_count: self.candidates.map(|c| c.len()).unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InterviewRecord {
    id: i64,
    #[serde(rename = "Data", default)]
    scheduled_at: Option<String>,
    #[serde(rename = "Status", default)]
    status: Option<String>,
    #[serde(rename = "Entrevistador", default)]
    interviewer: Option<String>,
    #[serde(rename = "Observações", alias = "Observacoes", default)]
    notes: Option<String>,
    #[serde(rename = "Vagas", default)]
    opening: Option<Related<TitleOnly>>,
    #[serde(rename = "candidatos", default)]
    candidate: Option<Related<NameOnly>>,
}

impl InterviewRecord {
    fn into_interview(self) -> Interview {
        Interview {
            id: self.id,
            scheduled_at: self.scheduled_at,
            status: self.status,
            interviewer: self.interviewer,
            notes: self.notes,
            opening_title: first_related(self.opening).and_then(|o| o.title),
            candidate_name: first_related(self.candidate).and_then(|c| c.name),
        }
    }
}

#[derive(Debug, Serialize)]
struct OpeningPayload<'a> {
    #[serde(rename = "Titulo")]
    title: &'a str,
    #[serde(rename = "Descricao")]
    description: &'a str,
    #[serde(rename = "Requisitos")]
    requirements: &'a str,
    #[serde(rename = "data_encerramento")]
    closes_at: Option<String>,
    #[serde(rename = "AdminID")]
    admin_id: i64,
}

impl<'a> From<&'a OpeningDraft> for OpeningPayload<'a> {
    fn from(draft: &'a OpeningDraft) -> Self {
        Self {
            title: &draft.title,
            description: &draft.description,
            requirements: &draft.requirements,
            closes_at: draft.closes_on.map(|d| d.format("%Y-%m-%d").to_string()),
            admin_id: draft.admin_id,
        }
    }
}
