use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the six ordered hiring stages.
///
/// Declaration order is the board order: column position 1 is `Applied`,
/// position 6 is `Hired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "aplicado")]
    Applied,
    #[serde(rename = "triagem")]
    Screening,
    #[serde(rename = "entrevista técnica")]
    TechnicalInterview,
    #[serde(rename = "adequação à cultura")]
    CultureFit,
    #[serde(rename = "oferta enviada")]
    OfferSent,
    #[serde(rename = "contratado")]
    Hired,
}

/// All stages in board order.
pub const STAGES: [Stage; 6] = [
    Stage::Applied,
    Stage::Screening,
    Stage::TechnicalInterview,
    Stage::CultureFit,
    Stage::OfferSent,
    Stage::Hired,
];

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "aplicado",
            Self::Screening => "triagem",
            Self::TechnicalInterview => "entrevista técnica",
            Self::CultureFit => "adequação à cultura",
            Self::OfferSent => "oferta enviada",
            Self::Hired => "contratado",
        }
    }

    /// Zero-based index into `STAGES`.
    pub fn index(&self) -> usize {
        match self {
            Self::Applied => 0,
            Self::Screening => 1,
            Self::TechnicalInterview => 2,
            Self::CultureFit => 3,
            Self::OfferSent => 4,
            Self::Hired => 5,
        }
    }

    /// One-based column position on the board.
    pub fn position(&self) -> usize {
        self.index() + 1
    }

    pub fn from_position(position: usize) -> Option<Stage> {
        position
            .checked_sub(1)
            .and_then(|idx| STAGES.get(idx))
            .copied()
    }

    /// Normalize a stored status label into a stage.
    ///
    /// Lower-cases and trims the input before matching. Missing, empty and
    /// unrecognized labels all land in `Applied`.
    pub fn classify(raw: Option<&str>) -> Stage {
        raw.and_then(|s| s.trim().to_lowercase().parse().ok())
            .unwrap_or(Stage::Applied)
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        STAGES
            .iter()
            .find(|stage| stage.as_str() == s)
            .copied()
            .ok_or_else(|| format!("Invalid stage: {}", s))
    }
}
