//! Mediator document types read by the risk engine.
//!
//! These mirror the document shape of the upstream mediator platform, which
//! uses camelCase field names. Every optional field carries a serde default
//! so a sparse document deserializes into a fully-populated struct; the
//! engine never distinguishes "field missing" from "field empty".

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a mediator (e.g. "med_6510f3a2").
pub type MediatorId = String;

/// Kind of relationship between a mediator and an external entity.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    LawFirm,
    Employer,
    Donor,
    BoardMember,
    Other,
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::LawFirm => "law_firm",
            Self::Employer => "employer",
            Self::Donor => "donor",
            Self::BoardMember => "board_member",
            Self::Other => "other",
        };
        write!(f, "{}", s)
    }
}

/// Administrator-assigned risk tag on an affiliation record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Outcome of a historical case engagement.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CaseOutcome {
    Won,
    Lost,
    Settled,
    Withdrawn,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A recorded relationship between a mediator and an external entity.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Affiliation {
    pub entity: String,
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub is_current: bool,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub details: String,
}

/// A single historical engagement in the mediator's case record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseRecord {
    pub party_name: String,
    #[serde(default)]
    pub outcome: CaseOutcome,
    pub year: i32,
}

/// Profile maintenance metadata.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DataQuality {
    /// Profile completeness, 0-100.
    #[serde(default)]
    pub completeness: u8,
    #[serde(default)]
    pub last_verified: Option<NaiveDate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
}

/// Read-only mediator projection consumed by the engine.
///
/// `known_affiliations` and `cases` are append-only upstream; the engine
/// treats the whole document as an immutable snapshot per request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Mediator {
    pub id: MediatorId,
    pub name: String,
    #[serde(default)]
    pub years_experience: u32,
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub location: Option<Location>,
    /// Average rating, 0-5. Zero means no ratings recorded.
    #[serde(default)]
    pub rating: f64,
    /// Signed ideology score, roughly -10 (liberal) to +10 (conservative).
    #[serde(default)]
    pub ideology_score: f64,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default)]
    pub known_affiliations: Vec<Affiliation>,
    #[serde(default)]
    pub cases: Vec<CaseRecord>,
    #[serde(default)]
    pub data_quality: DataQuality,
}

impl Default for Mediator {
    fn default() -> Self {
        Self {
            id: String::new(),
            name: String::new(),
            years_experience: 0,
            specializations: Vec::new(),
            location: None,
            rating: 0.0,
            ideology_score: 0.0,
            is_verified: false,
            known_affiliations: Vec::new(),
            cases: Vec::new(),
            data_quality: DataQuality::default(),
        }
    }
}

/// Caller-supplied role tag on a case party.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PartyRole {
    Plaintiff,
    Defendant,
    Counsel,
    Witness,
    Other,
}

impl PartyRole {
    /// Parse a role tag from CLI/request input. Case-insensitive.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "plaintiff" => Some(Self::Plaintiff),
            "defendant" => Some(Self::Defendant),
            "counsel" => Some(Self::Counsel),
            "witness" => Some(Self::Witness),
            "other" => Some(Self::Other),
            _ => None,
        }
    }
}

/// A case party as supplied by the caller.
///
/// Parties have no independent identity; two parties naming the same
/// real-world entity are reconciled by normalized-text matching in
/// `entity_match`, not by id. The role tag is context for reviewers and
/// does not affect detection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub name: String,
    #[serde(default)]
    pub role: Option<PartyRole>,
}

impl Party {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: None,
        }
    }

    pub fn with_role(name: impl Into<String>, role: PartyRole) -> Self {
        Self {
            name: name.into(),
            role: Some(role),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_document_deserializes_with_defaults() {
        let m: Mediator =
            serde_json::from_str(r#"{"id": "med_1", "name": "Jane Doe"}"#).unwrap();
        assert_eq!(m.years_experience, 0);
        assert!(m.specializations.is_empty());
        assert!(m.known_affiliations.is_empty());
        assert!(m.cases.is_empty());
        assert_eq!(m.data_quality.completeness, 0);
        assert!(m.data_quality.last_verified.is_none());
        assert!(!m.is_verified);
    }

    #[test]
    fn camel_case_fields_round_trip() {
        let m = Mediator {
            id: "med_2".to_string(),
            name: "John Smith".to_string(),
            years_experience: 12,
            known_affiliations: vec![Affiliation {
                entity: "Acme Corp".to_string(),
                relationship_type: RelationshipType::LawFirm,
                is_current: true,
                risk_level: RiskLevel::High,
                details: String::new(),
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&m).unwrap();
        assert!(json.contains("yearsExperience"));
        assert!(json.contains("knownAffiliations"));
        assert!(json.contains("law_firm"));
        let back: Mediator = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }

    #[test]
    fn unknown_case_outcome_falls_back() {
        let c: CaseRecord = serde_json::from_str(
            r#"{"partyName": "Acme", "outcome": "dismissed_with_prejudice", "year": 2020}"#,
        )
        .unwrap();
        assert_eq!(c.outcome, CaseOutcome::Unknown);
    }

    #[test]
    fn party_role_parse() {
        assert_eq!(PartyRole::parse("Plaintiff"), Some(PartyRole::Plaintiff));
        assert_eq!(PartyRole::parse(" defendant "), Some(PartyRole::Defendant));
        assert_eq!(PartyRole::parse("judge"), None);
    }
}
