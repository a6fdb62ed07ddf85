//! Conflict-of-interest detection.
//!
//! Runs the entity matcher over a mediator's known affiliations and case
//! history against a set of case parties, producing severity-tagged
//! findings. Pure computation over an already-fetched mediator snapshot;
//! bad rows are skipped and counted, never raised.

use std::collections::HashMap;
use std::fmt;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::entity_match::match_confidence;
use crate::types::{Mediator, Party, RelationshipType, RiskLevel};

/// Default staleness window for case-history findings, in years.
pub const DEFAULT_STALENESS_YEARS: i32 = 5;

/// Qualitative severity of a single conflict finding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minor,
    Moderate,
    Severe,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Minor => "minor",
            Self::Moderate => "moderate",
            Self::Severe => "severe",
        };
        write!(f, "{}", s)
    }
}

impl From<RiskLevel> for Severity {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::High => Self::Severe,
            RiskLevel::Medium => Self::Moderate,
            RiskLevel::Low => Self::Minor,
        }
    }
}

/// Where a finding was detected.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FindingSource {
    Affiliation,
    CaseHistory,
}

impl fmt::Display for FindingSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Affiliation => "affiliation",
            Self::CaseHistory => "case_history",
        };
        write!(f, "{}", s)
    }
}

/// A single detected overlap between a case party and a mediator's
/// affiliation or case history. Transient: computed per request, never
/// persisted by the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConflictFinding {
    pub party: String,
    pub matched_affiliation: String,
    /// `None` for case-history findings, which carry no relationship tag.
    pub relationship_type: Option<RelationshipType>,
    pub severity: Severity,
    pub source: FindingSource,
    /// Matcher confidence, 0.0-1.0.
    pub confidence: f64,
}

/// Counters for rows skipped during a detection pass. Downstream batch
/// jobs must not abort on one bad row, so these are surfaced as data
/// instead of errors.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DetectionDiagnostics {
    /// Blank or whitespace-only party strings.
    pub skipped_parties: usize,
    /// Affiliation or case rows with a blank entity name.
    pub skipped_records: usize,
}

/// Result of one detection pass over a single mediator.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub findings: Vec<ConflictFinding>,
    pub diagnostics: DetectionDiagnostics,
}

/// Detection configuration.
///
/// The reference date is injectable so the case-recency check is
/// deterministic under test; `Default` uses today.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectConfig {
    /// Case-history findings older than this many years are downgraded
    /// from moderate to minor.
    pub staleness_years: i32,
    pub reference_date: NaiveDate,
}

impl Default for DetectConfig {
    fn default() -> Self {
        Self {
            staleness_years: DEFAULT_STALENESS_YEARS,
            reference_date: Utc::now().date_naive(),
        }
    }
}

impl DetectConfig {
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            staleness_years: DEFAULT_STALENESS_YEARS,
            reference_date,
        }
    }
}

/// Detect conflicts between a mediator and a set of case parties.
///
/// Affiliation matches inherit severity from the affiliation's risk tag
/// (high -> severe, medium -> moderate, low -> minor). Case-history
/// matches default to moderate, downgraded to minor past the staleness
/// window. Findings referencing the same `(party, matched entity)` pair
/// are deduplicated keeping the highest severity; output is sorted by
/// severity descending, then party, then matched entity, so repeated runs
/// over the same snapshot are byte-identical.
///
/// A mediator with no affiliations and no cases yields an empty finding
/// list, not an error.
pub fn detect(mediator: &Mediator, parties: &[Party], cfg: &DetectConfig) -> Detection {
    let mut diagnostics = DetectionDiagnostics::default();
    // Keyed by (party, matched entity); holds the highest-severity finding.
    let mut best: HashMap<(String, String), ConflictFinding> = HashMap::new();

    // Filter out malformed rows up front so each bad row is counted once,
    // not once per party.
    let affiliations: Vec<_> = mediator
        .known_affiliations
        .iter()
        .filter(|a| {
            if a.entity.trim().is_empty() {
                diagnostics.skipped_records += 1;
                warn!(
                    mediator_id = %mediator.id,
                    "skipping affiliation record with blank entity"
                );
                false
            } else {
                true
            }
        })
        .collect();
    let cases: Vec<_> = mediator
        .cases
        .iter()
        .filter(|c| {
            if c.party_name.trim().is_empty() {
                diagnostics.skipped_records += 1;
                warn!(
                    mediator_id = %mediator.id,
                    "skipping case record with blank party name"
                );
                false
            } else {
                true
            }
        })
        .collect();

    for party in parties {
        if party.name.trim().is_empty() {
            diagnostics.skipped_parties += 1;
            continue;
        }

        for affiliation in &affiliations {
            let confidence = match_confidence(&party.name, &affiliation.entity);
            if confidence > 0.0 {
                insert_finding(
                    &mut best,
                    ConflictFinding {
                        party: party.name.clone(),
                        matched_affiliation: affiliation.entity.clone(),
                        relationship_type: Some(affiliation.relationship_type),
                        severity: affiliation.risk_level.into(),
                        source: FindingSource::Affiliation,
                        confidence,
                    },
                );
            }
        }

        for case in &cases {
            let confidence = match_confidence(&party.name, &case.party_name);
            if confidence > 0.0 {
                let stale = cfg.reference_date.year() - case.year > cfg.staleness_years;
                insert_finding(
                    &mut best,
                    ConflictFinding {
                        party: party.name.clone(),
                        matched_affiliation: case.party_name.clone(),
                        relationship_type: None,
                        severity: if stale {
                            Severity::Minor
                        } else {
                            Severity::Moderate
                        },
                        source: FindingSource::CaseHistory,
                        confidence,
                    },
                );
            }
        }
    }

    let mut findings: Vec<ConflictFinding> = best.into_values().collect();
    findings.sort_by(|a, b| {
        b.severity
            .cmp(&a.severity)
            .then_with(|| a.party.cmp(&b.party))
            .then_with(|| a.matched_affiliation.cmp(&b.matched_affiliation))
    });

    Detection {
        findings,
        diagnostics,
    }
}

/// Keep the highest-severity finding per `(party, matched entity)` pair.
/// Affiliation passes run before case-history passes per party, so on a
/// severity tie the affiliation-sourced finding is retained.
fn insert_finding(
    best: &mut HashMap<(String, String), ConflictFinding>,
    finding: ConflictFinding,
) {
    let key = (finding.party.clone(), finding.matched_affiliation.clone());
    match best.get(&key) {
        Some(existing) if existing.severity >= finding.severity => {}
        _ => {
            best.insert(key, finding);
        }
    }
}
