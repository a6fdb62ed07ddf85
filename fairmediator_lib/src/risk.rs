//! Risk scoring and banding over conflict findings.
//!
//! Pure, total functions: the same finding list always produces the same
//! score, which callers rely on for caching and reproducible audits.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::conflict::{ConflictFinding, Detection, DetectionDiagnostics, Severity};
use crate::types::MediatorId;

/// Score contribution per severe finding, weighted by confidence.
pub const SEVERE_WEIGHT: f64 = 40.0;
/// Score contribution per moderate finding, weighted by confidence.
pub const MODERATE_WEIGHT: f64 = 20.0;
/// Score contribution per minor finding, weighted by confidence.
pub const MINOR_WEIGHT: f64 = 8.0;
/// Risk scores are capped here.
pub const MAX_SCORE: f64 = 100.0;

/// Discrete risk bucket derived from the continuous score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RiskBand {
    None,
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Band mapping: 0 -> none, (0, 25) -> low, [25, 60) -> medium,
    /// [60, 100] -> high.
    pub fn from_score(score: f64) -> Self {
        if score <= 0.0 {
            Self::None
        } else if score < 25.0 {
            Self::Low
        } else if score < 60.0 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// Cheap traffic-light flag for UI badges: red = high, yellow = medium or
/// low, green = none.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum QuickFlag {
    Red,
    Yellow,
    Green,
}

impl From<RiskBand> for QuickFlag {
    fn from(band: RiskBand) -> Self {
        match band {
            RiskBand::High => Self::Red,
            RiskBand::Medium | RiskBand::Low => Self::Yellow,
            RiskBand::None => Self::Green,
        }
    }
}

impl fmt::Display for QuickFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
        };
        write!(f, "{}", s)
    }
}

/// Full conflict risk assessment for one mediator. Computed fresh per
/// request; the engine holds no state between assessments.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub mediator_id: MediatorId,
    pub overall_risk_level: RiskBand,
    pub score: f64,
    pub findings: Vec<ConflictFinding>,
    /// True iff any finding exists, independent of the band: a single
    /// minor finding still flags for UI purposes even when the band is low.
    pub has_conflicts: bool,
    pub diagnostics: DetectionDiagnostics,
}

fn severity_weight(severity: Severity) -> f64 {
    match severity {
        Severity::Severe => SEVERE_WEIGHT,
        Severity::Moderate => MODERATE_WEIGHT,
        Severity::Minor => MINOR_WEIGHT,
    }
}

/// Aggregate findings into a numeric score and its band.
///
/// Each finding contributes its severity weight scaled by confidence; the
/// sum is capped at [`MAX_SCORE`].
pub fn score_findings(findings: &[ConflictFinding]) -> (f64, RiskBand) {
    let raw: f64 = findings
        .iter()
        .map(|f| severity_weight(f.severity) * f.confidence)
        .sum();
    let score = raw.min(MAX_SCORE);
    (score, RiskBand::from_score(score))
}

/// Build a full assessment from a detection pass.
pub fn assess(mediator_id: &str, detection: Detection) -> RiskAssessment {
    let (score, band) = score_findings(&detection.findings);
    RiskAssessment {
        mediator_id: mediator_id.to_string(),
        overall_risk_level: band,
        score,
        has_conflicts: !detection.findings.is_empty(),
        findings: detection.findings,
        diagnostics: detection.diagnostics,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conflict::FindingSource;

    fn finding(severity: Severity, confidence: f64) -> ConflictFinding {
        ConflictFinding {
            party: "Acme Corp".to_string(),
            matched_affiliation: "Acme Corporation".to_string(),
            relationship_type: None,
            severity,
            source: FindingSource::Affiliation,
            confidence,
        }
    }

    #[test]
    fn empty_findings_score_zero_band_none() {
        let (score, band) = score_findings(&[]);
        assert_eq!(score, 0.0);
        assert_eq!(band, RiskBand::None);
    }

    #[test]
    fn severity_weights() {
        assert_eq!(score_findings(&[finding(Severity::Severe, 1.0)]).0, 40.0);
        assert_eq!(score_findings(&[finding(Severity::Moderate, 1.0)]).0, 20.0);
        assert_eq!(score_findings(&[finding(Severity::Minor, 1.0)]).0, 8.0);
    }

    #[test]
    fn confidence_scales_contribution() {
        let (score, band) = score_findings(&[finding(Severity::Severe, 0.5)]);
        assert_eq!(score, 20.0);
        assert_eq!(band, RiskBand::Low);
    }

    #[test]
    fn score_capped_at_100() {
        let findings: Vec<_> = (0..5).map(|_| finding(Severity::Severe, 1.0)).collect();
        let (score, band) = score_findings(&findings);
        assert_eq!(score, 100.0);
        assert_eq!(band, RiskBand::High);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(RiskBand::from_score(0.0), RiskBand::None);
        assert_eq!(RiskBand::from_score(0.5), RiskBand::Low);
        assert_eq!(RiskBand::from_score(24.9), RiskBand::Low);
        assert_eq!(RiskBand::from_score(25.0), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(59.9), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(60.0), RiskBand::High);
        assert_eq!(RiskBand::from_score(100.0), RiskBand::High);
    }

    #[test]
    fn adding_severe_finding_never_decreases_score() {
        let mut findings = vec![finding(Severity::Minor, 1.0)];
        let (before, _) = score_findings(&findings);
        findings.push(finding(Severity::Severe, 1.0));
        let (after, _) = score_findings(&findings);
        assert!(after >= before);
    }

    #[test]
    fn single_minor_finding_still_flags_conflicts() {
        let detection = Detection {
            findings: vec![finding(Severity::Minor, 1.0)],
            diagnostics: DetectionDiagnostics::default(),
        };
        let assessment = assess("med_1", detection);
        assert!(assessment.has_conflicts);
        assert_eq!(assessment.overall_risk_level, RiskBand::Low);
    }

    #[test]
    fn no_findings_means_no_conflicts() {
        let detection = Detection {
            findings: vec![],
            diagnostics: DetectionDiagnostics::default(),
        };
        let assessment = assess("med_1", detection);
        assert!(!assessment.has_conflicts);
        assert_eq!(assessment.overall_risk_level, RiskBand::None);
        assert_eq!(assessment.score, 0.0);
    }

    #[test]
    fn quick_flag_mapping() {
        assert_eq!(QuickFlag::from(RiskBand::High), QuickFlag::Red);
        assert_eq!(QuickFlag::from(RiskBand::Medium), QuickFlag::Yellow);
        assert_eq!(QuickFlag::from(RiskBand::Low), QuickFlag::Yellow);
        assert_eq!(QuickFlag::from(RiskBand::None), QuickFlag::Green);
    }

    #[test]
    fn scoring_is_deterministic() {
        let findings = vec![
            finding(Severity::Severe, 1.0),
            finding(Severity::Moderate, 0.8),
        ];
        assert_eq!(score_findings(&findings), score_findings(&findings));
    }
}
