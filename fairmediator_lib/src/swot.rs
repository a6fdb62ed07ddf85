//! Rule-based SWOT synthesis for mediator profiles.
//!
//! Each category is an ordered list of named pure predicates over the
//! mediator document; rules fire independently, so ordering affects
//! display only. Conflict findings, when supplied, contribute either a
//! threat (conflicts present) or a strength (screened clean).

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::conflict::ConflictFinding;
use crate::error::FairMediatorError;
use crate::store::MediatorStore;
use crate::types::{Mediator, MediatorId, RelationshipType, RiskLevel};

/// Category score coefficients. Threats (conflicts) weigh heaviest on
/// purpose: a mediator with open exposure should not rate well no matter
/// how strong the rest of the profile looks.
pub const STRENGTH_POINTS: i32 = 10;
pub const WEAKNESS_POINTS: i32 = 8;
pub const OPPORTUNITY_POINTS: i32 = 5;
pub const THREAT_POINTS: i32 = 12;

/// Qualitative rating derived from the assessment score.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SwotRating {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl SwotRating {
    pub fn from_score(score: i32) -> Self {
        if score >= 40 {
            Self::Excellent
        } else if score >= 20 {
            Self::Good
        } else if score >= 0 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    fn recommendation(self) -> &'static str {
        match self {
            Self::Excellent => "Highly recommended",
            Self::Good => "Recommended",
            Self::Fair => "Acceptable with review",
            Self::Poor => "Not recommended without further vetting",
        }
    }
}

impl fmt::Display for SwotRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        };
        write!(f, "{}", s)
    }
}

/// Overall assessment attached to a SWOT result.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwotAssessment {
    pub score: i32,
    pub rating: SwotRating,
    pub recommendation: String,
}

/// Categorized SWOT summary for one mediator. Recomputed on demand.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SwotResult {
    pub mediator_id: MediatorId,
    pub mediator_name: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub opportunities: Vec<String>,
    pub threats: Vec<String>,
    pub assessment: SwotAssessment,
}

type Rule = fn(&Mediator) -> Option<String>;

// -- Strength rules --

fn extensive_experience(m: &Mediator) -> Option<String> {
    if m.years_experience >= 15 {
        Some(format!(
            "Extensive experience: {} years in practice",
            m.years_experience
        ))
    } else if m.years_experience >= 7 {
        Some(format!(
            "Established practice: {} years of experience",
            m.years_experience
        ))
    } else {
        None
    }
}

fn verified_profile(m: &Mediator) -> Option<String> {
    m.is_verified
        .then(|| "Verified professional credentials".to_string())
}

fn high_rating(m: &Mediator) -> Option<String> {
    (m.rating >= 4.5).then(|| format!("Highly rated by parties ({:.1}/5)", m.rating))
}

fn ideological_neutrality(m: &Mediator) -> Option<String> {
    (m.ideology_score.abs() <= 2.0)
        .then(|| "Ideologically neutral profile".to_string())
}

fn broad_specialization(m: &Mediator) -> Option<String> {
    (m.specializations.len() >= 3).then(|| {
        format!(
            "Broad practice coverage across {} specializations",
            m.specializations.len()
        )
    })
}

fn well_maintained_profile(m: &Mediator) -> Option<String> {
    (m.data_quality.completeness >= 80)
        .then(|| "Profile data is complete and current".to_string())
}

const STRENGTH_RULES: &[Rule] = &[
    extensive_experience,
    verified_profile,
    high_rating,
    ideological_neutrality,
    broad_specialization,
    well_maintained_profile,
];

// -- Weakness rules --

fn limited_experience(m: &Mediator) -> Option<String> {
    (m.years_experience < 3).then(|| {
        format!(
            "Limited track record: only {} years of experience",
            m.years_experience
        )
    })
}

fn low_rating(m: &Mediator) -> Option<String> {
    (m.rating > 0.0 && m.rating < 3.5)
        .then(|| format!("Below-average party rating ({:.1}/5)", m.rating))
}

fn unverified_profile(m: &Mediator) -> Option<String> {
    (!m.is_verified).then(|| "Credentials not yet verified".to_string())
}

fn never_verified_data(m: &Mediator) -> Option<String> {
    m.data_quality
        .last_verified
        .is_none()
        .then(|| "Profile data has never been verified".to_string())
}

fn no_specializations(m: &Mediator) -> Option<String> {
    m.specializations
        .is_empty()
        .then(|| "No recorded practice specializations".to_string())
}

fn sparse_profile(m: &Mediator) -> Option<String> {
    (m.data_quality.completeness < 50).then(|| {
        format!(
            "Sparse profile data ({}% complete)",
            m.data_quality.completeness
        )
    })
}

const WEAKNESS_RULES: &[Rule] = &[
    limited_experience,
    low_rating,
    unverified_profile,
    never_verified_data,
    no_specializations,
    sparse_profile,
];

// -- Opportunity rules --

fn room_to_expand(m: &Mediator) -> Option<String> {
    (!m.specializations.is_empty() && m.specializations.len() <= 2)
        .then(|| "Capacity to expand into additional practice areas".to_string())
}

fn established_history(m: &Mediator) -> Option<String> {
    (m.cases.len() >= 10).then(|| {
        format!(
            "Established case history ({} engagements) to build on",
            m.cases.len()
        )
    })
}

fn unencumbered(m: &Mediator) -> Option<String> {
    m.known_affiliations
        .iter()
        .all(|a| !a.is_current)
        .then(|| "No current affiliations to manage around".to_string())
}

fn high_profile_candidate(m: &Mediator) -> Option<String> {
    (m.is_verified && m.rating >= 4.0)
        .then(|| "Strong candidate for high-profile matters".to_string())
}

const OPPORTUNITY_RULES: &[Rule] = &[
    room_to_expand,
    established_history,
    unencumbered,
    high_profile_candidate,
];

// -- Threat rules --

fn current_high_risk_affiliation(m: &Mediator) -> Option<String> {
    let count = m
        .known_affiliations
        .iter()
        .filter(|a| a.is_current && a.risk_level == RiskLevel::High)
        .count();
    (count > 0).then(|| {
        format!(
            "{} current high-risk affiliation(s) on record",
            count
        )
    })
}

fn donor_relationships(m: &Mediator) -> Option<String> {
    let count = m
        .known_affiliations
        .iter()
        .filter(|a| a.relationship_type == RelationshipType::Donor)
        .count();
    (count > 0).then(|| format!("{} donor relationship(s) may invite challenge", count))
}

fn pronounced_lean(m: &Mediator) -> Option<String> {
    (m.ideology_score.abs() > 6.0).then(|| {
        format!(
            "Pronounced ideological lean (score {:+.1})",
            m.ideology_score
        )
    })
}

fn largely_unvetted(m: &Mediator) -> Option<String> {
    (m.data_quality.completeness < 30)
        .then(|| "Profile is largely unvetted".to_string())
}

fn no_observable_history(m: &Mediator) -> Option<String> {
    (m.cases.is_empty() && m.known_affiliations.is_empty())
        .then(|| "No observable case or affiliation history".to_string())
}

const THREAT_RULES: &[Rule] = &[
    current_high_risk_affiliation,
    donor_relationships,
    pronounced_lean,
    largely_unvetted,
    no_observable_history,
];

fn apply_rules(rules: &[Rule], mediator: &Mediator) -> Vec<String> {
    rules.iter().filter_map(|rule| rule(mediator)).collect()
}

/// Generate a SWOT summary for one mediator.
///
/// `conflict_findings` integrates a prior detection pass: a non-empty
/// list appends a threat summarizing the count, an empty list appends a
/// strength noting a clean screen, and `None` means no screen was run.
pub fn generate(mediator: &Mediator, conflict_findings: Option<&[ConflictFinding]>) -> SwotResult {
    let mut strengths = apply_rules(STRENGTH_RULES, mediator);
    let weaknesses = apply_rules(WEAKNESS_RULES, mediator);
    let opportunities = apply_rules(OPPORTUNITY_RULES, mediator);
    let mut threats = apply_rules(THREAT_RULES, mediator);

    match conflict_findings {
        Some([]) => {
            strengths.push("No conflicts of interest found against the supplied parties".to_string());
        }
        Some(findings) => {
            threats.push(format!(
                "{} potential conflict(s) of interest detected against the supplied parties",
                findings.len()
            ));
        }
        None => {}
    }

    let score = STRENGTH_POINTS * strengths.len() as i32
        - WEAKNESS_POINTS * weaknesses.len() as i32
        + OPPORTUNITY_POINTS * opportunities.len() as i32
        - THREAT_POINTS * threats.len() as i32;
    let rating = SwotRating::from_score(score);

    SwotResult {
        mediator_id: mediator.id.clone(),
        mediator_name: mediator.name.clone(),
        strengths,
        weaknesses,
        opportunities,
        threats,
        assessment: SwotAssessment {
            score,
            rating,
            recommendation: rating.recommendation().to_string(),
        },
    }
}

/// Generate SWOT summaries for an id list, best score first.
///
/// Ids that fail to resolve are logged and skipped; one missing mediator
/// never aborts the comparison.
pub fn compare_swot(
    store: &dyn MediatorStore,
    ids: &[MediatorId],
) -> Result<Vec<SwotResult>, FairMediatorError> {
    let fetched = store.fetch_mediators_by_ids(ids)?;
    for id in ids {
        if !fetched.iter().any(|m| &m.id == id) {
            warn!(mediator_id = %id, "skipping unresolved mediator in SWOT comparison");
        }
    }
    let mut results: Vec<SwotResult> = fetched.iter().map(|m| generate(m, None)).collect();
    results.sort_by(|a, b| {
        b.assessment
            .score
            .cmp(&a.assessment.score)
            .then_with(|| a.mediator_name.cmp(&b.mediator_name))
    });
    Ok(results)
}
