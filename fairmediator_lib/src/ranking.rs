//! Weighted match scoring and candidate ranking.
//!
//! Combines mediator attributes (experience, specialization overlap,
//! rating, ideology alignment) with the conflict risk score into one
//! composite used to rank and filter candidates. Risk only ever
//! subtracts: a conflicted mediator can never outrank a clean one with
//! otherwise equal attributes.

use serde::{Deserialize, Serialize};

use crate::conflict::{detect, DetectConfig};
use crate::entity_match::normalize_entity;
use crate::error::FairMediatorError;
use crate::risk::{assess, RiskAssessment, RiskBand};
use crate::store::MediatorStore;
use crate::types::{Mediator, MediatorId, Party};

/// Years of experience beyond this cap add nothing to the score.
pub const EXPERIENCE_CAP_YEARS: u32 = 25;
/// Width of the ideology scale (-10 to +10) used to normalize alignment.
pub const IDEOLOGY_RANGE: f64 = 20.0;

/// Search criteria a candidate is scored against.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    #[serde(default)]
    pub required_specializations: Vec<String>,
    /// Case parties to screen against; empty means no risk penalty.
    #[serde(default)]
    pub parties: Vec<Party>,
    /// Target ideology score; `None` drops the alignment component.
    #[serde(default)]
    pub ideology_preference: Option<f64>,
}

/// Component weights for the composite score. Each must be in 0..=1.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RankWeights {
    pub experience: f64,
    pub specialization: f64,
    pub rating: f64,
    pub risk: f64,
    pub ideology: f64,
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            experience: 0.2,
            specialization: 0.3,
            rating: 0.2,
            risk: 0.2,
            ideology: 0.1,
        }
    }
}

impl RankWeights {
    /// Parse weights from a TOML document. Missing keys keep their
    /// defaults; out-of-range values are rejected.
    pub fn from_toml_str(content: &str) -> Result<Self, FairMediatorError> {
        let weights: Self = toml::from_str(content)
            .map_err(|e| FairMediatorError::InvalidInput(format!("weights TOML: {}", e)))?;
        crate::validation::validate_weights(&weights)?;
        Ok(weights)
    }
}

/// Weighted contribution of each component to the total.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub experience: f64,
    pub specialization_match: f64,
    pub rating: f64,
    /// Non-positive: `-(risk score / 100) * weight`.
    pub risk_penalty: f64,
    pub ideology_alignment: f64,
}

/// Composite match score for one mediator against one set of criteria.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchScore {
    pub mediator_id: MediatorId,
    pub name: String,
    pub years_experience: u32,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    /// The risk assessment backing the penalty; empty when the criteria
    /// carried no parties.
    pub risk: RiskAssessment,
}

/// Ranking options for candidate search.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatchOptions {
    /// Include candidates whose risk band is high. Off by default.
    pub include_high_risk: bool,
    /// Keep only the best `top_k` results after sorting.
    pub top_k: Option<usize>,
}

/// Side-by-side comparison result for an explicit id list.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompareResult {
    pub scores: Vec<MatchScore>,
    pub not_found: Vec<MediatorId>,
}

/// Fraction of required specializations the mediator covers, matched on
/// normalized text. 1.0 when nothing is required.
fn specialization_fraction(mediator: &Mediator, required: &[String]) -> f64 {
    if required.is_empty() {
        return 1.0;
    }
    let offered: Vec<String> = mediator
        .specializations
        .iter()
        .map(|s| normalize_entity(s))
        .collect();
    let covered = required
        .iter()
        .filter(|r| offered.contains(&normalize_entity(r)))
        .count();
    covered as f64 / required.len() as f64
}

/// Score one mediator against the criteria.
pub fn score_mediator(
    mediator: &Mediator,
    criteria: &MatchCriteria,
    weights: &RankWeights,
    cfg: &DetectConfig,
) -> MatchScore {
    let experience_norm =
        mediator.years_experience.min(EXPERIENCE_CAP_YEARS) as f64 / EXPERIENCE_CAP_YEARS as f64;
    let rating_norm = (mediator.rating / 5.0).clamp(0.0, 1.0);

    let risk = assess(&mediator.id, detect(mediator, &criteria.parties, cfg));
    let risk_penalty = -(risk.score / 100.0) * weights.risk;

    let ideology_alignment = match criteria.ideology_preference {
        Some(target) => {
            let alignment =
                (1.0 - (mediator.ideology_score - target).abs() / IDEOLOGY_RANGE).clamp(0.0, 1.0);
            alignment * weights.ideology
        }
        None => 0.0,
    };

    let breakdown = ScoreBreakdown {
        experience: experience_norm * weights.experience,
        specialization_match: specialization_fraction(
            mediator,
            &criteria.required_specializations,
        ) * weights.specialization,
        rating: rating_norm * weights.rating,
        risk_penalty,
        ideology_alignment,
    };
    let total = breakdown.experience
        + breakdown.specialization_match
        + breakdown.rating
        + breakdown.risk_penalty
        + breakdown.ideology_alignment;

    MatchScore {
        mediator_id: mediator.id.clone(),
        name: mediator.name.clone(),
        years_experience: mediator.years_experience,
        total,
        breakdown,
        risk,
    }
}

/// Sort scores for ranking: total descending, ties broken by years of
/// experience descending then name ascending, for deterministic output.
fn sort_scores(scores: &mut [MatchScore]) {
    scores.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.years_experience.cmp(&a.years_experience))
            .then_with(|| a.name.cmp(&b.name))
    });
}

/// Rank the store's candidate pool against the criteria.
///
/// High-risk candidates are dropped unless `options.include_high_risk` is
/// set; results are sorted best-first and truncated to `options.top_k`.
pub fn find_matching_mediators(
    store: &dyn MediatorStore,
    criteria: &MatchCriteria,
    weights: &RankWeights,
    options: &MatchOptions,
    cfg: &DetectConfig,
) -> Result<Vec<MatchScore>, FairMediatorError> {
    let candidates = store.fetch_candidates()?;
    let mut scores: Vec<MatchScore> = candidates
        .iter()
        .map(|m| score_mediator(m, criteria, weights, cfg))
        .filter(|s| options.include_high_risk || s.risk.overall_risk_level != RiskBand::High)
        .collect();
    sort_scores(&mut scores);
    if let Some(k) = options.top_k {
        scores.truncate(k);
    }
    Ok(scores)
}

/// Score an explicit id list for side-by-side display. No pool fetch, no
/// risk filter: high-risk mediators are included so reviewers can see
/// exactly why they rank where they do.
pub fn compare_mediators(
    store: &dyn MediatorStore,
    ids: &[MediatorId],
    criteria: &MatchCriteria,
    weights: &RankWeights,
    cfg: &DetectConfig,
) -> Result<CompareResult, FairMediatorError> {
    let fetched = store.fetch_mediators_by_ids(ids)?;
    let mut not_found: Vec<MediatorId> = Vec::new();
    for id in ids {
        if !fetched.iter().any(|m| &m.id == id) && !not_found.contains(id) {
            not_found.push(id.clone());
        }
    }
    let mut scores: Vec<MatchScore> = fetched
        .iter()
        .map(|m| score_mediator(m, criteria, weights, cfg))
        .collect();
    sort_scores(&mut scores);
    Ok(CompareResult { scores, not_found })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::{Affiliation, RelationshipType, RiskLevel};
    use chrono::NaiveDate;

    fn fixed_cfg() -> DetectConfig {
        DetectConfig {
            staleness_years: 5,
            reference_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    fn clean_mediator(id: &str, name: &str) -> Mediator {
        Mediator {
            id: id.to_string(),
            name: name.to_string(),
            years_experience: 10,
            specializations: vec!["employment".to_string(), "commercial".to_string()],
            rating: 4.0,
            ideology_score: 0.0,
            ..Default::default()
        }
    }

    fn conflicted_mediator(id: &str, name: &str) -> Mediator {
        let mut m = clean_mediator(id, name);
        m.known_affiliations = vec![
            Affiliation {
                entity: "Acme Corp".to_string(),
                relationship_type: RelationshipType::LawFirm,
                is_current: true,
                risk_level: RiskLevel::High,
                details: String::new(),
            },
            Affiliation {
                entity: "Acme Corporation Holdings".to_string(),
                relationship_type: RelationshipType::BoardMember,
                is_current: true,
                risk_level: RiskLevel::High,
                details: String::new(),
            },
        ];
        m
    }

    fn criteria_with_parties() -> MatchCriteria {
        MatchCriteria {
            required_specializations: vec!["employment".to_string()],
            parties: vec![Party::new("Acme Corp")],
            ideology_preference: None,
        }
    }

    #[test]
    fn experience_is_capped() {
        let mut m = clean_mediator("med_1", "A");
        m.years_experience = 40;
        let score = score_mediator(&m, &MatchCriteria::default(), &RankWeights::default(), &fixed_cfg());
        assert_eq!(score.breakdown.experience, 0.2);
    }

    #[test]
    fn specialization_fraction_scales() {
        let m = clean_mediator("med_1", "A");
        let criteria = MatchCriteria {
            required_specializations: vec![
                "employment".to_string(),
                "maritime".to_string(),
            ],
            ..Default::default()
        };
        let score =
            score_mediator(&m, &criteria, &RankWeights::default(), &fixed_cfg());
        // Covers 1 of 2 required at weight 0.3.
        assert!((score.breakdown.specialization_match - 0.15).abs() < 1e-9);
    }

    #[test]
    fn no_required_specializations_scores_full() {
        let m = clean_mediator("med_1", "A");
        let score = score_mediator(
            &m,
            &MatchCriteria::default(),
            &RankWeights::default(),
            &fixed_cfg(),
        );
        assert!((score.breakdown.specialization_match - 0.3).abs() < 1e-9);
    }

    #[test]
    fn ideology_alignment_only_with_preference() {
        let mut m = clean_mediator("med_1", "A");
        m.ideology_score = 2.0;
        let without = score_mediator(
            &m,
            &MatchCriteria::default(),
            &RankWeights::default(),
            &fixed_cfg(),
        );
        assert_eq!(without.breakdown.ideology_alignment, 0.0);

        let criteria = MatchCriteria {
            ideology_preference: Some(0.0),
            ..Default::default()
        };
        let with = score_mediator(&m, &criteria, &RankWeights::default(), &fixed_cfg());
        // 1 - |2 - 0| / 20 = 0.9, weighted by 0.1.
        assert!((with.breakdown.ideology_alignment - 0.09).abs() < 1e-9);
    }

    #[test]
    fn conflicted_mediator_never_outranks_clean_twin() {
        let clean = clean_mediator("med_b", "Beta");
        let conflicted = conflicted_mediator("med_a", "Alpha");
        let criteria = criteria_with_parties();
        let weights = RankWeights::default();

        let clean_score = score_mediator(&clean, &criteria, &weights, &fixed_cfg());
        let conflicted_score = score_mediator(&conflicted, &criteria, &weights, &fixed_cfg());

        assert!(clean_score.total > conflicted_score.total);
        assert!(conflicted_score.breakdown.risk_penalty < 0.0);
        assert_eq!(clean_score.breakdown.risk_penalty, 0.0);
    }

    #[test]
    fn find_matching_excludes_high_risk_by_default() {
        let mut store = InMemoryStore::new();
        store.insert(clean_mediator("med_b", "Beta"));
        store.insert(conflicted_mediator("med_a", "Alpha"));

        let results = find_matching_mediators(
            &store,
            &criteria_with_parties(),
            &RankWeights::default(),
            &MatchOptions::default(),
            &fixed_cfg(),
        )
        .unwrap();
        let ids: Vec<&str> = results.iter().map(|s| s.mediator_id.as_str()).collect();
        assert_eq!(ids, vec!["med_b"]);

        let with_high_risk = find_matching_mediators(
            &store,
            &criteria_with_parties(),
            &RankWeights::default(),
            &MatchOptions {
                include_high_risk: true,
                top_k: None,
            },
            &fixed_cfg(),
        )
        .unwrap();
        assert_eq!(with_high_risk.len(), 2);
        assert_eq!(with_high_risk[0].mediator_id, "med_b");
    }

    #[test]
    fn top_k_truncates_after_sorting() {
        let mut store = InMemoryStore::new();
        for (id, name, years) in [
            ("med_1", "Able", 5u32),
            ("med_2", "Baker", 15),
            ("med_3", "Cole", 25),
        ] {
            let mut m = clean_mediator(id, name);
            m.years_experience = years;
            store.insert(m);
        }

        let results = find_matching_mediators(
            &store,
            &MatchCriteria::default(),
            &RankWeights::default(),
            &MatchOptions {
                include_high_risk: false,
                top_k: Some(2),
            },
            &fixed_cfg(),
        )
        .unwrap();
        let ids: Vec<&str> = results.iter().map(|s| s.mediator_id.as_str()).collect();
        assert_eq!(ids, vec!["med_3", "med_2"]);
    }

    #[test]
    fn ties_broken_by_experience_then_name() {
        let mut store = InMemoryStore::new();
        let mut a = clean_mediator("med_a", "Zeta");
        a.years_experience = 12;
        let mut b = clean_mediator("med_b", "Alpha");
        b.years_experience = 12;
        let mut c = clean_mediator("med_c", "Midway");
        c.years_experience = 20;
        // Keep totals equal by capping experience's effect: same rating and
        // specializations, but different years. c should lead on total.
        store.insert(a);
        store.insert(b);
        store.insert(c);

        let results = find_matching_mediators(
            &store,
            &MatchCriteria::default(),
            &RankWeights::default(),
            &MatchOptions::default(),
            &fixed_cfg(),
        )
        .unwrap();
        let names: Vec<&str> = results.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Midway", "Alpha", "Zeta"]);
    }

    #[test]
    fn compare_includes_high_risk_and_reports_missing() {
        let mut store = InMemoryStore::new();
        store.insert(clean_mediator("med_b", "Beta"));
        store.insert(conflicted_mediator("med_a", "Alpha"));

        let result = compare_mediators(
            &store,
            &[
                "med_a".to_string(),
                "med_b".to_string(),
                "med_x".to_string(),
            ],
            &criteria_with_parties(),
            &RankWeights::default(),
            &fixed_cfg(),
        )
        .unwrap();

        assert_eq!(result.scores.len(), 2);
        assert_eq!(result.not_found, vec!["med_x".to_string()]);
        assert_eq!(result.scores[0].mediator_id, "med_b");
    }

    #[test]
    fn weights_parse_from_toml() {
        let weights = RankWeights::from_toml_str("risk = 0.4\nrating = 0.1\n").unwrap();
        assert_eq!(weights.risk, 0.4);
        assert_eq!(weights.rating, 0.1);
        // Unspecified keys keep defaults.
        assert_eq!(weights.specialization, 0.3);
    }

    #[test]
    fn out_of_range_weights_rejected() {
        assert!(RankWeights::from_toml_str("risk = 1.5").is_err());
        assert!(RankWeights::from_toml_str("rating = -0.1").is_err());
        assert!(RankWeights::from_toml_str("not valid toml [").is_err());
    }
}
