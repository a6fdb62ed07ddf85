//! Batch conflict checking across many mediators.
//!
//! Fans the detector and scorer out over N mediators against one party
//! list. Partial-failure tolerant by construction: unresolved ids land in
//! `not_found` and the rest of the batch completes. Data for all
//! requested ids comes from a single store call, never one fetch per
//! mediator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::conflict::{detect, DetectConfig};
use crate::error::FairMediatorError;
use crate::risk::{assess, QuickFlag, RiskAssessment, RiskBand};
use crate::store::MediatorStore;
use crate::types::{MediatorId, Party};

/// Aggregate counts over a batch, scanned from per-mediator bands.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub total_checked: usize,
    pub with_conflicts: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
}

/// Full batch conflict report.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    pub per_mediator: Vec<RiskAssessment>,
    pub not_found: Vec<MediatorId>,
    pub summary: BatchSummary,
}

/// One row of a quick check: just the id and its traffic-light flag.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickCheckRow {
    pub mediator_id: MediatorId,
    pub flag: QuickFlag,
}

/// Quick-check report: cheap UI badges without finding detail.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuickCheckReport {
    pub flags: Vec<QuickCheckRow>,
    pub not_found: Vec<MediatorId>,
}

/// Fetch the requested mediators once and index them by id. Ids the store
/// could not resolve (absent or corrupt) are reported in the second slot.
fn fetch_indexed(
    store: &dyn MediatorStore,
    ids: &[MediatorId],
) -> Result<(HashMap<MediatorId, crate::types::Mediator>, Vec<MediatorId>), FairMediatorError> {
    let fetched = store.fetch_mediators_by_ids(ids)?;
    let by_id: HashMap<MediatorId, _> =
        fetched.into_iter().map(|m| (m.id.clone(), m)).collect();
    let mut not_found = Vec::new();
    for id in ids {
        if !by_id.contains_key(id) && !not_found.contains(id) {
            not_found.push(id.clone());
        }
    }
    Ok((by_id, not_found))
}

/// Run the full detect-and-score pipeline for each requested mediator.
///
/// Per-mediator results follow the requested id order, so two runs over
/// the same inputs and data produce identical reports. An empty id list
/// yields an empty report rather than an error.
pub fn check_batch(
    store: &dyn MediatorStore,
    ids: &[MediatorId],
    parties: &[Party],
    cfg: &DetectConfig,
) -> Result<BatchReport, FairMediatorError> {
    let (by_id, not_found) = fetch_indexed(store, ids)?;

    let mut per_mediator = Vec::new();
    for id in ids {
        if let Some(mediator) = by_id.get(id) {
            let detection = detect(mediator, parties, cfg);
            per_mediator.push(assess(id, detection));
        }
    }

    let mut summary = BatchSummary {
        total_checked: per_mediator.len(),
        ..Default::default()
    };
    for assessment in &per_mediator {
        if assessment.has_conflicts {
            summary.with_conflicts += 1;
        }
        match assessment.overall_risk_level {
            RiskBand::High => summary.high_risk_count += 1,
            RiskBand::Medium => summary.medium_risk_count += 1,
            _ => {}
        }
    }

    Ok(BatchReport {
        per_mediator,
        not_found,
        summary,
    })
}

/// Same pipeline as [`check_batch`] but returning only per-mediator
/// traffic-light flags, for cheap UI badges.
pub fn quick_check(
    store: &dyn MediatorStore,
    ids: &[MediatorId],
    parties: &[Party],
    cfg: &DetectConfig,
) -> Result<QuickCheckReport, FairMediatorError> {
    let report = check_batch(store, ids, parties, cfg)?;
    Ok(QuickCheckReport {
        flags: report
            .per_mediator
            .into_iter()
            .map(|a| QuickCheckRow {
                mediator_id: a.mediator_id,
                flag: a.overall_risk_level.into(),
            })
            .collect(),
        not_found: report.not_found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryStore;
    use crate::types::{Affiliation, Mediator, RelationshipType, RiskLevel};
    use chrono::NaiveDate;

    fn fixed_cfg() -> DetectConfig {
        DetectConfig {
            staleness_years: 5,
            reference_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    fn mediator(id: &str, affiliations: Vec<Affiliation>) -> Mediator {
        Mediator {
            id: id.to_string(),
            name: format!("Mediator {}", id),
            known_affiliations: affiliations,
            ..Default::default()
        }
    }

    fn high_risk_affiliation(entity: &str) -> Affiliation {
        Affiliation {
            entity: entity.to_string(),
            relationship_type: RelationshipType::LawFirm,
            is_current: true,
            risk_level: RiskLevel::High,
            details: String::new(),
        }
    }

    fn store_with_three() -> InMemoryStore {
        let mut store = InMemoryStore::new();
        store.insert(mediator(
            "med_1",
            vec![high_risk_affiliation("Acme Corp")],
        ));
        store.insert(mediator("med_2", vec![]));
        store.insert(mediator(
            "med_3",
            vec![Affiliation {
                entity: "Widget Co".to_string(),
                relationship_type: RelationshipType::Donor,
                is_current: false,
                risk_level: RiskLevel::Low,
                details: String::new(),
            }],
        ));
        store
    }

    fn ids(list: &[&str]) -> Vec<MediatorId> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_id_goes_to_not_found_without_aborting() {
        let store = store_with_three();
        let report = check_batch(
            &store,
            &ids(&["med_1", "med_missing", "med_2"]),
            &[Party::new("Acme Corporation")],
            &fixed_cfg(),
        )
        .unwrap();

        assert_eq!(report.per_mediator.len(), 2);
        assert_eq!(report.not_found, vec!["med_missing".to_string()]);
        assert_eq!(report.summary.total_checked, 2);
    }

    #[test]
    fn summary_counts_scan_bands() {
        let store = store_with_three();
        let report = check_batch(
            &store,
            &ids(&["med_1", "med_2", "med_3"]),
            &[Party::new("Acme Corp"), Party::new("Widget Co")],
            &fixed_cfg(),
        )
        .unwrap();

        // med_1: severe finding (40, medium); med_2 clean; med_3 minor (8, low).
        assert_eq!(report.summary.total_checked, 3);
        assert_eq!(report.summary.with_conflicts, 2);
        assert_eq!(report.summary.medium_risk_count, 1);
        assert_eq!(report.summary.high_risk_count, 0);
    }

    #[test]
    fn per_mediator_follows_requested_order() {
        let store = store_with_three();
        let report = check_batch(
            &store,
            &ids(&["med_3", "med_1", "med_2"]),
            &[Party::new("Acme Corp")],
            &fixed_cfg(),
        )
        .unwrap();
        let order: Vec<&str> = report
            .per_mediator
            .iter()
            .map(|a| a.mediator_id.as_str())
            .collect();
        assert_eq!(order, vec!["med_3", "med_1", "med_2"]);
    }

    #[test]
    fn batch_is_idempotent() {
        let store = store_with_three();
        let batch_ids = ids(&["med_1", "med_2", "med_3", "med_missing"]);
        let parties = vec![Party::new("Acme Corporation"), Party::new("Widget Co")];
        let first = check_batch(&store, &batch_ids, &parties, &fixed_cfg()).unwrap();
        let second = check_batch(&store, &batch_ids, &parties, &fixed_cfg()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_ids_yield_empty_report() {
        let store = store_with_three();
        let report =
            check_batch(&store, &[], &[Party::new("Acme Corp")], &fixed_cfg()).unwrap();
        assert!(report.per_mediator.is_empty());
        assert!(report.not_found.is_empty());
        assert_eq!(report.summary, BatchSummary::default());
    }

    #[test]
    fn quick_check_flags() {
        let mut store = store_with_three();
        // med_4 carries enough severe exposure to reach the high band.
        store.insert(mediator(
            "med_4",
            vec![
                high_risk_affiliation("Acme Corp"),
                high_risk_affiliation("Acme Corporation"),
            ],
        ));

        let report = quick_check(
            &store,
            &ids(&["med_4", "med_3", "med_2", "med_missing"]),
            &[Party::new("Acme Corp"), Party::new("Widget Co")],
            &fixed_cfg(),
        )
        .unwrap();

        let flags: Vec<(&str, QuickFlag)> = report
            .flags
            .iter()
            .map(|r| (r.mediator_id.as_str(), r.flag))
            .collect();
        assert_eq!(
            flags,
            vec![
                ("med_4", QuickFlag::Red),
                ("med_3", QuickFlag::Yellow),
                ("med_2", QuickFlag::Green),
            ]
        );
        assert_eq!(report.not_found, vec!["med_missing".to_string()]);
    }
}
