//! Conflict & affiliation risk engine for the FairMediator platform.
//!
//! Takes a mediator, a set of case parties, and the mediator's known
//! affiliations and case history, and produces conflict-of-interest
//! findings, a severity-weighted risk score, candidate rankings, and a
//! rule-derived SWOT summary. All engine functions are stateless pure
//! transforms over already-fetched data; the only I/O lives behind the
//! [`MediatorStore`] contract.

pub mod batch;
pub mod cache;
pub mod conflict;
pub mod entity_match;
pub mod error;
pub mod export;
pub mod ranking;
pub mod risk;
pub mod store;
pub mod swot;
pub mod types;
pub mod validation;

pub use batch::{check_batch, quick_check, BatchReport, BatchSummary, QuickCheckReport};
pub use cache::{CachedStore, MemoryCache};
pub use conflict::{
    detect, ConflictFinding, DetectConfig, Detection, DetectionDiagnostics, FindingSource,
    Severity,
};
pub use error::FairMediatorError;
pub use export::{swot_to_json, swot_to_markdown, SwotExport, SWOT_EXPORT_VERSION};
pub use ranking::{
    compare_mediators, find_matching_mediators, score_mediator, CompareResult, MatchCriteria,
    MatchOptions, MatchScore, RankWeights, ScoreBreakdown,
};
pub use risk::{assess, score_findings, QuickFlag, RiskAssessment, RiskBand};
pub use store::{InMemoryStore, MediatorStore, SqliteStore, StoreError};
pub use swot::{compare_swot, generate, SwotAssessment, SwotRating, SwotResult};
pub use types::{
    Affiliation, CaseOutcome, CaseRecord, DataQuality, Location, Mediator, MediatorId, Party,
    PartyRole, RelationshipType, RiskLevel,
};
