//! Mediator storage: the data-access contract and its SQLite and
//! in-memory implementations.
//!
//! The engine itself is pure; this is the one I/O-bound collaborator.
//! Batch operations always go through a single multi-id fetch rather than
//! one query per mediator.

use std::collections::HashMap;
use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection};
use tracing::warn;

use crate::types::{Affiliation, CaseRecord, DataQuality, Location, Mediator, MediatorId};

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Data-access contract for the engine.
///
/// Ids that do not resolve are simply absent from the result, not an
/// error; callers report them per-item. A mediator's case history is part
/// of the returned projection rather than a separate call.
pub trait MediatorStore {
    /// Fetch all requested mediators in one call.
    fn fetch_mediators_by_ids(&self, ids: &[MediatorId]) -> Result<Vec<Mediator>, StoreError>;

    /// Fetch the candidate pool for ranking and audit sweeps.
    fn fetch_candidates(&self) -> Result<Vec<Mediator>, StoreError>;
}

/// SQLite-backed mediator store.
pub struct SqliteStore {
    conn: Connection,
}

/// Raw row image; JSON columns are decoded in a second pass so a corrupt
/// row can be skipped without failing the whole query.
struct MediatorRow {
    id: String,
    name: String,
    years_experience: u32,
    specializations: String,
    city: Option<String>,
    state: Option<String>,
    rating: f64,
    ideology_score: f64,
    is_verified: bool,
    known_affiliations: String,
    cases: String,
    completeness: u8,
    last_verified: Option<String>,
}

const SELECT_COLUMNS: &str = "id, name, years_experience, specializations, city, state, \
     rating, ideology_score, is_verified, known_affiliations, cases, \
     completeness, last_verified";

impl SqliteStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        Ok(Self { conn })
    }

    /// Apply the schema. Versioned via `user_version` so future releases
    /// can migrate in place.
    pub fn init(&self) -> Result<(), StoreError> {
        let version: i32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;

        if version < 1 {
            let schema = include_str!("../../schema/sqlite.sql");
            self.conn.execute_batch(schema)?;
            self.conn.pragma_update(None, "user_version", 1)?;
        }

        Ok(())
    }

    /// Insert or update a mediator document.
    pub fn upsert_mediator(&self, mediator: &Mediator) -> Result<(), StoreError> {
        let (city, state) = match &mediator.location {
            Some(loc) => (Some(loc.city.clone()), Some(loc.state.clone())),
            None => (None, None),
        };
        self.conn.execute(
            "INSERT INTO mediators (id, name, years_experience, specializations, city, state, \
                 rating, ideology_score, is_verified, known_affiliations, cases, \
                 completeness, last_verified)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             ON CONFLICT(id) DO UPDATE SET
                 name = excluded.name,
                 years_experience = excluded.years_experience,
                 specializations = excluded.specializations,
                 city = excluded.city,
                 state = excluded.state,
                 rating = excluded.rating,
                 ideology_score = excluded.ideology_score,
                 is_verified = excluded.is_verified,
                 known_affiliations = excluded.known_affiliations,
                 cases = excluded.cases,
                 completeness = excluded.completeness,
                 last_verified = excluded.last_verified",
            params![
                mediator.id,
                mediator.name,
                mediator.years_experience,
                serde_json::to_string(&mediator.specializations)?,
                city,
                state,
                mediator.rating,
                mediator.ideology_score,
                mediator.is_verified,
                serde_json::to_string(&mediator.known_affiliations)?,
                serde_json::to_string(&mediator.cases)?,
                mediator.data_quality.completeness,
                mediator
                    .data_quality
                    .last_verified
                    .map(|d| d.format("%Y-%m-%d").to_string()),
            ],
        )?;
        Ok(())
    }

    pub fn mediator_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM mediators", [], |row| row.get(0))?;
        Ok(count)
    }

    fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MediatorRow> {
        Ok(MediatorRow {
            id: row.get(0)?,
            name: row.get(1)?,
            years_experience: row.get(2)?,
            specializations: row.get(3)?,
            city: row.get(4)?,
            state: row.get(5)?,
            rating: row.get(6)?,
            ideology_score: row.get(7)?,
            is_verified: row.get(8)?,
            known_affiliations: row.get(9)?,
            cases: row.get(10)?,
            completeness: row.get(11)?,
            last_verified: row.get(12)?,
        })
    }

    /// Decode the JSON columns. A decode failure makes the whole row
    /// corrupt: it is dropped (and logged) so the id surfaces as not-found
    /// upstream instead of failing the batch.
    fn row_to_mediator(row: MediatorRow) -> Option<Mediator> {
        let specializations: Vec<String> = match serde_json::from_str(&row.specializations) {
            Ok(v) => v,
            Err(e) => {
                warn!(mediator_id = %row.id, error = %e, "corrupt specializations column");
                return None;
            }
        };
        let known_affiliations: Vec<Affiliation> =
            match serde_json::from_str(&row.known_affiliations) {
                Ok(v) => v,
                Err(e) => {
                    warn!(mediator_id = %row.id, error = %e, "corrupt affiliations column");
                    return None;
                }
            };
        let cases: Vec<CaseRecord> = match serde_json::from_str(&row.cases) {
            Ok(v) => v,
            Err(e) => {
                warn!(mediator_id = %row.id, error = %e, "corrupt cases column");
                return None;
            }
        };
        let location = match (row.city, row.state) {
            (None, None) => None,
            (city, state) => Some(Location {
                city: city.unwrap_or_default(),
                state: state.unwrap_or_default(),
            }),
        };
        let last_verified = row
            .last_verified
            .as_deref()
            .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

        Some(Mediator {
            id: row.id,
            name: row.name,
            years_experience: row.years_experience,
            specializations,
            location,
            rating: row.rating,
            ideology_score: row.ideology_score,
            is_verified: row.is_verified,
            known_affiliations,
            cases,
            data_quality: DataQuality {
                completeness: row.completeness,
                last_verified,
            },
        })
    }
}

impl MediatorStore for SqliteStore {
    fn fetch_mediators_by_ids(&self, ids: &[MediatorId]) -> Result<Vec<Mediator>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM mediators WHERE id IN ({}) ORDER BY id",
            SELECT_COLUMNS, placeholders
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(rusqlite::params_from_iter(ids.iter()), Self::read_row)?;

        let mut mediators = Vec::new();
        for row in rows {
            if let Some(m) = Self::row_to_mediator(row?) {
                mediators.push(m);
            }
        }
        Ok(mediators)
    }

    fn fetch_candidates(&self) -> Result<Vec<Mediator>, StoreError> {
        let sql = format!("SELECT {} FROM mediators ORDER BY id", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([], Self::read_row)?;

        let mut mediators = Vec::new();
        for row in rows {
            if let Some(m) = Self::row_to_mediator(row?) {
                mediators.push(m);
            }
        }
        Ok(mediators)
    }
}

/// HashMap-backed store for tests and embedders that already hold the
/// mediator documents.
#[derive(Default)]
pub struct InMemoryStore {
    mediators: HashMap<MediatorId, Mediator>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, mediator: Mediator) {
        self.mediators.insert(mediator.id.clone(), mediator);
    }
}

impl MediatorStore for InMemoryStore {
    fn fetch_mediators_by_ids(&self, ids: &[MediatorId]) -> Result<Vec<Mediator>, StoreError> {
        let mut seen = std::collections::HashSet::new();
        Ok(ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| self.mediators.get(id).cloned())
            .collect())
    }

    fn fetch_candidates(&self) -> Result<Vec<Mediator>, StoreError> {
        let mut all: Vec<Mediator> = self.mediators.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(all)
    }
}
