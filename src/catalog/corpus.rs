//! Ordered collection of repository records and its JSON persistence

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::path::Path;

use crate::catalog::helpers::parse_timestamp;
use crate::catalog::types::{CatalogError, CatalogResult, Featured, RepositoryRecord};

/// Fields recomputed on every enrichment pass
const DERIVED_FIELDS: [&str; 4] = ["generated_tags", "all_tags", "quality_score", "featured"];

/// One persisted corpus entry.
///
/// Entries that cannot be typed as a [`RepositoryRecord`] (for example a
/// string where a count is expected) are kept verbatim as `Raw`. They are
/// never enriched and are left for the validator to report.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CorpusEntry {
    Record(Box<RepositoryRecord>),
    Raw(Value),
}

impl CorpusEntry {
    #[must_use]
    pub fn as_record(&self) -> Option<&RepositoryRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Raw(_) => None,
        }
    }
}

impl From<RepositoryRecord> for CorpusEntry {
    fn from(record: RepositoryRecord) -> Self {
        Self::Record(Box::new(record))
    }
}

/// Ordered collection of repository records for one run
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Corpus {
    entries: Vec<CorpusEntry>,
}

impl Corpus {
    #[must_use]
    pub fn new(entries: Vec<CorpusEntry>) -> Self {
        Self { entries }
    }

    #[must_use]
    pub fn from_records(records: Vec<RepositoryRecord>) -> Self {
        Self::new(records.into_iter().map(CorpusEntry::from).collect())
    }

    /// Types each element of a JSON array independently.
    ///
    /// Derived fields are recomputed by every enrichment pass, so a stale
    /// derived value of the wrong type is dropped rather than turning the
    /// whole entry raw.
    #[must_use]
    pub fn from_values(values: Vec<Value>) -> Self {
        let entries = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| type_entry(index, value))
            .collect();
        Self { entries }
    }

    /// Reads the JSON array at `path` without typing its elements.
    pub fn read_values(path: &Path) -> CatalogResult<Vec<Value>> {
        let raw = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
        Ok(serde_json::from_str(&raw)?)
    }

    pub fn load(path: &Path) -> CatalogResult<Self> {
        let corpus = Self::from_values(Self::read_values(path)?);
        info!("Loaded {} entries from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Writes the corpus wholesale as pretty-printed JSON, creating parent
    /// directories as needed.
    pub fn save(&self, path: &Path) -> CatalogResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|e| CatalogError::io(path, e))?;
        info!("Saved {} entries to {}", self.len(), path.display());
        Ok(())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn entries(&self) -> &[CorpusEntry] {
        &self.entries
    }

    pub fn records(&self) -> impl Iterator<Item = &RepositoryRecord> {
        self.entries.iter().filter_map(CorpusEntry::as_record)
    }

    pub fn records_mut(&mut self) -> impl Iterator<Item = &mut RepositoryRecord> {
        self.entries.iter_mut().filter_map(|entry| match entry {
            CorpusEntry::Record(record) => Some(record.as_mut()),
            CorpusEntry::Raw(_) => None,
        })
    }

    pub fn push(&mut self, entry: impl Into<CorpusEntry>) {
        self.entries.push(entry.into());
    }

    /// Fails with [`CatalogError::EmptyCorpus`] when no entry was typed as a
    /// repository record.
    pub fn ensure_records(&self, context: &str) -> CatalogResult<()> {
        if self.records().next().is_none() {
            return Err(CatalogError::EmptyCorpus(context.to_string()));
        }
        Ok(())
    }

    /// JSON view used by the validator and the statistics aggregator.
    pub fn to_values(&self) -> CatalogResult<Vec<Value>> {
        self.entries
            .iter()
            .map(|entry| serde_json::to_value(entry).map_err(CatalogError::from))
            .collect()
    }

    /// Orders records by quality score (descending), then by `updated_at`
    /// (most recent first). Raw entries keep their relative order after all
    /// records.
    pub fn sort(&mut self) {
        self.entries.sort_by(compare_entries);
    }

    /// Replaces structured featured verdicts with their `eligible` flag.
    ///
    /// Returns the number of records converted. Boolean-only consumers,
    /// including the validator, need this step when the checklist policy
    /// produced the corpus.
    pub fn normalize_featured(&mut self) -> usize {
        let mut converted = 0;
        for record in self.records_mut() {
            if let Some(Featured::Verdict(verdict)) = &record.featured {
                record.featured = Some(Featured::Flag(verdict.eligible));
                converted += 1;
            }
        }
        converted
    }
}

/// Value-level [`Corpus::normalize_featured`] for JSON validated as loaded.
pub fn normalize_featured_values(values: &mut [Value]) -> usize {
    let mut converted = 0;
    for value in values.iter_mut() {
        let Some(featured) = value.get_mut("featured") else {
            continue;
        };
        if let Some(eligible) = featured.get("eligible").and_then(Value::as_bool) {
            *featured = Value::Bool(eligible);
            converted += 1;
        }
    }
    converted
}

fn type_entry(index: usize, value: Value) -> CorpusEntry {
    let error = match serde_json::from_value::<RepositoryRecord>(value.clone()) {
        Ok(record) => return CorpusEntry::from(record),
        Err(e) => e,
    };

    if let Value::Object(fields) = &value
        && DERIVED_FIELDS.iter().any(|field| fields.contains_key(*field))
    {
        let mut stripped = fields.clone();
        stripped.retain(|key, _| !DERIVED_FIELDS.contains(&key.as_str()));
        if let Ok(record) = serde_json::from_value::<RepositoryRecord>(Value::Object(stripped)) {
            warn!("Entry {index}: dropped malformed derived fields ({error})");
            return CorpusEntry::from(record);
        }
    }

    warn!("Entry {index} kept unenriched, not a repository record: {error}");
    CorpusEntry::Raw(value)
}

fn compare_entries(a: &CorpusEntry, b: &CorpusEntry) -> Ordering {
    match (a, b) {
        (CorpusEntry::Record(a), CorpusEntry::Record(b)) => {
            let score = b
                .quality_score
                .unwrap_or(0)
                .cmp(&a.quality_score.unwrap_or(0));
            score.then_with(|| updated(b).cmp(&updated(a)))
        }
        (CorpusEntry::Record(_), CorpusEntry::Raw(_)) => Ordering::Less,
        (CorpusEntry::Raw(_), CorpusEntry::Record(_)) => Ordering::Greater,
        (CorpusEntry::Raw(_), CorpusEntry::Raw(_)) => Ordering::Equal,
    }
}

fn updated(record: &RepositoryRecord) -> Option<DateTime<Utc>> {
    record.updated_at.as_deref().and_then(parse_timestamp)
}
