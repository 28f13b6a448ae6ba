//! Store Module
//!
//! In-memory ordered collection of city records.
//!
//! ## Responsibilities
//! - Keep (name, region) keys unique, compared case-insensitively
//! - Preserve arrival order until an explicit sort reorders the collection
//! - Route key conflicts through a replace-confirmation callback instead of
//!   silently duplicating or rejecting
//! - Answer filters and aggregates over the full collection
//!
//! ## Data Structure Choice
//! A `Vec<Record>` with linear key scans. Keys are rare enough that a map
//! keyed by the folded pair buys nothing here, and the vector keeps the
//! arrival/sort order the display and persistence paths rely on.

mod sort;

pub use sort::{merge, merge_sort, split};

use std::cmp::Ordering;

use crate::error::{GazetteerError, Result};
use crate::record::{Attribute, Record, RecordKey};

// =============================================================================
// Operation Outcomes
// =============================================================================

/// Outcome of an insert routed through the replace-confirmation callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// No key conflict, record appended
    Inserted,

    /// Conflict confirmed for replacement: old record removed, new appended
    Replaced,

    /// Conflict declined, store unchanged
    Skipped,
}

/// Aggregate summary over the full store
#[derive(Debug, Clone, PartialEq)]
pub struct Statistics {
    pub count: usize,
    pub average_population: f64,
    pub min_population: u32,
    pub max_population: u32,
    pub average_year: f64,
    pub average_latitude: f64,
    pub average_longitude: f64,
}

/// Attribute a sort can order by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    Population,
    Year,
    Latitude,
    Longitude,
}

impl SortKey {
    /// Resolve a sort token; `None` for unrecognized tokens
    pub fn parse(token: &str) -> Option<SortKey> {
        match token.trim().to_lowercase().as_str() {
            "name" => Some(SortKey::Name),
            "population" => Some(SortKey::Population),
            "year" => Some(SortKey::Year),
            "latitude" => Some(SortKey::Latitude),
            "longitude" => Some(SortKey::Longitude),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::Population => "population",
            SortKey::Year => "year",
            SortKey::Latitude => "latitude",
            SortKey::Longitude => "longitude",
        }
    }

    /// Total order between two records under this key
    ///
    /// Name is lexicographic on the folded string; the numeric keys are
    /// ascending. Float keys use the IEEE total order so a stray NaN from a
    /// lenient load cannot poison a sort.
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        match self {
            SortKey::Name => a.name().cmp(b.name()),
            SortKey::Population => a.population().cmp(&b.population()),
            SortKey::Year => a.year_recorded().cmp(&b.year_recorded()),
            SortKey::Latitude => a.latitude().total_cmp(&b.latitude()),
            SortKey::Longitude => a.longitude().total_cmp(&b.longitude()),
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// The in-memory collection of city records
#[derive(Debug, Default)]
pub struct Store {
    records: Vec<Record>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate all records in current store order
    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    /// Index of the record matching the folded (name, region) pair
    fn position(&self, name: &str, region: &str) -> Option<usize> {
        let name = name.trim().to_lowercase();
        let region = region.trim().to_lowercase();
        self.records
            .iter()
            .position(|r| r.name() == name && r.region() == region)
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append a record, refusing on a key conflict
    ///
    /// Returns `Conflict` carrying the existing record's key; the caller
    /// decides between [`Store::replace`] and abandoning the insert.
    pub fn insert(&mut self, record: Record) -> Result<()> {
        if let Some(idx) = self.position(record.name(), record.region()) {
            let existing = self.records[idx].key();
            return Err(GazetteerError::Conflict {
                name: existing.name,
                region: existing.region,
            });
        }
        tracing::debug!("inserting city {}", record.key());
        self.records.push(record);
        Ok(())
    }

    /// Insert, resolving a key conflict through the confirmation callback
    ///
    /// The callback receives the existing record's key; returning `true`
    /// replaces it (delete then append), `false` leaves the store unchanged.
    pub fn insert_or_confirm<F>(&mut self, record: Record, confirm: &mut F) -> InsertOutcome
    where
        F: FnMut(&RecordKey) -> bool,
    {
        match self.position(record.name(), record.region()) {
            None => {
                self.records.push(record);
                InsertOutcome::Inserted
            }
            Some(idx) => {
                let existing = self.records[idx].key();
                if confirm(&existing) {
                    tracing::debug!("replacing city {}", existing);
                    self.records.remove(idx);
                    self.records.push(record);
                    InsertOutcome::Replaced
                } else {
                    InsertOutcome::Skipped
                }
            }
        }
    }

    /// Insert the record, deleting any existing record with the same key
    ///
    /// The explicit conflict resolution: delete then append, so the new
    /// record lands at the end of the store order. Returns the record it
    /// displaced, if any.
    pub fn replace(&mut self, record: Record) -> Option<Record> {
        let displaced = self
            .position(record.name(), record.region())
            .map(|idx| self.records.remove(idx));
        self.records.push(record);
        displaced
    }

    /// Remove and return the record matching the key
    pub fn remove(&mut self, name: &str, region: &str) -> Result<Record> {
        match self.position(name, region) {
            Some(idx) => Ok(self.records.remove(idx)),
            None => Err(GazetteerError::NotFound {
                name: name.trim().to_lowercase(),
                region: region.trim().to_lowercase(),
            }),
        }
    }

    /// Replace one attribute of the record matching the key
    ///
    /// Fails with `NotFound` for a missing key, `UnknownAttribute` for an
    /// unrecognized attribute token, and `InvalidAttribute` when the raw
    /// value fails that attribute's domain check; the store is untouched on
    /// every failure. Renaming `name` or `region` does not re-check key
    /// uniqueness against the rest of the store, so a rename can create a
    /// duplicate key (lookups then return the first match).
    pub fn update_attribute(
        &mut self,
        name: &str,
        region: &str,
        attribute: &str,
        raw_value: &str,
    ) -> Result<()> {
        let idx = self.position(name, region).ok_or_else(|| GazetteerError::NotFound {
            name: name.trim().to_lowercase(),
            region: region.trim().to_lowercase(),
        })?;
        let attribute: Attribute = attribute.parse()?;
        self.records[idx].set(attribute, raw_value)?;
        tracing::debug!("updated {} of city {}", attribute.as_str(), self.records[idx].key());
        Ok(())
    }

    /// Reorder the collection by the named attribute
    ///
    /// An unrecognized token falls back to sorting by name with a warning
    /// rather than failing. Returns the key actually used. The merge keeps
    /// the left operand on ties, so equal keys preserve their prior
    /// relative order.
    pub fn sort_by(&mut self, attribute: &str) -> SortKey {
        let key = match SortKey::parse(attribute) {
            Some(key) => key,
            None => {
                tracing::warn!(
                    "unrecognized sort attribute '{}', sorting by name instead",
                    attribute
                );
                SortKey::Name
            }
        };
        let records = std::mem::take(&mut self.records);
        self.records = merge_sort(records, key);
        key
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Find the record matching the key, case-insensitively
    pub fn find(&self, name: &str, region: &str) -> Result<&Record> {
        match self.position(name, region) {
            Some(idx) => Ok(&self.records[idx]),
            None => Err(GazetteerError::NotFound {
                name: name.trim().to_lowercase(),
                region: region.trim().to_lowercase(),
            }),
        }
    }

    /// Records with population in `[min, max]`, in store order
    pub fn filter_by_population(
        &self,
        min: u32,
        max: u32,
    ) -> impl Iterator<Item = &Record> + '_ {
        self.records
            .iter()
            .filter(move |r| r.population() >= min && r.population() <= max)
    }

    /// Records in the given region (case-insensitive exact match), in store order
    pub fn filter_by_region(&self, region: &str) -> impl Iterator<Item = &Record> + '_ {
        let target = region.trim().to_lowercase();
        self.records.iter().filter(move |r| r.region() == target)
    }

    /// Aggregate summary over the full store; `NoData` when empty
    pub fn statistics(&self) -> Result<Statistics> {
        if self.records.is_empty() {
            return Err(GazetteerError::NoData);
        }

        let count = self.records.len();
        let mut total_population: u64 = 0;
        let mut min_population = u32::MAX;
        let mut max_population = u32::MIN;
        let mut total_year: i64 = 0;
        let mut total_latitude = 0.0;
        let mut total_longitude = 0.0;

        for record in &self.records {
            total_population += u64::from(record.population());
            min_population = min_population.min(record.population());
            max_population = max_population.max(record.population());
            total_year += i64::from(record.year_recorded());
            total_latitude += record.latitude();
            total_longitude += record.longitude();
        }

        Ok(Statistics {
            count,
            average_population: total_population as f64 / count as f64,
            min_population,
            max_population,
            average_year: total_year as f64 / count as f64,
            average_latitude: total_latitude / count as f64,
            average_longitude: total_longitude / count as f64,
        })
    }
}

impl<'a> IntoIterator for &'a Store {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
