//! Record Module
//!
//! The fundamental unit held by the store: one city's attribute set.
//!
//! ## Responsibilities
//! - Domain-check every attribute at construction (no partially-valid record
//!   can exist through the public API)
//! - Case-fold all text fields to lowercase on entry
//! - Expose the case-insensitive (name, region) key
//!
//! ## Domains
//! - population: 1..=40,000,000
//! - year recorded: 1980..=current calendar year
//! - latitude: -90..=90, longitude: -180..=180
//! - name, region, mayor name, mayor address, history: non-empty text

mod attribute;

pub use attribute::Attribute;

use std::fmt;

use chrono::Datelike;

use crate::error::{GazetteerError, Result};

// =============================================================================
// Attribute Domains
// =============================================================================

/// Smallest accepted population
pub const MIN_POPULATION: u32 = 1;

/// Largest accepted population
pub const MAX_POPULATION: u32 = 40_000_000;

/// Earliest accepted recording year
pub const MIN_YEAR: i32 = 1980;

/// Latest accepted recording year (wall clock)
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

// =============================================================================
// Record Key
// =============================================================================

/// Case-insensitive identity of a record: the lowercased (name, region) pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RecordKey {
    pub name: String,
    pub region: String,
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' in region '{}'", self.name, self.region)
    }
}

// =============================================================================
// Record
// =============================================================================

/// One city's attribute set
///
/// Fields are private: construction goes through the validating [`Record::new`]
/// and mutation goes through the store's update operation, so the domain
/// checks and case folding cannot be bypassed.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub(crate) name: String,
    pub(crate) region: String,
    pub(crate) population: u32,
    pub(crate) year_recorded: i32,
    pub(crate) mayor_name: String,
    pub(crate) mayor_address: String,
    pub(crate) history: String,
    pub(crate) latitude: f64,
    pub(crate) longitude: f64,
}

impl Record {
    /// Create a record, validating every attribute against its domain
    ///
    /// Text fields are trimmed and case-folded to lowercase. Fails with
    /// `InvalidAttribute` naming the first offending attribute.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: &str,
        region: &str,
        population: u32,
        year_recorded: i32,
        mayor_name: &str,
        mayor_address: &str,
        history: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Self> {
        check_population(population)?;
        check_year(year_recorded)?;
        check_latitude(latitude)?;
        check_longitude(longitude)?;

        Ok(Self {
            name: fold_required("name", name)?,
            region: fold_required("region", region)?,
            population,
            year_recorded,
            mayor_name: fold_required("mayor name", mayor_name)?,
            mayor_address: fold_required("mayor address", mayor_address)?,
            history: fold_required("history", history)?,
            latitude,
            longitude,
        })
    }

    /// Assemble a record without domain checks, case-folding text fields only
    ///
    /// Reserved for the lenient decode path, where numeric fields may carry
    /// the zero default and text fields may be empty, matching what the
    /// legacy file reader accepted.
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn from_parts(
        name: &str,
        region: &str,
        population: u32,
        year_recorded: i32,
        mayor_name: &str,
        mayor_address: &str,
        history: &str,
        latitude: f64,
        longitude: f64,
    ) -> Self {
        Self {
            name: fold(name),
            region: fold(region),
            population,
            year_recorded,
            mayor_name: fold(mayor_name),
            mayor_address: fold(mayor_address),
            history: fold(history),
            latitude,
            longitude,
        }
    }

    /// The case-insensitive identity of this record
    pub fn key(&self) -> RecordKey {
        RecordKey {
            name: self.name.clone(),
            region: self.region.clone(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn year_recorded(&self) -> i32 {
        self.year_recorded
    }

    pub fn mayor_name(&self) -> &str {
        &self.mayor_name
    }

    pub fn mayor_address(&self) -> &str {
        &self.mayor_address
    }

    pub fn history(&self) -> &str {
        &self.history
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Render one attribute's value for display
    pub fn attribute(&self, attribute: Attribute) -> String {
        match attribute {
            Attribute::Name => self.name.clone(),
            Attribute::Region => self.region.clone(),
            Attribute::Population => self.population.to_string(),
            Attribute::Year => self.year_recorded.to_string(),
            Attribute::MayorName => self.mayor_name.clone(),
            Attribute::MayorAddress => self.mayor_address.clone(),
            Attribute::History => self.history.clone(),
            Attribute::Latitude => self.latitude.to_string(),
            Attribute::Longitude => self.longitude.to_string(),
        }
    }

    /// Replace one attribute in place, re-validating the raw value against
    /// that attribute's domain
    pub(crate) fn set(&mut self, attribute: Attribute, raw: &str) -> Result<()> {
        match attribute {
            Attribute::Name => self.name = fold_required("name", raw)?,
            Attribute::Region => self.region = fold_required("region", raw)?,
            Attribute::Population => {
                let population = parse_number(raw, "population")?;
                check_population(population)?;
                self.population = population;
            }
            Attribute::Year => {
                let year = parse_number(raw, "year")?;
                check_year(year)?;
                self.year_recorded = year;
            }
            Attribute::MayorName => self.mayor_name = fold_required("mayor name", raw)?,
            Attribute::MayorAddress => self.mayor_address = fold_required("mayor address", raw)?,
            Attribute::History => self.history = fold_required("history", raw)?,
            Attribute::Latitude => {
                let latitude = parse_number(raw, "latitude")?;
                check_latitude(latitude)?;
                self.latitude = latitude;
            }
            Attribute::Longitude => {
                let longitude = parse_number(raw, "longitude")?;
                check_longitude(longitude)?;
                self.longitude = longitude;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "City: {}, Region: {}, Population: {}, Year: {}, Mayor: {}, History: {}, Latitude: {}, Longitude: {}",
            self.name,
            self.region,
            self.population,
            self.year_recorded,
            self.mayor_name,
            self.history,
            self.latitude,
            self.longitude
        )
    }
}

// =============================================================================
// Validation Helpers
// =============================================================================

fn fold(value: &str) -> String {
    value.trim().to_lowercase()
}

fn fold_required(attribute: &'static str, value: &str) -> Result<String> {
    let folded = fold(value);
    if folded.is_empty() {
        return Err(GazetteerError::InvalidAttribute {
            attribute,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(folded)
}

fn parse_number<T: std::str::FromStr>(raw: &str, attribute: &'static str) -> Result<T> {
    raw.trim().parse().map_err(|_| GazetteerError::InvalidAttribute {
        attribute,
        reason: format!("'{}' is not a valid number", raw.trim()),
    })
}

pub(crate) fn check_population(population: u32) -> Result<()> {
    if !(MIN_POPULATION..=MAX_POPULATION).contains(&population) {
        return Err(GazetteerError::InvalidAttribute {
            attribute: "population",
            reason: format!("must be between {MIN_POPULATION} and {MAX_POPULATION}"),
        });
    }
    Ok(())
}

pub(crate) fn check_year(year: i32) -> Result<()> {
    let latest = current_year();
    if !(MIN_YEAR..=latest).contains(&year) {
        return Err(GazetteerError::InvalidAttribute {
            attribute: "year",
            reason: format!("must be between {MIN_YEAR} and {latest}"),
        });
    }
    Ok(())
}

pub(crate) fn check_latitude(latitude: f64) -> Result<()> {
    if !(-90.0..=90.0).contains(&latitude) {
        return Err(GazetteerError::InvalidAttribute {
            attribute: "latitude",
            reason: "must be between -90 and 90".to_string(),
        });
    }
    Ok(())
}

pub(crate) fn check_longitude(longitude: f64) -> Result<()> {
    if !(-180.0..=180.0).contains(&longitude) {
        return Err(GazetteerError::InvalidAttribute {
            attribute: "longitude",
            reason: "must be between -180 and 180".to_string(),
        });
    }
    Ok(())
}
