//! Attribute name resolution
//!
//! Maps the attribute tokens accepted by the search/modify commands onto a
//! typed enum. Unrecognized tokens surface as `UnknownAttribute`.

use std::str::FromStr;

use crate::error::GazetteerError;

/// A record attribute addressable by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Name,
    Region,
    Population,
    Year,
    MayorName,
    MayorAddress,
    History,
    Latitude,
    Longitude,
}

impl Attribute {
    /// The token this attribute is addressed by
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Name => "name",
            Attribute::Region => "region",
            Attribute::Population => "population",
            Attribute::Year => "year",
            Attribute::MayorName => "mayorname",
            Attribute::MayorAddress => "mayoraddress",
            Attribute::History => "history",
            Attribute::Latitude => "latitude",
            Attribute::Longitude => "longitude",
        }
    }

    /// Human-readable label for display output
    pub fn label(&self) -> &'static str {
        match self {
            Attribute::Name => "Name",
            Attribute::Region => "Region",
            Attribute::Population => "Population",
            Attribute::Year => "Year",
            Attribute::MayorName => "Mayor's Name",
            Attribute::MayorAddress => "Mayor's Address",
            Attribute::History => "History",
            Attribute::Latitude => "Latitude",
            Attribute::Longitude => "Longitude",
        }
    }
}

impl FromStr for Attribute {
    type Err = GazetteerError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_lowercase().as_str() {
            "name" => Ok(Attribute::Name),
            "region" => Ok(Attribute::Region),
            "population" => Ok(Attribute::Population),
            "year" => Ok(Attribute::Year),
            "mayorname" => Ok(Attribute::MayorName),
            "mayoraddress" => Ok(Attribute::MayorAddress),
            "history" => Ok(Attribute::History),
            "latitude" => Ok(Attribute::Latitude),
            "longitude" => Ok(Attribute::Longitude),
            other => Err(GazetteerError::UnknownAttribute(other.to_string())),
        }
    }
}
