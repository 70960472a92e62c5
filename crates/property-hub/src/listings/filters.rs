use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::{Property, PropertyType};

/// Upper price bound used when a visitor has not narrowed the range.
pub const DEFAULT_PRICE_MAX: f64 = 100_000_000.0;

/// Bedroom constraint, written as `3` or `5+`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BedroomFilter {
    Exactly(u8),
    AtLeast(u8),
}

impl BedroomFilter {
    pub fn accepts(&self, bedrooms: Option<u8>) -> bool {
        match (self, bedrooms) {
            (BedroomFilter::Exactly(wanted), Some(count)) => count == *wanted,
            (BedroomFilter::AtLeast(minimum), Some(count)) => count >= *minimum,
            (_, None) => false,
        }
    }
}

impl fmt::Display for BedroomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BedroomFilter::Exactly(count) => write!(f, "{count}"),
            BedroomFilter::AtLeast(count) => write!(f, "{count}+"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid bedroom filter '{0}' (expected a number such as 3 or 5+)")]
pub struct ParseBedroomFilterError(pub String);

impl FromStr for BedroomFilter {
    type Err = ParseBedroomFilterError;

    /// Accepts `3`, `5+`, and `5 ` (a `+` that form decoding turned into a space).
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let unpadded = value.trim_start();
        let (digits, at_least) = match unpadded.trim_end().strip_suffix('+') {
            Some(digits) => (digits.trim_end(), true),
            None if unpadded.ends_with(' ') => (unpadded.trim_end(), true),
            None => (unpadded.trim_end(), false),
        };

        let count = digits
            .parse::<u8>()
            .map_err(|_| ParseBedroomFilterError(value.to_string()))?;

        Ok(if at_least {
            BedroomFilter::AtLeast(count)
        } else {
            BedroomFilter::Exactly(count)
        })
    }
}

impl TryFrom<String> for BedroomFilter {
    type Error = ParseBedroomFilterError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BedroomFilter> for String {
    fn from(value: BedroomFilter) -> Self {
        value.to_string()
    }
}

/// Active listing search criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchFilters {
    pub location: String,
    pub price_min: f64,
    pub price_max: f64,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<BedroomFilter>,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            location: String::new(),
            price_min: 0.0,
            price_max: DEFAULT_PRICE_MAX,
            property_type: None,
            bedrooms: None,
        }
    }
}

/// Fields a visitor changed in the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterUpdate {
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub price_min: Option<f64>,
    #[serde(default)]
    pub price_max: Option<f64>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub bedrooms: Option<BedroomFilter>,
}

impl SearchFilters {
    pub fn merge(&mut self, update: FilterUpdate) {
        if let Some(location) = update.location {
            self.location = location;
        }
        if let Some(price_min) = update.price_min {
            self.price_min = price_min;
        }
        if let Some(price_max) = update.price_max {
            self.price_max = price_max;
        }
        if let Some(property_type) = update.property_type {
            self.property_type = Some(property_type);
        }
        if let Some(bedrooms) = update.bedrooms {
            self.bedrooms = Some(bedrooms);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The price range only applies when both bounds are non-zero.
    fn price_range_active(&self) -> bool {
        self.price_min != 0.0 && self.price_max != 0.0
    }

    pub fn matches(&self, property: &Property) -> bool {
        if !self.location.is_empty() && !property.location.starts_with(&self.location) {
            return false;
        }

        if let Some(wanted) = &self.property_type {
            if property.property_type.as_ref() != Some(wanted) {
                return false;
            }
        }

        if self.price_range_active()
            && (property.price < self.price_min || property.price > self.price_max)
        {
            return false;
        }

        match self.bedrooms {
            Some(filter) => filter.accepts(property.bedrooms),
            None => true,
        }
    }
}
