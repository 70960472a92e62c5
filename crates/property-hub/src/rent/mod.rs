//! Fair-rent heuristic for listed properties.
//!
//! The estimate assumes a 6% gross annual yield on the asking price and adjusts it with fixed
//! multipliers for premium Lagos neighbourhoods, bedroom count, and building type. It is a display
//! aid, not a valuation model.

mod multipliers;

use serde::{Deserialize, Deserializer, Serialize};

use crate::listings::PropertyType;
pub use multipliers::{bedroom_multiplier, is_premium_location, PREMIUM_LOCATIONS};

/// Assumed annual gross yield on the purchase price.
pub const GROSS_RENTAL_YIELD: f64 = 0.06;

/// Fixed placeholder reported with every prediction; no statistical model backs it.
pub const PREDICTION_CONFIDENCE: f64 = 0.85;

fn default_bedrooms() -> u8 {
    1
}

// An explicit `null` count reads the same as a missing one.
fn bedrooms_or_default<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<u8>::deserialize(deserializer)?.unwrap_or_else(default_bedrooms))
}

/// Listing attributes the heuristic reads. Missing fields fall back to neutral defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    #[serde(default)]
    pub price: f64,
    #[serde(default = "default_bedrooms", deserialize_with = "bedrooms_or_default")]
    pub bedrooms: u8,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    /// Carried for display; the heuristic does not use it.
    #[serde(default)]
    pub size: Option<f64>,
}

impl Default for PropertyAttributes {
    fn default() -> Self {
        Self {
            price: 0.0,
            bedrooms: default_bedrooms(),
            location: String::new(),
            property_type: None,
            size: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationTier {
    Premium,
    Standard,
}

/// Echo of the inputs that moved the estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentFactors {
    pub location: LocationTier,
    pub bedrooms: u8,
    pub property_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentPrediction {
    pub monthly_rent: u64,
    pub yearly_rent: u64,
    pub confidence: f64,
    pub factors: RentFactors,
}

/// Combined adjustment applied to the base yield.
pub fn rent_multiplier(property: &PropertyAttributes) -> f64 {
    let mut multiplier = 1.0;

    if is_premium_location(&property.location) {
        multiplier += 0.3;
    }

    multiplier *= bedroom_multiplier(property.bedrooms);
    multiplier *= property
        .property_type
        .as_ref()
        .map(PropertyType::rent_multiplier)
        .unwrap_or(1.0);

    multiplier
}

pub fn predict_fair_rent(property: &PropertyAttributes) -> RentPrediction {
    let fair_monthly = property.price * GROSS_RENTAL_YIELD * rent_multiplier(property) / 12.0;

    let location = if is_premium_location(&property.location) {
        LocationTier::Premium
    } else {
        LocationTier::Standard
    };

    RentPrediction {
        monthly_rent: fair_monthly.round() as u64,
        yearly_rent: (fair_monthly * 12.0).round() as u64,
        confidence: PREDICTION_CONFIDENCE,
        factors: RentFactors {
            location,
            bedrooms: property.bedrooms,
            property_type: property
                .property_type
                .as_ref()
                .map(|kind| kind.label().to_string())
                .unwrap_or_default(),
        },
    }
}
