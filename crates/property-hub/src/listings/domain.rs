use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::rent::PropertyAttributes;

/// Identifier wrapper for listed properties.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl PropertyId {
    /// Numeric suffix of a store-assigned id such as `prop-000042`.
    pub fn sequence(&self) -> Option<u64> {
        self.0
            .rsplit_once('-')
            .and_then(|(_, digits)| digits.parse().ok())
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Building categories offered on the marketplace. Unrecognised labels are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PropertyType {
    Apartment,
    Detached,
    SemiDetached,
    Duplex,
    Bungalow,
    Other(String),
}

impl PropertyType {
    pub fn label(&self) -> &str {
        match self {
            PropertyType::Apartment => "apartment",
            PropertyType::Detached => "detached",
            PropertyType::SemiDetached => "semi-detached",
            PropertyType::Duplex => "duplex",
            PropertyType::Bungalow => "bungalow",
            PropertyType::Other(label) => label,
        }
    }

    /// Rent adjustment for the building type.
    pub fn rent_multiplier(&self) -> f64 {
        match self {
            PropertyType::Apartment => 0.9,
            PropertyType::Detached => 1.3,
            PropertyType::SemiDetached => 1.1,
            PropertyType::Duplex | PropertyType::Bungalow | PropertyType::Other(_) => 1.0,
        }
    }
}

impl FromStr for PropertyType {
    type Err = std::convert::Infallible;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Ok(match trimmed.to_ascii_lowercase().as_str() {
            "apartment" => Self::Apartment,
            "detached" => Self::Detached,
            "semi-detached" => Self::SemiDetached,
            "duplex" => Self::Duplex,
            "bungalow" => Self::Bungalow,
            _ => Self::Other(trimmed.to_string()),
        })
    }
}

impl From<String> for PropertyType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(kind) => kind,
            Err(never) => match never {},
        }
    }
}

impl From<PropertyType> for String {
    fn from(value: PropertyType) -> Self {
        match value {
            PropertyType::Other(label) => label,
            known => known.label().to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub bedrooms: Option<u8>,
    pub bathrooms: Option<u8>,
    pub location: String,
    pub property_type: Option<PropertyType>,
    pub size: Option<f64>,
    pub featured: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Inputs for the rent heuristic; an unknown bedroom count is read as one bedroom.
    pub fn attributes(&self) -> PropertyAttributes {
        PropertyAttributes {
            price: self.price,
            bedrooms: self.bedrooms.unwrap_or(1),
            location: self.location.clone(),
            property_type: self.property_type.clone(),
            size: self.size,
        }
    }
}

/// Listing payload supplied by an agent before the store assigns an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub bedrooms: Option<u8>,
    #[serde(default)]
    pub bathrooms: Option<u8>,
    pub location: String,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Partial edit; absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub bedrooms: Option<u8>,
    #[serde(default)]
    pub bathrooms: Option<u8>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub property_type: Option<PropertyType>,
    #[serde(default)]
    pub size: Option<f64>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub images: Option<Vec<String>>,
}

impl PropertyUpdate {
    pub(crate) fn apply_to(self, property: &mut Property) {
        if let Some(title) = self.title {
            property.title = title;
        }
        if let Some(description) = self.description {
            property.description = description;
        }
        if let Some(price) = self.price {
            property.price = price;
        }
        if let Some(bedrooms) = self.bedrooms {
            property.bedrooms = Some(bedrooms);
        }
        if let Some(bathrooms) = self.bathrooms {
            property.bathrooms = Some(bathrooms);
        }
        if let Some(location) = self.location {
            property.location = location;
        }
        if let Some(property_type) = self.property_type {
            property.property_type = Some(property_type);
        }
        if let Some(size) = self.size {
            property.size = Some(size);
        }
        if let Some(featured) = self.featured {
            property.featured = featured;
        }
        if let Some(images) = self.images {
            property.images = images;
        }
    }
}
