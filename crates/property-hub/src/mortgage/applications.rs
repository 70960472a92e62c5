//! Mortgage application records written on behalf of signed-in users.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::matching::{BorrowerProfile, ProductId};
use crate::repository::RepositoryError;

/// Identifier wrapper for submitted mortgage applications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the marketplace user who owns an application or favorites list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

impl ApplicationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "Pending",
            ApplicationStatus::Approved => "Approved",
            ApplicationStatus::Rejected => "Rejected",
        }
    }
}

/// Borrower submission: the chosen lender, requested amount, and matcher answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageApplicationRequest {
    pub user_id: UserId,
    pub lender: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub amount: f64,
    #[serde(flatten)]
    pub borrower: BorrowerProfile,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageApplication {
    pub id: ApplicationId,
    pub user_id: UserId,
    pub lender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<ProductId>,
    pub amount: f64,
    #[serde(flatten)]
    pub borrower: BorrowerProfile,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage abstraction over the application collection.
pub trait MortgageApplicationRepository: Send + Sync {
    fn insert(&self, application: MortgageApplication)
        -> Result<MortgageApplication, RepositoryError>;
    fn update(&self, application: MortgageApplication) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError>;
    fn for_user(&self, user_id: &UserId) -> Result<Vec<MortgageApplication>, RepositoryError>;
}
