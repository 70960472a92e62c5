use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::applications::{
    ApplicationId, ApplicationStatus, MortgageApplication, MortgageApplicationRepository,
    MortgageApplicationRequest, UserId,
};
use super::catalog::MortgageProductSource;
use super::matching::{match_mortgage, BorrowerProfile, MatchResult};
use crate::repository::RepositoryError;

/// Service composing the product catalog and the application store.
pub struct MortgageService<P, R> {
    products: Arc<P>,
    applications: Arc<R>,
    sequence: AtomicU64,
}

impl<P, R> MortgageService<P, R>
where
    P: MortgageProductSource + 'static,
    R: MortgageApplicationRepository + 'static,
{
    pub fn new(products: Arc<P>, applications: Arc<R>) -> Self {
        Self {
            products,
            applications,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_application_id(&self) -> ApplicationId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        ApplicationId(format!("mapp-{id:06}"))
    }

    /// Rank every catalog product for the borrower.
    pub fn match_products(
        &self,
        borrower: &BorrowerProfile,
    ) -> Result<Vec<MatchResult>, MortgageServiceError> {
        let products = self.products.products()?;
        let matches = match_mortgage(borrower, &products);
        debug!(
            candidates = products.len(),
            matched = matches.len(),
            "mortgage products ranked"
        );
        Ok(matches)
    }

    /// Record a new application in the pending state.
    pub fn apply(
        &self,
        request: MortgageApplicationRequest,
    ) -> Result<MortgageApplication, MortgageServiceError> {
        validate_request(&request)?;

        if let Some(product_id) = &request.product_id {
            if self.products.product(product_id)?.is_none() {
                return Err(MortgageServiceError::Invalid(format!(
                    "unknown mortgage product '{product_id}'"
                )));
            }
        }

        let now = Utc::now();
        let application = MortgageApplication {
            id: self.next_application_id(),
            user_id: request.user_id,
            lender: request.lender.trim().to_string(),
            product_id: request.product_id,
            amount: request.amount,
            borrower: request.borrower,
            status: ApplicationStatus::Pending,
            created_at: now,
            updated_at: now,
        };

        let stored = self.applications.insert(application)?;
        info!(application_id = %stored.id, lender = %stored.lender, "mortgage application received");
        Ok(stored)
    }

    pub fn get(&self, id: &ApplicationId) -> Result<MortgageApplication, MortgageServiceError> {
        let application = self
            .applications
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(application)
    }

    /// Applications owned by a user, oldest first.
    pub fn applications_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<MortgageApplication>, MortgageServiceError> {
        let mut applications = self.applications.for_user(user_id)?;
        applications.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(applications)
    }

    pub fn update_status(
        &self,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<MortgageApplication, MortgageServiceError> {
        let mut application = self.get(id)?;
        application.status = status;
        application.updated_at = Utc::now();

        self.applications.update(application.clone())?;
        info!(application_id = %id, status = status.label(), "mortgage application status updated");
        Ok(application)
    }
}

fn validate_request(request: &MortgageApplicationRequest) -> Result<(), MortgageServiceError> {
    if request.user_id.0.trim().is_empty() {
        return Err(MortgageServiceError::Invalid(
            "user id is required".to_string(),
        ));
    }
    if request.lender.trim().is_empty() {
        return Err(MortgageServiceError::Invalid("lender is required".to_string()));
    }
    if !request.amount.is_finite() || request.amount <= 0.0 {
        return Err(MortgageServiceError::Invalid(format!(
            "requested amount must be positive, got {}",
            request.amount
        )));
    }
    Ok(())
}

/// Error raised by the mortgage service.
#[derive(Debug, thiserror::Error)]
pub enum MortgageServiceError {
    #[error("invalid application: {0}")]
    Invalid(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
