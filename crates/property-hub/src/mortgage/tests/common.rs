use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::mortgage::applications::{
    ApplicationId, MortgageApplication, MortgageApplicationRepository,
    MortgageApplicationRequest, UserId,
};
use crate::mortgage::catalog::MortgageProductCatalog;
use crate::mortgage::matching::{BorrowerProfile, EmploymentType};
use crate::mortgage::service::MortgageService;
use crate::repository::RepositoryError;

pub(super) fn borrower() -> BorrowerProfile {
    BorrowerProfile {
        monthly_income: 500_000.0,
        credit_score: 650,
        employment_type: EmploymentType::Formal,
        down_payment: 2_000_000.0,
    }
}

pub(super) fn request(user: &str) -> MortgageApplicationRequest {
    MortgageApplicationRequest {
        user_id: UserId(user.to_string()),
        lender: "Federal Mortgage Bank of Nigeria (FMBN)".to_string(),
        product_id: None,
        amount: 10_000_000.0,
        borrower: borrower(),
    }
}

pub(super) fn build_service() -> (
    MortgageService<MortgageProductCatalog, MemoryApplications>,
    Arc<MemoryApplications>,
) {
    let applications = Arc::new(MemoryApplications::default());
    let service = MortgageService::new(
        Arc::new(MortgageProductCatalog::standard()),
        applications.clone(),
    );
    (service, applications)
}

#[derive(Default, Clone)]
pub(super) struct MemoryApplications {
    pub(super) records: Arc<Mutex<HashMap<ApplicationId, MortgageApplication>>>,
}

impl MortgageApplicationRepository for MemoryApplications {
    fn insert(
        &self,
        application: MortgageApplication,
    ) -> Result<MortgageApplication, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&application.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(application.id.clone(), application.clone());
        Ok(application)
    }

    fn update(&self, application: MortgageApplication) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(application.id.clone(), application);
        Ok(())
    }

    fn fetch(&self, id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn for_user(&self, user_id: &UserId) -> Result<Vec<MortgageApplication>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard
            .values()
            .filter(|application| &application.user_id == user_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableApplications;

impl MortgageApplicationRepository for UnavailableApplications {
    fn insert(
        &self,
        _application: MortgageApplication,
    ) -> Result<MortgageApplication, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn update(&self, _application: MortgageApplication) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn fetch(&self, _id: &ApplicationId) -> Result<Option<MortgageApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn for_user(&self, _user_id: &UserId) -> Result<Vec<MortgageApplication>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
