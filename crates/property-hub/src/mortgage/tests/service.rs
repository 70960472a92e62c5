use super::common::*;
use std::sync::Arc;

use crate::mortgage::applications::{ApplicationId, ApplicationStatus, UserId};
use crate::mortgage::catalog::MortgageProductCatalog;
use crate::mortgage::matching::{EmploymentType, ProductId};
use crate::mortgage::service::{MortgageService, MortgageServiceError};
use crate::repository::RepositoryError;

#[test]
fn apply_records_pending_application() {
    let (service, repository) = build_service();

    let application = service.apply(request("user-1")).expect("application stored");

    assert_eq!(application.id, ApplicationId("mapp-000001".to_string()));
    assert_eq!(application.status, ApplicationStatus::Pending);
    assert_eq!(application.created_at, application.updated_at);
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .contains_key(&application.id));
}

#[test]
fn apply_rejects_missing_lender_and_bad_amounts() {
    let (service, _) = build_service();

    let mut missing_lender = request("user-1");
    missing_lender.lender = "   ".to_string();
    assert!(matches!(
        service.apply(missing_lender),
        Err(MortgageServiceError::Invalid(_))
    ));

    let mut zero_amount = request("user-1");
    zero_amount.amount = 0.0;
    assert!(matches!(
        service.apply(zero_amount),
        Err(MortgageServiceError::Invalid(_))
    ));
}

#[test]
fn apply_rejects_unknown_products() {
    let (service, _) = build_service();
    let mut request = request("user-1");
    request.product_id = Some(ProductId("unknown".to_string()));

    match service.apply(request) {
        Err(MortgageServiceError::Invalid(message)) => assert!(message.contains("unknown")),
        other => panic!("expected invalid product, got {other:?}"),
    }
}

#[test]
fn applications_are_listed_per_user_in_submission_order() {
    let (service, _) = build_service();
    let first = service.apply(request("ada")).expect("first stored");
    service.apply(request("bayo")).expect("other user stored");
    let second = service.apply(request("ada")).expect("second stored");

    let listed = service
        .applications_for_user(&UserId("ada".to_string()))
        .expect("listing works");

    let ids: Vec<_> = listed.iter().map(|application| application.id.clone()).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[test]
fn update_status_refreshes_timestamp() {
    let (service, _) = build_service();
    let application = service.apply(request("user-1")).expect("stored");

    let updated = service
        .update_status(&application.id, ApplicationStatus::Approved)
        .expect("status updated");

    assert_eq!(updated.status, ApplicationStatus::Approved);
    assert!(updated.updated_at >= application.updated_at);
    let fetched = service.get(&application.id).expect("fetch works");
    assert_eq!(fetched.status, ApplicationStatus::Approved);
}

#[test]
fn update_status_reports_missing_applications() {
    let (service, _) = build_service();

    let result = service.update_status(
        &ApplicationId("mapp-999999".to_string()),
        ApplicationStatus::Rejected,
    );

    assert!(matches!(
        result,
        Err(MortgageServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn match_products_uses_catalog() {
    let (service, _) = build_service();

    let matches = service.match_products(&borrower()).expect("matching works");

    assert!(!matches.is_empty());
    assert!(matches
        .windows(2)
        .all(|pair| pair[0].match_score >= pair[1].match_score));
    assert_eq!(matches[0].match_score, 100);
    assert_eq!(
        matches[0].product.preferred_employment_type,
        EmploymentType::Formal
    );
}

#[test]
fn repository_outages_surface_as_errors() {
    let service = MortgageService::new(
        Arc::new(MortgageProductCatalog::standard()),
        Arc::new(UnavailableApplications),
    );

    assert!(matches!(
        service.apply(request("user-1")),
        Err(MortgageServiceError::Repository(
            RepositoryError::Unavailable(_)
        ))
    ));
}
