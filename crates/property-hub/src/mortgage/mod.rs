//! Mortgage calculator, product matching, lender reference data, and application intake.

mod amortization;
pub mod applications;
pub mod catalog;
mod lenders;
mod matching;
pub mod router;
mod service;

#[cfg(test)]
mod tests;

pub use amortization::{calculate_mortgage, AmortizationResult, CalculationError, LoanProfile};
pub use applications::{
    ApplicationId, ApplicationStatus, MortgageApplication, MortgageApplicationRepository,
    MortgageApplicationRequest, UserId,
};
pub use catalog::{CatalogError, MortgageProductCatalog, MortgageProductSource};
pub use lenders::{nigerian_mortgage_banks, LenderSummary};
pub use matching::{
    match_mortgage, score_product, BorrowerProfile, CriterionOutcome, EmploymentType,
    MatchCriterion, MatchResult, MortgageProduct, ParseEmploymentTypeError, ProductId,
    MIN_MATCH_SCORE,
};
pub use router::mortgage_router;
pub use service::{MortgageService, MortgageServiceError};
