use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Products scoring below this are not offered to the borrower.
pub const MIN_MATCH_SCORE: u8 = 50;

/// Identifier wrapper for catalog products.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EmploymentType {
    Formal,
    SelfEmployed,
    Business,
}

impl EmploymentType {
    pub fn label(&self) -> &'static str {
        match self {
            EmploymentType::Formal => "formal",
            EmploymentType::SelfEmployed => "self-employed",
            EmploymentType::Business => "business",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown employment type '{0}' (expected formal, self-employed, or business)")]
pub struct ParseEmploymentTypeError(pub String);

impl FromStr for EmploymentType {
    type Err = ParseEmploymentTypeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "formal" => Ok(Self::Formal),
            "self-employed" | "self_employed" => Ok(Self::SelfEmployed),
            "business" => Ok(Self::Business),
            _ => Err(ParseEmploymentTypeError(value.to_string())),
        }
    }
}

/// Borrower answers collected by the mortgage matcher form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub monthly_income: f64,
    pub credit_score: u16,
    pub employment_type: EmploymentType,
    pub down_payment: f64,
}

/// Eligibility thresholds published by a lender for one mortgage product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageProduct {
    pub id: ProductId,
    pub lender: String,
    pub min_income: f64,
    pub min_credit_score: u16,
    pub preferred_employment_type: EmploymentType,
    pub min_down_payment: f64,
    pub interest_rate: f64,
    pub max_tenure: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchCriterion {
    Income,
    CreditScore,
    EmploymentType,
    DownPayment,
}

impl MatchCriterion {
    pub const ALL: [MatchCriterion; 4] = [
        MatchCriterion::Income,
        MatchCriterion::CreditScore,
        MatchCriterion::EmploymentType,
        MatchCriterion::DownPayment,
    ];

    pub fn weight(&self) -> u8 {
        match self {
            MatchCriterion::Income => 30,
            MatchCriterion::CreditScore => 25,
            MatchCriterion::EmploymentType => 20,
            MatchCriterion::DownPayment => 25,
        }
    }

    fn is_met(&self, borrower: &BorrowerProfile, product: &MortgageProduct) -> bool {
        match self {
            MatchCriterion::Income => borrower.monthly_income >= product.min_income,
            MatchCriterion::CreditScore => borrower.credit_score >= product.min_credit_score,
            MatchCriterion::EmploymentType => {
                borrower.employment_type == product.preferred_employment_type
            }
            MatchCriterion::DownPayment => borrower.down_payment >= product.min_down_payment,
        }
    }
}

/// Per-criterion audit entry shown next to a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionOutcome {
    pub criterion: MatchCriterion,
    pub met: bool,
    pub points: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    #[serde(flatten)]
    pub product: MortgageProduct,
    pub match_score: u8,
    pub criteria: Vec<CriterionOutcome>,
}

/// Score a single product against the borrower. Criteria are independent.
pub fn score_product(borrower: &BorrowerProfile, product: &MortgageProduct) -> MatchResult {
    let criteria: Vec<CriterionOutcome> = MatchCriterion::ALL
        .iter()
        .map(|criterion| {
            let met = criterion.is_met(borrower, product);
            CriterionOutcome {
                criterion: *criterion,
                met,
                points: if met { criterion.weight() } else { 0 },
            }
        })
        .collect();

    let match_score = criteria.iter().map(|outcome| outcome.points).sum();

    MatchResult {
        product: product.clone(),
        match_score,
        criteria,
    }
}

/// Rank products for a borrower, keeping those scoring at least [`MIN_MATCH_SCORE`].
///
/// Ties keep the relative order of `products`.
pub fn match_mortgage(borrower: &BorrowerProfile, products: &[MortgageProduct]) -> Vec<MatchResult> {
    let mut matches: Vec<MatchResult> = products
        .iter()
        .map(|product| score_product(borrower, product))
        .filter(|result| result.match_score >= MIN_MATCH_SCORE)
        .collect();

    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches
}
