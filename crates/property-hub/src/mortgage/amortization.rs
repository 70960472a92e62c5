use serde::{Deserialize, Serialize};

/// Loan parameters for a single fixed-rate amortization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanProfile {
    pub principal: f64,
    pub annual_interest_rate_percent: f64,
    pub term_years: u32,
}

/// Rounded repayment figures for a [`LoanProfile`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationResult {
    pub monthly_payment: u64,
    pub total_payment: u64,
    pub total_interest: u64,
    pub principal: f64,
    pub interest_rate: f64,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalculationError {
    #[error("invalid {argument}: {detail}")]
    InvalidArgument {
        argument: &'static str,
        detail: String,
    },
    #[error("repayment figures are out of range for this loan")]
    OutOfRange,
}

impl LoanProfile {
    pub fn new(principal: f64, annual_interest_rate_percent: f64, term_years: u32) -> Self {
        Self {
            principal,
            annual_interest_rate_percent,
            term_years,
        }
    }

    pub fn number_of_payments(&self) -> u32 {
        self.term_years.saturating_mul(12)
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_interest_rate_percent / 100.0 / 12.0
    }

    fn validate(&self) -> Result<(), CalculationError> {
        if !self.principal.is_finite() || self.principal <= 0.0 {
            return Err(CalculationError::InvalidArgument {
                argument: "principal",
                detail: format!("must be a positive amount, got {}", self.principal),
            });
        }
        if self.term_years == 0 {
            return Err(CalculationError::InvalidArgument {
                argument: "term_years",
                detail: "must be at least one year".to_string(),
            });
        }
        if !self.annual_interest_rate_percent.is_finite() || self.annual_interest_rate_percent < 0.0
        {
            return Err(CalculationError::InvalidArgument {
                argument: "annual_interest_rate_percent",
                detail: format!(
                    "must be zero or positive, got {}",
                    self.annual_interest_rate_percent
                ),
            });
        }
        Ok(())
    }

    /// Unrounded level payment. Zero-rate loans repay the principal in equal parts.
    ///
    /// The discount factor `1 - (1 + r)^-n` is evaluated through `ln_1p`/`exp_m1` so that
    /// tiny rates and very long terms stay finite.
    fn exact_monthly_payment(&self) -> f64 {
        let rate = self.monthly_rate();
        let payments = f64::from(self.number_of_payments());

        let discount = -(-payments * rate.ln_1p()).exp_m1();
        if rate > 0.0 && discount > 0.0 {
            self.principal * rate / discount
        } else {
            self.principal / payments
        }
    }

    pub fn amortize(&self) -> Result<AmortizationResult, CalculationError> {
        self.validate()?;

        let monthly_payment = self.exact_monthly_payment();
        let total_payment = monthly_payment * f64::from(self.number_of_payments());
        let total_interest = total_payment - self.principal;
        if !monthly_payment.is_finite() || !total_payment.is_finite() {
            return Err(CalculationError::OutOfRange);
        }

        Ok(AmortizationResult {
            monthly_payment: round_currency(monthly_payment),
            total_payment: round_currency(total_payment),
            total_interest: round_currency(total_interest),
            principal: self.principal,
            interest_rate: self.annual_interest_rate_percent,
            years: self.term_years,
        })
    }
}

/// Compute the fixed monthly repayment for a loan along with lifetime totals.
pub fn calculate_mortgage(
    principal: f64,
    annual_interest_rate_percent: f64,
    term_years: u32,
) -> Result<AmortizationResult, CalculationError> {
    LoanProfile::new(principal, annual_interest_rate_percent, term_years).amortize()
}

// Negative float noise rounds to zero through the saturating cast.
pub(crate) fn round_currency(amount: f64) -> u64 {
    amount.round() as u64
}
