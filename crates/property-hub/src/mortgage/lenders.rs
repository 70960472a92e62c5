use serde::Serialize;

/// Headline terms advertised by a Nigerian mortgage lender.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LenderSummary {
    pub name: &'static str,
    pub interest_rate: f64,
    pub max_tenure_years: u32,
    pub min_down_payment_percent: f64,
}

impl LenderSummary {
    /// Minimum equity the lender expects for a property at `price`.
    pub fn required_down_payment(&self, price: f64) -> f64 {
        price * self.min_down_payment_percent / 100.0
    }
}

const LENDERS: [LenderSummary; 8] = [
    LenderSummary {
        name: "Nigeria Mortgage Refinance Company (NMRC)",
        interest_rate: 6.5,
        max_tenure_years: 20,
        min_down_payment_percent: 10.0,
    },
    LenderSummary {
        name: "Federal Mortgage Bank of Nigeria (FMBN)",
        interest_rate: 6.0,
        max_tenure_years: 30,
        min_down_payment_percent: 10.0,
    },
    LenderSummary {
        name: "First Bank Mortgage",
        interest_rate: 15.0,
        max_tenure_years: 20,
        min_down_payment_percent: 20.0,
    },
    LenderSummary {
        name: "GTBank Mortgage",
        interest_rate: 14.5,
        max_tenure_years: 25,
        min_down_payment_percent: 20.0,
    },
    LenderSummary {
        name: "Access Bank Mortgage",
        interest_rate: 15.5,
        max_tenure_years: 20,
        min_down_payment_percent: 20.0,
    },
    LenderSummary {
        name: "Zenith Bank Mortgage",
        interest_rate: 14.0,
        max_tenure_years: 25,
        min_down_payment_percent: 15.0,
    },
    LenderSummary {
        name: "Stanbic IBTC Mortgage",
        interest_rate: 16.0,
        max_tenure_years: 20,
        min_down_payment_percent: 25.0,
    },
    LenderSummary {
        name: "Union Bank Mortgage",
        interest_rate: 15.0,
        max_tenure_years: 20,
        min_down_payment_percent: 20.0,
    },
];

pub fn nigerian_mortgage_banks() -> Vec<LenderSummary> {
    LENDERS.to_vec()
}
