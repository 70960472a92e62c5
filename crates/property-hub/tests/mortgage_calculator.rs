//! Calculator and matcher scenarios exercised through the public mortgage API.

use property_hub::mortgage::{
    calculate_mortgage, match_mortgage, BorrowerProfile, CalculationError, EmploymentType,
    LoanProfile, MortgageProduct, MortgageProductCatalog, MortgageProductSource, ProductId,
    MIN_MATCH_SCORE,
};

fn product(id: &str, min_income: f64, employment: EmploymentType) -> MortgageProduct {
    MortgageProduct {
        id: ProductId(id.to_string()),
        lender: "Zenith Bank Mortgage".to_string(),
        min_income,
        min_credit_score: 600,
        preferred_employment_type: employment,
        min_down_payment: 1_500_000.0,
        interest_rate: 14.0,
        max_tenure: 25,
    }
}

fn borrower() -> BorrowerProfile {
    BorrowerProfile {
        monthly_income: 350_000.0,
        credit_score: 600,
        employment_type: EmploymentType::Business,
        down_payment: 1_500_000.0,
    }
}

#[test]
fn payment_totals_are_consistent_across_loans() {
    let loans = [
        (1_200_000.0, 0.0, 10),
        (10_000_000.0, 15.0, 20),
        (35_000_000.0, 6.0, 30),
        (4_500_000.0, 16.0, 5),
    ];

    for (principal, rate, years) in loans {
        let result = calculate_mortgage(principal, rate, years).expect("valid loan");
        let payments = u64::from(years * 12);

        let drift = (result.monthly_payment * payments).abs_diff(result.total_payment);
        assert!(drift <= payments, "{principal} @ {rate}% drifted by {drift}");
        assert!(result.total_payment as f64 >= principal - 1.0);
    }
}

#[test]
fn fifteen_percent_over_twenty_years() {
    let profile = LoanProfile::new(10_000_000.0, 15.0, 20);
    assert_eq!(profile.number_of_payments(), 240);
    assert!((profile.monthly_rate() - 0.0125).abs() < 1e-12);

    let result = profile.amortize().expect("valid loan");

    let growth = 1.0125_f64.powi(240);
    let closed_form = 10_000_000.0 * 0.0125 * growth / (growth - 1.0);
    assert!((result.monthly_payment as f64 - closed_form).abs() <= 0.5);
}

#[test]
fn zero_interest_is_handled_explicitly() {
    let result = calculate_mortgage(1_200_000.0, 0.0, 10).expect("zero rate allowed");

    assert_eq!(result.monthly_payment, 10_000);
    assert_eq!(result.total_interest, 0);
}

#[test]
fn invalid_inputs_never_produce_nan() {
    let cases = [
        (-1.0, 10.0, 10),
        (f64::INFINITY, 10.0, 10),
        (100_000.0, f64::NAN, 10),
        (100_000.0, 10.0, 0),
    ];

    for (principal, rate, years) in cases {
        match calculate_mortgage(principal, rate, years) {
            Err(CalculationError::InvalidArgument { .. }) => {}
            other => panic!(
                "expected invalid argument for {principal}/{rate}/{years}, got {other:?}"
            ),
        }
    }
}

#[test]
fn borrower_meeting_every_threshold_scores_one_hundred() {
    let matches = match_mortgage(
        &borrower(),
        &[product("exact", 350_000.0, EmploymentType::Business)],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_score, 100);
}

#[test]
fn one_missed_threshold_still_qualifies() {
    let matches = match_mortgage(
        &borrower(),
        &[product("income-gap", 350_001.0, EmploymentType::Business)],
    );

    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].match_score, 70);
    assert!(matches[0].match_score >= MIN_MATCH_SCORE);
}

#[test]
fn borrower_meeting_nothing_is_excluded() {
    let weak = BorrowerProfile {
        monthly_income: 10_000.0,
        credit_score: 300,
        employment_type: EmploymentType::Formal,
        down_payment: 0.0,
    };

    let matches = match_mortgage(
        &weak,
        &[product("strict", 350_000.0, EmploymentType::Business)],
    );

    assert!(matches.is_empty());
}

#[test]
fn matching_is_idempotent_and_order_stable() {
    let products = vec![
        product("first-80", 350_000.0, EmploymentType::Formal),
        product("top", 350_000.0, EmploymentType::Business),
        product("second-80", 350_000.0, EmploymentType::SelfEmployed),
        MortgageProduct {
            min_credit_score: 800,
            min_down_payment: 9_000_000.0,
            ..product("dropped", 9_000_000.0, EmploymentType::Formal)
        },
    ];

    let first = match_mortgage(&borrower(), &products);
    let second = match_mortgage(&borrower(), &products);

    assert_eq!(first, second);
    let ids: Vec<&str> = first.iter().map(|m| m.product.id.0.as_str()).collect();
    assert_eq!(ids, vec!["top", "first-80", "second-80"]);
}

#[test]
fn standard_catalog_feeds_the_matcher() {
    let catalog = MortgageProductCatalog::standard();
    let products = catalog.products().expect("catalog readable");

    let matches = match_mortgage(
        &BorrowerProfile {
            monthly_income: 900_000.0,
            credit_score: 720,
            employment_type: EmploymentType::Business,
            down_payment: 6_000_000.0,
        },
        &products,
    );

    assert_eq!(matches.len(), products.len());
    assert_eq!(matches[0].product.id.0, "zenith-entrepreneur");
}
