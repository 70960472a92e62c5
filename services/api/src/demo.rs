use crate::infra::{
    load_catalog, parse_employment_type, parse_property_type, seed_listings,
    InMemoryApplicationRepository, InMemoryPropertyRepository,
};
use chrono::Utc;
use clap::Args;
use property_hub::error::AppError;
use property_hub::listings::{
    ClientSession, FilterUpdate, ListingService, Property, PropertyType, DEFAULT_FEATURED_LIMIT,
};
use property_hub::mortgage::{
    calculate_mortgage, nigerian_mortgage_banks, AmortizationResult, ApplicationStatus,
    BorrowerProfile, EmploymentType, MatchResult, MortgageApplicationRequest,
    MortgageProductSource, MortgageService, UserId,
};
use property_hub::rent::{predict_fair_rent, PropertyAttributes, RentPrediction};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MortgageCalculateArgs {
    /// Loan amount in naira
    #[arg(long)]
    pub(crate) principal: f64,
    /// Annual interest rate in percent (e.g. 15 for 15%)
    #[arg(long)]
    pub(crate) rate: f64,
    /// Loan term in years
    #[arg(long)]
    pub(crate) years: u32,
}

#[derive(Args, Debug)]
pub(crate) struct MortgageMatchArgs {
    /// Borrower's monthly income in naira
    #[arg(long)]
    pub(crate) monthly_income: f64,
    /// Borrower's credit score
    #[arg(long)]
    pub(crate) credit_score: u16,
    /// formal, self-employed, or business
    #[arg(long, value_parser = parse_employment_type)]
    pub(crate) employment_type: EmploymentType,
    /// Available down payment in naira
    #[arg(long)]
    pub(crate) down_payment: f64,
    /// Optional CSV export of mortgage products (defaults to the bundled catalog)
    #[arg(long)]
    pub(crate) products_csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct RentPredictArgs {
    /// Asking price in naira
    #[arg(long)]
    pub(crate) price: f64,
    /// Number of bedrooms
    #[arg(long, default_value_t = 1)]
    pub(crate) bedrooms: u8,
    /// Free-text location, e.g. "Lekki Phase 1, Lagos"
    #[arg(long, default_value = "")]
    pub(crate) location: String,
    /// apartment, detached, semi-detached, duplex, bungalow, or other
    #[arg(long, value_parser = parse_property_type)]
    pub(crate) property_type: Option<PropertyType>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional CSV export of mortgage products (defaults to the bundled catalog)
    #[arg(long)]
    pub(crate) products_csv: Option<PathBuf>,
    /// Skip the mortgage application portion of the demo.
    #[arg(long)]
    pub(crate) skip_application: bool,
}

pub(crate) fn run_mortgage_calculate(args: MortgageCalculateArgs) -> Result<(), AppError> {
    let result = calculate_mortgage(args.principal, args.rate, args.years)?;
    render_amortization(&result);
    Ok(())
}

pub(crate) fn run_mortgage_match(args: MortgageMatchArgs) -> Result<(), AppError> {
    let MortgageMatchArgs {
        monthly_income,
        credit_score,
        employment_type,
        down_payment,
        products_csv,
    } = args;

    let catalog = load_catalog(products_csv.as_deref())?;
    let service = MortgageService::new(
        Arc::new(catalog),
        Arc::new(InMemoryApplicationRepository::default()),
    );
    let borrower = BorrowerProfile {
        monthly_income,
        credit_score,
        employment_type,
        down_payment,
    };

    let matches = service.match_products(&borrower)?;
    render_matches(&matches);
    Ok(())
}

pub(crate) fn run_lenders() {
    println!("Nigerian mortgage lenders");
    for lender in nigerian_mortgage_banks() {
        println!(
            "- {}: {:.1}% | up to {} years | {:.0}% minimum down payment",
            lender.name,
            lender.interest_rate,
            lender.max_tenure_years,
            lender.min_down_payment_percent
        );
    }
}

pub(crate) fn run_rent_predict(args: RentPredictArgs) {
    let attributes = PropertyAttributes {
        price: args.price,
        bedrooms: args.bedrooms,
        location: args.location,
        property_type: args.property_type,
        size: None,
    };
    render_rent_prediction(&predict_fair_rent(&attributes));
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        products_csv,
        skip_application,
    } = args;

    println!(
        "Nigeria Property Hub demo ({})",
        Utc::now().format("%Y-%m-%d %H:%M UTC")
    );

    let listings = ListingService::new(Arc::new(InMemoryPropertyRepository::default()));
    let seeded = seed_listings(&listings)?;
    println!("\nSeeded {} listings", seeded.len());

    let featured = listings.featured(DEFAULT_FEATURED_LIMIT)?;
    println!("\nFeatured listings");
    for property in &featured {
        render_listing_line(property);
    }

    let mut session = ClientSession::signed_in(UserId("demo-buyer".to_string()));
    session.apply_filters(FilterUpdate {
        location: Some("Lekki".to_string()),
        ..FilterUpdate::default()
    });
    let results = listings.search(&session.filters)?;
    println!("\nSearch: location starts with \"Lekki\" -> {} result(s)", results.len());
    for property in &results {
        render_listing_line(property);
        if let Err(err) = session.toggle_favorite(property.id.clone()) {
            println!("  Could not save favorite: {err}");
        }
    }

    let favorites = session.favorite_properties(&listings)?;
    println!("\nSaved favorites: {}", favorites.len());

    let Some(home) = favorites.first() else {
        return Ok(());
    };

    println!("\nFair-rent estimate for \"{}\"", home.title);
    render_rent_prediction(&predict_fair_rent(&home.attributes()));

    let down_payment = home.price * 0.2;
    let loan = home.price - down_payment;
    println!(
        "\nMortgage for {} with a 20% down payment (15% over 20 years)",
        format_naira(loan)
    );
    let amortization = calculate_mortgage(loan, 15.0, 20)?;
    render_amortization(&amortization);

    let catalog = Arc::new(load_catalog(products_csv.as_deref())?);
    let applications = Arc::new(InMemoryApplicationRepository::default());
    let mortgages = MortgageService::new(catalog.clone(), applications);
    let borrower = BorrowerProfile {
        monthly_income: 650_000.0,
        credit_score: 690,
        employment_type: EmploymentType::Formal,
        down_payment,
    };

    println!("\nProduct matches for the demo borrower");
    let matches = mortgages.match_products(&borrower)?;
    render_matches(&matches);

    if skip_application {
        return Ok(());
    }

    let Some(best) = matches.first() else {
        println!("\nNo product qualified; skipping application");
        return Ok(());
    };

    let request = MortgageApplicationRequest {
        user_id: session
            .user
            .clone()
            .unwrap_or_else(|| UserId("demo-buyer".to_string())),
        lender: best.product.lender.clone(),
        product_id: Some(best.product.id.clone()),
        amount: loan,
        borrower,
    };
    let application = mortgages.apply(request)?;
    println!(
        "\nSubmitted application {} to {} -> status {}",
        application.id,
        application.lender,
        application.status.label()
    );

    let approved = mortgages.update_status(&application.id, ApplicationStatus::Approved)?;
    println!(
        "  Lender decision recorded at {} -> {}",
        approved.updated_at.format("%Y-%m-%d %H:%M UTC"),
        approved.status.label()
    );

    if let Ok(Some(product)) = catalog.product(&best.product.id) {
        println!(
            "  Product terms: {:.1}% for up to {} years",
            product.interest_rate, product.max_tenure
        );
    }

    match serde_json::to_string_pretty(&approved) {
        Ok(json) => println!("  Stored application payload:\n{}", json),
        Err(err) => println!("  Stored application payload unavailable: {}", err),
    }

    Ok(())
}

fn render_listing_line(property: &Property) {
    let kind = property
        .property_type
        .as_ref()
        .map(PropertyType::label)
        .unwrap_or("unspecified");
    println!(
        "- [{}] {} | {} | {} | {}",
        property.id,
        property.title,
        property.location,
        kind,
        format_naira(property.price)
    );
}

pub(crate) fn render_amortization(result: &AmortizationResult) {
    println!(
        "Loan {} at {}% over {} years",
        format_naira(result.principal),
        result.interest_rate,
        result.years
    );
    println!("- Monthly payment: {}", format_naira(result.monthly_payment as f64));
    println!("- Total payment:   {}", format_naira(result.total_payment as f64));
    println!("- Total interest:  {}", format_naira(result.total_interest as f64));
}

pub(crate) fn render_matches(matches: &[MatchResult]) {
    if matches.is_empty() {
        println!("No mortgage products scored 50 or more");
        return;
    }

    for result in matches {
        let missed: Vec<String> = result
            .criteria
            .iter()
            .filter(|outcome| !outcome.met)
            .map(|outcome| format!("{:?}", outcome.criterion))
            .collect();
        let note = if missed.is_empty() {
            String::new()
        } else {
            format!(" (missed: {})", missed.join(", "))
        };
        println!(
            "- {} [{}]: score {} | {:.1}% up to {} years{}",
            result.product.lender,
            result.product.id,
            result.match_score,
            result.product.interest_rate,
            result.product.max_tenure,
            note
        );
    }
}

pub(crate) fn render_rent_prediction(prediction: &RentPrediction) {
    println!(
        "- Monthly rent: {}",
        format_naira(prediction.monthly_rent as f64)
    );
    println!("- Yearly rent:  {}", format_naira(prediction.yearly_rent as f64));
    println!(
        "- Factors: {:?} location, {} bedroom(s), type {}",
        prediction.factors.location,
        prediction.factors.bedrooms,
        if prediction.factors.property_type.is_empty() {
            "unspecified"
        } else {
            prediction.factors.property_type.as_str()
        }
    );
    println!(
        "- Confidence: {:.0}% (fixed heuristic, not a statistical estimate)",
        prediction.confidence * 100.0
    );
}

/// Whole-naira amount with thousands separators.
pub(crate) fn format_naira(amount: f64) -> String {
    let rounded = amount.round() as i64;
    let digits = rounded.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}NGN {grouped}")
}
