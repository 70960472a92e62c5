use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use super::matching::{EmploymentType, MortgageProduct, ProductId};
use crate::repository::RepositoryError;

/// Read-only view over the externally managed mortgage product collection.
pub trait MortgageProductSource: Send + Sync {
    fn products(&self) -> Result<Vec<MortgageProduct>, RepositoryError>;
    fn product(&self, id: &ProductId) -> Result<Option<MortgageProduct>, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read product catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid product catalog data: {0}")]
    Csv(#[from] csv::Error),
    #[error("product '{0}' appears more than once in the catalog")]
    DuplicateProduct(ProductId),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    lender: String,
    min_income: f64,
    min_credit_score: u16,
    preferred_employment_type: EmploymentType,
    min_down_payment: f64,
    interest_rate: f64,
    max_tenure: u32,
}

impl From<CatalogRow> for MortgageProduct {
    fn from(row: CatalogRow) -> Self {
        MortgageProduct {
            id: ProductId(row.id),
            lender: row.lender,
            min_income: row.min_income,
            min_credit_score: row.min_credit_score,
            preferred_employment_type: row.preferred_employment_type,
            min_down_payment: row.min_down_payment,
            interest_rate: row.interest_rate,
            max_tenure: row.max_tenure,
        }
    }
}

/// In-memory product collection, kept in the order it was loaded.
#[derive(Debug, Clone, Default)]
pub struct MortgageProductCatalog {
    products: Vec<MortgageProduct>,
}

impl MortgageProductCatalog {
    pub fn new(products: Vec<MortgageProduct>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for product in &products {
            if !seen.insert(product.id.clone()) {
                return Err(CatalogError::DuplicateProduct(product.id.clone()));
            }
        }
        Ok(Self { products })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut products = Vec::new();
        for row in csv_reader.deserialize::<CatalogRow>() {
            products.push(MortgageProduct::from(row?));
        }

        Self::new(products)
    }

    /// Demo products mirroring the headline lenders.
    pub fn standard() -> Self {
        let product = |id: &str,
                       lender: &str,
                       min_income: f64,
                       min_credit_score: u16,
                       preferred_employment_type: EmploymentType,
                       min_down_payment: f64,
                       interest_rate: f64,
                       max_tenure: u32| MortgageProduct {
            id: ProductId(id.to_string()),
            lender: lender.to_string(),
            min_income,
            min_credit_score,
            preferred_employment_type,
            min_down_payment,
            interest_rate,
            max_tenure,
        };

        Self {
            products: vec![
                product(
                    "nmrc-refinance",
                    "Nigeria Mortgage Refinance Company (NMRC)",
                    250_000.0,
                    600,
                    EmploymentType::Formal,
                    1_000_000.0,
                    6.5,
                    20,
                ),
                product(
                    "fmbn-nhf",
                    "Federal Mortgage Bank of Nigeria (FMBN)",
                    150_000.0,
                    550,
                    EmploymentType::Formal,
                    500_000.0,
                    6.0,
                    30,
                ),
                product(
                    "gtbank-home",
                    "GTBank Mortgage",
                    600_000.0,
                    680,
                    EmploymentType::Formal,
                    3_000_000.0,
                    14.5,
                    25,
                ),
                product(
                    "zenith-entrepreneur",
                    "Zenith Bank Mortgage",
                    800_000.0,
                    650,
                    EmploymentType::Business,
                    2_500_000.0,
                    14.0,
                    25,
                ),
                product(
                    "stanbic-self-employed",
                    "Stanbic IBTC Mortgage",
                    700_000.0,
                    700,
                    EmploymentType::SelfEmployed,
                    5_000_000.0,
                    16.0,
                    20,
                ),
            ],
        }
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl MortgageProductSource for MortgageProductCatalog {
    fn products(&self) -> Result<Vec<MortgageProduct>, RepositoryError> {
        Ok(self.products.clone())
    }

    fn product(&self, id: &ProductId) -> Result<Option<MortgageProduct>, RepositoryError> {
        Ok(self
            .products
            .iter()
            .find(|product| &product.id == id)
            .cloned())
    }
}
