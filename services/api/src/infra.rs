use metrics_exporter_prometheus::PrometheusHandle;
use property_hub::listings::{
    ListingService, ListingServiceError, NewProperty, Property, PropertyId, PropertyRepository,
    PropertyType,
};
use property_hub::mortgage::{
    ApplicationId, CatalogError, EmploymentType, MortgageApplication,
    MortgageApplicationRepository, MortgageProductCatalog, UserId,
};
use property_hub::repository::RepositoryError;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryApplicationRepository {
    records: Arc<Mutex<HashMap<ApplicationId, MortgageApplication>>>,
}

impl MortgageApplicationRepository for InMemoryApplicationRepository {
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
        if guard.contains_key(&application.id) {
            guard.insert(application.id.clone(), application);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
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

#[derive(Default, Clone)]
pub(crate) struct InMemoryPropertyRepository {
    records: Arc<Mutex<HashMap<PropertyId, Property>>>,
}

impl PropertyRepository for InMemoryPropertyRepository {
    fn insert(&self, property: Property) -> Result<Property, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&property.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(property.id.clone(), property.clone());
        Ok(property)
    }

    fn update(&self, property: Property) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&property.id) {
            guard.insert(property.id.clone(), property);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard
            .remove(id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    fn all(&self) -> Result<Vec<Property>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.values().cloned().collect())
    }
}

/// Load products from a CSV export, or fall back to the bundled demo catalog.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<MortgageProductCatalog, CatalogError> {
    match path {
        Some(path) => {
            let catalog = MortgageProductCatalog::from_path(path)?;
            info!(products = catalog.len(), path = %path.display(), "mortgage catalog loaded");
            Ok(catalog)
        }
        None => Ok(MortgageProductCatalog::standard()),
    }
}

fn demo_listing(
    title: &str,
    location: &str,
    price: f64,
    bedrooms: u8,
    property_type: PropertyType,
    featured: bool,
) -> NewProperty {
    NewProperty {
        title: title.to_string(),
        description: format!("{bedrooms} bedroom {} in {location}", property_type.label()),
        price,
        bedrooms: Some(bedrooms),
        bathrooms: Some(bedrooms.saturating_add(1)),
        location: location.to_string(),
        property_type: Some(property_type),
        size: None,
        featured,
        images: Vec::new(),
    }
}

/// Populate an empty store with sample listings so the API is browsable out of the box.
pub(crate) fn seed_listings<R>(
    service: &ListingService<R>,
) -> Result<Vec<Property>, ListingServiceError>
where
    R: PropertyRepository + 'static,
{
    let listings = [
        demo_listing(
            "Contemporary 3-bed detached house",
            "Lekki Phase 1, Lagos",
            50_000_000.0,
            3,
            PropertyType::Detached,
            true,
        ),
        demo_listing(
            "Waterfront apartment",
            "Banana Island, Ikoyi",
            210_000_000.0,
            4,
            PropertyType::Apartment,
            true,
        ),
        demo_listing(
            "Family semi-detached duplex",
            "Gwarinpa, Abuja",
            65_000_000.0,
            4,
            PropertyType::SemiDetached,
            false,
        ),
        demo_listing(
            "Starter bungalow",
            "Ibadan, Oyo",
            18_000_000.0,
            2,
            PropertyType::Bungalow,
            false,
        ),
        demo_listing(
            "Terrace duplex",
            "Victoria Island, Lagos",
            120_000_000.0,
            5,
            PropertyType::Duplex,
            true,
        ),
    ];

    listings
        .into_iter()
        .map(|listing| service.create(listing))
        .collect()
}

pub(crate) fn parse_employment_type(raw: &str) -> Result<EmploymentType, String> {
    raw.parse::<EmploymentType>().map_err(|err| err.to_string())
}

pub(crate) fn parse_property_type(raw: &str) -> Result<PropertyType, String> {
    match raw.parse::<PropertyType>() {
        Ok(kind) => Ok(kind),
        Err(never) => match never {},
    }
}
