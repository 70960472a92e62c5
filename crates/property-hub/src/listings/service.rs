use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info};

use super::domain::{NewProperty, Property, PropertyId, PropertyUpdate};
use super::filters::SearchFilters;
use super::repository::PropertyRepository;
use crate::rent::{predict_fair_rent, RentPrediction};
use crate::repository::RepositoryError;

/// Number of featured listings shown on the landing page.
pub const DEFAULT_FEATURED_LIMIT: usize = 6;

/// Listing CRUD, search, and per-listing rent estimates.
pub struct ListingService<R> {
    repository: Arc<R>,
    sequence: AtomicU64,
}

impl<R> ListingService<R>
where
    R: PropertyRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            sequence: AtomicU64::new(1),
        }
    }

    fn next_property_id(&self) -> PropertyId {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed);
        PropertyId(format!("prop-{id:06}"))
    }

    pub fn create(&self, listing: NewProperty) -> Result<Property, ListingServiceError> {
        validate_listing(&listing.title, &listing.location, listing.price)?;

        let now = Utc::now();
        let property = Property {
            id: self.next_property_id(),
            title: listing.title.trim().to_string(),
            description: listing.description,
            price: listing.price,
            bedrooms: listing.bedrooms,
            bathrooms: listing.bathrooms,
            location: listing.location.trim().to_string(),
            property_type: listing.property_type,
            size: listing.size,
            featured: listing.featured,
            images: listing.images,
            created_at: now,
            updated_at: now,
        };

        let stored = self.repository.insert(property)?;
        info!(property_id = %stored.id, location = %stored.location, "property listed");
        Ok(stored)
    }

    pub fn get(&self, id: &PropertyId) -> Result<Property, ListingServiceError> {
        let property = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(property)
    }

    pub fn update(
        &self,
        id: &PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, ListingServiceError> {
        let mut property = self.get(id)?;
        update.apply_to(&mut property);
        validate_listing(&property.title, &property.location, property.price)?;
        property.updated_at = Utc::now();

        self.repository.update(property.clone())?;
        debug!(property_id = %id, "property updated");
        Ok(property)
    }

    pub fn delete(&self, id: &PropertyId) -> Result<(), ListingServiceError> {
        self.repository.delete(id)?;
        info!(property_id = %id, "property removed");
        Ok(())
    }

    /// Listings matching the filters, newest first.
    pub fn search(&self, filters: &SearchFilters) -> Result<Vec<Property>, ListingServiceError> {
        let mut properties: Vec<Property> = self
            .repository
            .all()?
            .into_iter()
            .filter(|property| filters.matches(property))
            .collect();
        sort_newest_first(&mut properties);
        Ok(properties)
    }

    pub fn featured(&self, limit: usize) -> Result<Vec<Property>, ListingServiceError> {
        let mut properties: Vec<Property> = self
            .repository
            .all()?
            .into_iter()
            .filter(|property| property.featured)
            .collect();
        sort_newest_first(&mut properties);
        properties.truncate(limit);
        Ok(properties)
    }

    pub fn rent_prediction(&self, id: &PropertyId) -> Result<RentPrediction, ListingServiceError> {
        let property = self.get(id)?;
        Ok(predict_fair_rent(&property.attributes()))
    }
}

// Ids are zero-padded, so they break timestamp ties in creation order.
fn sort_newest_first(properties: &mut [Property]) {
    properties.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.sequence().cmp(&a.id.sequence()))
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn validate_listing(title: &str, location: &str, price: f64) -> Result<(), ListingServiceError> {
    if title.trim().is_empty() {
        return Err(ListingServiceError::Invalid("title is required".to_string()));
    }
    if location.trim().is_empty() {
        return Err(ListingServiceError::Invalid("location is required".to_string()));
    }
    if !price.is_finite() || price < 0.0 {
        return Err(ListingServiceError::Invalid(format!(
            "price must be zero or positive, got {price}"
        )));
    }
    Ok(())
}

/// Error raised by the listing service.
#[derive(Debug, thiserror::Error)]
pub enum ListingServiceError {
    #[error("invalid listing: {0}")]
    Invalid(String),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::domain::PropertyType;
    use crate::listings::filters::FilterUpdate;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryProperties {
        records: Mutex<HashMap<PropertyId, Property>>,
    }

    impl PropertyRepository for MemoryProperties {
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
            guard.insert(property.id.clone(), property);
            Ok(())
        }

        fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.get(id).cloned())
        }

        fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError> {
            let mut guard = self.records.lock().expect("repository mutex poisoned");
            guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
        }

        fn all(&self) -> Result<Vec<Property>, RepositoryError> {
            let guard = self.records.lock().expect("repository mutex poisoned");
            Ok(guard.values().cloned().collect())
        }
    }

    fn listing(title: &str, location: &str, price: f64, featured: bool) -> NewProperty {
        NewProperty {
            title: title.to_string(),
            description: String::new(),
            price,
            bedrooms: Some(3),
            bathrooms: Some(2),
            location: location.to_string(),
            property_type: Some(PropertyType::Detached),
            size: None,
            featured,
            images: Vec::new(),
        }
    }

    fn service() -> ListingService<MemoryProperties> {
        ListingService::new(Arc::new(MemoryProperties::default()))
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let service = service();
        let first = service
            .create(listing("Lekki duplex", "Lekki", 50_000_000.0, false))
            .expect("created");
        let second = service
            .create(listing("Yaba flat", "Yaba", 18_000_000.0, false))
            .expect("created");

        assert_eq!(first.id, PropertyId("prop-000001".to_string()));
        assert_eq!(second.id, PropertyId("prop-000002".to_string()));
    }

    #[test]
    fn same_instant_ties_use_numeric_sequence() {
        let created = service()
            .create(listing("Lekki duplex", "Lekki", 50_000_000.0, false))
            .expect("created");
        let with_id = |id: &str| Property {
            id: PropertyId(id.to_string()),
            ..created.clone()
        };

        let mut properties = vec![
            with_id("prop-999999"),
            with_id("prop-1000000"),
            with_id("prop-000002"),
        ];
        sort_newest_first(&mut properties);

        let ids: Vec<&str> = properties.iter().map(|p| p.id.0.as_str()).collect();
        assert_eq!(ids, vec!["prop-1000000", "prop-999999", "prop-000002"]);
    }

    #[test]
    fn create_rejects_blank_titles() {
        let service = service();
        let result = service.create(listing("  ", "Lekki", 1.0, false));
        assert!(matches!(result, Err(ListingServiceError::Invalid(_))));
    }

    #[test]
    fn search_returns_newest_matches_first() {
        let service = service();
        service
            .create(listing("Older Lekki", "Lekki Phase 1", 40_000_000.0, false))
            .expect("created");
        service
            .create(listing("Yaba flat", "Yaba", 18_000_000.0, false))
            .expect("created");
        service
            .create(listing("Newer Lekki", "Lekki Phase 2", 60_000_000.0, false))
            .expect("created");

        let mut filters = SearchFilters::default();
        filters.merge(FilterUpdate {
            location: Some("Lekki".to_string()),
            ..FilterUpdate::default()
        });
        let titles: Vec<String> = service
            .search(&filters)
            .expect("search works")
            .into_iter()
            .map(|property| property.title)
            .collect();

        assert_eq!(titles, vec!["Newer Lekki", "Older Lekki"]);
    }

    #[test]
    fn featured_respects_limit() {
        let service = service();
        for index in 0..8 {
            service
                .create(listing(&format!("Home {index}"), "Ikeja", 1.0, index % 2 == 0))
                .expect("created");
        }

        let featured = service.featured(3).expect("featured works");

        assert_eq!(featured.len(), 3);
        assert!(featured.iter().all(|property| property.featured));
        assert_eq!(featured[0].title, "Home 6");
    }

    #[test]
    fn update_applies_partial_changes() {
        let service = service();
        let created = service
            .create(listing("Ikoyi flat", "Ikoyi", 90_000_000.0, false))
            .expect("created");

        let updated = service
            .update(
                &created.id,
                PropertyUpdate {
                    price: Some(85_000_000.0),
                    featured: Some(true),
                    ..PropertyUpdate::default()
                },
            )
            .expect("updated");

        assert_eq!(updated.price, 85_000_000.0);
        assert!(updated.featured);
        assert_eq!(updated.title, "Ikoyi flat");
        assert_eq!(service.get(&created.id).expect("stored").price, 85_000_000.0);
    }

    #[test]
    fn delete_then_get_is_not_found() {
        let service = service();
        let created = service
            .create(listing("Ajah bungalow", "Ajah", 25_000_000.0, false))
            .expect("created");

        service.delete(&created.id).expect("deleted");

        assert!(matches!(
            service.get(&created.id),
            Err(ListingServiceError::Repository(RepositoryError::NotFound))
        ));
    }

    #[test]
    fn rent_prediction_uses_listing_attributes() {
        let service = service();
        let created = service
            .create(listing("Lekki detached", "Lekki", 50_000_000.0, false))
            .expect("created");

        let prediction = service.rent_prediction(&created.id).expect("prediction");

        assert_eq!(prediction.monthly_rent, 507_000);
    }
}
