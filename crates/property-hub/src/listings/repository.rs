use super::domain::{Property, PropertyId};
use crate::repository::RepositoryError;

/// Storage abstraction over the listing collection.
pub trait PropertyRepository: Send + Sync {
    fn insert(&self, property: Property) -> Result<Property, RepositoryError>;
    fn update(&self, property: Property) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &PropertyId) -> Result<Option<Property>, RepositoryError>;
    fn delete(&self, id: &PropertyId) -> Result<(), RepositoryError>;
    fn all(&self) -> Result<Vec<Property>, RepositoryError>;
}
