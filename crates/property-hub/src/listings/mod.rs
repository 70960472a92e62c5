//! Property listings, search filters, and per-visitor session state.

pub mod domain;
pub mod filters;
pub mod repository;
pub mod router;
pub mod service;
pub mod session;

pub use domain::{NewProperty, Property, PropertyId, PropertyType, PropertyUpdate};
pub use filters::{BedroomFilter, FilterUpdate, SearchFilters};
pub use repository::PropertyRepository;
pub use router::listing_router;
pub use service::{ListingService, ListingServiceError, DEFAULT_FEATURED_LIMIT};
pub use session::{ClientSession, Favorites, SessionError};
