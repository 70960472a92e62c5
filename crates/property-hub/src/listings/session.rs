//! Per-visitor state: who is signed in, saved favorites, and the active search filters.
//!
//! Callers own a [`ClientSession`] and pass it where needed; nothing here is global.

use serde::{Deserialize, Serialize};

use super::domain::{Property, PropertyId};
use super::filters::{FilterUpdate, SearchFilters};
use super::repository::PropertyRepository;
use super::service::{ListingService, ListingServiceError};
use crate::mortgage::UserId;
use crate::repository::RepositoryError;

/// Saved listings in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorites {
    ids: Vec<PropertyId>,
}

impl Favorites {
    /// Returns `false` when the listing was already saved.
    pub fn add(&mut self, id: PropertyId) -> bool {
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: &PropertyId) -> bool {
        let before = self.ids.len();
        self.ids.retain(|saved| saved != id);
        self.ids.len() != before
    }

    /// Flip membership, returning whether the listing is now saved.
    pub fn toggle(&mut self, id: PropertyId) -> bool {
        if self.remove(&id) {
            false
        } else {
            self.add(id)
        }
    }

    pub fn contains(&self, id: &PropertyId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[PropertyId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("please sign in to save favorites")]
    Unauthenticated,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientSession {
    pub user: Option<UserId>,
    pub favorites: Favorites,
    pub filters: SearchFilters,
}

impl ClientSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(user: UserId) -> Self {
        Self {
            user: Some(user),
            ..Self::default()
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_in(&mut self, user: UserId) {
        self.user = Some(user);
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    pub fn toggle_favorite(&mut self, id: PropertyId) -> Result<bool, SessionError> {
        if !self.is_authenticated() {
            return Err(SessionError::Unauthenticated);
        }
        Ok(self.favorites.toggle(id))
    }

    pub fn apply_filters(&mut self, update: FilterUpdate) {
        self.filters.merge(update);
    }

    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    /// Resolve saved ids to listings, skipping any that have since been removed.
    pub fn favorite_properties<R>(
        &self,
        listings: &ListingService<R>,
    ) -> Result<Vec<Property>, ListingServiceError>
    where
        R: PropertyRepository + 'static,
    {
        let mut properties = Vec::with_capacity(self.favorites.len());
        for id in self.favorites.ids() {
            match listings.get(id) {
                Ok(property) => properties.push(property),
                Err(ListingServiceError::Repository(RepositoryError::NotFound)) => continue,
                Err(other) => return Err(other),
            }
        }
        Ok(properties)
    }
}
