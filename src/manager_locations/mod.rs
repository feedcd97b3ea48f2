pub mod models;

use crate::manager_db::errors::DBError;
use crate::manager_db::Store;
use crate::manager_locations::models::{Place, Theme};

const FAVORITES_KEY: &str = "weather-favorites";
const RECENTS_KEY: &str = "weather-recents";
const THEME_KEY: &str = "theme";
const MAX_RECENTS: usize = 10;

/// Favorite and recently viewed places plus dashboard settings
pub struct Locations {
    store: Store,
}

impl Locations {
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    pub fn favorites(&self) -> Result<Vec<Place>, DBError> {
        Ok(self.store.get(FAVORITES_KEY)?.unwrap_or_default())
    }

    pub fn recents(&self) -> Result<Vec<Place>, DBError> {
        Ok(self.store.get(RECENTS_KEY)?.unwrap_or_default())
    }

    /// Appends a place to favorites unless it is already there
    ///
    /// # Arguments
    ///
    /// * 'place' - place to add
    pub fn add_favorite(&self, place: &Place) -> Result<(), DBError> {
        let mut favorites = self.favorites()?;
        let key = place.key();

        if !favorites.iter().any(|f| f.key() == key) {
            favorites.push(place.clone());
            self.store.set(FAVORITES_KEY, &favorites)?;
        }

        Ok(())
    }

    /// Removes a place from favorites
    ///
    /// # Arguments
    ///
    /// * 'place' - place to remove
    pub fn remove_favorite(&self, place: &Place) -> Result<(), DBError> {
        let key = place.key();
        let favorites: Vec<Place> = self.favorites()?
            .into_iter()
            .filter(|f| f.key() != key)
            .collect();

        self.store.set(FAVORITES_KEY, &favorites)
    }

    /// Adds or removes a place from favorites and returns whether it is a favorite afterwards
    ///
    /// # Arguments
    ///
    /// * 'place' - place to toggle
    pub fn toggle_favorite(&self, place: &Place) -> Result<bool, DBError> {
        if self.is_favorite(place)? {
            self.remove_favorite(place)?;
            Ok(false)
        } else {
            self.add_favorite(place)?;
            Ok(true)
        }
    }

    pub fn is_favorite(&self, place: &Place) -> Result<bool, DBError> {
        let key = place.key();
        Ok(self.favorites()?.iter().any(|f| f.key() == key))
    }

    /// Puts a place first in recents, dropping any older entry for it and
    /// keeping at most ten places
    ///
    /// # Arguments
    ///
    /// * 'place' - place just viewed
    pub fn add_recent(&self, place: &Place) -> Result<(), DBError> {
        let key = place.key();
        let mut recents: Vec<Place> = vec![place.clone()];
        recents.extend(self.recents()?.into_iter().filter(|r| r.key() != key));
        recents.truncate(MAX_RECENTS);

        self.store.set(RECENTS_KEY, &recents)
    }

    pub fn clear_recents(&self) -> Result<(), DBError> {
        self.store.delete(RECENTS_KEY)
    }

    pub fn theme(&self) -> Result<Theme, DBError> {
        Ok(self.store.get(THEME_KEY)?.unwrap_or_default())
    }

    pub fn set_theme(&self, theme: Theme) -> Result<(), DBError> {
        self.store.set(THEME_KEY, &theme)
    }
}
