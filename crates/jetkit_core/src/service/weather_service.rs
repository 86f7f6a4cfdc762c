//! Weather viewer use-cases: forecast fetch, favorites, unit setting.

use crate::derive::views::{is_favorite, preferred_unit};
use crate::model::favorite::{Favorite, UnitSetting, UnitSystem};
use crate::model::query::WeatherQuery;
use crate::model::weather::WeatherReport;
use crate::reactive::{
    AsyncResult, FetchController, FetchTicket, MutationError, ObservableCollection, Producer,
};
use crate::store::{Database, FavoriteStore, UnitStore};
use std::sync::Arc;

pub struct WeatherService {
    weather: FetchController<WeatherQuery, WeatherReport>,
    favorites: ObservableCollection<FavoriteStore>,
    units: ObservableCollection<UnitStore>,
}

impl WeatherService {
    /// Must be called inside a tokio runtime.
    pub fn new(db: &Database, api: impl Producer<WeatherQuery, WeatherReport> + 'static) -> Self {
        Self {
            weather: FetchController::new("weather", api),
            favorites: ObservableCollection::open(Arc::new(db.favorites())),
            units: ObservableCollection::open(Arc::new(db.units())),
        }
    }

    /// Fetches conditions for `city` in the preferred unit system.
    ///
    /// Waits for the first units snapshot so a stored unit is honored on the
    /// very first fetch. Returns `None` for blank input.
    pub async fn fetch_weather(&self, city: &str) -> Option<FetchTicket> {
        let units = self.loaded_unit().await;
        let query = WeatherQuery::new(city, units)?;
        Some(self.weather.fetch(query))
    }

    pub fn weather(&self) -> &FetchController<WeatherQuery, WeatherReport> {
        &self.weather
    }

    pub fn favorites(&self) -> &ObservableCollection<FavoriteStore> {
        &self.favorites
    }

    pub fn units(&self) -> &ObservableCollection<UnitStore> {
        &self.units
    }

    pub async fn add_favorite(&self, favorite: Favorite) -> Result<String, MutationError> {
        self.favorites.insert(favorite).await
    }

    pub async fn remove_favorite(&self, city: &str) -> Result<(), MutationError> {
        self.favorites.delete(city.to_string()).await
    }

    pub async fn clear_favorites(&self) -> Result<usize, MutationError> {
        self.favorites.delete_all().await
    }

    /// Favorite check against the latest snapshot; `Loading`/`Failure` are
    /// passed through.
    pub fn is_favorite(&self, city: &str) -> AsyncResult<bool> {
        self.favorites
            .current()
            .map(|favorites| is_favorite(city, &favorites))
    }

    /// Replaces the stored unit choice.
    pub async fn set_unit(&self, unit: UnitSystem) -> Result<(), MutationError> {
        let setting = UnitSetting::new(unit);
        self.units
            .apply("replace", move |store| store.replace(&setting))
            .await
            .map(|_| ())
    }

    /// Unit from the first settled units snapshot. A failed read falls back
    /// to imperial.
    async fn loaded_unit(&self) -> UnitSystem {
        match self.units.subscribe().next().await {
            Some(AsyncResult::Success(units)) => preferred_unit(&units),
            _ => UnitSystem::default(),
        }
    }

    /// Unit from the latest snapshot, imperial until units are loaded.
    pub fn preferred_unit(&self) -> UnitSystem {
        self.units
            .current()
            .value()
            .map(|units| preferred_unit(units))
            .unwrap_or_default()
    }
}
