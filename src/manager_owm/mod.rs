pub mod errors;
pub mod models;
#[cfg(test)]
pub mod test_server;

use std::time::Duration;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use crate::manager_locations::models::Place;
use crate::manager_owm::errors::OwmError;
use crate::manager_owm::models::{CurrentConditions, Forecast, FullCurrent, FullForecast, GeoEntry};

const MIN_QUERY_LEN: usize = 2;
const SEARCH_LIMIT: u8 = 5;

/// Struct for fetching weather data and geocoding from OpenWeatherMap
#[derive(Clone)]
pub struct Owm {
    client: Client,
    api_key: String,
    base_url: String,
}

impl Owm {
    /// Returns an Owm struct ready for fetching data from OpenWeatherMap
    ///
    /// # Arguments
    ///
    /// * 'api_key' - OpenWeatherMap api key
    /// * 'base_url' - scheme and host of the api, e.g. https://api.openweathermap.org
    pub fn new(api_key: &str, base_url: &str) -> Result<Owm, OwmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Retrieves current weather conditions for the given coordinates
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub async fn current(&self, lat: f64, lon: f64) -> Result<CurrentConditions, OwmError> {
        let full: FullCurrent = self.get_json(
            "/data/2.5/weather",
            &[("lat", lat.to_string()), ("lon", lon.to_string()), ("units", "metric".to_string())],
        ).await?;

        Ok(CurrentConditions::from(full))
    }

    /// Retrieves the 5 day forecast in 3 hour steps for the given coordinates
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub async fn forecast(&self, lat: f64, lon: f64) -> Result<Forecast, OwmError> {
        let full: FullForecast = self.get_json(
            "/data/2.5/forecast",
            &[("lat", lat.to_string()), ("lon", lon.to_string()), ("units", "metric".to_string())],
        ).await?;

        Ok(Forecast::from(full))
    }

    /// Searches places by name, returning at most five suggestions.
    /// Queries shorter than two characters yield no suggestions and no request is made.
    ///
    /// # Arguments
    ///
    /// * 'query' - free text place name
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, OwmError> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Ok(Vec::new());
        }

        let entries: Vec<GeoEntry> = self.get_json(
            "/geo/1.0/direct",
            &[("q", query.to_string()), ("limit", SEARCH_LIMIT.to_string())],
        ).await?;

        Ok(entries.into_iter().map(Place::from).collect())
    }

    /// Finds the place closest to the given coordinates, if any
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'lon' - longitude of the location
    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<Option<Place>, OwmError> {
        let entries: Vec<GeoEntry> = self.get_json(
            "/geo/1.0/reverse",
            &[("lat", lat.to_string()), ("lon", lon.to_string()), ("limit", "1".to_string())],
        ).await?;

        Ok(entries.into_iter().next().map(|geo| {
            // Keep the clicked coordinates rather than the city centre
            let mut place = Place::from(geo);
            place.lat = lat;
            place.lon = lon;
            place
        }))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, OwmError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("requesting {}", url);

        let req = self.client
            .get(url)
            .query(query)
            .query(&[("appid", &self.api_key)])
            .send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(OwmError::Status(status.as_u16(), path.to_string()));
        }

        let json = req.text().await?;
        Ok(serde_json::from_str(&json)?)
    }
}
