use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use crate::manager_forecast::{aggregate_by_day, aggregate_by_day_in};
use crate::manager_forecast::errors::ForecastError;
use crate::manager_forecast::models::{Condition, DaySummary, Sample};
use crate::manager_locations::models::Place;

const ICON_BASE: &str = "https://openweathermap.org/img/wn";

#[derive(Deserialize, Default)]
pub struct WeatherDescription {
    pub main: String,
    #[serde(default)]
    pub description: String,
    pub icon: String,
}

#[derive(Deserialize, Default)]
pub struct Wind {
    #[serde(default)]
    pub speed: f64,
}

#[derive(Deserialize)]
pub struct ForecastMain {
    pub temp: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Deserialize)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: ForecastMain,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    #[serde(default)]
    pub wind: Wind,
}

#[derive(Deserialize, Default)]
pub struct City {
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub list: Vec<ForecastEntry>,
    #[serde(default)]
    pub city: City,
}

#[derive(Deserialize)]
pub struct CurrentMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    #[serde(default)]
    pub pressure: f64,
    #[serde(default)]
    pub humidity: u8,
}

#[derive(Deserialize, Default)]
pub struct Rain {
    #[serde(rename = "1h", default)]
    pub one_hour: f64,
}

#[derive(Deserialize, Default)]
pub struct Sys {
    #[serde(default)]
    pub sunrise: i64,
    #[serde(default)]
    pub sunset: i64,
}

#[derive(Deserialize)]
pub struct FullCurrent {
    pub main: CurrentMain,
    #[serde(default)]
    pub weather: Vec<WeatherDescription>,
    #[serde(default)]
    pub wind: Wind,
    #[serde(default)]
    pub rain: Rain,
    #[serde(default)]
    pub sys: Sys,
    #[serde(default)]
    pub visibility: u32,
    #[serde(default)]
    pub timezone: i32,
}

#[derive(Deserialize)]
pub struct GeoEntry {
    pub name: String,
    #[serde(default)]
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub state: Option<String>,
}

/// Current conditions as shown by the header and stats widgets
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentConditions {
    pub temperature: f64,
    pub feels_like: f64,
    pub temperature_min: f64,
    pub temperature_max: f64,
    pub condition: Condition,
    pub description: String,
    pub icon_url: String,
    pub humidity: u8,
    pub pressure: f64,
    pub wind_speed: f64,
    pub visibility: u32,
    pub rain_last_hour: f64,
    pub sunrise: i64,
    pub sunset: i64,
    pub utc_offset: i32,
}

/// One entry of the hourly strip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyEntry {
    pub timestamp_utc: i64,
    pub temperature: Option<f64>,
    pub condition: Condition,
    pub icon_url: String,
}

/// Forecast samples for one location together with its offset from UTC in seconds
#[derive(Debug, Clone)]
pub struct Forecast {
    pub samples: Vec<Sample>,
    pub utc_offset: i32,
}

impl Forecast {
    /// Aggregates the samples into days as seen by someone at the forecast location,
    /// falling back on the local calendar if the provider offset is out of range
    pub fn day_summaries(&self) -> Result<Vec<DaySummary>, ForecastError> {
        match FixedOffset::east_opt(self.utc_offset) {
            Some(tz) => aggregate_by_day_in(&self.samples, &tz),
            None => aggregate_by_day(&self.samples),
        }
    }

    /// Returns the first `n` samples for the hourly strip
    ///
    /// # Arguments
    ///
    /// * 'n' - max number of entries
    pub fn hourly(&self, n: usize) -> Vec<HourlyEntry> {
        self.samples.iter()
            .take(n)
            .map(|s| HourlyEntry {
                timestamp_utc: s.timestamp_utc,
                temperature: s.temperature,
                condition: s.condition.clone(),
                icon_url: icon_url(&s.condition.icon_id, true),
            })
            .collect()
    }
}

impl From<FullForecast> for Forecast {
    fn from(full: FullForecast) -> Self {
        let samples = full.list.into_iter()
            .map(|entry| {
                let condition = entry.weather.first()
                    .map(|w| Condition { main_category: w.main.clone(), icon_id: w.icon.clone() })
                    .unwrap_or_default();

                Sample {
                    timestamp_utc: entry.dt,
                    temperature: entry.main.temp,
                    temperature_min: entry.main.temp_min,
                    temperature_max: entry.main.temp_max,
                    condition,
                    humidity: entry.main.humidity,
                    wind_speed: entry.wind.speed,
                }
            })
            .collect();

        Forecast { samples, utc_offset: full.city.timezone }
    }
}

impl From<FullCurrent> for CurrentConditions {
    fn from(full: FullCurrent) -> Self {
        let weather = full.weather.into_iter().next().unwrap_or_default();

        CurrentConditions {
            temperature: full.main.temp,
            feels_like: full.main.feels_like,
            temperature_min: full.main.temp_min,
            temperature_max: full.main.temp_max,
            icon_url: icon_url(&weather.icon, true),
            condition: Condition { main_category: weather.main, icon_id: weather.icon },
            description: weather.description,
            humidity: full.main.humidity,
            pressure: full.main.pressure,
            wind_speed: full.wind.speed,
            visibility: full.visibility,
            rain_last_hour: full.rain.one_hour,
            sunrise: full.sys.sunrise,
            sunset: full.sys.sunset,
            utc_offset: full.timezone,
        }
    }
}

impl From<GeoEntry> for Place {
    fn from(geo: GeoEntry) -> Self {
        Place { name: geo.name, country: geo.country, lat: geo.lat, lon: geo.lon, state: geo.state }
    }
}

/// Returns the url of a provider weather icon
///
/// # Arguments
///
/// * 'icon_id' - provider icon id, e.g. "10d"
/// * 'large' - whether to use the double size variant
pub fn icon_url(icon_id: &str, large: bool) -> String {
    if large {
        format!("{}/{}@2x.png", ICON_BASE, icon_id)
    } else {
        format!("{}/{}.png", ICON_BASE, icon_id)
    }
}
