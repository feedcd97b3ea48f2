use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{error, info};
use serde::{Deserialize, Serialize};
use crate::AppState;
use crate::manager_forecast::errors::ForecastError;
use crate::manager_forecast::first_days;
use crate::manager_forecast::models::DaySummary;
use crate::manager_locations::models::{Place, Theme};
use crate::manager_owm::models::{CurrentConditions, Forecast};

/// Three hour samples covering the next 24 hours
const HOURLY_SAMPLES: usize = 8;

#[derive(Deserialize, Debug)]
struct Coordinates {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize, Debug)]
struct DailyParams {
    lat: f64,
    lon: f64,
    days: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct SearchParams {
    q: String,
}

#[derive(Serialize, Deserialize, Debug)]
struct ThemeBody {
    theme: Theme,
}

#[derive(Serialize)]
struct FavoriteState {
    favorite: bool,
}

#[derive(Serialize)]
struct MapDetail {
    place: Place,
    current: CurrentConditions,
    days: Vec<DaySummary>,
}

pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(current_weather)
        .service(hourly)
        .service(daily)
        .service(map_detail)
        .service(search)
        .service(favorites)
        .service(toggle_favorite)
        .service(remove_favorite)
        .service(recents)
        .service(add_recent)
        .service(clear_recents)
        .service(theme)
        .service(set_theme);
}

/// Day summaries of a forecast where an empty forecast means no days rather than an error
fn day_summaries(forecast: &Forecast) -> Result<Vec<DaySummary>, ForecastError> {
    match forecast.day_summaries() {
        Err(ForecastError::InvalidInput(_)) => Ok(Vec::new()),
        result => result,
    }
}

#[get("/weather/current")]
async fn current_weather(params: web::Query<Coordinates>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.owm.current(params.lat, params.lon).await {
        Ok(current) => HttpResponse::Ok().json(current),
        Err(e) => {
            error!("failed to get current weather: {}", e);
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/weather/hourly")]
async fn hourly(params: web::Query<Coordinates>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.owm.forecast(params.lat, params.lon).await {
        Ok(forecast) => HttpResponse::Ok().json(forecast.hourly(HOURLY_SAMPLES)),
        Err(e) => {
            error!("failed to get forecast: {}", e);
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/weather/daily")]
async fn daily(params: web::Query<DailyParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let forecast = match data.owm.forecast(params.lat, params.lon).await {
        Ok(forecast) => forecast,
        Err(e) => {
            error!("failed to get forecast: {}", e);
            return HttpResponse::BadGateway().finish();
        }
    };

    match day_summaries(&forecast) {
        Ok(days) => HttpResponse::Ok().json(first_days(&days, params.days.unwrap_or(data.forecast_days))),
        Err(e) => {
            error!("failed to aggregate forecast: {}", e);
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/map/detail")]
async fn map_detail(params: web::Query<Coordinates>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let place = match data.owm.reverse(params.lat, params.lon).await {
        Ok(Some(place)) => place,
        Ok(None) => return HttpResponse::NotFound().finish(),
        Err(e) => {
            error!("failed to reverse geocode: {}", e);
            return HttpResponse::BadGateway().finish();
        }
    };

    let (conditions, forecast) = tokio::join!(
        data.owm.current(params.lat, params.lon),
        data.owm.forecast(params.lat, params.lon),
    );

    let detail = match (conditions, forecast) {
        (Ok(conditions), Ok(forecast)) => match day_summaries(&forecast) {
            Ok(days) => MapDetail {
                place,
                current: conditions,
                days: first_days(&days, data.forecast_days).to_vec(),
            },
            Err(e) => {
                error!("failed to aggregate forecast: {}", e);
                return HttpResponse::BadGateway().finish();
            }
        },
        (Err(e), _) | (_, Err(e)) => {
            error!("failed to get weather for map detail: {}", e);
            return HttpResponse::BadGateway().finish();
        }
    };

    if let Err(e) = data.locations.lock().await.add_recent(&detail.place) {
        error!("failed to record recent place: {}", e);
    }

    HttpResponse::Ok().json(detail)
}

#[get("/locations/search")]
async fn search(params: web::Query<SearchParams>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    match data.owm.search(&params.q).await {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(e) => {
            error!("failed to search places: {}", e);
            HttpResponse::BadGateway().finish()
        }
    }
}

#[get("/locations/favorites")]
async fn favorites(data: web::Data<AppState>) -> impl Responder {
    match data.locations.lock().await.favorites() {
        Ok(favorites) => HttpResponse::Ok().json(favorites),
        Err(e) => {
            error!("failed to get favorites: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/locations/favorites")]
async fn toggle_favorite(place: web::Json<Place>, data: web::Data<AppState>) -> impl Responder {
    info!("toggle favorite {}", place.key());

    match data.locations.lock().await.toggle_favorite(&place) {
        Ok(favorite) => HttpResponse::Ok().json(FavoriteState { favorite }),
        Err(e) => {
            error!("failed to toggle favorite: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/locations/favorites")]
async fn remove_favorite(place: web::Json<Place>, data: web::Data<AppState>) -> impl Responder {
    info!("remove favorite {}", place.key());

    match data.locations.lock().await.remove_favorite(&place) {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => {
            error!("failed to remove favorite: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/locations/recents")]
async fn recents(data: web::Data<AppState>) -> impl Responder {
    match data.locations.lock().await.recents() {
        Ok(recents) => HttpResponse::Ok().json(recents),
        Err(e) => {
            error!("failed to get recents: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/locations/recents")]
async fn add_recent(place: web::Json<Place>, data: web::Data<AppState>) -> impl Responder {
    info!("add recent {}", place.key());

    match data.locations.lock().await.add_recent(&place) {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => {
            error!("failed to add recent: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[delete("/locations/recents")]
async fn clear_recents(data: web::Data<AppState>) -> impl Responder {
    info!("clear recents");

    match data.locations.lock().await.clear_recents() {
        Ok(_) => HttpResponse::Ok().finish(),
        Err(e) => {
            error!("failed to clear recents: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[get("/settings/theme")]
async fn theme(data: web::Data<AppState>) -> impl Responder {
    match data.locations.lock().await.theme() {
        Ok(theme) => HttpResponse::Ok().json(ThemeBody { theme }),
        Err(e) => {
            error!("failed to get theme: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[put("/settings/theme")]
async fn set_theme(body: web::Json<ThemeBody>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", body);

    match data.locations.lock().await.set_theme(body.theme) {
        Ok(_) => HttpResponse::Ok().json(body.into_inner()),
        Err(e) => {
            error!("failed to set theme: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}
