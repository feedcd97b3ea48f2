mod errors;
mod logging;
mod initialization;
mod handlers;
mod manager_db;
mod manager_forecast;
mod manager_locations;
mod manager_owm;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use tokio::sync::Mutex;
use log::info;
use crate::errors::UnrecoverableError;
use crate::initialization::config;
use crate::manager_db::Store;
use crate::manager_locations::Locations;
use crate::manager_owm::Owm;

struct AppState {
    locations: Arc<Mutex<Locations>>,
    owm: Owm,
    forecast_days: usize,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;
    info!("starting weatherdash on {}:{}", config.web_server.bind_address, config.web_server.bind_port);

    let store = Store::new(&config.db.db_path)?;
    let locations = Arc::new(Mutex::new(Locations::new(store)));
    let owm = Owm::new(&config.weather.api_key, &config.weather.base_url)?;
    let forecast_days = config.weather.forecast_days;

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                locations: locations.clone(),
                owm: owm.clone(),
                forecast_days,
            }))
            .configure(handlers::routes)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    Ok(())
}
