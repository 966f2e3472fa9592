mod auth;
mod routes;
mod state;

use actix_web::{App, HttpServer, web};
use amm_config::ServiceConfig;
use amm_observability::{ObservabilityConfig, init, log_startup};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let config = ServiceConfig::from_env("amm-api");
    let obs_config = ObservabilityConfig {
        service_name: config.service_name.clone(),
        environment: config.environment.to_string(),
        log_level: config.log_level.clone(),
        metrics_addr: config.metrics_addr.clone(),
    };
    let handle = init(&obs_config);
    log_startup(&handle, &obs_config.environment);

    let bind_addr = config.bind_addr.clone();
    let shared_state = web::Data::new(state::AppState::from_config(config));

    HttpServer::new(move || {
        App::new()
            .app_data(shared_state.clone())
            .configure(routes::configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
