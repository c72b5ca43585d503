use log::{error, info};
use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, web};

use opener::backend::open_relay_backend;
use opener::{AppConfig, AppError, AppState, RelayController};

fn fatal(e: AppError) -> io::Error {
    error!("{e}");
    io::Error::other(e)
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init();

    let config = AppConfig::default();

    let backend = open_relay_backend(&config.relay).map_err(fatal)?;

    // refuse to serve with relays in an unknown state
    let relay = Arc::new(RelayController::new(config.relay.clone(), backend).map_err(fatal)?);
    let app_state = AppState::new(relay.clone());

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(app_state.clone()))
            .default_service(app_state.press_route())
    })
    .bind(config.http.bind_addr())?
    .run();

    info!(
        "Server started on {}:{}",
        config.http.host, config.http.port
    );

    // returns once SIGINT/SIGTERM has stopped the workers
    server.await?;

    info!("Shutting down...");
    relay.shutdown().await.map_err(fatal)?;

    Ok(())
}
