use std::{net::SocketAddr, sync::Arc};

use block_insights::{config::Config, json_api, state::AppState};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::init().expect("Failed to load config");
    tracing::info!("{config:#?}");

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let ctx = Arc::new(AppState::init(&config));

    tracing::info!("Starting server on {addr}");

    let routes = json_api::routes(ctx);
    if let Err(err) = axum::Server::bind(&addr)
        .serve(routes.into_make_service())
        .await
    {
        tracing::error!("JSON API critical error: {err:?}");
    }
}
