use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use dotenv::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[macro_use]
mod utility;

mod api;
mod auth;
mod config;
mod entities;
mod error;
mod model;
mod store;

#[cfg(test)]
mod testing;

#[tokio::main]
async fn main() {
    // Set up environment.
    dotenv().ok();

    // Initialize tracing.
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let settings = config::Settings::from_env().unwrap_or_else(|err| {
        tracing::error!("{}", err);
        std::process::exit(1);
    });

    // Connect to database.
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .connect_lazy(&settings.database_url)
        .expect("invalid DATABASE_URL");
    let store = Arc::new(store::PgStore::new(pool));

    // Construct app.
    let authorizer = Arc::new(auth::Authorizer::new(
        store.clone(),
        store.clone(),
        Arc::new(auth::RandomTokenIds),
        Arc::new(auth::SystemClock),
    ));
    let app = api::routes(api::AppState {
        token_issuer: authorizer.clone(),
        token_validator: authorizer,
        users: store,
    });

    tracing::debug!("listening on {}", settings.bind_addr);

    // Start app.
    let served = match settings.tls {
        Some((cert_path, key_path)) => {
            let tls = RustlsConfig::from_pem_file(&cert_path, &key_path)
                .await
                .expect("unreadable TLS certificate or key");
            tracing::debug!("using rustls");
            axum_server::bind_rustls(settings.bind_addr, tls)
                .serve(app.into_make_service())
                .await
        }
        None => {
            axum_server::bind(settings.bind_addr)
                .serve(app.into_make_service())
                .await
        }
    };

    if let Err(err) = served {
        tracing::error!("server stopped: {}", err);
    }
}
