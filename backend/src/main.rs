//! Backend entry-point: wires REST endpoints and OpenAPI docs.

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::api::health::{HealthState, live, ready};
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::outbound::persistence::{DbPool, PoolConfig};
use backend::server::{ServerConfig, build_state, configure_api};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    // Configuration problems, the signing secret above all, abort startup.
    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url.as_str()))
        .await
        .map_err(std::io::Error::other)?;
    let state = build_state(pool, &config.secret);

    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let state = state.clone();
        let mut app = App::new()
            .app_data(server_health_state.clone())
            .configure(|cfg| configure_api(cfg, state))
            .service(ready)
            .service(live);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
