//! Service bootstrap: settings, schema, routes.

use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tracing_subscriber::EnvFilter;
use veribakery::{common_routes, customer_routes, ensure_schema, AppState, Settings};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("veribakery=info".parse()?))
        .init();

    let settings = Settings::from_env();
    let pool = veribakery::connect(&settings.database_url).await?;
    ensure_schema(&pool).await?;
    let state = AppState { pool };

    let app = Router::new()
        .merge(common_routes())
        .nest("/customers", customer_routes(state))
        .layer(RequestBodyLimitLayer::new(1024 * 1024));

    let listener = TcpListener::bind(&settings.listen_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
