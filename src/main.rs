use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lesson_catalog::client::{LessonApiConfig, LessonHttpClient};
use lesson_catalog::error::AppError;
use lesson_catalog::state::AppState;
use lesson_catalog::web::{BrowserNavigator, router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "lesson_catalog=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = LessonApiConfig::new_from_env()?;
    info!("lesson collection at {}", config.base_url());

    let state = AppState {
        lessons: Arc::new(LessonHttpClient::new(config)?),
        navigator: Arc::new(BrowserNavigator),
    };

    let app = router(state);

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
        .parse()
        .map_err(|e| AppError::Config(format!("BIND_ADDR is not a socket address: {}", e)))?;
    info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
