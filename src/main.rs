use infinite_tictactoe::{routes::build_router, AppError, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "infinite_tictactoe=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting infinite tic-tac-toe server");

    let config = ServerConfig::from_env()?;
    let address = config.bind_address()?;

    // One registry for the lifetime of the process
    let app_state = AppState::in_memory();
    let app = build_router(app_state, &config);

    let listener = tokio::net::TcpListener::bind(address).await?;
    info!(
        address = %address,
        allowed_origins = ?config.allowed_origins,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
