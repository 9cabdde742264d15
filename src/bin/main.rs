use rollbook::app::{self, AppState};
use rollbook::bootstrap::initialize_admin_user;
use rollbook::config::APP_CONFIG;
use rollbook::utils::jwt::JwtManager;
use rollbook::utils::tracing::init_standard_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    init_standard_tracing(env!("CARGO_CRATE_NAME"));

    tracing::info!("Starting application...");

    tracing::info!("Connecting to database...");
    let db = sea_orm::Database::connect(&APP_CONFIG.database_url).await?;

    tracing::info!("Checking admin user...");
    if let Err(e) = initialize_admin_user(&db).await {
        tracing::error!("Failed to initialize admin user: {}", e);
        tracing::warn!("Continuing without admin user initialization...");
    }

    let state = AppState {
        db,
        jwt: JwtManager::new(APP_CONFIG.jwt_secret.clone()),
    };
    let app = app::create_app(state).await?;

    let http_address = format!("0.0.0.0:{}", APP_CONFIG.port);
    tracing::info!("HTTP server listening on {}", &http_address);

    let listener = tokio::net::TcpListener::bind(http_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
