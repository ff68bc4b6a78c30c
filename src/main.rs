use companies_api::{
    build_router, AppConfig, AppState, CompanyRepository, InMemoryCompanyRepository,
    PostgresCompanyRepository,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the environment may already be set
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "companies_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting companies API server");

    let config = AppConfig::from_env()?;

    let company_repository: Arc<dyn CompanyRepository + Send + Sync> =
        match &config.database_url {
            Some(database_url) => {
                let pool = sqlx::PgPool::connect(database_url).await?;
                let repository = PostgresCompanyRepository::new(pool);
                repository.ensure_schema().await?;
                info!("Using PostgreSQL company repository");
                Arc::new(repository)
            }
            None => {
                warn!("DATABASE_URL not set, companies are kept in memory only");
                Arc::new(InMemoryCompanyRepository::new())
            }
        };

    let app_state = AppState::from_config(&config, company_repository);
    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Server running on http://{}", config.bind_address);
    axum::serve(listener, app).await?;

    Ok(())
}
