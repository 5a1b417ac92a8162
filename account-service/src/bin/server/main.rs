use std::sync::Arc;

use account_service::config::Config;
use account_service::domain::account::credentials::CredentialPool;
use account_service::domain::account::ports::AccountServicePort;
use account_service::domain::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::outbound::repositories::InMemoryAccountRepository;
use account_service::outbound::repositories::PostgresAccountRepository;
use account_service::outbound::storage::LocalImageStore;
use auth::Authenticator;
use auth::PasswordHasher;
use auth::SigningKey;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "account_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "account-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.url.is_some(),
        token_expiration_hours = ?config.jwt.expiration_hours,
        upload_directory = %config.uploads.directory.display(),
        "Configuration loaded"
    );

    let signing_key = SigningKey::from_secret(config.jwt.secret.as_bytes())?;
    let password_hasher = PasswordHasher::new(config.hashing.cost())?;

    let mut authenticator = Authenticator::new(signing_key, password_hasher);
    if let Some(hours) = config.jwt.expiration_hours {
        authenticator = authenticator.with_token_lifetime(chrono::Duration::hours(hours));
    } else {
        tracing::warn!("jwt.expiration_hours is unset, issued tokens never expire");
    }
    let authenticator = Arc::new(authenticator);

    let credentials = CredentialPool::new(Arc::clone(&authenticator), config.hashing.max_concurrent);
    tracing::info!(
        max_concurrent = credentials.available_permits(),
        "Password hashing pool ready"
    );

    let image_store = Arc::new(LocalImageStore::open(&config.uploads.directory).await?);

    let account_service: Arc<dyn AccountServicePort> = match &config.database.url {
        Some(url) => {
            let pg_pool = PgPoolOptions::new()
                .max_connections(config.database.max_connections)
                .connect(url)
                .await?;
            tracing::info!(
                max_connections = config.database.max_connections,
                database = "postgresql",
                "Database connection pool created"
            );

            sqlx::migrate!("./migrations").run(&pg_pool).await?;
            tracing::info!(database = "postgresql", "Database migrations completed");

            let repository = Arc::new(PostgresAccountRepository::new(pg_pool));
            Arc::new(AccountService::new(repository, image_store, credentials))
        }
        None => {
            tracing::warn!("database.url is unset, accounts are kept in memory");
            let repository = Arc::new(InMemoryAccountRepository::new());
            Arc::new(AccountService::new(repository, image_store, credentials))
        }
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(account_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    Ok(())
}
