use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use forum_service::config::Config;
use forum_service::domain::identity::gateway::AuthenticationGateway;
use forum_service::domain::identity::service::IdentityService;
use forum_service::domain::topic::service::TopicService;
use forum_service::inbound::http::router::create_router;
use forum_service::repositories::identity::PostgresCredentialStore;
use forum_service::repositories::topic::PostgresTopicRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forum_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "forum-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let signing_secret = config.signing_secret()?;
    let password_cost = config.password_cost();

    tracing::info!(
        http_port = config.server.http_port,
        password_memory_kib = password_cost.memory_kib,
        password_iterations = password_cost.iterations,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::with_password_hasher(
        &signing_secret,
        PasswordHasher::with_cost(password_cost)?,
    ));
    let credential_store = Arc::new(PostgresCredentialStore::new(pg_pool.clone()));
    let topic_repository = Arc::new(PostgresTopicRepository::new(pg_pool));

    let identity_service = Arc::new(IdentityService::new(
        Arc::clone(&credential_store),
        Arc::clone(&authenticator),
    ));
    let authentication = Arc::new(AuthenticationGateway::new(
        credential_store,
        authenticator,
    ));
    let topic_service = Arc::new(TopicService::new(topic_repository));

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(identity_service, authentication, topic_service);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited");

    Ok(())
}
