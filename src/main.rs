//! Formcraft API server

use std::sync::Arc;

use thiserror::Error;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use formcraft::adapters::ai::{MockFormGenerator, OpenAIFormGenerator};
use formcraft::adapters::auth::OidcSessionValidator;
use formcraft::adapters::http::{build_router, AppState, RouterOptions};
use formcraft::adapters::memory::{
    InMemoryFormRepository, InMemorySubmissionRepository, InMemoryUserRepository,
};
use formcraft::adapters::postgres::{
    PostgresFormRepository, PostgresSubmissionRepository, PostgresUserRepository,
};
use formcraft::config::{AppConfig, ConfigError, DatabaseConfig, ValidationError};
use formcraft::domain::foundation::AuthError;
use formcraft::ports::{
    FormGenerator, FormRepository, SubmissionRepository, UpstreamError, UserRepository,
};

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    InvalidConfig(#[from] ValidationError),

    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migrations failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("session validator setup failed: {0}")]
    Auth(#[from] AuthError),

    #[error("form generator setup failed: {0}")]
    Generator(#[from] UpstreamError),

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

struct Repositories {
    forms: Arc<dyn FormRepository>,
    submissions: Arc<dyn SubmissionRepository>,
    users: Arc<dyn UserRepository>,
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let repositories = connect_repositories(&config.database).await?;
    let form_generator = form_generator(&config)?;
    let session_validator = Arc::new(OidcSessionValidator::new(config.auth.oidc_config())?);

    let state = AppState {
        form_repository: repositories.forms,
        submission_repository: repositories.submissions,
        user_repository: repositories.users,
        session_validator,
        form_generator,
        webhook_verifier: config.webhook.verifier()?,
        public_base_url: config.forms.public_base_url().to_string(),
    };
    let options = RouterOptions {
        cors_origins: config.server.cors_origins_list(),
        request_timeout: config.server.request_timeout(),
    };
    let app = build_router(state, options);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Formcraft API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn connect_repositories(config: &DatabaseConfig) -> Result<Repositories, StartupError> {
    let Some(url) = config.url() else {
        warn!("No database configured; using in-memory storage");
        return Ok(Repositories {
            forms: Arc::new(InMemoryFormRepository::new()),
            submissions: Arc::new(InMemorySubmissionRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        });
    };

    let pool = config.pool_options().connect(url).await?;
    info!(max_connections = config.max_connections, "Connected to PostgreSQL");

    if config.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        info!("Migrations applied");
    }

    Ok(Repositories {
        forms: Arc::new(PostgresFormRepository::new(pool.clone())),
        submissions: Arc::new(PostgresSubmissionRepository::new(pool.clone())),
        users: Arc::new(PostgresUserRepository::new(pool)),
    })
}

fn form_generator(config: &AppConfig) -> Result<Arc<dyn FormGenerator>, StartupError> {
    match config.ai.openai_config() {
        Some(openai) => {
            info!(model = %openai.model, "Form generation via OpenAI");
            Ok(Arc::new(OpenAIFormGenerator::new(openai)?))
        }
        None => {
            warn!("No OpenAI key configured; form generation returns a canned draft");
            Ok(Arc::new(MockFormGenerator::new()))
        }
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
