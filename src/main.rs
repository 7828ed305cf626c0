use std::sync::Arc;

use color_eyre::eyre::Result;
use reqwest::Client as HttpClient;
use secrecy::ExposeSecret;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use turnstile::{
    AuthService, AuthServiceConfig, ConsoleMailer, GoogleProfileClient, Mailer, PgUserRepository,
    PostmarkMailer, Settings, get_postgres_pool, run_migrations,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    dotenvy::dotenv().ok();

    // Load configuration; missing variables are reported in one aggregate
    // error rather than one crash at a time.
    let settings = Settings::load()?;

    // Setup database connection pool and bring the schema up to date
    let pg_pool = get_postgres_pool(settings.database.url.expose_secret()).await?;
    run_migrations(&pg_pool).await?;

    let repository = PgUserRepository::new(pg_pool);

    let http_client = HttpClient::builder()
        .timeout(settings.email.timeout)
        .build()?;

    let mailer: Arc<dyn Mailer> = if settings.email.console_log {
        Arc::new(ConsoleMailer::new())
    } else {
        Arc::new(PostmarkMailer::new(
            settings.email.postmark_base_url.clone(),
            settings.email.sender.clone(),
            settings.email.auth_token.clone(),
            http_client.clone(),
        ))
    };

    let profiles =
        GoogleProfileClient::new(http_client, settings.oauth.google_userinfo_url.clone());

    let config = AuthServiceConfig {
        token_secret: settings.auth.token_secret.clone(),
        token_validity_seconds: settings.auth.token_validity_seconds,
        hash: settings.auth.hash,
        base_url: settings.app.base_url.clone(),
        allowed_origins: settings.app.allowed_origins.clone(),
    };

    let auth_service = AuthService::new(repository, mailer, profiles, config)?;

    let address = format!("{}:{}", settings.app.host, settings.app.port);
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!("Starting the turnstile auth service...");

    auth_service.run_standalone(listener).await?;

    Ok(())
}

fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .try_init()?;

    Ok(())
}
