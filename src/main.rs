use dotenvy::dotenv;
use staffing_desk::{
    api::{self, AppContext},
    config::{self, database},
    errors::Result,
    notify::HttpMailer,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load configuration: {}", e))?;
    info!("Configuration loaded for {}", app_config.business.name);

    // 4. Connect to the database and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db).await?;
    info!("Database initialized successfully.");

    // 5. Wire the mail relay and build the router
    let mailer = Arc::new(HttpMailer::new(
        app_config.notifications.relay_url.clone(),
    ));
    info!("Relaying email through {}", mailer.relay_url());
    let bind_address = app_config.server.bind_address.clone();
    let ctx = AppContext::new(db, mailer, Arc::new(app_config));

    // 6. Serve
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .inspect_err(|e| error!("Failed to bind {}: {}", bind_address, e))?;
    info!("Listening on {}", bind_address);
    axum::serve(listener, api::router(ctx)).await?;

    Ok(())
}
