use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use delivery_tracker::api;
use delivery_tracker::config::Config;
use delivery_tracker::error::AppError;
use delivery_tracker::state::AppState;
use delivery_tracker::storage::{Database, seed};

#[derive(Parser)]
#[command(name = "delivery-tracker", version, about = "Track deliveries, drivers and status notifications")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the web application (default)
    Serve,
    /// Drop and recreate the database tables
    InitDb,
    /// Insert or refresh the sample drivers and deliveries
    Seed,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_level.clone()))
        .with_target(false)
        .compact()
        .init();

    let db = Database::new(&config.database_path);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, db).await,
        Command::InitDb => {
            db.initialize(&config.schema_path).await?;
            println!("Initialized the database.");
            Ok(())
        }
        Command::Seed => {
            db.write(|tx| seed::apply(tx)).await?;
            println!("Seed data added/updated successfully.");
            Ok(())
        }
    }
}

async fn serve(config: Config, db: Database) -> Result<(), AppError> {
    if !db.exists() {
        db.initialize(&config.schema_path).await?;
    }

    if config.uses_default_secret() {
        tracing::warn!("SECRET_KEY is not set; flash cookies are signed with the development key");
    }

    let app = api::rest::router(AppState::new(db, &config.secret_key));

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|err| AppError::Internal(format!("failed to bind {bind_addr}: {err}")))?;

    tracing::info!(http_port = config.http_port, database = %config.database_path.display(), "http server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::Internal(format!("server error: {err}")))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to listen for shutdown signal");
    }
}
