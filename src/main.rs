use std::sync::Arc;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use configuration::{DatabaseBackend, Override, Settings};
use core_types::Student;
use database::{connect, run_migrations, MemoryRepository, PgRepository, Repository};
use web_server::AppState;

mod telemetry;

/// The main entry point for the student registry.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables (e.g. DATABASE_URL) from a .env file if present.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Serve(ServeArgs::default()));

    let overrides = match &command {
        Commands::Serve(args) => args.overrides(),
        Commands::Migrate => Vec::new(),
    };
    let settings = configuration::load_config(overrides)
        .context("Failed to load configuration")?;
    let _log_guard = telemetry::init_tracing(&settings.logging)?;
    tracing::debug!(
        server = ?settings.server,
        backend = settings.database.backend.as_str(),
        "Configuration loaded."
    );

    // Execute the appropriate command
    match command {
        Commands::Serve(_) => handle_serve(&settings).await,
        Commands::Migrate => handle_migrate(&settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A CRUD HTTP API for student records, with validation and Swagger docs.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (the default when no command is given).
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate,
}

#[derive(Args, Default)]
struct ServeArgs {
    /// IP address to bind to, overriding `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,

    /// Storage backend, overriding `database.backend`.
    #[arg(long, value_enum)]
    backend: Option<DatabaseBackend>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

impl ServeArgs {
    /// Flags given on the command line, as configuration overrides.
    fn overrides(&self) -> Vec<Override> {
        let mut overrides: Vec<Override> = Vec::new();
        if let Some(host) = &self.host {
            overrides.push(("server.host", host.clone().into()));
        }
        if let Some(port) = self.port {
            overrides.push(("server.port", i64::from(port).into()));
        }
        if let Some(backend) = self.backend {
            overrides.push(("database.backend", backend.as_str().into()));
        }
        overrides
    }
}

async fn handle_serve(settings: &Settings) -> anyhow::Result<()> {
    let addr = settings.server.socket_addr()?;
    let students = open_student_repository(settings).await?;

    web_server::run_server(addr, AppState::new(students)).await
}

async fn handle_migrate(settings: &Settings) -> anyhow::Result<()> {
    let pool = connect(&settings.database)
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&pool).await?;
    Ok(())
}

/// Opens the configured backend. The postgres backend is migrated before use.
async fn open_student_repository(
    settings: &Settings,
) -> anyhow::Result<Arc<dyn Repository<Student>>> {
    match settings.database.backend {
        DatabaseBackend::Postgres => {
            let pool = connect(&settings.database)
                .await
                .context("Failed to connect to the database")?;
            run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            Ok(Arc::new(PgRepository::<Student>::new(pool)))
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using the in-memory backend; data will be lost on exit.");
            Ok(Arc::new(MemoryRepository::<Student>::new()))
        }
    }
}
