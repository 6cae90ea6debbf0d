use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use study_buddy::{
    api::{create_router, AppState},
    config::{Config, LoggingConfig},
    log_system_event,
    model_discovery::discover_model,
    study_service::StudyService,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    // Initialize logging with optional console and file output
    let _guard = setup_logging(&config.logging)?;

    config.log_configuration_summary();
    config.validate()?;

    log_system_event!(startup, component = "server", "Starting AI Study Buddy backend");

    // Discover a usable model once; the result is fixed for the process lifetime
    let gateway = discover_model(&config.llm).await;
    info!(gateway = ?gateway, "Model gateway ready");

    let state = AppState {
        study_service: StudyService::new(gateway),
    };

    let app = create_router(state).layer(ServiceBuilder::new().layer(CorsLayer::permissive()));

    let addr = config.server.address();
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn setup_logging(logging: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    use std::fs;
    use tracing_subscriber::fmt;

    let env_filter = EnvFilter::try_new(&logging.level)
        .unwrap_or_else(|_| EnvFilter::new("info,study_buddy=debug"));

    // Configure console output
    let console_layer = logging.console_enabled.then(|| {
        fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(true)
    });

    // Configure file output (no ANSI colors for files) with daily rotation
    let mut guard = None;
    let file_layer = if logging.file_enabled {
        fs::create_dir_all(&logging.log_directory).unwrap_or_else(|e| {
            eprintln!("Warning: Could not create logs directory: {}", e);
        });

        let file_appender = tracing_appender::rolling::daily(&logging.log_directory, "study-buddy.log");
        let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(file_guard);

        Some(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_writer(non_blocking_file),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    info!(
        log_directory = %logging.log_directory,
        file_enabled = logging.file_enabled,
        console_enabled = logging.console_enabled,
        "Logging initialized"
    );

    Ok(guard)
}
