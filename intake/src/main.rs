use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use intake::api::{create_router, AppState};
use intake::config::Config;
use intake::models::FileRecord;
use intake::processing::{aggregate, create_summary, AiPayload, FileProcessor};

#[derive(Parser)]
#[command(name = "intake")]
#[command(about = "Turn uploaded documents into AI-ready text and image payloads")]
struct Args {
    /// Files to process as one batch. Without files, the HTTP server starts.
    files: Vec<PathBuf>,

    /// Maximum number of images included in the AI payload
    #[arg(long)]
    max_images: Option<usize>,
}

#[derive(Serialize)]
struct BatchOutput {
    records: Vec<FileRecord>,
    summary: String,
    payload: AiPayload,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    // Logs go to stderr so CLI output on stdout stays valid JSON.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "intake=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env();
    if let Some(max_images) = args.max_images {
        config.aggregation.max_images = max_images;
    }

    if !args.files.is_empty() {
        return run_batch(&config, &args.files);
    }

    serve(config).await
}

fn run_batch(config: &Config, paths: &[PathBuf]) -> anyhow::Result<()> {
    let processor = FileProcessor::new(config.extraction.clone(), &config.upload);

    if paths.len() > config.upload.max_files {
        tracing::warn!(
            given = paths.len(),
            max_files = config.upload.max_files,
            "Too many files; only the first ones will be processed"
        );
    }

    let records: Vec<FileRecord> = paths
        .iter()
        .take(config.upload.max_files)
        .map(|path| processor.process_path(path))
        .collect();

    let output = BatchOutput {
        summary: create_summary(&records),
        payload: aggregate(&records, config.aggregation.max_images),
        records,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

async fn serve(config: Config) -> anyhow::Result<()> {
    if config.server.api_keys.is_empty() {
        tracing::warn!(
            "INTAKE_API_KEYS is not set; /files:process is locked. Set INTAKE_API_KEYS to enable uploads."
        );
    }

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app = create_router(AppState::new(config));

    tracing::info!("Intake starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/api/v1/health", addr);
    tracing::info!("  API docs:     http://{}/api/v1/docs", addr);
    tracing::info!("  OpenAPI JSON: http://{}/api/v1/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping server...");
}
