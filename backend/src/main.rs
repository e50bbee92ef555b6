use anyhow::Context;
use clap::Parser;
use std::path::Path;
use std::sync::Arc;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use bible_guide::config::{Config, ConfigNote, LoggingConfig};
use bible_guide::{AppState, build_router};

#[derive(Debug, Parser)]
#[command(name = "bible-guide", version, about = "Bible guide ask service")]
struct Args {
    /// Path to config.toml (default: conf/config.toml or config.toml)
    #[arg(short, long)]
    config: Option<String>,

    /// Override server.host
    #[arg(long)]
    host: Option<String>,

    /// Override server.port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let (mut config, mut notes) =
        Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    notes.extend(config.validate()?);

    let _guard = init_tracing(&config.logging)?;
    notes.iter().for_each(ConfigNote::log);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!(
        "Starting bible-guide (model={}, policy={}, upstream_configured={})",
        config.openai.model,
        config.ask.on_upstream_failure.as_str(),
        config.openai.api_key.is_some()
    );

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let filter =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(&logging.level))?;
    let registry = tracing_subscriber::registry().with(filter).with(fmt::layer());

    match &logging.file {
        Some(file) => {
            let path = Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path.file_name().context("logging.file must name a file")?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::daily(dir, name));
            registry.with(fmt::layer().with_writer(writer).with_ansi(false)).init();
            Ok(Some(guard))
        },
        None => {
            registry.init();
            Ok(None)
        },
    }
}
