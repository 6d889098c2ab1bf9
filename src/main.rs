//! Wiring & DI. Entry point: load config, bootstrap line I/O, run the batch driver.
//! No business logic here; commands are executed by BatchRunner.

use academic_records::adapters::batch::BatchRunner;
use academic_records::adapters::io::{WriterSink, open_source};
use academic_records::shared::config::AppConfig;
use dotenv::dotenv;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_loaded = dotenv();
    // Loaded before the subscriber exists; failures are logged once it does.
    let cfg = AppConfig::load();
    let cli_input = std::env::args().nth(1).map(PathBuf::from);
    let cfg_ref = cfg.as_ref().ok();

    let default_filter = cfg_ref
        .map(AppConfig::log_filter_or_default)
        .unwrap_or_else(|| academic_records::shared::config::DEFAULT_LOG_FILTER.to_string());
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Ok(path) = &env_loaded {
        info!(path = %path.display(), "loaded .env");
    }
    let cfg = match cfg {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "config load failed, using defaults");
            AppConfig::default()
        }
    }
    .with_input_override(cli_input.as_deref());

    let input = cfg.input_path();
    match &input {
        Some(path) => info!(path = %path.display(), "reading commands from file"),
        None => info!("reading commands from stdin"),
    }

    let mut source = open_source(input.as_deref())
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let mut sink = WriterSink::stdout();
    let mut runner = BatchRunner::new(cfg.stop_on_error_or_default());
    let stats = runner
        .run(source.as_mut(), &mut sink)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    if stats.failed > 0 {
        warn!(
            failed = stats.failed,
            commands = stats.commands,
            "some commands were rejected"
        );
    }
    Ok(())
}
