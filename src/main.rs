//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run the CLI.
//! No business logic here; the pipeline lives in the use cases.

use clap::Parser;
use dotenv::dotenv;
use promptrx::adapters::ai::{MockAiAdapter, OpenAiAdapter};
use promptrx::adapters::cli::{CliArgs, CliRunner};
use promptrx::adapters::pdf::PrintPdfRenderer;
use promptrx::domain::PromptIntent;
use promptrx::ports::{DocumentRenderer, RewritingPort, SummaryPort};
use promptrx::shared::config::AppConfig;
use promptrx::usecases::{PipelineService, SummaryService};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Exit status for unusable input (empty text, unreadable or unsupported file).
const EXIT_CLIENT_ERROR: u8 = 2;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let args = CliArgs::parse();
    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "invalid configuration, using defaults");
        AppConfig::default()
    });

    // --- Rewriting service ---
    let ai: Arc<dyn RewritingPort> = match cfg.api_key() {
        Some(api_key) => {
            info!(url = %cfg.api_url_or_default(), "rewriting service enabled with OpenAI-compatible adapter");
            Arc::new(
                OpenAiAdapter::new(cfg.api_url_or_default(), api_key)
                    .with_max_tokens(cfg.max_tokens_or_default())
                    .with_timeout(Duration::from_secs(cfg.request_timeout_secs_or_default())),
            )
        }
        None => {
            warn!("PROMPTRX_API_KEY not set, using mock rewriting adapter");
            Arc::new(MockAiAdapter::new())
        }
    };

    // --- Services ---
    let concurrency = args
        .concurrency
        .unwrap_or_else(|| cfg.concurrency_or_default())
        .max(1);
    let intent = args
        .intent
        .as_deref()
        .map(PromptIntent::from_name)
        .unwrap_or_else(|| cfg.intent());
    let model = cfg.model_or_default();
    info!(model = %model, intent = %intent, concurrency, "pipeline configured");

    let pipeline = Arc::new(PipelineService::new(ai, concurrency).with_intent(intent));
    let renderer: Arc<dyn DocumentRenderer> = Arc::new(PrintPdfRenderer::new());
    let summary: Arc<dyn SummaryPort> = Arc::new(SummaryService::new(pipeline, renderer, model));
    let runner = CliRunner::new(summary);

    // --- Run (Ctrl-C drops the in-flight run; nothing partial is written) ---
    tokio::select! {
        result = runner.run(&args) => match result {
            Ok(Some(path)) => eprintln!("Saved {}", path.display()),
            Ok(None) => {}
            Err(e) if e.is_client_error() => {
                error!(error = %e, "input rejected");
                return Ok(ExitCode::from(EXIT_CLIENT_ERROR));
            }
            Err(e) => return Err(anyhow::anyhow!("{}", e)),
        },
        _ = tokio::signal::ctrl_c() => {
            warn!("interrupted, discarding in-flight requests");
            anyhow::bail!("interrupted");
        }
    }

    Ok(ExitCode::SUCCESS)
}
