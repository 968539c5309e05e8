//! asynchooks demo — wires an engine from configuration and triggers an event.
//!
//! Registers a small release pipeline: `build` runs `compile` then `link`
//! in sequence while `lint` and `docs` run alongside; `release` chains the
//! whole of `build` before `publish`.

use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

use asynchooks_core::config::AppConfig;
use asynchooks_core::error::AppError;
use asynchooks_engine::{AsyncHooks, HookMode};

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    let event = std::env::var("ASYNCHOOKS_EVENT").unwrap_or_else(|_| "build".to_string());

    if let Err(e) = run(config, &event).await {
        tracing::error!("Trigger '{}' failed: {}", event, e);
        std::process::exit(1);
    }
}

/// Load configuration from files and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("ASYNCHOOKS_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

async fn run(config: AppConfig, event: &str) -> Result<(), AppError> {
    tracing::info!("Starting asynchooks demo v{}", env!("CARGO_PKG_VERSION"));

    let hooks = AsyncHooks::from_config(&config.hooks);
    register_pipeline(&hooks).await;

    tracing::info!("Triggering '{}'", event);
    hooks.trigger(event).await?;
    tracing::info!("Trigger '{}' complete", event);

    Ok(())
}

async fn register_pipeline(hooks: &AsyncHooks) {
    hooks
        .on_with_mode("build", || step("compile", 200), HookMode::Sequential)
        .await;
    hooks
        .on_with_mode("build", || step("link", 100), HookMode::Sequential)
        .await;
    hooks
        .on_with_mode("build", || step("lint", 150), HookMode::Concurrent)
        .await;
    hooks
        .on_with_mode("build", || step("docs", 250), HookMode::Concurrent)
        .await;

    hooks
        .on_handler(
            "release",
            std::sync::Arc::new(hooks.as_continuation("build")),
            HookMode::Sequential,
        )
        .await;
    hooks
        .on_with_mode("release", || step("publish", 100), HookMode::Sequential)
        .await;

    hooks
        .once_with_mode("release", || step("announce", 50), HookMode::Concurrent)
        .await;
}

async fn step(name: &'static str, millis: u64) -> Result<(), AppError> {
    tracing::info!(step = name, "Step started");
    tokio::time::sleep(Duration::from_millis(millis)).await;
    tracing::info!(step = name, "Step finished");
    Ok(())
}
