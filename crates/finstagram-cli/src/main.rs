//! Finstagram terminal client entry point.

use clap::Parser;
use finstagram_app::{App, AppConfig, Runtime, SystemEnv};
use finstagram_cli::{Args, LineDriver, RuntimeError};
use finstagram_client::HttpApi;
use finstagram_store::{KeyValueStore, MemoryStore, RedbStore};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), RuntimeError> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let api = HttpApi::with_timeout(&args.api_url, args.request_timeout())?;
    tracing::info!(api = %api.base_url(), ephemeral = args.ephemeral, "starting");

    if args.ephemeral {
        run(MemoryStore::new(), api, &args).await
    } else {
        let store = RedbStore::open(&args.state_path)?;
        run(store, api, &args).await
    }
}

async fn run<S: KeyValueStore>(store: S, api: HttpApi, args: &Args) -> Result<(), RuntimeError> {
    let config: AppConfig = args.app_config();
    let app = App::new(SystemEnv::new(), store, config);
    let runtime = Runtime::new(LineDriver::stdio(), app, api).with_tick(args.tick());

    let app = runtime.run().await?;
    tracing::info!(user = app.username().unwrap_or("-"), view = %app.current_view(), "stopped");
    Ok(())
}

/// Log to stderr so stdout carries only rendered views. `RUST_LOG` wins over
/// `--log-level`.
fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}
