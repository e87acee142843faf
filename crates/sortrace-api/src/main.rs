//! Binary entrypoint for the Sortrace API server.
use sortrace_api::run;
use sortrace_input::RunConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    // Default listen address can be overridden with SORTRACE_ADDR
    let addr = std::env::var("SORTRACE_ADDR").unwrap_or_else(|_| "0.0.0.0:8787".to_string());
    let config = match std::env::var("SORTRACE_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading run config");
            RunConfig::from_yaml(&std::fs::read_to_string(&path)?)?
        }
        Err(_) => RunConfig::default(),
    };
    run(&addr, config).await
}
