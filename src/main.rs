use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use snowflake_news::app::{App, Overrides, default_config_path};
use snowflake_news::log::Log;
use snowflake_news::{ArcPath, ArcStr};
use tokio_util::sync::CancellationToken;

const SCOPE: &str = "main";

#[derive(Parser)]
#[command(name = "snowflake-news")]
#[command(about = "Periodically collects company news from Finnhub and serves it over HTTP")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    /// Configuration file, created with defaults when missing
    /// [default: ~/.config/snowflake-news/config.toml]
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Finnhub API token
    #[arg(long, env = "FINNHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Stock symbol whose news is collected
    #[arg(long)]
    ticker: Option<String>,

    /// Address the HTTP server listens on
    #[arg(long)]
    listen: Option<String>,

    /// Stop after this many seconds instead of waiting for a signal
    #[arg(long, value_name = "SECS")]
    run_for: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match cli.config {
        Some(path) => ArcPath::from(path),
        None => default_config_path(std::env::var_os("HOME").map(PathBuf::from).as_deref()),
    };
    let overrides = Overrides {
        token: cli.token.map(ArcStr::from),
        ticker: cli.ticker.map(ArcStr::from),
        listen_addr: cli.listen.map(ArcStr::from),
    };

    let app = App::build(config_path, overrides).await?;

    let shutdown = CancellationToken::new();
    tokio::spawn(cancel_on_shutdown(
        shutdown.clone(),
        cli.run_for.map(Duration::from_secs),
        app.log(),
    ));

    app.run(shutdown).await
}

/// Cancels `token` on Ctrl+C, SIGTERM or once `run_for` has elapsed.
async fn cancel_on_shutdown(token: CancellationToken, run_for: Option<Duration>, log: Log) {
    use tokio::signal;

    let ctrl_c = async {
        if signal::ctrl_c().await.is_err() {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let deadline = async {
        match run_for {
            Some(duration) => tokio::time::sleep(duration).await,
            None => std::future::pending::<()>().await,
        }
    };

    tokio::select! {
        _ = ctrl_c => log.info(SCOPE, "Received Ctrl+C signal"),
        _ = terminate => log.info(SCOPE, "Received terminate signal"),
        _ = deadline => log.info(SCOPE, "Run time elapsed"),
        _ = token.cancelled() => {},
    }

    token.cancel();
}
