use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{Level, error, info};
use tracing_subscriber::EnvFilter;
use word_index::{DEFAULT_BUCKETS, Index};

use word_index_server::{AppState, router};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_SOURCE: &str = "input.txt";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_config();
    info!("binding to {}:{}", config.host, config.port);
    info!(
        "indexing {} into {} buckets",
        config.source_path.display(),
        config.buckets
    );
    if config.disable_cache {
        info!("cache headers disabled");
    }

    let start = Instant::now();
    let index = match Index::build_from_file(&config.source_path, config.buckets) {
        Ok(index) => Arc::new(index),
        Err(err) => {
            error!(
                "an error occurred while reading {}: {err}",
                config.source_path.display()
            );
            return Err(anyhow::Error::new(err).context("building index"));
        }
    };
    info!("index built in {} ms", start.elapsed().as_millis());

    let state = AppState {
        index,
        disable_cache: config.disable_cache,
    };

    let app = router(state).layer(TraceLayer::new_for_http());
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("invalid listen address")?;
    let listener = TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Debug, Clone)]
struct Config {
    host: String,
    port: u16,
    source_path: PathBuf,
    buckets: usize,
    disable_cache: bool,
}

fn load_config() -> Config {
    let mut disable_cache = false;
    let mut cli_source: Option<PathBuf> = None;
    let mut cli_buckets: Option<usize> = None;
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--no-cache" => disable_cache = true,
            "--source" => {
                if let Some(path) = args.next() {
                    cli_source = Some(PathBuf::from(path));
                }
            }
            _ => {
                if let Some(path) = arg.strip_prefix("--source=") {
                    cli_source = Some(PathBuf::from(path));
                } else if let Some(raw) = arg.strip_prefix("--buckets=") {
                    cli_buckets = parse_buckets(raw);
                }
            }
        }
    }

    let host = env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
    let port = env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(DEFAULT_PORT);
    let source_path = cli_source
        .or_else(|| env::var("SOURCE_PATH").ok().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOURCE));
    let buckets = cli_buckets
        .or_else(|| {
            env::var("INDEX_BUCKETS")
                .ok()
                .as_deref()
                .and_then(parse_buckets)
        })
        .unwrap_or(DEFAULT_BUCKETS);

    Config {
        host,
        port,
        source_path,
        buckets,
        disable_cache,
    }
}

fn parse_buckets(raw: &str) -> Option<usize> {
    raw.trim().parse::<usize>().ok().filter(|n| *n > 0)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
