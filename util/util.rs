use std::net::SocketAddr;

use anyhow::Context;
use axum::{body::Body, Router};
use composable_tower_authz::authorize::AuthorizerConfig;
use http::Request;
use tokio::net::TcpListener;
use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    trace::{DefaultOnResponse, TraceLayer},
    LatencyUnit,
};
use tracing::{Level, Span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_ADDR: &str = "127.0.0.1:5000";

/// Loads `.env` and installs a subscriber filtered by `RUST_LOG`, or by a verbose default for the demo `exe`.
pub fn init(exe: &str) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{exe}=debug,composable_tower_authz=trace,tower_http=debug"
        ))
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

/// Reads the authorizer configuration from the JSON file named by `AUTHZ_CONFIG`, if any.
pub fn authorizer_config() -> anyhow::Result<AuthorizerConfig> {
    let Some(path) = std::env::var_os("AUTHZ_CONFIG") else {
        tracing::info!("AUTHZ_CONFIG not set, using the default resource abilities");

        return Ok(AuthorizerConfig::default());
    };

    let file = std::fs::File::open(&path)
        .with_context(|| format!("Failed to open {}", path.to_string_lossy()))?;

    let config: AuthorizerConfig =
        serde_json::from_reader(file).context("Failed to parse authorizer config")?;

    tracing::info!(path = %path.to_string_lossy(), ?config, "Loaded authorizer config");

    Ok(config)
}

/// One `request` span per request, with the method and path, closed by a latency log line.
pub fn trace_layer() -> TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    impl Fn(&Request<Body>) -> Span + Clone,
> {
    TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %request.method(),
                path = %request.uri().path(),
            )
        })
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Micros),
        )
}

/// Serves `app` on `DEMO_ADDR`, falling back to `127.0.0.1:5000`.
pub async fn serve(app: Router) -> anyhow::Result<()> {
    let addr = std::env::var("DEMO_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_owned());
    let socket_addr: SocketAddr = addr
        .parse()
        .with_context(|| format!("Invalid DEMO_ADDR {addr}"))?;

    let listener = TcpListener::bind(socket_addr)
        .await
        .with_context(|| format!("Failed to bind {socket_addr}"))?;

    tracing::info!(%socket_addr, "Serving resource controller demo");

    axum::serve(listener, app).await.context("Server failed")?;

    Ok(())
}
