mod config;

use auth_service::{StaticTokenVerifier, TokenVerifier, require_bearer};
use axum::{Json, Router, middleware, routing::get};
use axum_server::Handle;
use axum_server::tls_rustls::RustlsConfig;
use comment_service::{CommentService, CommentSettings};
use config::Config;
use datastore::{FileSystemRepository, InMemoryRepository, SummaryRepository};
use gemini_client::GeminiClient;
use instagram_client::{HttpInstagramClient, InstagramApi};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;
use youtube_client::HttpYouTubeClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let app = build_app(&config)?;

    let handle = Handle::new();
    tokio::spawn(shutdown_on_ctrl_c(handle.clone()));

    match &config.tls {
        Some(tls) => {
            rustls::crypto::ring::default_provider()
                .install_default()
                .map_err(|_| "failed to install the rustls crypto provider")?;
            let tls_config = RustlsConfig::from_pem_file(&tls.cert, &tls.key).await?;
            info!(addr = %config.bind_addr, "listening (https)");
            axum_server::bind_rustls(config.bind_addr, tls_config)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
        None => {
            info!(addr = %config.bind_addr, "listening (http)");
            axum_server::bind(config.bind_addr)
                .handle(handle)
                .serve(app.into_make_service())
                .await?;
        }
    }

    Ok(())
}

/// Wire clients, repository and routers together
fn build_app(config: &Config) -> Result<Router, Box<dyn std::error::Error>> {
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()?;

    let mut youtube = HttpYouTubeClient::new(&config.youtube_api_key).with_http_client(http.clone());
    if let Some(url) = &config.youtube_base_url {
        youtube = youtube.with_base_url(url);
    }

    let mut gemini = GeminiClient::new(&config.gemini_api_key).with_http_client(http.clone());
    if let Some(url) = &config.gemini_base_url {
        gemini = gemini.with_base_url(url);
    }
    if let Some(model) = &config.gemini_model {
        gemini = gemini.with_model(model);
    }

    let summaries: Arc<dyn SummaryRepository> = match &config.summary_store_dir {
        Some(dir) => {
            let repo = FileSystemRepository::open(dir)?;
            info!(dir = %repo.root().display(), "storing summaries on disk");
            Arc::new(repo)
        }
        None => {
            info!("storing summaries in memory");
            Arc::new(InMemoryRepository::new())
        }
    };

    info!(model = gemini.model(), "summarizer configured");
    let service = CommentService::new(
        Arc::new(youtube),
        Arc::new(gemini),
        summaries,
        CommentSettings {
            summary_comment_limit: config.summary_comment_limit,
            subscription_match: config.subscription_match,
        },
    );

    let verifier: Arc<dyn TokenVerifier> = Arc::new(StaticTokenVerifier::new(config.auth_tokens.clone()));
    let youtube_api = video_service::create_router(Arc::new(service))
        .layer(middleware::from_fn_with_state(verifier.clone(), require_bearer));

    let mut app = Router::new()
        .route("/health", get(health))
        .nest("/api/youtube", youtube_api);

    match &config.instagram_bridge_url {
        Some(url) => {
            let mut instagram = HttpInstagramClient::new(url).with_http_client(http);
            if let Some(token) = &config.instagram_bridge_token {
                instagram = instagram.with_token(token);
            }
            info!(bridge = %url, "instagram proxy enabled");
            let instagram: Arc<dyn InstagramApi> = Arc::new(instagram);
            let instagram_api = instagram_service::create_router(instagram)
                .layer(middleware::from_fn_with_state(verifier, require_bearer));
            app = app.nest("/api/instagram", instagram_api);
        }
        None => info!("INSTAGRAM_BRIDGE_URL not set, instagram proxy disabled"),
    }

    Ok(app)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn shutdown_on_ctrl_c(handle: Handle) {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("shutting down");
        handle.graceful_shutdown(Some(Duration::from_secs(10)));
    }
}
