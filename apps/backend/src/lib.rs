pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::db::Database;
use crate::services::dictionary::DictionaryClient;
use crate::services::game::GameService;
use crate::services::storage::Storage;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub games: GameService,
}

impl AppState {
    pub fn new(storage: Storage, dictionary: DictionaryClient) -> Self {
        let storage = Arc::new(storage);
        let games = GameService::new(storage.clone(), dictionary);
        Self { storage, games }
    }
}

/// Build the API router.
pub fn build_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Player routes
        .route("/api/players/me", get(routes::players::me))
        // Word-chain routes
        .route("/api/word-chain/games", post(routes::word_chain::start))
        .route(
            "/api/word-chain/games/:id",
            get(routes::word_chain::get).delete(routes::word_chain::delete),
        )
        .route(
            "/api/word-chain/games/:id/words",
            post(routes::word_chain::submit_word),
        )
        .route("/api/word-chain/games/:id/hint", post(routes::word_chain::hint))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/players/register", post(routes::players::register))
        .route(
            "/api/pronunciation/evaluate",
            post(routes::pronunciation::evaluate_attempt),
        )
        .route("/api/pronunciation/words", get(routes::pronunciation::words))
        .route("/api/exams/score", post(routes::exams::score))
        .route("/api/leaderboard", get(routes::leaderboard::list))
        .merge(protected_routes)
        .with_state(state)
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    let storage = match &config.database_url {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(database_url).await?;

            tracing::info!("Running migrations...");
            db.run_migrations().await?;

            Storage::Postgres(db)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, scores will be kept in memory");
            Storage::memory()
        }
    };

    tracing::info!("Using dictionary at {}", config.dictionary.base_url);
    let dictionary = DictionaryClient::new(&config.dictionary)?;

    let state = AppState::new(storage, dictionary);

    let app = build_router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr = config.addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "OK"
}
