//! Web server binary for threadboard - serves the board and accepts posts and replies.
//!
//! ## Usage
//!
//! ```bash
//! # Run with default settings (localhost:8080, demo thread seeded)
//! threadboard-web
//!
//! # Run on custom address
//! threadboard-web --bind 0.0.0.0:8080
//!
//! # Start with an empty board
//! THREADBOARD_SEED_DEMO=false threadboard-web
//!
//! # Enable debug logging
//! RUST_LOG=debug threadboard-web
//! ```

use axum::http::{header, HeaderValue};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::{Arc, RwLock};
use threadboard::forum::{current_timestamp_millis, seed_demo_thread, ReplyTree};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod csrf;
mod forum_handlers;
mod templates;

use config::WebConfig;

/// The board's posts, shared by every handler.
///
/// One lock scope per request: the write lock for an append, the read lock
/// for a render.
pub type SharedReplyTree = Arc<RwLock<ReplyTree>>;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub tree: SharedReplyTree,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tree", &"SharedReplyTree { ... }")
            .finish()
    }
}

/// Builds the router with all routes and layers attached.
fn build_router(app_state: AppState, config: &WebConfig) -> Router {
    if config.secure_cookies {
        info!("Secure cookies enabled - cookies will only be sent over HTTPS");
    } else {
        warn!("Secure cookies disabled - set THREADBOARD_SECURE_COOKIES=true for production");
    }

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_name("threadboard-session")
        .with_http_only(true);

    Router::new()
        .route("/", get(forum_handlers::index_page))
        .route("/newpost", post(forum_handlers::new_post_handler))
        .route("/posts.json", get(forum_handlers::posts_json))
        .nest_service("/public", ServeDir::new(&config.static_dir))
        .layer(session_layer)
        // Security headers to prevent common attacks
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("DENY"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("strict-origin-when-cross-origin"),
        ))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "threadboard=info,threadboard_web=info,tower_http=debug".into()),
        )
        .init();

    let config = WebConfig::from_env();
    info!("Starting with {:?}", config);

    let mut tree = ReplyTree::new();
    if config.seed_demo {
        seed_demo_thread(&mut tree, current_timestamp_millis())?;
        info!("Seeded demo thread ({} posts)", tree.total_posts());
    }

    let app_state = AppState {
        tree: Arc::new(RwLock::new(tree)),
    };

    let app = build_router(app_state, &config);

    let listener = TcpListener::bind(config.bind_addr.as_str()).await?;
    info!("threadboard running on http://{}", config.bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
