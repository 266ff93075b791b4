use crate::types::{ChatRequest, ChatResponse};
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use unicare_dialogue::DialogueEngine;
use uuid::Uuid;

/// Reply sent when a turn fails internally; the session carries on unchanged.
const FALLBACK_REPLY: &str = "I'm here to listen.";

/// Shared state for the gateway server.
#[derive(Clone)]
struct AppState {
    engine: Arc<DialogueEngine>,
}

/// The gateway HTTP server.
///
/// Exposes the engine to the web page:
/// - `POST /chatbot/message`: one turn, state round-trips through the client
/// - `GET /health`: health check
pub struct GatewayServer {
    engine: Arc<DialogueEngine>,
    /// Bind address.
    host: String,
    port: u16,
}

impl GatewayServer {
    pub fn new(engine: Arc<DialogueEngine>, host: &str, port: u16) -> Self {
        Self {
            engine,
            host: host.to_string(),
            port,
        }
    }

    pub fn router(&self) -> Router {
        let state = AppState {
            engine: self.engine.clone(),
        };
        Router::new()
            .route("/health", get(health))
            .route("/chatbot/message", post(handle_message))
            .layer(CorsLayer::permissive())
            .with_state(state)
    }

    /// Start the server. This spawns a background task and returns the join handle.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        let app = self.router();
        let addr = format!("{}:{}", self.host, self.port);

        tokio::spawn(async move {
            let listener = match tokio::net::TcpListener::bind(&addr).await {
                Ok(l) => l,
                Err(e) => {
                    tracing::error!("Gateway failed to bind {}: {}", addr, e);
                    return;
                }
            };
            tracing::info!("Gateway listening on {}", addr);
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!("Gateway server error: {}", e);
            }
        })
    }
}

// ============================================================================
// Route handlers
// ============================================================================

async fn health() -> &'static str {
    "ok"
}

/// POST /chatbot/message: run one turn.
///
/// Never fails: a panic inside the engine is logged and answered with a
/// generic listening reply that keeps the caller's facts.
async fn handle_message(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let span = tracing::info_span!("chat", request_id = %Uuid::new_v4());
    span.in_scope(|| {
        let last_topic = req.topic();
        let turn = catch_unwind(AssertUnwindSafe(|| {
            state
                .engine
                .respond(&req.message, last_topic, &req.user_facts)
        }));
        let response = match turn {
            Ok(turn) => ChatResponse::from(turn),
            Err(_) => {
                tracing::error!("Dialogue engine panicked; sending fallback reply");
                ChatResponse {
                    reply: FALLBACK_REPLY.to_string(),
                    topic: None,
                    user_facts: req.user_facts.clone(),
                }
            }
        };
        if let Some(user_id) = &response.user_facts.user_id {
            tracing::info!("Host should persist facts for user {}", user_id);
        }
        Json(response)
    })
}
