//! API route handlers for the gateway.

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::server::AppState;

/// Health check endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "service": "savi-gateway",
        "version": env!("CARGO_PKG_VERSION"),
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

/// The canned payload for unexpected faults. A chat widget has no use
/// for a stack trace, so the user gets an apology and somewhere to go.
pub fn fallback_payload() -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "response": "Oops — something went wrong on our side. Please try again \
                     in a moment, or reach out and we'll help you directly!",
        "suggestions": [
            { "text": "Browse products", "link": "/products" },
            { "text": "Contact Us", "link": "/contact" },
        ],
        "confidence": "low",
        "sources": [],
    })
}

/// Answer a chatbot query: `POST /chatbot/query` with `{message}`.
pub async fn chatbot_query(
    State(state): State<Arc<AppState>>,
    Json(body): Json<serde_json::Value>,
) -> (StatusCode, Json<serde_json::Value>) {
    let message = body["message"].as_str().unwrap_or("").trim().to_string();
    if message.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({"success": false, "error": "message is required"})),
        );
    }

    // process_query never errors, but run it on its own task so that
    // even a panic comes back as a friendly payload, not a 500 trace.
    let engine = state.engine.clone();
    let handle = tokio::spawn(async move { engine.process_query(&message).await });

    match handle.await {
        Ok(result) => {
            let mut payload = serde_json::to_value(&result).unwrap_or_else(|_| fallback_payload());
            payload["success"] = serde_json::Value::Bool(true);
            (StatusCode::OK, Json(payload))
        }
        Err(e) => {
            tracing::error!("chatbot query task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(fallback_payload()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use savi_core::config::SaviConfig;
    use savi_core::error::Result;
    use savi_core::traits::Generator;
    use savi_engine::Engine;
    use savi_knowledge::{Catalog, KnowledgeBase};

    struct DownGenerator;

    #[async_trait]
    impl Generator for DownGenerator {
        fn name(&self) -> &str {
            "down"
        }
        async fn generate(&self, _system: &str, _user: &str) -> Result<String> {
            Err(savi_core::error::SaviError::Generator("down".into()))
        }
    }

    fn state() -> Arc<AppState> {
        let config = SaviConfig::default();
        let catalog = Catalog::builtin();
        let knowledge = KnowledgeBase::builtin(&catalog);
        let engine = Engine::new(&config, knowledge, catalog, Box::new(DownGenerator));
        Arc::new(AppState::new(engine))
    }

    #[tokio::test]
    async fn test_empty_message_rejected() {
        let (status, Json(payload)) =
            chatbot_query(State(state()), Json(serde_json::json!({"message": "  "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["success"], false);
    }

    #[tokio::test]
    async fn test_query_payload_shape() {
        let (status, Json(payload)) = chatbot_query(
            State(state()),
            Json(serde_json::json!({"message": "do you have gujiya"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(payload["success"], true);
        assert!(payload["response"].as_str().unwrap().contains("Gujiya"));
        assert!(payload["suggestions"].is_array());
        assert!(payload["confidence"].is_string());
        assert!(payload["sources"].is_array());
    }

    #[test]
    fn test_fallback_payload_has_two_suggestions() {
        let payload = fallback_payload();
        assert_eq!(payload["success"], false);
        assert_eq!(payload["suggestions"].as_array().unwrap().len(), 2);
        assert_eq!(payload["confidence"], "low");
    }
}
