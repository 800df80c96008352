//! Router assembly

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue},
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::{services::ServeDir, set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::handlers::{generate_strategy, health_check, method_not_allowed, preflight};
use crate::state::AppState;

/// Primary proxy path
pub const PROXY_PATH: &str = "/api/generate-strategy";

/// Older path kept for deployed pages that still post here
pub const LEGACY_PROXY_PATH: &str = "/api/together-ai-proxy";

fn proxy_route() -> MethodRouter<AppState> {
    post(generate_strategy)
        .options(preflight)
        .fallback(method_not_allowed)
}

pub fn build_router(state: AppState) -> Router {
    // Preflight is answered by `preflight`; every other proxy response,
    // errors included, still needs the origin header.
    let proxy = Router::new()
        .route(PROXY_PATH, proxy_route())
        .route(LEGACY_PROXY_PATH, proxy_route())
        .layer(SetResponseHeaderLayer::if_not_present(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ));

    Router::new()
        .route("/health", get(health_check))
        .merge(proxy)
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new(&state.config.static_dir))
        .layer(DefaultBodyLimit::max(state.config.max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{HeaderMap, Method, Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use strategy_core::{
        error::{Result, StrategyError},
        message::{Message, Role},
        provider::{Completion, FinishReason, GenerationOptions, LlmProvider},
    };
    use strategy_runtime::{ApiKeySource, TogetherConfig, TogetherProvider};

    use super::*;
    use crate::config::ServerConfig;
    use crate::error::{INVALID_BODY_MESSAGE, MISSING_KEY_MESSAGE};

    enum Behavior {
        Reply(&'static str),
        Upstream(u16),
        Malformed,
    }

    struct StubProvider {
        behavior: Behavior,
        seen: Mutex<Vec<Message>>,
    }

    impl StubProvider {
        fn new(behavior: Behavior) -> Arc<Self> {
            Arc::new(Self {
                behavior,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &str {
            "stub"
        }

        async fn health_check(&self) -> Result<bool> {
            Ok(true)
        }

        async fn complete(
            &self,
            messages: &[Message],
            options: &GenerationOptions,
        ) -> Result<Completion> {
            self.seen.lock().unwrap().extend(messages.iter().cloned());
            match self.behavior {
                Behavior::Reply(text) => Ok(Completion {
                    content: text.into(),
                    model: options.model.clone(),
                    usage: None,
                    finish_reason: Some(FinishReason::Length),
                }),
                Behavior::Upstream(status) => Err(StrategyError::Upstream {
                    status,
                    message: "Upstream API request failed: Unauthorized".into(),
                    details: json!({"error": {"message": "bad key"}}),
                }),
                Behavior::Malformed => Err(StrategyError::MalformedResponse(
                    "missing choices[0]".into(),
                )),
            }
        }
    }

    fn app(provider: Arc<dyn LlmProvider>) -> Router {
        build_router(AppState {
            provider,
            config: Arc::new(ServerConfig {
                max_prompt_chars: 50,
                ..Default::default()
            }),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, HeaderMap, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, headers, body)
    }

    fn post_json(path: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_prompt_returns_reply() {
        let stub = StubProvider::new(Behavior::Reply("Focus on Instagram."));
        let (status, headers, body) = send(app(stub.clone()), post_json(PROXY_PATH, r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body["reply"], "Focus on Instagram.");
        assert_eq!(body["finish_reason"], "length");
        assert!(!body["model"].as_str().unwrap().is_empty());

        let seen = stub.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].role, Role::User);
        assert_eq!(seen[0].content, "hello");
    }

    #[tokio::test]
    async fn test_legacy_path_is_served() {
        let stub = StubProvider::new(Behavior::Reply("ok"));
        let (status, _, _) = send(app(stub), post_json(LEGACY_PROXY_PATH, r#"{"prompt":"hi"}"#)).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_completion_becomes_no_reply() {
        let stub = StubProvider::new(Behavior::Reply(""));
        let (status, _, body) = send(app(stub), post_json(PROXY_PATH, r#"{"prompt":"hi"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["reply"], "No reply");
    }

    #[tokio::test]
    async fn test_missing_prompt_is_400() {
        let stub = StubProvider::new(Behavior::Reply("unused"));
        let (status, _, body) = send(app(stub.clone()), post_json(PROXY_PATH, "{}")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY_MESSAGE);
        assert!(stub.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_json_is_400() {
        let stub = StubProvider::new(Behavior::Reply("unused"));
        let (status, _, body) = send(app(stub), post_json(PROXY_PATH, "not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], INVALID_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn test_overlong_prompt_is_400() {
        let stub = StubProvider::new(Behavior::Reply("unused"));
        let prompt = "x".repeat(51);
        let body = json!({ "prompt": prompt }).to_string();
        let (status, _, body) = send(app(stub), post_json(PROXY_PATH, &body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid prompt");
    }

    #[tokio::test]
    async fn test_get_is_405() {
        let stub = StubProvider::new(Behavior::Reply("unused"));
        let request = Request::builder()
            .method(Method::GET)
            .uri(PROXY_PATH)
            .body(Body::empty())
            .unwrap();
        let (status, headers, body) = send(app(stub), request).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(headers[header::ALLOW], "POST, OPTIONS");
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert_eq!(body["error"], "Method Not Allowed");
    }

    #[tokio::test]
    async fn test_browser_preflight_is_204_with_cors_headers() {
        for path in [PROXY_PATH, LEGACY_PROXY_PATH] {
            let stub = StubProvider::new(Behavior::Reply("unused"));
            let request = Request::builder()
                .method(Method::OPTIONS)
                .uri(path)
                .header(header::ORIGIN, "https://landing.example.com")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap();
            let (status, headers, _) = send(app(stub.clone()), request).await;

            assert_eq!(status, StatusCode::NO_CONTENT);
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_METHODS], "POST, OPTIONS");
            assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS], "Content-Type");
            assert_eq!(headers.get_all(header::ACCESS_CONTROL_ALLOW_ORIGIN).iter().count(), 1);
            assert!(stub.seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_missing_key_is_500_without_leaking() {
        let provider = TogetherProvider::from_config(TogetherConfig {
            base_url: "http://127.0.0.1:9".into(),
            api_key: ApiKeySource::Env("STRATEGY_SERVER_TEST_UNSET_KEY".into()),
            ..Default::default()
        })
        .unwrap();
        let (status, _, body) = send(
            app(Arc::new(provider)),
            post_json(PROXY_PATH, r#"{"prompt":"hello"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], MISSING_KEY_MESSAGE);
        assert!(body.get("details").is_none());
        assert!(!body.to_string().contains("STRATEGY_SERVER_TEST_UNSET_KEY"));
    }

    #[tokio::test]
    async fn test_upstream_status_is_relayed() {
        let stub = StubProvider::new(Behavior::Upstream(401));
        let (status, _, body) = send(app(stub), post_json(PROXY_PATH, r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(!body["error"].as_str().unwrap().is_empty());
        assert_eq!(body["details"]["error"]["message"], "bad key");
    }

    #[tokio::test]
    async fn test_malformed_upstream_is_500() {
        let stub = StubProvider::new(Behavior::Malformed);
        let (status, _, body) = send(app(stub), post_json(PROXY_PATH, r#"{"prompt":"hello"}"#)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("unexpected response"));
    }

    #[tokio::test]
    async fn test_health_reports_provider() {
        let stub = StubProvider::new(Behavior::Reply("unused"));
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, _, body) = send(app(stub), request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provider"], "stub");
        assert_eq!(body["upstream_configured"], true);
    }
}
