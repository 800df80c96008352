//! API Client

use serde::{Deserialize, Serialize};

/// Path of the strategy proxy on the serving origin
pub const STRATEGY_PATH: &str = "/api/generate-strategy";

#[derive(Serialize)]
struct StrategyRequest<'a> {
    prompt: &'a str,
}

#[derive(Deserialize)]
struct StrategyReply {
    reply: String,
}

#[derive(Deserialize)]
struct ErrorReply {
    error: String,
}

/// reqwest on wasm needs an absolute URL
fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{origin}{path}")
}

/// Send the built prompt to the proxy and return the generated strategy
pub async fn generate_strategy(prompt: &str) -> Result<String, String> {
    let client = reqwest::Client::new();

    let response = client
        .post(endpoint(STRATEGY_PATH))
        .json(&StrategyRequest { prompt })
        .send()
        .await
        .map_err(|e| format!("Network error: {e}"))?;

    let status = response.status();
    if status.is_success() {
        let data: StrategyReply = response.json().await.map_err(|e| e.to_string())?;
        Ok(data.reply)
    } else {
        let message = response
            .json::<ErrorReply>()
            .await
            .map_or_else(|_| format!("Request failed ({status})"), |e| e.error);
        Err(message)
    }
}
