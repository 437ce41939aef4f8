pub mod canned;
pub mod prompts;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use serde_json::{json, Value};

// ── Types ─────────────────────────────────────────────

#[derive(Debug)]
pub struct AiError(pub String);

impl std::fmt::Display for AiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Default text-generation endpoint, overridable with FOLIO_AI_ENDPOINT.
const DEFAULT_ENDPOINT: &str = "https://api-inference.huggingface.co/models/distilgpt2";

/// Outbound requests must not hang the loading indicator forever; a slow
/// endpoint surfaces as a failure instead.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

// ── Client ────────────────────────────────────────────

/// Blocking client for the remote text-generation endpoint. Built once at
/// startup from environment variables; a missing key is reported at boot
/// and degrades every later call to "no suggestions".
pub struct SuggestClient {
    endpoint: String,
    api_key: String,
}

impl SuggestClient {
    pub fn from_env() -> Self {
        let api_key = std::env::var("FOLIO_AI_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            log::error!("FOLIO_AI_API_KEY not set; AI suggestions will fall back to canned text");
        }
        let endpoint = std::env::var("FOLIO_AI_ENDPOINT")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        SuggestClient { endpoint, api_key }
    }

    #[cfg(test)]
    pub fn with_key(endpoint: &str, api_key: &str) -> Self {
        SuggestClient {
            endpoint: endpoint.to_string(),
            api_key: api_key.to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// POST the prompt and return the generated variations. Any transport
    /// failure, non-success status, or malformed body is an error the
    /// caller degrades to an empty suggestion list. No retries: a failed
    /// fetch waits for the user to click again.
    pub fn generate(&self, prompt: &str, sequences: u32) -> Result<Vec<String>, AiError> {
        if self.api_key.is_empty() {
            return Err(AiError("API key not configured".into()));
        }

        let body = json!({
            "inputs": prompt,
            "parameters": { "num_return_sequences": sequences }
        });

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AiError(format!("HTTP client error: {}", e)))?;

        let resp = client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .map_err(|e| AiError(format!("suggestion request failed: {}", e)))?;

        if !resp.status().is_success() {
            return Err(AiError(format!(
                "suggestion endpoint returned {}",
                resp.status()
            )));
        }

        let json: Value = resp
            .json()
            .map_err(|e| AiError(format!("suggestion JSON parse error: {}", e)))?;

        Ok(parse_generated(&json))
    }
}

/// Extract generated texts from the endpoint's response body: a JSON array
/// of objects carrying `generated_text`. Anything else yields an empty
/// list rather than an error.
pub fn parse_generated(body: &Value) -> Vec<String> {
    match body {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| item.get("generated_text").and_then(|v| v.as_str()))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// Split a comma-separated structure suggestion into section names.
pub fn parse_structure(text: &str) -> Vec<String> {
    text.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

// ── Suggestion board ──────────────────────────────────

#[derive(Debug, Default)]
struct BoardSlot {
    seq: u64,
    suggestions: Vec<String>,
}

/// Shared slot for the latest suggestions, keyed by request sequence.
/// Responses race: the winner is the last request *issued*, not the last
/// response to arrive — an older response landing late is discarded.
#[derive(Default)]
pub struct SuggestionBoard {
    next_seq: AtomicU64,
    slot: Mutex<BoardSlot>,
}

impl SuggestionBoard {
    pub fn new() -> Self {
        SuggestionBoard::default()
    }

    /// Allocate a sequence number for a new request.
    pub fn begin(&self) -> u64 {
        self.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Record a finished request. Returns false (and keeps the slot) when a
    /// newer request already completed.
    pub fn complete(&self, seq: u64, suggestions: Vec<String>) -> bool {
        let mut slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        if seq < slot.seq {
            log::debug!(
                "discarding stale suggestion response {} (latest is {})",
                seq,
                slot.seq
            );
            return false;
        }
        slot.seq = seq;
        slot.suggestions = suggestions;
        true
    }

    pub fn current(&self) -> (u64, Vec<String>) {
        let slot = self.slot.lock().unwrap_or_else(|e| e.into_inner());
        (slot.seq, slot.suggestions.clone())
    }
}
