//! WASM bridge for the chat chart adapter
//!
//! The React chat UI hands over the raw `visualization` JSON (or the whole
//! backend response) and gets normalized chart JSON back. All functions take
//! and return strings so the JS side only deals with `JSON.parse`.

use chat_charts_config::{ConfigFormat, ConfigParser, ConfigValidator, NormalizerConfig};
use chat_charts_normalizer::{ChartSpecNormalizer, ChatResponse};
use chat_charts_shared::ChartKind;
use wasm_bindgen::prelude::*;

/// Normalizer with a configuration the UI can replace at runtime
#[wasm_bindgen]
pub struct ChartNormalizer {
    inner: ChartSpecNormalizer,
}

impl Default for ChartNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl ChartNormalizer {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: ChartSpecNormalizer::default(),
        }
    }

    /// Replace the configuration from JSON
    #[wasm_bindgen]
    pub fn update_config(&mut self, config_json: &str) -> Result<(), JsValue> {
        let config = parse_config(config_json).map_err(|e| JsValue::from_str(&e))?;
        self.inner = ChartSpecNormalizer::new(config);
        log::info!("Normalizer configuration updated");
        Ok(())
    }

    /// Current configuration as JSON
    #[wasm_bindgen]
    pub fn get_config(&self) -> String {
        serde_json::to_string(self.inner.config()).unwrap_or_else(|_| "{}".to_string())
    }

    /// Normalize a visualization payload; errors carry the serialized error
    #[wasm_bindgen]
    pub fn normalize(&self, payload_json: &str) -> Result<String, JsValue> {
        normalize_payload(&self.inner, payload_json).map_err(|e| JsValue::from_str(&e))
    }

    /// Chart outcome for a full backend response body
    #[wasm_bindgen]
    pub fn chart_for_response(&self, response_body: &str) -> String {
        outcome_for_response(&self.inner, response_body)
    }
}

/// Normalize with the default configuration
#[wasm_bindgen]
pub fn normalize_visualization(payload_json: &str) -> Result<String, JsValue> {
    normalize_payload(&ChartSpecNormalizer::default(), payload_json).map_err(|e| JsValue::from_str(&e))
}

/// Chart outcome for a backend response body, default configuration
#[wasm_bindgen]
pub fn chart_for_response(response_body: &str) -> String {
    outcome_for_response(&ChartSpecNormalizer::default(), response_body)
}

/// Chart kinds the adapter accepts, as a JSON array
#[wasm_bindgen]
pub fn supported_kinds() -> String {
    let kinds: Vec<&str> = ChartKind::ALL.iter().map(ChartKind::as_str).collect();
    serde_json::to_string(&kinds).unwrap_or_else(|_| "[]".to_string())
}

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        return;
    }
    log::info!("Chat charts WASM bridge initialized");
}

fn parse_config(config_json: &str) -> Result<NormalizerConfig, String> {
    let config = ConfigParser::parse_string(config_json, ConfigFormat::Json).map_err(|e| e.to_string())?;
    ConfigValidator::validate(&config).map_err(|e| e.to_string())?;
    Ok(config)
}

fn normalize_payload(normalizer: &ChartSpecNormalizer, payload_json: &str) -> Result<String, String> {
    match normalizer.normalize_json(payload_json) {
        Ok(chart) => chart.to_json().map_err(|e| e.to_string()),
        Err(error) => {
            log::warn!("Visualization rejected: {}", error);
            Err(error.to_json())
        }
    }
}

fn outcome_for_response(normalizer: &ChartSpecNormalizer, response_body: &str) -> String {
    let response = ChatResponse::from_json_str(response_body);
    let outcome = response.chart(normalizer);
    serde_json::to_string(&outcome).unwrap_or_else(|_| r#"{"status":"none"}"#.to_string())
}
