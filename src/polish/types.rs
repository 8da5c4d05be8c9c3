use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "openrouter/auto";

/// Rewrite service parameters
#[derive(Debug, Clone)]
pub struct PolishConfig {
    /// Bearer credential; the service is skipped when absent
    pub api_key: Option<String>,
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    /// Upper bound on one rewrite call
    pub timeout: Duration,
}

impl Default for PolishConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 200,
            temperature: 0.3,
            timeout: Duration::from_secs(10),
        }
    }
}
