pub mod llm;
pub mod traits;
pub mod types;

pub use llm::LlmPolisher;
pub use traits::{NoopPolisher, ReplyPolisher};
pub use types::PolishConfig;

use anyhow::Result;
use tracing::info;

/// Pick the backend for a config: the rewrite service when a key is set, otherwise none
pub fn from_config(config: PolishConfig) -> Result<Box<dyn ReplyPolisher>> {
    let polisher: Box<dyn ReplyPolisher> = match config.api_key.clone().filter(|k| !k.is_empty()) {
        Some(key) => Box::new(LlmPolisher::new(key, config)?),
        None => Box::new(NoopPolisher),
    };
    info!("Reply polishing backend: {}", polisher.backend_name());
    Ok(polisher)
}
