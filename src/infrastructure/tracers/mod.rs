#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;

pub mod langsmith;

use crate::domain::models::TracerBox;
use crate::domain::models::TracingConfig;

pub struct TracerManager {}

impl TracerManager {
    /// No tracer is built unless both a key and a project are configured.
    pub fn get(config: &TracingConfig) -> Option<TracerBox> {
        if !config.is_enabled() {
            return None;
        }

        tracing::debug!(project = %config.project, url = %config.url, "Tracing runs to LangSmith");
        return Some(Box::new(langsmith::LangSmith::new(config)));
    }
}
