//! Language-model backends.
//!
//! - [`OpenAi`]: chat-completions HTTP API
//! - [`Mimic`]: offline stand-in that answers with the prompt's own guidance
//! - [`Canned`]: fixed replies, for tests

mod canned;
mod mimic;
mod openai;

pub use canned::*;
pub use mimic::*;
pub use openai::*;

use crate::*;
use std::sync::Arc;

/// Abstraction over chat completion.
/// This decouples agents from any specific model provider.
#[async_trait::async_trait]
pub trait Oracle: Send + Sync {
    /// One stateless completion of `prompt`.
    async fn ask(&self, prompt: &Prompt) -> anyhow::Result<String>;
}

#[async_trait::async_trait]
impl<O> Oracle for Arc<O>
where
    O: Oracle + ?Sized,
{
    async fn ask(&self, prompt: &Prompt) -> anyhow::Result<String> {
        self.as_ref().ask(prompt).await
    }
}

/// The configured live model, or [`Mimic`] when offline.
pub fn oracle(offline: bool) -> anyhow::Result<Arc<dyn Oracle>> {
    if offline {
        log::info!("using offline mimic oracle");
        Ok(Arc::new(Mimic))
    } else {
        let client = OpenAi::from_env()?;
        log::info!("using model {} at {}", client.model(), client.endpoint());
        Ok(Arc::new(client))
    }
}
