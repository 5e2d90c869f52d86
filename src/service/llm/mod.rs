pub mod gemini;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::Res;

// Traits.

/// Generic LLM client trait that clients must implement.
///
/// This trait defines the core functionality for interacting with a generative
/// language model. Implementing this trait allows different providers to be used
/// with the helpdesk-bot.
#[async_trait]
pub trait GenericLlmClient: Send + Sync + 'static {
    /// Generate a single completion for a single text prompt.
    ///
    /// There is no streaming and no multi-turn context: one prompt in, one
    /// completion out. Any transport, status, or parsing problem is an error.
    async fn generate(&self, prompt: &str) -> Res<String>;
}

// Structs.

/// LLM client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct LlmClient {
    inner: Arc<dyn GenericLlmClient>,
}

impl Deref for LlmClient {
    type Target = dyn GenericLlmClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl LlmClient {
    pub fn new(inner: Arc<dyn GenericLlmClient>) -> Self {
        Self { inner }
    }
}
