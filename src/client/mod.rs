pub mod xai;

use anyhow::Result;
use async_trait::async_trait;

pub use xai::XaiClient;

/// A chat-style model with X search attached.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send one user prompt and return the reply text. A non-empty `handles`
    /// limits the search tool to those accounts.
    async fn chat(&self, prompt: &str, handles: &[String]) -> Result<String>;
}
