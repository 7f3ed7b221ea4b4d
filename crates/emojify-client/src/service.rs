use async_trait::async_trait;

use emojify_types::{EmojiRequest, Result};

// ---------------------------------------------------------------------------
// EmojiService
// ---------------------------------------------------------------------------

/// Anything that can turn a prompt into a block of emojis.
///
/// `generate` resolves to the response's `emojis` payload on success. Failures
/// are `EmojifyError::Network` for transport problems and
/// `EmojifyError::Service` for a non-success HTTP status.
#[async_trait]
pub trait EmojiService: Send + Sync {
    async fn generate(&self, request: &EmojiRequest) -> Result<String>;
    fn endpoint(&self) -> &str;
}

#[async_trait]
impl<S: EmojiService + ?Sized> EmojiService for std::sync::Arc<S> {
    async fn generate(&self, request: &EmojiRequest) -> Result<String> {
        (**self).generate(request).await
    }

    fn endpoint(&self) -> &str {
        (**self).endpoint()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
