//! CorrectionClient trait for grammar and spelling correction providers.

use crate::error::Result;
use async_trait::async_trait;

/// A provider that corrects grammar and spelling in a piece of text.
///
/// Implementations encapsulate transport and vendor-specific details so the
/// engine stays independent of any particular service.
#[async_trait]
pub trait CorrectionClient: Send + Sync {
    /// Correct grammar and spelling in `text`.
    ///
    /// Blank input is returned unchanged without contacting the provider.
    /// `Ok(None)` means the provider produced nothing but did not fail.
    async fn correct_text(&self, text: &str) -> Result<Option<String>>;

    /// Return the name of this client for logging.
    fn name(&self) -> &str;
}

#[async_trait]
impl<T: CorrectionClient + ?Sized> CorrectionClient for std::sync::Arc<T> {
    async fn correct_text(&self, text: &str) -> Result<Option<String>> {
        (**self).correct_text(text).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
