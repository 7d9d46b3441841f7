use async_trait::async_trait;

use crate::errors::DroidScopeResult;

/// Source of raw hierarchy dumps.
///
/// Returns the complete dump bytes or [`DroidScopeError::Acquisition`].
/// Zero bytes on success means "nothing on screen", not a failure.
///
/// [`DroidScopeError::Acquisition`]: crate::errors::DroidScopeError::Acquisition
#[async_trait]
pub trait CaptureTransport: Send + Sync {
    async fn capture(&self) -> DroidScopeResult<Vec<u8>>;
}
