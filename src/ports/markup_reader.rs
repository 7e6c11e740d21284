//! Markup Reader Port - per-subaccount margins.

use async_trait::async_trait;

use crate::domain::foundation::{AccountId, DomainError};
use crate::domain::pricing::Markup;

/// Port for loading the markup configured for a subaccount.
#[async_trait]
pub trait MarkupReader: Send + Sync {
    /// The account's markup, including carrier overrides.
    async fn markup_for(&self, account: &AccountId) -> Result<Markup, DomainError>;
}
