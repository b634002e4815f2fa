use crate::{AccountId, Error, token::{BearerToken, TokenRecord}};
use async_trait::async_trait;

/// Repository for stored token data access
#[async_trait]
pub trait TokenRepository: Send + Sync + 'static {
    /// Find the stored token record for an account
    async fn find_by_account(&self, account_id: &AccountId) -> Result<Option<TokenRecord>, Error>;

    /// Insert or overwrite the stored token for an account
    ///
    /// After this call exactly one live record exists for the account,
    /// holding `token`. Repeating the call with the same token is a no-op.
    async fn upsert(&self, account_id: &AccountId, token: &BearerToken) -> Result<(), Error>;

    /// Delete every record matching an account
    ///
    /// Deliberately a multi-delete so a duplicate-key corrupted store still
    /// ends up clean. Deleting an absent account is not an error.
    async fn delete_all(&self, account_id: &AccountId) -> Result<(), Error>;
}
