use crate::{
    AccountId, Error,
    repositories::TokenRepository,
    token::BearerToken,
};
use chrono::Utc;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Service for the per-account token cache
///
/// Holds the store handle and orchestrates the reuse decision: fetch the
/// stored record, decode its expiry claim, and judge freshness. This is the
/// only component with side effects; decoding and validity are pure.
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
}

impl<R: TokenRepository> TokenService<R> {
    /// Create a new TokenService with the given repository
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Look up the stored token for an account and return it if it is still
    /// valid.
    ///
    /// Infallible by signature: every failure (store I/O, malformed token)
    /// is logged and degrades to `None`, so the caller can uniformly fall
    /// back to a fresh login. `None` therefore means "log in with
    /// credentials", `Some` means "reuse the session".
    pub async fn get_reusable_token(&self, account_id: &AccountId) -> Option<BearerToken> {
        let record = match self.repository.find_by_account(account_id).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    account = %account_id,
                    error = %e,
                    "Failed to check for an existing token, getting a new session. Please report this issue if it keeps occurring"
                );
                return None;
            }
        };

        let Some(record) = record else {
            tracing::info!(
                account = %account_id,
                "No stored token found, logging in with credentials to get a new session"
            );
            return None;
        };

        let claims = match record.token.decode_claims() {
            Ok(claims) => claims,
            Err(e) => {
                // Leave the record in place: the next successful login will
                // overwrite it through the upsert anyway.
                tracing::warn!(
                    account = %account_id,
                    error = %e,
                    "Failed to decode the stored token, getting a new session. Please report this issue if it keeps occurring"
                );
                return None;
            }
        };

        if claims.is_valid_at(Utc::now()) {
            tracing::info!(
                account = %account_id,
                valid_until = %claims.expires_at(),
                "Found valid stored token, logging in with it to reuse the session"
            );
            Some(record.token)
        } else {
            tracing::info!(
                account = %account_id,
                expired_at = %claims.expires_at(),
                "Found expired stored token, logging in with credentials to get a new session"
            );
            None
        }
    }

    /// Store a newly issued token for an account, overwriting any previous
    /// one
    pub async fn save_token(&self, account_id: &AccountId, token: &BearerToken) -> Result<(), Error> {
        tracing::debug!(account = %account_id, "Updating stored token");
        self.repository.upsert(account_id, token).await
    }

    /// Remove the stored token for an account
    ///
    /// Intended to be called when the login service rejects the stored
    /// token, so the next attempt performs a credential login. Calling this
    /// for an account with no record is a no-op.
    pub async fn invalidate_token(&self, account_id: &AccountId) -> Result<(), Error> {
        tracing::debug!(account = %account_id, "Removing stored token");
        self.repository.delete_all(account_id).await
    }

    /// Fire-and-forget variant of [`save_token`](Self::save_token)
    ///
    /// The write runs on a detached task so the login flow never blocks on
    /// persistence. Failures are logged at WARN; the returned handle also
    /// resolves to the outcome for callers that want to observe it.
    pub fn save_token_detached(
        &self,
        account_id: &AccountId,
        token: &BearerToken,
    ) -> JoinHandle<Result<(), Error>> {
        let repository = self.repository.clone();
        let account_id = account_id.clone();
        let token = token.clone();

        tokio::spawn(async move {
            tracing::debug!(account = %account_id, "Updating stored token");
            let result = repository.upsert(&account_id, &token).await;
            if let Err(ref e) = result {
                tracing::warn!(account = %account_id, error = %e, "Failed to save token");
            }
            result
        })
    }

    /// Fire-and-forget variant of [`invalidate_token`](Self::invalidate_token)
    pub fn invalidate_token_detached(&self, account_id: &AccountId) -> JoinHandle<Result<(), Error>> {
        let repository = self.repository.clone();
        let account_id = account_id.clone();

        tokio::spawn(async move {
            tracing::debug!(account = %account_id, "Removing stored token");
            let result = repository.delete_all(&account_id).await;
            if let Err(ref e) = result {
                tracing::warn!(account = %account_id, error = %e, "Failed to invalidate token");
            }
            result
        })
    }
}
