//! # Retoken
//!
//! Retoken is a session-credential cache for Rust applications. It sits
//! between your login client and a durable key-value store, keeping one
//! reusable bearer token per account so a process restart can pick up an
//! existing session instead of performing a full credential login.
//!
//! Before a login attempt, ask the cache for a reusable token; after a
//! successful login, save the newly issued token; when the login service
//! rejects the stored token, invalidate it so the next attempt starts
//! fresh.
//!
//! The cache inspects the token's embedded `exp` claim to judge freshness.
//! It never mints tokens and never verifies signatures — the signing
//! authority is the external login service.
//!
//! ## Storage Support
//!
//! Retoken currently ships a SQLite backend; any store implementing
//! [`TokenRepository`] works.
//!
//! ## Example
//!
//! ```rust,no_run
//! use retoken::{AccountId, BearerToken, Retoken, SqliteTokenRepository};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let repository = Arc::new(
//!         SqliteTokenRepository::connect("sqlite://tokens.db")
//!             .await
//!             .unwrap(),
//!     );
//!     repository.migrate().await.unwrap();
//!
//!     let retoken = Retoken::new(repository);
//!     let account = AccountId::new("my-account");
//!
//!     match retoken.get_reusable_token(&account).await {
//!         Some(_token) => { /* log in with the stored token */ }
//!         None => {
//!             // log in with credentials, then persist the new token
//!             let issued = BearerToken::new("header.payload.signature");
//!             let _write = retoken.save_token_detached(&account, &issued);
//!         }
//!     }
//! }
//! ```
use std::sync::Arc;

use retoken_core::{TokenService, repositories::TokenRepository};
use tokio::task::JoinHandle;

/// Re-export core types from retoken_core
///
/// These types are commonly used when working with the Retoken API.
pub use retoken_core::{AccountId, BearerToken, Error, TokenClaims, TokenRecord};

/// Re-export storage backends
///
/// These storage implementations are available when the corresponding feature is enabled.
#[cfg(feature = "sqlite")]
pub use retoken_storage_sqlite::SqliteTokenRepository;

/// The main entry point for the session-credential cache
///
/// Owns the store handle and exposes the three cache operations per
/// account: look up a reusable token, save a newly issued one, invalidate a
/// rejected one.
pub struct Retoken<R: TokenRepository> {
    tokens: TokenService<R>,
}

impl<R: TokenRepository> Retoken<R> {
    /// Create a new Retoken instance on top of a token repository
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            tokens: TokenService::new(repository),
        }
    }

    /// Get the stored token for an account if it is still valid
    ///
    /// Returns `None` when there is no stored token, the stored token has
    /// expired or cannot be decoded, or the store failed to answer — in all
    /// of those cases the caller should perform a credential login.
    pub async fn get_reusable_token(&self, account_id: &AccountId) -> Option<BearerToken> {
        self.tokens.get_reusable_token(account_id).await
    }

    /// Persist a newly issued token for an account, replacing any previous
    /// one
    pub async fn save_token(&self, account_id: &AccountId, token: &BearerToken) -> Result<(), Error> {
        self.tokens.save_token(account_id, token).await
    }

    /// Remove the stored token for an account so the next login uses
    /// credentials
    pub async fn invalidate_token(&self, account_id: &AccountId) -> Result<(), Error> {
        self.tokens.invalidate_token(account_id).await
    }

    /// Persist a token without awaiting the write; failures are logged
    pub fn save_token_detached(
        &self,
        account_id: &AccountId,
        token: &BearerToken,
    ) -> JoinHandle<Result<(), Error>> {
        self.tokens.save_token_detached(account_id, token)
    }

    /// Remove a stored token without awaiting the write; failures are logged
    pub fn invalidate_token_detached(&self, account_id: &AccountId) -> JoinHandle<Result<(), Error>> {
        self.tokens.invalidate_token_detached(account_id)
    }
}
