//! Bearer tokens and the reuse decision
//!
//! This module contains the stored token types and the claim decoding used to
//! judge whether a cached token may be presented again instead of performing
//! a fresh login. The persisted record is defined as follows:
//!
//! | Field        | Type        | Description                                  |
//! | ------------ | ----------- | -------------------------------------------- |
//! | `account_id` | `AccountId` | The account the token belongs to.            |
//! | `token`      | `BearerToken` | The opaque bearer-token string as issued.  |

use base64::{Engine, prelude::BASE64_URL_SAFE_NO_PAD};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{account::AccountId, error::TokenError};

/// An opaque bearer token in the compact three-segment form
/// (`header.payload.signature`, each segment base64url encoded).
///
/// The token is issued and signed by the external login service; this cache
/// only reads the unverified payload to inspect the expiry claim. It never
/// mints tokens and never checks the signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BearerToken(String);

impl BearerToken {
    /// Create a bearer token from an existing string
    pub fn new(token: &str) -> Self {
        BearerToken(token.to_string())
    }

    /// Get the inner token string
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Get a reference to the token string
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode the payload segment and extract the claims.
    ///
    /// This is a trust-on-read decode: the payload is parsed without
    /// verifying the signature, which is sufficient for judging freshness of
    /// a token we stored ourselves. Any malformed input is reported as
    /// [`TokenError::Malformed`], never a panic.
    pub fn decode_claims(&self) -> Result<TokenClaims, TokenError> {
        let segments: Vec<&str> = self.0.split('.').collect();
        if segments.len() != 3 {
            return Err(TokenError::Malformed(format!(
                "expected 3 dot-separated segments, found {}",
                segments.len()
            )));
        }

        let payload = BASE64_URL_SAFE_NO_PAD
            .decode(segments[1])
            .map_err(|e| TokenError::Malformed(format!("payload is not valid base64url: {e}")))?;

        serde_json::from_slice(&payload)
            .map_err(|e| TokenError::Malformed(format!("payload is not a valid claims object: {e}")))
    }
}

impl From<String> for BearerToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for BearerToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Claims extracted from a token payload
///
/// Only `exp` participates in the reuse decision; the other fields are
/// carried for log context when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Expiration time in seconds (as UTC timestamp)
    pub exp: i64,
    /// Issued at in seconds (as UTC timestamp)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    /// Subject the token was issued to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

impl TokenClaims {
    /// Whether the token is still usable at `now`.
    ///
    /// Strict comparison: a token expiring exactly at `now` counts as
    /// expired, preferring a fresh login over a token dying this instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.exp.saturating_mul(1000) > now.timestamp_millis()
    }

    /// The expiry instant, for log messages
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// The persisted cache entry: one token per account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRecord {
    /// The account the token belongs to.
    pub account_id: AccountId,

    /// The stored bearer token, exactly as issued.
    pub token: BearerToken,
}
