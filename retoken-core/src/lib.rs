//! Core functionality for the retoken session-credential cache
//!
//! This crate contains the storage-agnostic pieces of the cache: the bearer
//! token types and claim decoding, the repository trait any backend must
//! satisfy, and the [`TokenService`] that decides whether a stored token may
//! be reused or a fresh login is required.
//!
//! It is designed to be used through a storage backend crate and the
//! `retoken` facade rather than directly by application code.
//!
//! See [`BearerToken`] for the token type, [`TokenService`] for the cache
//! operations, and [`repositories::TokenRepository`] for the storage
//! contract.

pub mod account;
pub mod error;
pub mod repositories;
pub mod services;
pub mod token;

pub use account::AccountId;
pub use error::Error;
pub use services::TokenService;
pub use token::{BearerToken, TokenClaims, TokenRecord};
