//! Repository traits for data access layer
//!
//! This module defines the storage interface the token service uses. Any
//! backend able to find, upsert, and delete one record per account can back
//! the cache.

pub mod token;

pub use token::TokenRepository;
