//! Services for business logic operations
//!
//! Services sit between the caller and the repositories and own the
//! decision-making. Storage is only ever touched through the repository
//! traits.

pub mod token;

pub use token::TokenService;
