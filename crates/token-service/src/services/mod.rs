//! Business logic layer.

pub mod token_issuer;

pub use token_issuer::TokenIssuer;
