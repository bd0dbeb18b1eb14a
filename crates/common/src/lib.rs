//! Common utilities and types shared across the room token workspace.

#![warn(clippy::pedantic)]

/// Module for secret types that prevent accidental logging
pub mod secret;

/// Module for media access-token claims, limits and verification
pub mod jwt;
