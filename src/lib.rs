//! # Token Gateway Library
//!
//! Provides functionality for shielding OneMap credentials behind a small
//! HTTP gateway: obtaining an access token on callers' behalf, caching it
//! in a pluggable store with a TTL, and inspecting a bearer token's
//! validity window.
//!
//! Modules:
//! - `config` — service configuration and secret resolution
//! - `cache` — memory and Redis token stores
//! - `upstream` — OneMap authentication client
//! - `parser` — bearer token payload decoding
//! - `server` — axum router, handlers and error envelope

pub mod config;
pub mod cache;
pub mod upstream;
pub mod parser;
pub mod server;
pub mod observability;
pub mod helpers;
pub mod utils;
pub mod tests;

pub use crate::config::settings::ServiceConfig;
pub use crate::parser::claims::decode_claims;
