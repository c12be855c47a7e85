//! Adapters - Implementations of port interfaces.
//!
//! - `ai` - OpenAI-compatible chat completions, plus a mock
//! - `auth` - Supabase JWT validation, plus a mock
//! - `http` - axum routes, extractors and error mapping
//! - `memory` - in-process repositories for tests and local runs
//! - `postgres` - sqlx repositories

pub mod ai;
pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
