//! HTTP adapter for the AI tutor and teacher content generation.
//!
//! - `POST /api/chat` - Send a message to the tutor
//! - `POST /api/teacher/generate` - Generate exercises, lesson plans or tests

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::tutor_routes;
