//! Tutoring module - AI tutor chat and teacher content generation.

pub mod chat;
pub mod generation;
pub mod subject;

pub use chat::{
    tutor_system_prompt, ChatRole, ChatTranscript, ChatTurn, MAX_HISTORY_TURNS, MAX_MESSAGE_CHARS,
};
pub use generation::{ContentKind, Difficulty, GenerationRequest};
pub use subject::{GradeLevel, Subject};
