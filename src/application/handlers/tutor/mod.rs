//! Tutoring handlers: AI tutor chat and teacher content generation.
//!
//! Both flows share the same metering: admit on estimate, call the
//! provider, charge the reported usage.

mod errors;
mod generate_content;
mod send_chat_message;

pub use errors::TutorError;
pub use generate_content::{GenerateContentCommand, GenerateContentHandler, GenerateContentResult};
pub use send_chat_message::{SendChatMessageCommand, SendChatMessageHandler, SendChatMessageResult};
