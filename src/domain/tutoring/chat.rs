//! Tutor chat transcript.

use serde::{Deserialize, Serialize};

use super::{GradeLevel, Subject};
use crate::domain::foundation::ValidationError;

/// Most recent turns forwarded to the model; older ones are dropped.
pub const MAX_HISTORY_TURNS: usize = 20;
pub const MAX_MESSAGE_CHARS: usize = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

impl ChatTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Validated conversation ending with the new user message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTranscript {
    turns: Vec<ChatTurn>,
}

impl ChatTranscript {
    pub fn new(history: Vec<ChatTurn>, message: impl Into<String>) -> Result<Self, ValidationError> {
        let message = message.into().trim().to_string();
        check_content("message", &message)?;

        let mut turns: Vec<ChatTurn> = Vec::with_capacity(history.len().min(MAX_HISTORY_TURNS) + 1);
        let skip = history.len().saturating_sub(MAX_HISTORY_TURNS);
        for turn in history.into_iter().skip(skip) {
            check_content("history", &turn.content)?;
            turns.push(turn);
        }
        turns.push(ChatTurn::user(message));

        Ok(Self { turns })
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    /// The new user message.
    pub fn latest(&self) -> &str {
        self.turns.last().map(|t| t.content.as_str()).unwrap_or_default()
    }

    /// Concatenated text, used for token estimation.
    pub fn text(&self) -> String {
        self.turns
            .iter()
            .map(|t| t.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn check_content(field: &str, content: &str) -> Result<(), ValidationError> {
    if content.trim().is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    let len = content.chars().count();
    if len > MAX_MESSAGE_CHARS {
        return Err(ValidationError::out_of_range(
            field,
            1,
            MAX_MESSAGE_CHARS as i64,
            len as i64,
        ));
    }
    Ok(())
}

/// System instruction for the tutor persona.
pub fn tutor_system_prompt(subject: Option<Subject>, grade: Option<GradeLevel>) -> String {
    let mut prompt = String::from(
        "Bạn là gia sư AI cho học sinh Việt Nam. Trả lời bằng tiếng Việt, \
         giải thích từng bước, dùng ví dụ phù hợp lứa tuổi. \
         Không đưa ngay đáp án cuối cùng; hãy gợi ý để học sinh tự suy nghĩ.",
    );
    if let Some(subject) = subject {
        prompt.push_str(&format!(" Môn học: {}.", subject.vietnamese_name()));
    }
    if let Some(grade) = grade {
        prompt.push_str(&format!(
            " Học sinh lớp {} ({}).",
            grade.value(),
            grade.school_level()
        ));
    }
    prompt
}
