//! Teaching content generation (exercises, lesson plans, tests).

use serde::{Deserialize, Serialize};

use super::{GradeLevel, Subject};
use crate::domain::foundation::ValidationError;

pub const MAX_TOPIC_CHARS: usize = 200;
pub const MIN_QUESTIONS: u32 = 1;
pub const MAX_QUESTIONS: u32 = 50;
pub const MIN_DURATION_MINUTES: u32 = 5;
pub const MAX_DURATION_MINUTES: u32 = 180;

const DEFAULT_QUESTIONS: u32 = 10;
const DEFAULT_DURATION_MINUTES: u32 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Exercise,
    LessonPlan,
    Test,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Exercise => "exercise",
            ContentKind::LessonPlan => "lesson_plan",
            ContentKind::Test => "test",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn vietnamese_name(&self) -> &'static str {
        match self {
            Difficulty::Easy => "dễ",
            Difficulty::Medium => "trung bình",
            Difficulty::Hard => "khó",
        }
    }
}

/// Validated generation request.
///
/// Exercises and tests carry a question count, lesson plans and tests a
/// duration; values that do not apply to a kind are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub kind: ContentKind,
    pub subject: Subject,
    pub grade: GradeLevel,
    pub topic: String,
    pub question_count: Option<u32>,
    pub difficulty: Difficulty,
    pub duration_minutes: Option<u32>,
}

impl GenerationRequest {
    pub fn new(
        kind: ContentKind,
        subject: Subject,
        grade: GradeLevel,
        topic: impl Into<String>,
        question_count: Option<u32>,
        difficulty: Difficulty,
        duration_minutes: Option<u32>,
    ) -> Result<Self, ValidationError> {
        let topic = topic.into().trim().to_string();
        if topic.is_empty() {
            return Err(ValidationError::empty_field("topic"));
        }
        let topic_len = topic.chars().count();
        if topic_len > MAX_TOPIC_CHARS {
            return Err(ValidationError::out_of_range(
                "topic",
                1,
                MAX_TOPIC_CHARS as i64,
                topic_len as i64,
            ));
        }

        let question_count = match kind {
            ContentKind::Exercise | ContentKind::Test => Some(in_range(
                "question_count",
                question_count.unwrap_or(DEFAULT_QUESTIONS),
                MIN_QUESTIONS,
                MAX_QUESTIONS,
            )?),
            ContentKind::LessonPlan => None,
        };

        let duration_minutes = match kind {
            ContentKind::LessonPlan | ContentKind::Test => Some(in_range(
                "duration_minutes",
                duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES),
                MIN_DURATION_MINUTES,
                MAX_DURATION_MINUTES,
            )?),
            ContentKind::Exercise => None,
        };

        Ok(Self {
            kind,
            subject,
            grade,
            topic,
            question_count,
            difficulty,
            duration_minutes,
        })
    }

    /// System instruction for content generation.
    pub fn system_prompt(&self) -> &'static str {
        "Bạn là trợ lý soạn giáo án và đề bài cho giáo viên Việt Nam, \
         bám sát chương trình giáo dục phổ thông. Trả lời bằng tiếng Việt, \
         định dạng Markdown."
    }

    /// User prompt describing what to produce.
    pub fn prompt(&self) -> String {
        let context = format!(
            "môn {}, lớp {}, chủ đề \"{}\", mức độ {}",
            self.subject.vietnamese_name(),
            self.grade.value(),
            self.topic,
            self.difficulty.vietnamese_name(),
        );
        let questions = self.question_count.unwrap_or(DEFAULT_QUESTIONS);
        let minutes = self.duration_minutes.unwrap_or(DEFAULT_DURATION_MINUTES);

        match self.kind {
            ContentKind::Exercise => format!(
                "Soạn {} bài tập ({}). Đánh số từng bài, kèm đáp án và lời giải ngắn ở cuối.",
                questions, context
            ),
            ContentKind::LessonPlan => format!(
                "Soạn giáo án {} phút ({}). Gồm mục tiêu, chuẩn bị, tiến trình dạy học \
                 theo từng hoạt động và phần củng cố, dặn dò.",
                minutes, context
            ),
            ContentKind::Test => format!(
                "Soạn đề kiểm tra {} phút gồm {} câu ({}). Ghi rõ điểm từng câu, \
                 kèm đáp án và hướng dẫn chấm.",
                minutes, questions, context
            ),
        }
    }
}

fn in_range(field: &str, value: u32, min: u32, max: u32) -> Result<u32, ValidationError> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ValidationError::out_of_range(
            field,
            i64::from(min),
            i64::from(max),
            i64::from(value),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(g: u8) -> GradeLevel {
        GradeLevel::new(g).unwrap()
    }

    fn request(kind: ContentKind, questions: Option<u32>, minutes: Option<u32>) -> Result<GenerationRequest, ValidationError> {
        GenerationRequest::new(
            kind,
            Subject::Math,
            grade(7),
            "Phân số",
            questions,
            Difficulty::Medium,
            minutes,
        )
    }

    #[test]
    fn exercise_defaults_question_count() {
        let req = request(ContentKind::Exercise, None, Some(60)).unwrap();
        assert_eq!(req.question_count, Some(10));
        assert_eq!(req.duration_minutes, None);
    }

    #[test]
    fn lesson_plan_defaults_duration() {
        let req = request(ContentKind::LessonPlan, Some(5), None).unwrap();
        assert_eq!(req.duration_minutes, Some(45));
        assert_eq!(req.question_count, None);
    }

    #[test]
    fn test_kind_uses_both_parameters() {
        let req = request(ContentKind::Test, Some(20), Some(90)).unwrap();
        assert_eq!(req.question_count, Some(20));
        assert_eq!(req.duration_minutes, Some(90));
    }

    #[test]
    fn rejects_question_count_out_of_range() {
        assert!(request(ContentKind::Exercise, Some(0), None).is_err());
        assert!(request(ContentKind::Exercise, Some(51), None).is_err());
        assert!(request(ContentKind::Test, Some(50), None).is_ok());
    }

    #[test]
    fn rejects_duration_out_of_range() {
        assert!(request(ContentKind::LessonPlan, None, Some(4)).is_err());
        assert!(request(ContentKind::LessonPlan, None, Some(181)).is_err());
    }

    #[test]
    fn rejects_blank_or_long_topic() {
        let blank = GenerationRequest::new(
            ContentKind::Exercise,
            Subject::Math,
            grade(3),
            "  ",
            None,
            Difficulty::Easy,
            None,
        );
        assert_eq!(blank, Err(ValidationError::empty_field("topic")));

        let long = GenerationRequest::new(
            ContentKind::Exercise,
            Subject::Math,
            grade(3),
            "x".repeat(MAX_TOPIC_CHARS + 1),
            None,
            Difficulty::Easy,
            None,
        );
        assert!(long.is_err());
    }

    #[test]
    fn prompt_reflects_kind_and_parameters() {
        let exercise = request(ContentKind::Exercise, Some(8), None).unwrap().prompt();
        assert!(exercise.contains("Soạn 8 bài tập"));
        assert!(exercise.contains("Phân số"));
        assert!(exercise.contains("lớp 7"));

        let test = request(ContentKind::Test, Some(12), Some(30)).unwrap().prompt();
        assert!(test.contains("30 phút"));
        assert!(test.contains("12 câu"));
    }
}
