//! School subjects and grade levels (Vietnamese general education, grades 1-12).

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    Math,
    Literature,
    English,
    Physics,
    Chemistry,
    Biology,
    History,
    Geography,
    Informatics,
    Other,
}

impl Subject {
    pub fn vietnamese_name(&self) -> &'static str {
        match self {
            Subject::Math => "Toán",
            Subject::Literature => "Ngữ văn",
            Subject::English => "Tiếng Anh",
            Subject::Physics => "Vật lý",
            Subject::Chemistry => "Hóa học",
            Subject::Biology => "Sinh học",
            Subject::History => "Lịch sử",
            Subject::Geography => "Địa lý",
            Subject::Informatics => "Tin học",
            Subject::Other => "Môn học khác",
        }
    }
}

/// School grade ("lớp"), 1 through 12.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct GradeLevel(u8);

impl GradeLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 12;

    pub fn new(grade: u8) -> Result<Self, ValidationError> {
        if (Self::MIN..=Self::MAX).contains(&grade) {
            Ok(Self(grade))
        } else {
            Err(ValidationError::out_of_range(
                "grade",
                i64::from(Self::MIN),
                i64::from(Self::MAX),
                i64::from(grade),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Tiểu học (1-5), THCS (6-9) or THPT (10-12).
    pub fn school_level(&self) -> &'static str {
        match self.0 {
            1..=5 => "Tiểu học",
            6..=9 => "Trung học cơ sở",
            _ => "Trung học phổ thông",
        }
    }
}

impl TryFrom<u8> for GradeLevel {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<GradeLevel> for u8 {
    fn from(grade: GradeLevel) -> Self {
        grade.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grade_accepts_one_through_twelve() {
        assert!(GradeLevel::new(1).is_ok());
        assert!(GradeLevel::new(12).is_ok());
        assert!(GradeLevel::new(0).is_err());
        assert!(GradeLevel::new(13).is_err());
    }

    #[test]
    fn grade_school_levels() {
        assert_eq!(GradeLevel::new(5).unwrap().school_level(), "Tiểu học");
        assert_eq!(GradeLevel::new(6).unwrap().school_level(), "Trung học cơ sở");
        assert_eq!(GradeLevel::new(10).unwrap().school_level(), "Trung học phổ thông");
    }

    #[test]
    fn grade_deserialization_validates() {
        assert!(serde_json::from_str::<GradeLevel>("7").is_ok());
        assert!(serde_json::from_str::<GradeLevel>("14").is_err());
    }

    #[test]
    fn subject_uses_snake_case_keys() {
        let s: Subject = serde_json::from_str("\"informatics\"").unwrap();
        assert_eq!(s, Subject::Informatics);
        assert_eq!(s.vietnamese_name(), "Tin học");
    }
}
