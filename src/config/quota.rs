//! Token quota configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::ServiceCalendar;
use crate::domain::quota::{QuotaPolicy, DEFAULT_PARENT_DAILY_LIMIT, DEFAULT_TEACHER_DAILY_LIMIT};

/// Default daily limits for accounts without a paid plan
///
/// A missing limit means unlimited.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotaConfig {
    #[serde(default = "default_parent_limit")]
    pub parent_daily_limit: Option<u32>,

    #[serde(default = "default_teacher_limit")]
    pub teacher_daily_limit: Option<u32>,

    #[serde(default)]
    pub admin_daily_limit: Option<u32>,

    /// Offset of the time zone whose midnight resets usage
    #[serde(default = "default_utc_offset")]
    pub utc_offset_hours: i32,
}

impl QuotaConfig {
    pub fn policy(&self) -> QuotaPolicy {
        QuotaPolicy {
            parent: self.parent_daily_limit,
            teacher: self.teacher_daily_limit,
            admin: self.admin_daily_limit,
        }
    }

    pub fn calendar(&self) -> Result<ServiceCalendar, ValidationError> {
        ServiceCalendar::with_offset_hours(self.utc_offset_hours)
            .map_err(|_| ValidationError::InvalidUtcOffset)
    }

    /// Validate quota configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.calendar()?;
        Ok(())
    }
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            parent_daily_limit: default_parent_limit(),
            teacher_daily_limit: default_teacher_limit(),
            admin_daily_limit: None,
            utc_offset_hours: default_utc_offset(),
        }
    }
}

fn default_parent_limit() -> Option<u32> {
    Some(DEFAULT_PARENT_DAILY_LIMIT)
}

fn default_teacher_limit() -> Option<u32> {
    Some(DEFAULT_TEACHER_DAILY_LIMIT)
}

fn default_utc_offset() -> i32 {
    7
}
