//! Paid plans.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// A 30-day plan bought by bank transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Basic,
    Premium,
}

impl Plan {
    pub const ALL: [Plan; 2] = [Plan::Basic, Plan::Premium];

    pub fn code(&self) -> &'static str {
        match self {
            Plan::Basic => "basic",
            Plan::Premium => "premium",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Plan::Basic => "Gói Cơ bản",
            Plan::Premium => "Gói Nâng cao",
        }
    }

    /// Price in Vietnamese đồng.
    pub fn price_vnd(&self) -> i64 {
        match self {
            Plan::Basic => 99_000,
            Plan::Premium => 199_000,
        }
    }

    pub fn duration_days(&self) -> i64 {
        30
    }

    pub fn daily_token_limit(&self) -> u32 {
        match self {
            Plan::Basic => 100_000,
            Plan::Premium => 300_000,
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Plan {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "basic" => Ok(Plan::Basic),
            "premium" => Ok(Plan::Premium),
            other => Err(ValidationError::invalid_format(
                "plan",
                format!("unknown plan '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn premium_costs_more_and_allows_more() {
        assert!(Plan::Premium.price_vnd() > Plan::Basic.price_vnd());
        assert_eq!(Plan::Basic.daily_token_limit(), 100_000);
        assert_eq!(Plan::Premium.daily_token_limit(), 300_000);
    }

    #[test]
    fn plans_last_thirty_days() {
        for plan in Plan::ALL {
            assert_eq!(plan.duration_days(), 30);
        }
    }

    #[test]
    fn parses_codes() {
        assert_eq!("premium".parse::<Plan>().unwrap(), Plan::Premium);
        assert!("gold".parse::<Plan>().is_err());
    }
}
