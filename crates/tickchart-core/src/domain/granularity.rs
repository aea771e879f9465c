use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::ValidationError;

/// Series granularity offered by the quote provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    Intraday,
    Daily,
    Weekly,
    Monthly,
}

impl Granularity {
    /// Provider `function` code for this granularity.
    pub const fn function_code(self) -> &'static str {
        match self {
            Self::Intraday => "TIME_SERIES_INTRADAY",
            Self::Daily => "TIME_SERIES_DAILY",
            Self::Weekly => "TIME_SERIES_WEEKLY",
            Self::Monthly => "TIME_SERIES_MONTHLY",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Intraday => "intraday",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub const fn is_intraday(self) -> bool {
        matches!(self, Self::Intraday)
    }
}

impl Display for Granularity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Intraday bucket size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntradayInterval {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    #[default]
    SixtyMinutes,
}

impl IntradayInterval {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneMinute => "1min",
            Self::FiveMinutes => "5min",
            Self::FifteenMinutes => "15min",
            Self::ThirtyMinutes => "30min",
            Self::SixtyMinutes => "60min",
        }
    }
}

impl Display for IntradayInterval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IntradayInterval {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "1min" => Ok(Self::OneMinute),
            "5min" => Ok(Self::FiveMinutes),
            "15min" => Ok(Self::FifteenMinutes),
            "30min" => Ok(Self::ThirtyMinutes),
            "60min" => Ok(Self::SixtyMinutes),
            other => Err(ValidationError::InvalidInterval {
                value: other.to_owned(),
            }),
        }
    }
}
