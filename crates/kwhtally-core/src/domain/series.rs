use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Hourly quantity measured by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Consumption,
    Production,
}

impl SeriesKind {
    /// Field name of the series in upstream queries and responses.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Consumption => "consumption",
            Self::Production => "production",
        }
    }

    /// Money field paired with the series: consumption costs, production pays out.
    pub const fn money_field(self) -> &'static str {
        match self {
            Self::Consumption => "cost",
            Self::Production => "profit",
        }
    }
}

impl Display for SeriesKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeriesKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "consumption" => Ok(Self::Consumption),
            "production" => Ok(Self::Production),
            other => Err(ConfigError::InvalidSeries {
                value: other.to_owned(),
            }),
        }
    }
}
