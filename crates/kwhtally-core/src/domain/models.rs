use chrono::DateTime;
use chrono_tz::Tz;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::{SeriesKind, ValidationError};

/// One hour of one series, as reported by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyRecord {
    #[serde(rename = "from")]
    pub timestamp: DateTime<Tz>,
    #[serde(rename = "energy")]
    pub energy_value: Option<f64>,
    #[serde(rename = "money")]
    pub cost_or_profit: Option<f64>,
}

impl HourlyRecord {
    pub fn new(
        timestamp: DateTime<Tz>,
        energy_value: Option<f64>,
        cost_or_profit: Option<f64>,
    ) -> Result<Self, ValidationError> {
        if let Some(value) = energy_value {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field: "energy" });
            }
            if value < 0.0 {
                return Err(ValidationError::NegativeValue { field: "energy" });
            }
        }
        if let Some(value) = cost_or_profit {
            if !value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field: "money" });
            }
        }

        Ok(Self {
            timestamp,
            energy_value,
            cost_or_profit,
        })
    }

    /// Energy in kWh, null counted as zero.
    pub fn energy(&self) -> f64 {
        self.energy_value.unwrap_or(0.0)
    }

    /// Cost or profit in currency units, null counted as zero.
    pub fn money(&self) -> f64 {
        self.cost_or_profit.unwrap_or(0.0)
    }
}

/// Peak/off-peak totals for one series over one query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateResult {
    pub series: SeriesKind,
    pub peak_total: f64,
    pub off_peak_total: f64,
    pub cost_or_profit_total: f64,
}

impl AggregateResult {
    pub const fn empty(series: SeriesKind) -> Self {
        Self {
            series,
            peak_total: 0.0,
            off_peak_total: 0.0,
            cost_or_profit_total: 0.0,
        }
    }

    pub fn total_energy(&self) -> f64 {
        self.peak_total + self.off_peak_total
    }
}

// Field names follow the series: peak_consumption/off_peak_consumption/cost
// or peak_production/off_peak_production/profit.
impl Serialize for AggregateResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let (peak, off_peak) = match self.series {
            SeriesKind::Consumption => ("peak_consumption", "off_peak_consumption"),
            SeriesKind::Production => ("peak_production", "off_peak_production"),
        };

        let mut map = serializer.serialize_map(Some(3))?;
        map.serialize_entry(peak, &self.peak_total)?;
        map.serialize_entry(off_peak, &self.off_peak_total)?;
        map.serialize_entry(self.series.money_field(), &self.cost_or_profit_total)?;
        map.end()
    }
}
