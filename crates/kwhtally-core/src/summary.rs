use serde::Serialize;

use crate::{AggregateResult, ConfigError, SeriesKind};

/// Consumption netted against production.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NetSummary {
    pub net_cost: f64,
    pub net_energy: f64,
    /// `None` when net energy is exactly zero.
    pub average_price: Option<f64>,
}

/// Both series' aggregates plus the netted figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnergySummary {
    pub consumption: AggregateResult,
    pub production: AggregateResult,
    pub net: NetSummary,
}

impl EnergySummary {
    pub fn combine(
        consumption: AggregateResult,
        production: AggregateResult,
    ) -> Result<Self, ConfigError> {
        if consumption.series != SeriesKind::Consumption {
            return Err(ConfigError::invalid_argument(format!(
                "expected a consumption aggregate, got {}",
                consumption.series
            )));
        }
        if production.series != SeriesKind::Production {
            return Err(ConfigError::invalid_argument(format!(
                "expected a production aggregate, got {}",
                production.series
            )));
        }

        let net_cost = consumption.cost_or_profit_total - production.cost_or_profit_total;
        let net_energy = consumption.total_energy() - production.total_energy();
        let average_price = (net_energy != 0.0).then(|| net_cost / net_energy);

        Ok(Self {
            consumption,
            production,
            net: NetSummary {
                net_cost,
                net_energy,
                average_price,
            },
        })
    }
}
