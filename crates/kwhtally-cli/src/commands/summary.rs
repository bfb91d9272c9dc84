use kwhtally_core::{
    resolve, DateInterval, EnergySummary, PeakOffPeakAggregator, SeriesKind, TibberAdapter,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::RangeArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct SummaryResponseData {
    interval: DateInterval,
    #[serde(flatten)]
    summary: EnergySummary,
}

pub async fn run(range: &RangeArgs, adapter: &TibberAdapter) -> Result<Value, CliError> {
    let request = range.to_request()?;
    adapter.config().validate()?;
    // Resolve once so both series cover the same window.
    let interval = resolve(&request)?;

    let (consumption, production) = tokio::try_join!(
        adapter.fetch_hourly(SeriesKind::Consumption, &interval),
        adapter.fetch_hourly(SeriesKind::Production, &interval),
    )?;

    let aggregator = PeakOffPeakAggregator::default();
    let summary = EnergySummary::combine(
        aggregator.aggregate(&consumption, SeriesKind::Consumption),
        aggregator.aggregate(&production, SeriesKind::Production),
    )?;
    tracing::info!(
        %interval,
        consumption_records = consumption.len(),
        production_records = production.len(),
        "aggregated summary"
    );

    Ok(serde_json::to_value(SummaryResponseData { interval, summary })?)
}
