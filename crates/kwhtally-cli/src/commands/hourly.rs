use kwhtally_core::{DateInterval, HourlyRecord, SeriesKind, TibberAdapter};
use serde::Serialize;
use serde_json::Value;

use crate::cli::HourlyArgs;
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct HourlyResponseData {
    series: SeriesKind,
    interval: DateInterval,
    records: Vec<HourlyRecord>,
}

pub async fn run(args: &HourlyArgs, adapter: &TibberAdapter) -> Result<Value, CliError> {
    let series = SeriesKind::from(args.series);
    let request = args.range.to_request()?;
    let (interval, records) = adapter.fetch_range(series, &request).await?;

    Ok(serde_json::to_value(HourlyResponseData {
        series,
        interval,
        records,
    })?)
}
