use std::collections::HashMap;
use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::config::TibberConfig;
use crate::http_client::{HttpAuth, HttpClient, HttpRequest, ReqwestHttpClient};
use crate::resolver::{self, RangeRequest};
use crate::{DateInterval, FetchError, HourlyRecord, SeriesKind, LOCAL_TZ};

/// Tibber GraphQL adapter that walks the hourly cursor pagination.
#[derive(Clone)]
pub struct TibberAdapter {
    http_client: Arc<dyn HttpClient>,
    config: TibberConfig,
}

impl TibberAdapter {
    pub fn new(config: TibberConfig) -> Self {
        Self::with_http_client(Arc::new(ReqwestHttpClient::new()), config)
    }

    pub fn with_http_client(http_client: Arc<dyn HttpClient>, config: TibberConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &TibberConfig {
        &self.config
    }

    /// Validates the configuration, resolves `range` and fetches the series.
    pub async fn fetch_range(
        &self,
        series: SeriesKind,
        range: &RangeRequest,
    ) -> Result<(DateInterval, Vec<HourlyRecord>), FetchError> {
        self.config.validate()?;
        let interval = resolver::resolve(range)?;
        let records = self.fetch_hourly(series, &interval).await?;
        Ok((interval, records))
    }

    /// Fetches every hourly record of `series` in `[interval.start, interval.end)`.
    ///
    /// Pages are requested one after another. Every page after the first
    /// repeats the previous page's last node, which is dropped. The walk stops
    /// at the first node at or past the interval end, or when the upstream
    /// reports no further page or hands back an empty cursor.
    pub async fn fetch_hourly(
        &self,
        series: SeriesKind,
        interval: &DateInterval,
    ) -> Result<Vec<HourlyRecord>, FetchError> {
        self.config.validate()?;

        let mut cursor = initial_cursor(interval);
        let mut records: Vec<HourlyRecord> = Vec::new();
        let mut page_number = 0usize;

        loop {
            page_number += 1;
            let page = self.fetch_page(series, &cursor).await?;
            tracing::debug!(
                %series,
                page = page_number,
                nodes = page.nodes.len(),
                has_next_page = page.page_info.has_next_page,
                "fetched page"
            );

            let overlap = usize::from(page_number > 1);
            for node in page.nodes.into_iter().skip(overlap) {
                // Values are only validated for nodes that end up in the result.
                let timestamp = node.timestamp()?;
                if timestamp >= interval.end() {
                    tracing::info!(%series, records = records.len(), pages = page_number, "reached interval end");
                    return Ok(records);
                }
                if timestamp < interval.start() {
                    tracing::debug!(%series, from = %timestamp, "skipping node before interval start");
                    continue;
                }
                records.push(node.into_record(timestamp, series)?);
            }

            match page.page_info.end_cursor.filter(|next| !next.is_empty()) {
                Some(next) if page.page_info.has_next_page => cursor = next,
                _ => break,
            }
        }

        tracing::info!(%series, records = records.len(), pages = page_number, "upstream exhausted");
        Ok(records)
    }

    async fn fetch_page(
        &self,
        series: SeriesKind,
        cursor: &str,
    ) -> Result<TibberConnection, FetchError> {
        let body = json!({ "query": hourly_query(series, cursor, self.config.page_size) });
        let request = HttpRequest::post(&self.config.endpoint)
            .with_auth(&HttpAuth::BearerToken(self.config.api_token.clone()))
            .with_json_body(&body)
            .with_timeout_ms(self.config.timeout_ms);

        let response = self
            .http_client
            .execute(request)
            .await
            .map_err(|error| FetchError::transport(format!("tibber request failed: {}", error.message())))?;

        if !response.is_success() {
            tracing::warn!(status = response.status, body = %response.body, "tibber returned an error status");
            return Err(FetchError::http_status(response.status, response.body));
        }

        decode_page(&response.body, series)
    }
}

/// Cursor for the first page: the interval start as ISO-8601 with offset, base64 encoded.
pub fn initial_cursor(interval: &DateInterval) -> String {
    BASE64.encode(interval.start_rfc3339())
}

/// GraphQL query for one page of hourly nodes after `cursor`.
pub fn hourly_query(series: SeriesKind, cursor: &str, page_size: u32) -> String {
    // A JSON string literal is also a valid GraphQL string literal.
    let after = Value::String(cursor.to_owned());
    format!(
        "{{ viewer {{ homes {{ {series}(resolution: HOURLY, after: {after}, first: {page_size}) \
         {{ nodes {{ from {series} {money} }} pageInfo {{ hasNextPage endCursor }} }} }} }} }}",
        series = series.as_str(),
        money = series.money_field(),
    )
}

fn decode_page(body: &str, series: SeriesKind) -> Result<TibberConnection, FetchError> {
    let envelope: TibberResponse = serde_json::from_str(body)
        .map_err(|error| FetchError::protocol(format!("tibber response is not valid JSON: {error}")))?;

    let upstream_errors = envelope
        .errors
        .iter()
        .map(|error| error.message.as_str())
        .filter(|message| !message.is_empty())
        .collect::<Vec<_>>()
        .join("; ");
    let shape_error = |what: String| {
        if upstream_errors.is_empty() {
            FetchError::protocol(what)
        } else {
            FetchError::protocol(format!("{what}; upstream errors: {upstream_errors}"))
        }
    };

    let data = envelope
        .data
        .filter(|data| !data.is_null())
        .ok_or_else(|| shape_error(String::from("missing 'data'")))?;
    let data: TibberData = serde_json::from_value(data)
        .map_err(|error| shape_error(format!("unexpected 'data' shape: {error}")))?;

    let mut home = data
        .viewer
        .and_then(|viewer| viewer.homes.into_iter().next())
        .ok_or_else(|| shape_error(String::from("no home in 'data.viewer.homes'")))?;

    home.remove(series.as_str())
        .flatten()
        .ok_or_else(|| shape_error(format!("missing '{series}' in first home")))
}

#[derive(Debug, Clone, Deserialize)]
struct TibberResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<TibberGraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberGraphQlError {
    #[serde(default)]
    message: String,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberData {
    viewer: Option<TibberViewer>,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberViewer {
    #[serde(default)]
    homes: Vec<HashMap<String, Option<TibberConnection>>>,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberConnection {
    nodes: Vec<TibberNode>,
    #[serde(rename = "pageInfo")]
    page_info: TibberPageInfo,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberPageInfo {
    #[serde(rename = "hasNextPage", default)]
    has_next_page: bool,
    #[serde(rename = "endCursor")]
    end_cursor: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct TibberNode {
    from: String,
    #[serde(flatten)]
    values: HashMap<String, Option<f64>>,
}

impl TibberNode {
    fn timestamp(&self) -> Result<DateTime<Tz>, FetchError> {
        DateTime::parse_from_rfc3339(&self.from)
            .map(|instant| instant.with_timezone(&LOCAL_TZ))
            .map_err(|_| FetchError::protocol(format!("node timestamp '{}' is not RFC3339", self.from)))
    }

    fn into_record(self, timestamp: DateTime<Tz>, series: SeriesKind) -> Result<HourlyRecord, FetchError> {
        let energy = self.values.get(series.as_str()).copied().flatten();
        let money = self.values.get(series.money_field()).copied().flatten();

        HourlyRecord::new(timestamp, energy, money)
            .map_err(|error| FetchError::protocol(format!("node at {}: {error}", self.from)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, TimeZone};

    use super::*;

    fn interval() -> DateInterval {
        let start = LOCAL_TZ
            .from_local_datetime(
                &NaiveDate::from_ymd_opt(2024, 1, 1)
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
                    .expect("valid"),
            )
            .single()
            .expect("valid");
        DateInterval::new(start, start + chrono::Duration::days(1)).expect("valid interval")
    }

    #[test]
    fn initial_cursor_encodes_start_with_offset() {
        let cursor = initial_cursor(&interval());
        let decoded = BASE64.decode(cursor).expect("valid base64");
        assert_eq!(decoded, b"2024-01-01T00:00:00+01:00");
    }

    #[test]
    fn query_names_series_money_field_and_page_size() {
        let query = hourly_query(SeriesKind::Production, "abc=", 744);
        assert!(query.contains(r#"production(resolution: HOURLY, after: "abc=", first: 744)"#));
        assert!(query.contains("nodes { from production profit }"));
        assert!(query.contains("pageInfo { hasNextPage endCursor }"));
    }

    #[test]
    fn decodes_page_with_null_values() {
        let body = r#"{"data":{"viewer":{"homes":[{"consumption":{
            "nodes":[{"from":"2024-01-01T00:00:00.000+01:00","consumption":null,"cost":0.12}],
            "pageInfo":{"hasNextPage":false,"endCursor":"MQ=="}}}]}}}"#;
        let page = decode_page(body, SeriesKind::Consumption).expect("valid page");
        assert_eq!(page.nodes.len(), 1);
        assert!(!page.page_info.has_next_page);

        let node = page.nodes.into_iter().next().expect("one node");
        let timestamp = node.timestamp().expect("valid timestamp");
        let record = node
            .into_record(timestamp, SeriesKind::Consumption)
            .expect("valid record");
        assert_eq!(record.energy_value, None);
        assert_eq!(record.cost_or_profit, Some(0.12));
    }

    #[test]
    fn surfaces_graphql_errors_when_shape_is_missing() {
        let body = r#"{"data":null,"errors":[{"message":"invalid token"}]}"#;
        let err = decode_page(body, SeriesKind::Consumption).expect_err("must fail");
        assert!(matches!(err, FetchError::Protocol(ref message) if message.contains("invalid token")));
    }

    #[test]
    fn graphql_error_without_message_still_reports_the_shape() {
        let body = r#"{"data":null,"errors":[{"extensions":{"code":"UNAUTHENTICATED"}}]}"#;
        let err = decode_page(body, SeriesKind::Consumption).expect_err("must fail");
        assert!(matches!(err, FetchError::Protocol(ref message) if message.contains("missing 'data'")));
        assert!(!err.to_string().contains("not valid JSON"));
    }

    #[test]
    fn missing_home_is_a_protocol_error() {
        let body = r#"{"data":{"viewer":{"homes":[]}}}"#;
        let err = decode_page(body, SeriesKind::Production).expect_err("must fail");
        assert!(matches!(err, FetchError::Protocol(ref message) if message.contains("no home")));
    }

    #[test]
    fn missing_series_key_names_the_series() {
        let body = r#"{"data":{"viewer":{"homes":[{"consumption":null}]}}}"#;
        let err = decode_page(body, SeriesKind::Production).expect_err("must fail");
        assert!(matches!(err, FetchError::Protocol(ref message) if message.contains("production")));
    }

    #[test]
    fn rejects_non_json_body() {
        let err = decode_page("<html>bad gateway</html>", SeriesKind::Consumption).expect_err("must fail");
        assert_eq!(err.code(), "fetch.protocol");
    }
}
