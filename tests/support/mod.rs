//! Scripted transport and page builders shared by the integration tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::Tz;
use kwhtally_core::{
    DateInterval, HttpClient, HttpError, HttpRequest, HttpResponse, SeriesKind, TibberAdapter,
    TibberConfig, LOCAL_TZ,
};
use serde_json::{json, Value};

/// Replays canned responses in order and records every request it receives.
#[derive(Default)]
pub struct ScriptedHttpClient {
    responses: Mutex<VecDeque<Result<HttpResponse, HttpError>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedHttpClient {
    pub fn new(responses: Vec<Result<HttpResponse, HttpError>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn with_pages(pages: Vec<Value>) -> Arc<Self> {
        Self::new(
            pages
                .into_iter()
                .map(|page| Ok(HttpResponse::ok_json(page.to_string())))
                .collect(),
        )
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().expect("requests lock").len()
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().expect("requests lock").clone()
    }

    /// The GraphQL query text of the n-th request.
    pub fn query(&self, index: usize) -> String {
        let request = &self.requests()[index];
        let body: Value =
            serde_json::from_str(request.body.as_deref().expect("request body")).expect("json body");
        body["query"].as_str().expect("query string").to_owned()
    }
}

impl HttpClient for ScriptedHttpClient {
    fn execute<'a>(
        &'a self,
        request: HttpRequest,
    ) -> Pin<Box<dyn Future<Output = Result<HttpResponse, HttpError>> + Send + 'a>> {
        Box::pin(async move {
            self.requests.lock().expect("requests lock").push(request);
            self.responses
                .lock()
                .expect("responses lock")
                .pop_front()
                .unwrap_or_else(|| Err(HttpError::new("script exhausted")))
        })
    }
}

pub fn adapter(client: Arc<ScriptedHttpClient>) -> TibberAdapter {
    TibberAdapter::with_http_client(client, TibberConfig::new("test-token"))
}

pub fn local(y: i32, m: u32, d: u32, h: u32) -> DateTime<Tz> {
    LOCAL_TZ
        .with_ymd_and_hms(y, m, d, h, 0, 0)
        .single()
        .expect("valid local time")
}

pub fn interval(start: DateTime<Tz>, end: DateTime<Tz>) -> DateInterval {
    DateInterval::new(start, end).expect("valid interval")
}

/// One response page of `count` consecutive hourly nodes beginning at `first`.
pub fn page(
    series: SeriesKind,
    first: DateTime<Tz>,
    count: usize,
    has_next_page: bool,
    end_cursor: Option<&str>,
) -> Value {
    let nodes = (0..count)
        .map(|offset| {
            let from = first + Duration::hours(offset as i64);
            json!({
                "from": from.to_rfc3339(),
                series.as_str(): 0.5 + (offset % 4) as f64 * 0.25,
                series.money_field(): 0.1,
            })
        })
        .collect::<Vec<_>>();

    json!({
        "data": {
            "viewer": {
                "homes": [{
                    series.as_str(): {
                        "nodes": nodes,
                        "pageInfo": {
                            "hasNextPage": has_next_page,
                            "endCursor": end_cursor,
                        }
                    }
                }]
            }
        }
    })
}
