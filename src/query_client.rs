// Holiday query client: the single outbound call to the holidays endpoint

use crate::filters::{HolidayQuery, HolidayType, Month};
use crate::holiday::HolidayRecord;
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::{StatusCode, Url};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, warn};

// Failures of a single fetch
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("API error: {status_code} - {message}")]
    ApiResponseError { status_code: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Initialization error: {0}")]
    InitError(String),
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;
pub const HOLIDAYS_PATH: &str = "holidays/";

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ClientStats {
    pub requests_sent: usize,
    pub requests_succeeded: usize,
    pub requests_failed: usize,
    pub last_response_time_ms: Option<u64>,
}

// Boundary between the search view and whatever serves holidays
#[async_trait]
pub trait HolidayApi: Send + Sync + 'static {
    async fn fetch_holidays(&self, query: &HolidayQuery) -> Result<Vec<HolidayRecord>, ApiError>;

    // Collapses every failure into an empty list. Callers cannot tell
    // "nothing found" from "request failed" with this one.
    async fn fetch_holidays_or_empty(&self, query: &HolidayQuery) -> Vec<HolidayRecord> {
        match self.fetch_holidays(query).await {
            Ok(holidays) => holidays,
            Err(e) => {
                warn!(error = %e, "Error fetching holidays, returning empty list");
                Vec::new()
            }
        }
    }

    fn stats(&self) -> ClientStats;
}

pub struct QueryClient {
    http: reqwest::Client,
    endpoint: Url,
    timeout_ms: u64,
    stats: Mutex<ClientStats>,
}

impl QueryClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let endpoint = holidays_endpoint(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| ClientError::InitError(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            timeout_ms: config.timeout_ms,
            stats: Mutex::new(ClientStats::default()),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    // Positional form of the call. Empty search text counts as "not set".
    pub async fn fetch(
        &self,
        country: &str,
        year: &str,
        month: Option<Month>,
        search: Option<&str>,
        holiday_type: Option<HolidayType>,
    ) -> Result<Vec<HolidayRecord>, ApiError> {
        let query = HolidayQuery {
            country: country.to_string(),
            year: year.to_string(),
            month,
            search: search.filter(|s| !s.is_empty()).map(str::to_string),
            holiday_type,
        };
        self.fetch_holidays(&query).await
    }

    async fn send(&self, query: &HolidayQuery) -> Result<Vec<HolidayRecord>, ApiError> {
        let response = self
            .http
            .get(self.endpoint.clone())
            .query(&query.query_params())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::ApiResponseError {
                status_code: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ApiError::MalformedResponse(e.to_string()))?;
        parse_holidays(body)
    }

    fn transport_error(&self, error: reqwest::Error) -> ApiError {
        if error.is_timeout() {
            ApiError::Timeout(self.timeout_ms)
        } else {
            ApiError::NetworkError(error.to_string())
        }
    }
}

#[async_trait]
impl HolidayApi for QueryClient {
    async fn fetch_holidays(&self, query: &HolidayQuery) -> Result<Vec<HolidayRecord>, ApiError> {
        debug!(endpoint = %self.endpoint, params = ?query.query_params(), "Fetching holidays");
        self.stats.lock().requests_sent += 1;

        let started = Instant::now();
        let result = self.send(query).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;

        let mut stats = self.stats.lock();
        stats.last_response_time_ms = Some(elapsed_ms);
        match &result {
            Ok(holidays) => {
                stats.requests_succeeded += 1;
                debug!(count = holidays.len(), elapsed_ms, "Received holidays");
            }
            Err(e) => {
                stats.requests_failed += 1;
                warn!(error = %e, elapsed_ms, "Holiday request failed");
            }
        }
        result
    }

    fn stats(&self) -> ClientStats {
        self.stats.lock().clone()
    }
}

pub fn holidays_endpoint(base_url: &str) -> Result<Url, ClientError> {
    let base = format!("{}/", base_url.trim().trim_end_matches('/'));
    Url::parse(&base)
        .and_then(|url| url.join(HOLIDAYS_PATH))
        .map_err(|e| ClientError::ConfigError(format!("invalid base url {:?}: {}", base_url, e)))
}

// The endpoint answers with a bare array. Anything else, including an
// `{"error": ...}` object, is a failed fetch. Elements are taken as they come.
pub fn parse_holidays(body: serde_json::Value) -> Result<Vec<HolidayRecord>, ApiError> {
    match body {
        serde_json::Value::Array(items) => Ok(items.into_iter().map(HolidayRecord::from).collect()),
        other => Err(ApiError::MalformedResponse(format!(
            "expected a JSON array, got {}",
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

// Scripted stand-in for the holidays endpoint
#[cfg(test)]
pub mod mock_api {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub struct MockHolidayApi {
        responses: Mutex<VecDeque<Result<Vec<HolidayRecord>, ApiError>>>,
        queries: Mutex<Vec<HolidayQuery>>,
        call_count: AtomicUsize,
    }

    impl MockHolidayApi {
        pub fn new() -> Self {
            Self {
                responses: Mutex::new(VecDeque::new()),
                queries: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        pub fn respond_with(self, response: Result<Vec<HolidayRecord>, ApiError>) -> Self {
            self.responses.lock().push_back(response);
            self
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        pub fn queries(&self) -> Vec<HolidayQuery> {
            self.queries.lock().clone()
        }
    }

    #[async_trait]
    impl HolidayApi for MockHolidayApi {
        async fn fetch_holidays(
            &self,
            query: &HolidayQuery,
        ) -> Result<Vec<HolidayRecord>, ApiError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().push(query.clone());
            // Unscripted calls behave like an unreachable server
            self.responses
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(ApiError::NetworkError("connection refused".to_string())))
        }

        fn stats(&self) -> ClientStats {
            ClientStats {
                requests_sent: self.call_count(),
                ..Default::default()
            }
        }
    }

    pub fn sample_holidays(count: usize) -> Vec<HolidayRecord> {
        (1..=count)
            .map(|i| {
                HolidayRecord::new(
                    &format!("Holiday {}", i),
                    &format!("2024-{:02}-{:02}", (i % 12) + 1, (i % 28) + 1),
                    "National holiday",
                )
            })
            .collect()
    }
}
