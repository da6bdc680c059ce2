use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    extract::{MatchedPath, Request, State},
    http::Method,
    middleware::Next,
    response::Response,
};
use dashmap::DashMap;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::info;

pub const HTTP_REQUESTS_TOTAL: &str = "http_requests_total";
pub const HTTP_REQUEST_DURATION_MS: &str = "http_request_duration_ms";

pub type Labels<'a> = &'a [(&'a str, &'a str)];

pub trait MetricsSink: Send + Sync + 'static {
    fn incr_counter(&self, name: &str, value: u64, labels: Labels<'_>);
    fn observe_duration_ms(&self, name: &str, duration_ms: u64, labels: Labels<'_>);
}

/// Point-in-time copy of everything an [`InMemoryMetrics`] has seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: Vec<CounterSample>,
    pub durations: Vec<DurationSample>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CounterSample {
    pub key: String,
    pub value: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DurationSample {
    pub key: String,
    pub sum_ms: u64,
    pub count: u64,
}

#[derive(Default)]
pub struct InMemoryMetrics {
    counters: DashMap<String, u64>,
    duration_sum_ms: DashMap<String, u64>,
    duration_count: DashMap<String, u64>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self, key: &str) -> u64 {
        self.counters.get(key).map_or(0, |v| *v.value())
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let mut counters: Vec<_> = self
            .counters
            .iter()
            .map(|entry| CounterSample {
                key: entry.key().clone(),
                value: *entry.value(),
            })
            .collect();
        counters.sort_by(|a, b| a.key.cmp(&b.key));

        let mut durations = Vec::new();
        for item in &self.duration_sum_ms {
            let key = item.key().clone();
            let count = self.duration_count.get(&key).map_or(0, |v| *v.value());
            durations.push(DurationSample {
                key,
                sum_ms: *item.value(),
                count,
            });
        }
        durations.sort_by(|a, b| a.key.cmp(&b.key));

        MetricsSnapshot {
            counters,
            durations,
        }
    }
}

impl MetricsSink for InMemoryMetrics {
    fn incr_counter(&self, name: &str, value: u64, labels: Labels<'_>) {
        let key = format_metric_key(name, labels);
        self.counters
            .entry(key)
            .and_modify(|v| *v = v.saturating_add(value))
            .or_insert(value);
    }

    fn observe_duration_ms(&self, name: &str, duration_ms: u64, labels: Labels<'_>) {
        let key = format_metric_key(name, labels);

        self.duration_sum_ms
            .entry(key.clone())
            .and_modify(|v| *v = v.saturating_add(duration_ms))
            .or_insert(duration_ms);

        self.duration_count
            .entry(key)
            .and_modify(|v| *v = v.saturating_add(1))
            .or_insert(1);
    }
}

/// Axum middleware recording one counter and one duration per request.
///
/// Routes are labelled by their matched pattern (`/todos/{id}`), not the raw
/// path, and extension methods share one label, so label cardinality stays
/// bounded.
pub async fn track_requests(
    State(metrics): State<Arc<InMemoryMetrics>>,
    request: Request,
    next: Next,
) -> Response {
    let method = method_label(request.method());
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let start = Instant::now();
    let response = next.run(request).await;
    let status = response.status().as_u16().to_string();

    metrics.incr_counter(
        HTTP_REQUESTS_TOTAL,
        1,
        &[
            ("method", method),
            ("route", route.as_str()),
            ("status", status.as_str()),
        ],
    );
    metrics.observe_duration_ms(
        HTTP_REQUEST_DURATION_MS,
        elapsed_ms(start),
        &[("method", method), ("route", route.as_str())],
    );

    response
}

const STANDARD_METHODS: [&str; 9] = [
    "GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

/// Label for a request method; anything outside the standard set is `other`.
pub fn method_label(method: &Method) -> &'static str {
    STANDARD_METHODS
        .into_iter()
        .find(|standard| *standard == method.as_str())
        .unwrap_or("other")
}

pub fn spawn_metrics_log_reporter(
    metrics: Arc<InMemoryMetrics>,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;

            let snapshot = metrics.snapshot();
            if !snapshot.counters.is_empty() {
                info!(counters = ?snapshot.counters, "metrics.counters");
            }
            if !snapshot.durations.is_empty() {
                info!(durations = ?snapshot.durations, "metrics.durations");
            }
        }
    })
}

pub fn format_metric_key(name: &str, labels: Labels<'_>) -> String {
    if labels.is_empty() {
        return name.to_string();
    }

    let mut labels_vec: Vec<_> = labels.iter().map(|(k, v)| (*k, *v)).collect();
    labels_vec.sort_by(|a, b| a.0.cmp(b.0));

    let mut out = String::with_capacity(name.len() + labels_vec.len() * 12);
    out.push_str(name);
    out.push('{');

    for (idx, (k, v)) in labels_vec.iter().enumerate() {
        if idx > 0 {
            out.push(',');
        }
        out.push_str(k);
        out.push('=');
        out.push_str(v);
    }

    out.push('}');
    out
}

pub fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
