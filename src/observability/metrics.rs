use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts, Registry};
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::info;

// Declare the static OnceCell to hold the Metrics.
static METRICS_INSTANCE: OnceCell<Arc<Metrics>> = OnceCell::const_new();

/// Asynchronously initializes and gets a reference to the static `Metrics`.
pub async fn get_metrics() -> &'static Arc<Metrics> {
    METRICS_INSTANCE
        .get_or_init(|| async {
            info!("Initializing Metrics ...");
            Metrics::new()
        })
        .await
}

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,

    // Token issuing
    pub token_requests: IntCounterVec,
    pub upstream_requests: IntCounter,
    pub upstream_failures: IntCounterVec,
    pub upstream_duration: HistogramVec,

    // Cache
    pub cache_hits: IntCounter,
    pub cache_misses: IntCounter,

    // Status endpoint
    pub status_checks: IntCounterVec,

    // Runtime
    pub up: IntGauge,
}

impl Metrics {
    fn new() -> Arc<Self> {
        let registry = Registry::new_custom(Some("tokengateway".into()), None).unwrap();

        let metrics: Arc<Metrics> = Arc::new(Self {
            token_requests: IntCounterVec::new(Opts::new("token_requests_total", "Tokens served, by source"), &["source"]).unwrap(),
            upstream_requests: IntCounter::new("upstream_requests_total", "Authentication calls made to OneMap").unwrap(),
            upstream_failures: IntCounterVec::new(Opts::new("upstream_failures_total", "OneMap rejections by status"), &["status"]).unwrap(),
            upstream_duration: HistogramVec::new(HistogramOpts::new("upstream_duration_seconds", "OneMap auth call duration").buckets(vec![0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0]), &["outcome"]).unwrap(),

            cache_hits: IntCounter::new("cache_hits_total", "Token served straight from the store").unwrap(),
            cache_misses: IntCounter::new("cache_misses_total", "Store lookups that fell through to OneMap").unwrap(),

            status_checks: IntCounterVec::new(Opts::new("status_checks_total", "Token status checks by outcome"), &["outcome"]).unwrap(),

            up: IntGauge::new("up", "1 if service is healthy").unwrap(),

            registry,
        });

        // Register all metrics in the registry
        let reg = &metrics.registry;
        reg.register(Box::new(metrics.token_requests.clone())).unwrap();
        reg.register(Box::new(metrics.upstream_requests.clone())).unwrap();
        reg.register(Box::new(metrics.upstream_failures.clone())).unwrap();
        reg.register(Box::new(metrics.upstream_duration.clone())).unwrap();
        reg.register(Box::new(metrics.cache_hits.clone())).unwrap();
        reg.register(Box::new(metrics.cache_misses.clone())).unwrap();
        reg.register(Box::new(metrics.status_checks.clone())).unwrap();
        reg.register(Box::new(metrics.up.clone())).unwrap();

        metrics
    }
}
