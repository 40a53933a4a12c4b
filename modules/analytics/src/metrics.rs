use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGaugeVec, Opts, Registry, TextEncoder,
};

#[derive(Clone)]
pub struct Metrics {
    registry: Registry,

    pub analytics_events_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub dep_up: IntGaugeVec,
}

impl Metrics {
    pub fn new() -> Self {
        let registry = Registry::new();

        let analytics_events_total = IntCounterVec::new(
            Opts::new("analytics_events_total", "Analytics submissions by outcome"),
            &["result"], // stored|invalid|error
        )
        .expect("metric");

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new("http_request_duration_seconds", "HTTP request duration seconds"),
            &["path", "method", "status"],
        )
        .expect("metric");

        let dep_up = IntGaugeVec::new(
            Opts::new("analytics_dependency_up", "Dependency up gauge"),
            &["dep"], // store
        )
        .expect("metric");

        registry
            .register(Box::new(analytics_events_total.clone()))
            .expect("register");
        registry
            .register(Box::new(http_request_duration_seconds.clone()))
            .expect("register");
        registry.register(Box::new(dep_up.clone())).expect("register");

        Self {
            registry,
            analytics_events_total,
            http_request_duration_seconds,
            dep_up,
        }
    }

    pub fn render(&self) -> Result<String, String> {
        let encoder = TextEncoder::new();
        let mf = self.registry.gather();
        let mut buf = Vec::new();
        encoder.encode(&mf, &mut buf).map_err(|e| e.to_string())?;
        String::from_utf8(buf).map_err(|e| e.to_string())
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_counters() {
        let metrics = Metrics::new();
        metrics
            .analytics_events_total
            .with_label_values(&["stored"])
            .inc();

        let body = metrics.render().unwrap();
        assert!(body.contains("analytics_events_total{result=\"stored\"} 1"));
    }
}
