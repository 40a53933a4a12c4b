//! The emitter handle.
//!
//! [`Emitter`] is the whole callable surface other code sees. [`Analytics`]
//! is the real implementation, created by [`Analytics::init`] and passed
//! explicitly to whoever needs to emit. [`NoopEmitter`] stands in when
//! analytics is switched off.

use analytics_contracts::{events, EventPayload};
use chrono::{SecondsFormat, Utc};
use serde_json::{json, Map, Value};
use std::sync::Arc;

use crate::config::AnalyticsConfig;
use crate::context::PageContext;
use crate::delivery::Delivery;

pub trait Emitter: Send + Sync {
    /// Build a payload for `event` with optional `data` and hand it to delivery
    ///
    /// Never blocks and never fails from the caller's point of view.
    fn track(&self, event: &str, data: Option<Value>);

    /// Track a `page_view` carrying the page title and URL
    fn page_view(&self);

    /// Track a named custom event
    ///
    /// Sent as `event: "event"` with `data: {"name": name, "properties": ..}`;
    /// missing properties become an empty object.
    fn event(&self, name: &str, properties: Option<Map<String, Value>>) {
        self.track(
            events::EVENT,
            Some(json!({
                "name": name,
                "properties": properties.unwrap_or_default(),
            })),
        );
    }
}

/// Emitter that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl Emitter for NoopEmitter {
    fn track(&self, _event: &str, _data: Option<Value>) {}

    fn page_view(&self) {}
}

#[derive(Clone)]
pub struct Analytics {
    endpoint: Arc<str>,
    page: Arc<dyn PageContext>,
    delivery: Delivery,
}

impl Analytics {
    /// Create the emitter and record the initial page view
    pub fn init(config: &AnalyticsConfig, page: Arc<dyn PageContext>, delivery: Delivery) -> Self {
        let analytics = Self {
            endpoint: Arc::from(config.endpoint.as_str()),
            page,
            delivery,
        };

        tracing::debug!(endpoint = %analytics.endpoint, beacon = analytics.delivery.has_beacon(), "analytics initialised");
        analytics.page_view();
        analytics
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Payload for `event`, stamped now with the page's ambient context
    pub fn build_payload(&self, event: &str, data: Option<Value>) -> EventPayload {
        let payload = EventPayload::new(event, Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
            .with_context(self.page.path(), self.page.referrer(), self.page.user_agent());

        match data {
            Some(data) => payload.with_data(data),
            None => payload,
        }
    }
}

impl Emitter for Analytics {
    fn track(&self, event: &str, data: Option<Value>) {
        let payload = self.build_payload(event, data);

        match serde_json::to_string(&payload) {
            Ok(body) => self.delivery.send(&self.endpoint, body),
            Err(e) => tracing::debug!(event, error = %e, "failed to serialize analytics payload"),
        }
    }

    fn page_view(&self) {
        self.track(
            events::PAGE_VIEW,
            Some(json!({
                "title": self.page.title(),
                "url": self.page.url(),
            })),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::StaticPage;
    use crate::testing::RecordingBeacon;
    use chrono::DateTime;

    fn page() -> Arc<dyn PageContext> {
        Arc::new(
            StaticPage::new("https://blackroad.io/pricing?plan=pro", "/pricing")
                .with_title("Pricing | BlackRoad OS")
                .with_referrer("https://google.com/")
                .with_user_agent("Mozilla/5.0 (Macintosh)"),
        )
    }

    fn init() -> (Analytics, Arc<RecordingBeacon>) {
        let config = AnalyticsConfig::default();
        let beacon = Arc::new(RecordingBeacon::default());
        let delivery = Delivery::new(&config).unwrap().with_beacon(beacon.clone());
        (Analytics::init(&config, page(), delivery), beacon)
    }

    #[tokio::test]
    async fn test_init_sends_exactly_one_page_view() {
        let (analytics, beacon) = init();

        let payloads = beacon.payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0]["event"], "page_view");
        assert_eq!(
            payloads[0]["data"],
            json!({"title": "Pricing | BlackRoad OS", "url": "https://blackroad.io/pricing?plan=pro"})
        );
        assert_eq!(beacon.sent()[0].0, analytics.endpoint());
    }

    #[tokio::test]
    async fn test_track_attaches_ambient_context() {
        let (analytics, beacon) = init();

        analytics.track("signup_started", Some(json!({"plan": "pro"})));

        let payload = beacon.payloads().remove(1);
        assert_eq!(payload["event"], "signup_started");
        assert_eq!(payload["data"], json!({"plan": "pro"}));
        assert_eq!(payload["page"], "/pricing");
        assert_eq!(payload["referrer"], "https://google.com/");
        assert_eq!(payload["userAgent"], "Mozilla/5.0 (Macintosh)");

        let timestamp = payload["timestamp"].as_str().unwrap();
        assert!(timestamp.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
    }

    #[tokio::test]
    async fn test_track_without_data_omits_field() {
        let (analytics, beacon) = init();

        analytics.track("heartbeat", None);

        let payload = beacon.payloads().remove(1);
        assert!(payload.get("data").is_none());
    }

    #[tokio::test]
    async fn test_event_without_properties_sends_empty_object() {
        let (analytics, beacon) = init();

        analytics.event("x", None);

        let payload = beacon.payloads().remove(1);
        assert_eq!(payload["event"], "event");
        assert_eq!(payload["data"], json!({"name": "x", "properties": {}}));
    }

    #[tokio::test]
    async fn test_event_with_properties() {
        let (analytics, beacon) = init();

        let mut properties = Map::new();
        properties.insert("label".to_string(), json!("Sign Up"));
        analytics.event("signup", Some(properties));

        let payload = beacon.payloads().remove(1);
        assert_eq!(
            payload["data"],
            json!({"name": "signup", "properties": {"label": "Sign Up"}})
        );
    }

    #[test]
    fn test_noop_emitter_accepts_everything() {
        let emitter: Arc<dyn Emitter> = Arc::new(NoopEmitter);
        emitter.page_view();
        emitter.track("anything", None);
        emitter.event("x", None);
    }
}
