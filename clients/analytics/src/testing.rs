//! Recording doubles shared by the unit tests.

use serde_json::{Map, Value};
use std::sync::Mutex;

use crate::delivery::Beacon;
use crate::emitter::Emitter;

#[derive(Default)]
pub struct RecordingBeacon {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingBeacon {
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn payloads(&self) -> Vec<Value> {
        self.sent()
            .iter()
            .map(|(_, body)| serde_json::from_str(body).unwrap())
            .collect()
    }
}

impl Beacon for RecordingBeacon {
    fn send_beacon(&self, url: &str, body: String) -> bool {
        self.sent.lock().unwrap().push((url.to_string(), body));
        true
    }
}

/// Emitter that records `event(..)` calls as (name, properties)
#[derive(Default)]
pub struct RecordingEmitter {
    events: Mutex<Vec<(String, Value)>>,
}

impl RecordingEmitter {
    pub fn events(&self) -> Vec<(String, Value)> {
        self.events.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|(name, _)| name).collect()
    }
}

impl Emitter for RecordingEmitter {
    fn track(&self, event: &str, data: Option<Value>) {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), data.unwrap_or(Value::Null)));
    }

    fn page_view(&self) {}

    fn event(&self, name: &str, properties: Option<Map<String, Value>>) {
        self.events
            .lock()
            .unwrap()
            .push((name.to_string(), Value::Object(properties.unwrap_or_default())));
    }
}
