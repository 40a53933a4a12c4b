use analytics_contracts::events;
use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::emitter::Emitter;
use crate::session::PageSession;

pub struct DurationObserver {
    emitter: Arc<dyn Emitter>,
    session: Arc<PageSession>,
}

impl DurationObserver {
    pub fn new(emitter: Arc<dyn Emitter>, session: Arc<PageSession>) -> Self {
        Self { emitter, session }
    }

    /// Emit time on page at teardown
    pub fn on_unload(&self) {
        self.on_unload_at(Instant::now());
    }

    pub fn on_unload_at(&self, now: Instant) {
        let seconds = self.session.elapsed_secs(now);

        let mut properties = Map::new();
        properties.insert("seconds".to_string(), Value::from(seconds));
        self.emitter.event(events::TIME_ON_PAGE, Some(properties));
    }
}
