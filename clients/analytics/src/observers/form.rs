use analytics_contracts::events;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::emitter::Emitter;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormElement {
    pub name: Option<String>,
    pub id: Option<String>,
}

impl FormElement {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// `name`, else `id`, else `"unknown"`; empty strings count as missing
    pub fn identifier(&self) -> &str {
        [self.name.as_deref(), self.id.as_deref()]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or(events::UNKNOWN_FORM)
    }
}

pub struct FormObserver {
    emitter: Arc<dyn Emitter>,
}

impl FormObserver {
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self { emitter }
    }

    pub fn on_submit(&self, form: &FormElement) {
        let mut properties = Map::new();
        properties.insert("form".to_string(), Value::String(form.identifier().to_string()));
        self.emitter.event(events::FORM_SUBMIT, Some(properties));
    }
}
