use analytics_contracts::events;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

use crate::emitter::Emitter;

const TRACK_ATTRIBUTE: &str = "data-track";
const ARIA_LABEL: &str = "aria-label";
const CTA_CLASS: &str = "cta-button";

/// The clicked element, as much of it as the observer looks at
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub attributes: HashMap<String, String>,
    pub text: Option<String>,
    pub href: Option<String>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// `button`, `a.cta-button`, or anything with `data-track`
    pub fn is_tracked(&self) -> bool {
        self.is_tag("button")
            || (self.is_tag("a") && self.classes.iter().any(|c| c == CTA_CLASS))
            || self.attributes.contains_key(TRACK_ATTRIBUTE)
    }
}

pub struct ClickObserver {
    emitter: Arc<dyn Emitter>,
}

impl ClickObserver {
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self { emitter }
    }

    pub fn on_click(&self, target: &Element) {
        if !target.is_tracked() {
            return;
        }

        let name = target
            .attribute(TRACK_ATTRIBUTE)
            .filter(|name| !name.is_empty())
            .unwrap_or(events::BUTTON_CLICK);

        // Visible text first, accessible label second
        let label = target
            .text
            .as_deref()
            .filter(|text| !text.is_empty())
            .or_else(|| target.attribute(ARIA_LABEL))
            .map_or(Value::Null, |label| Value::String(label.to_string()));

        let mut properties = Map::new();
        properties.insert("label".to_string(), label);
        if let Some(href) = &target.href {
            properties.insert("href".to_string(), Value::String(href.clone()));
        }

        self.emitter.event(name, Some(properties));
    }
}
