use analytics_contracts::events;
use std::sync::Arc;

use crate::emitter::Emitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

pub struct VisibilityObserver {
    emitter: Arc<dyn Emitter>,
}

impl VisibilityObserver {
    pub fn new(emitter: Arc<dyn Emitter>) -> Self {
        Self { emitter }
    }

    pub fn on_visibility_change(&self, visibility: Visibility) {
        let name = match visibility {
            Visibility::Hidden => events::PAGE_HIDDEN,
            Visibility::Visible => events::PAGE_VISIBLE,
        };
        self.emitter.event(name, None);
    }
}
