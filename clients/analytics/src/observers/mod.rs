//! Passive page observers.
//!
//! Each observer is independent and best-effort: it turns one kind of host
//! page event into `Emitter::event` calls. Observers receive their emitter
//! (and, when they keep state, the [`PageSession`]) at construction; pass a
//! [`NoopEmitter`](crate::NoopEmitter) to disable them.

mod click;
mod duration;
mod form;
mod scroll;
mod visibility;

pub use click::{ClickObserver, Element};
pub use duration::DurationObserver;
pub use form::{FormElement, FormObserver};
pub use scroll::{ScrollMetrics, ScrollObserver};
pub use visibility::{Visibility, VisibilityObserver};

use std::sync::Arc;

use crate::emitter::Emitter;
use crate::session::PageSession;

/// All observers for one page load
pub struct PageObservers {
    pub visibility: VisibilityObserver,
    pub click: ClickObserver,
    pub form: FormObserver,
    pub scroll: ScrollObserver,
    pub duration: DurationObserver,
}

impl PageObservers {
    pub fn register(emitter: Arc<dyn Emitter>, session: Arc<PageSession>) -> Self {
        Self {
            visibility: VisibilityObserver::new(emitter.clone()),
            click: ClickObserver::new(emitter.clone()),
            form: FormObserver::new(emitter.clone()),
            scroll: ScrollObserver::new(emitter.clone(), session.clone()),
            duration: DurationObserver::new(emitter, session),
        }
    }
}
