//! Page-lifetime state shared by the scroll and duration observers.
//!
//! One `PageSession` is created per page load and handed to the observers
//! that need it. Nothing here persists across loads; a reload means a new
//! session.

use analytics_contracts::events;
use std::sync::{Mutex, PoisonError};
use tokio::time::Instant;

/// Scroll-depth thresholds in ascending order, with the event each one fires
///
/// The bottom of the page is reached at 99.5%: fractional scroll offsets
/// routinely stop a fraction of a pixel short of the maximum.
pub const SCROLL_THRESHOLDS: [(f64, &str); 4] = [
    (25.0, events::SCROLL_25),
    (50.0, events::SCROLL_50),
    (75.0, events::SCROLL_75),
    (99.5, events::SCROLL_100),
];

#[derive(Debug, Default)]
struct ScrollProgress {
    max_depth: f64,
    // Number of leading SCROLL_THRESHOLDS already fired
    fired: usize,
}

#[derive(Debug)]
pub struct PageSession {
    started_at: Instant,
    scroll: Mutex<ScrollProgress>,
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PageSession {
    pub fn new() -> Self {
        Self::started_at(Instant::now())
    }

    pub fn started_at(started_at: Instant) -> Self {
        Self {
            started_at,
            scroll: Mutex::new(ScrollProgress::default()),
        }
    }

    pub fn start(&self) -> Instant {
        self.started_at
    }

    /// Whole seconds between load and `now`, rounded to nearest
    pub fn elapsed_secs(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.started_at)
            .as_secs_f64()
            .round() as u64
    }

    /// Deepest scroll position reached so far, in percent
    pub fn max_scroll(&self) -> f64 {
        self.scroll
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .max_depth
    }

    /// Record a scroll depth and return the threshold events it newly crosses
    ///
    /// Each threshold is latched: it is returned the first time the maximum
    /// depth reaches it and never again for this session, however the
    /// position moves afterwards.
    pub fn record_scroll(&self, depth: f64) -> Vec<&'static str> {
        let mut progress = self.scroll.lock().unwrap_or_else(PoisonError::into_inner);

        if depth <= progress.max_depth {
            return Vec::new();
        }
        progress.max_depth = depth;

        let crossed: Vec<&'static str> = SCROLL_THRESHOLDS[progress.fired..]
            .iter()
            .take_while(|(threshold, _)| depth >= *threshold)
            .map(|(_, event)| *event)
            .collect();

        progress.fired += crossed.len();
        crossed
    }
}
