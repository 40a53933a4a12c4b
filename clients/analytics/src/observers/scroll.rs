use std::sync::Arc;

use crate::emitter::Emitter;
use crate::session::PageSession;

/// Viewport geometry at the time of a scroll event, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_y: f64,
    pub scroll_height: f64,
    pub viewport_height: f64,
}

impl ScrollMetrics {
    pub fn new(scroll_y: f64, scroll_height: f64, viewport_height: f64) -> Self {
        Self {
            scroll_y,
            scroll_height,
            viewport_height,
        }
    }

    /// Scroll depth in percent of the scrollable height, clamped to 0..=100
    ///
    /// None when the page cannot scroll.
    pub fn depth_percent(&self) -> Option<f64> {
        let scrollable = self.scroll_height - self.viewport_height;
        if scrollable.is_nan() || scrollable <= 0.0 || !self.scroll_y.is_finite() {
            return None;
        }
        Some((self.scroll_y / scrollable * 100.0).clamp(0.0, 100.0))
    }
}

pub struct ScrollObserver {
    emitter: Arc<dyn Emitter>,
    session: Arc<PageSession>,
}

impl ScrollObserver {
    pub fn new(emitter: Arc<dyn Emitter>, session: Arc<PageSession>) -> Self {
        Self { emitter, session }
    }

    pub fn on_scroll(&self, metrics: ScrollMetrics) {
        let Some(depth) = metrics.depth_percent() else {
            return;
        };

        for name in self.session.record_scroll(depth) {
            self.emitter.event(name, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingEmitter;

    // 2000px document in a 1000px viewport: scroll_y == depth * 10
    fn at(percent: f64) -> ScrollMetrics {
        ScrollMetrics::new(percent * 10.0, 2_000.0, 1_000.0)
    }

    fn observer() -> (ScrollObserver, Arc<RecordingEmitter>) {
        let emitter = Arc::new(RecordingEmitter::default());
        let observer = ScrollObserver::new(emitter.clone(), Arc::new(PageSession::new()));
        (observer, emitter)
    }

    #[test]
    fn test_oscillation_fires_each_threshold_once() {
        let (observer, emitter) = observer();

        for _ in 0..5 {
            observer.on_scroll(at(24.0));
            observer.on_scroll(at(26.0));
            observer.on_scroll(at(49.0));
            observer.on_scroll(at(51.0));
        }

        assert_eq!(emitter.names(), vec!["scroll_25", "scroll_50"]);
    }

    #[test]
    fn test_full_scroll_fires_all_four() {
        let (observer, emitter) = observer();

        for step in 0..=40 {
            observer.on_scroll(at(step as f64 * 2.5));
        }

        assert_eq!(
            emitter.names(),
            vec!["scroll_25", "scroll_50", "scroll_75", "scroll_100"]
        );
    }

    #[test]
    fn test_overscroll_is_clamped() {
        let (observer, emitter) = observer();

        observer.on_scroll(ScrollMetrics::new(1_200.0, 2_000.0, 1_000.0));

        assert_eq!(emitter.names().last().map(String::as_str), Some("scroll_100"));
    }

    #[test]
    fn test_unscrollable_page_is_ignored() {
        let (observer, emitter) = observer();

        observer.on_scroll(ScrollMetrics::new(0.0, 800.0, 800.0));
        observer.on_scroll(ScrollMetrics::new(10.0, 600.0, 800.0));

        assert!(emitter.events().is_empty());
        assert_eq!(ScrollMetrics::new(0.0, 800.0, 800.0).depth_percent(), None);
    }
}
