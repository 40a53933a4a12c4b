//! Client-side analytics emitter.
//!
//! [`Analytics::init`] builds the emitter and records one `page_view`. Page
//! observers ([`PageObservers`]) turn host page events into named events on
//! whatever [`Emitter`] they are given. Delivery is best-effort: a
//! [`Beacon`] when the host provides one, otherwise a detached HTTP POST.
//!
//! ```no_run
//! use platform_client_analytics::{
//!     Analytics, AnalyticsConfig, BeaconQueue, Delivery, PageObservers, PageSession, StaticPage,
//! };
//! use std::sync::Arc;
//!
//! # async fn run() -> Result<(), platform_client_analytics::ClientError> {
//! let config = AnalyticsConfig::from_env()?;
//! let beacon = BeaconQueue::spawn(&config)?;
//! let delivery = Delivery::new(&config)?.with_beacon(beacon.clone());
//!
//! let page = Arc::new(StaticPage::new("https://blackroad.io/", "/").with_title("BlackRoad OS"));
//! let analytics = Arc::new(Analytics::init(&config, page, delivery));
//! let observers = PageObservers::register(analytics, Arc::new(PageSession::new()));
//!
//! observers.duration.on_unload();
//! beacon.flush().await;
//! # Ok(())
//! # }
//! ```

pub mod beacon;
pub mod config;
pub mod context;
pub mod delivery;
pub mod emitter;
pub mod error;
pub mod observers;
pub mod session;

#[cfg(test)]
mod testing;

pub use beacon::BeaconQueue;
pub use config::AnalyticsConfig;
pub use context::{PageContext, StaticPage};
pub use delivery::{Beacon, Delivery, FetchTransport};
pub use emitter::{Analytics, Emitter, NoopEmitter};
pub use error::ClientError;
pub use observers::{Element, FormElement, PageObservers, ScrollMetrics, Visibility};
pub use session::PageSession;
