//! Event names emitted by the client.
//!
//! `PAGE_VIEW` and `EVENT` are the two top-level `event` values the emitter
//! sends. Everything else is a `name` carried inside an `EVENT` payload's
//! `data`.

pub const PAGE_VIEW: &str = "page_view";
pub const EVENT: &str = "event";

pub const PAGE_HIDDEN: &str = "page_hidden";
pub const PAGE_VISIBLE: &str = "page_visible";
pub const BUTTON_CLICK: &str = "button_click";
pub const FORM_SUBMIT: &str = "form_submit";
pub const TIME_ON_PAGE: &str = "time_on_page";

pub const SCROLL_25: &str = "scroll_25";
pub const SCROLL_50: &str = "scroll_50";
pub const SCROLL_75: &str = "scroll_75";
pub const SCROLL_100: &str = "scroll_100";

/// Form identifier used when a submitted form has neither name nor id
pub const UNKNOWN_FORM: &str = "unknown";
