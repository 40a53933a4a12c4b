//! Host page context.
//!
//! The emitter never looks up ambient globals; whatever hosts it supplies
//! the page's location and identity through [`PageContext`].

/// Read-only view of the page the emitter runs in
pub trait PageContext: Send + Sync {
    /// Path component of the current location, e.g. `/pricing`
    fn path(&self) -> String;

    fn referrer(&self) -> String;

    fn user_agent(&self) -> String;

    /// Document title
    fn title(&self) -> String;

    /// Full URL of the current location
    fn url(&self) -> String;
}

/// Plain-data page context
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticPage {
    pub path: String,
    pub referrer: String,
    pub user_agent: String,
    pub title: String,
    pub url: String,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = referrer.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

impl PageContext for StaticPage {
    fn path(&self) -> String {
        self.path.clone()
    }

    fn referrer(&self) -> String {
        self.referrer.clone()
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn title(&self) -> String {
        self.title.clone()
    }

    fn url(&self) -> String {
        self.url.clone()
    }
}
