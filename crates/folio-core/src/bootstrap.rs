//! Bootstrap controller: fetch, render, annotate icons, init effects.

use crate::config::SiteConfig;
use crate::dom::{DomDocument, DomNode};
use crate::effects::Effects;
use crate::error::{FolioError, Result};
use crate::model::Portfolio;
use crate::render::SectionRenderer;
use async_trait::async_trait;

/// Raw answer from the data source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body.
    pub body: String,
}

impl FetchResponse {
    /// Create a response.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// 2xx status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Where the portfolio document comes from.
///
/// Implementations return `Err(FolioError::Transport(_))` when the request
/// could not be made at all; any HTTP answer, including errors, is a
/// `FetchResponse`.
#[async_trait(?Send)]
pub trait DataSource {
    /// Fetch `url` once.
    async fn fetch(&self, url: &str) -> Result<FetchResponse>;
}

/// The icon library that turns marker attributes into glyphs.
pub trait IconAnnotator {
    /// Replace every icon marker currently in the document. Called once,
    /// after all sections are rendered.
    fn create_icons(&self);
}

/// One-shot page mount.
pub struct Bootstrap<'a, D, S, I> {
    doc: &'a D,
    source: &'a S,
    icons: &'a I,
    config: &'a SiteConfig,
}

impl<'a, D, S, I> Bootstrap<'a, D, S, I>
where
    D: DomDocument,
    D::Node: PartialEq,
    S: DataSource,
    I: IconAnnotator,
{
    /// Assemble the controller.
    pub const fn new(doc: &'a D, source: &'a S, icons: &'a I, config: &'a SiteConfig) -> Self {
        Self {
            doc,
            source,
            icons,
            config,
        }
    }

    /// Fetch and parse the portfolio document.
    pub async fn load(&self) -> Result<Portfolio> {
        let url = &self.config.data_url;
        tracing::info!(url = %url, "fetching portfolio");

        let response = self.source.fetch(url).await?;
        if !response.is_success() {
            return Err(FolioError::Status(response.status));
        }
        Portfolio::from_json(&response.body)
    }

    /// Run the whole page sequence.
    ///
    /// On a loading failure the error text replaces the name and nothing
    /// else runs. A render failure stops the sequence where it happened.
    /// On success the effects are returned for the host to bind.
    pub async fn mount(&self) -> Result<Effects<D::Node>> {
        let portfolio = match self.load().await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "failed to load portfolio");
                self.show_load_error();
                return Err(e);
            }
        };

        if let Err(e) = SectionRenderer::new(self.doc, self.config).render_all(&portfolio) {
            tracing::error!(error = %e, "failed to render portfolio");
            return Err(e);
        }

        self.icons.create_icons();

        let effects = Effects::init(self.doc, self.config);
        tracing::info!(
            skills = portfolio.skills.len(),
            projects = portfolio.projects.len(),
            "portfolio mounted"
        );
        Ok(effects)
    }

    fn show_load_error(&self) {
        match self.doc.element_by_id(&self.config.anchors.name) {
            Some(name) => name.set_text(&self.config.error_text),
            None => tracing::warn!("no name element to report the error in"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::MemoryDocument;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    struct Canned {
        answer: Result<FetchResponse>,
        requests: RefCell<Vec<String>>,
    }

    impl Canned {
        fn new(answer: Result<FetchResponse>) -> Self {
            Self {
                answer,
                requests: RefCell::new(Vec::new()),
            }
        }
    }

    #[async_trait(?Send)]
    impl DataSource for Canned {
        async fn fetch(&self, url: &str) -> Result<FetchResponse> {
            self.requests.borrow_mut().push(url.to_string());
            self.answer.clone()
        }
    }

    #[derive(Default)]
    struct CountingIcons(Cell<usize>);

    impl IconAnnotator for CountingIcons {
        fn create_icons(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    const JANE: &str = r#"{
        "name": "Jane", "role": "Engineer",
        "skills": [{"icon": "code", "title": "Go", "desc": "x"}],
        "projects": [],
        "contact": {"email": "j@x.com", "location": "NYC"}
    }"#;

    fn page() -> MemoryDocument {
        let doc = MemoryDocument::new();
        for id in ["name", "role", "skills-container", "projects-container"] {
            let el = doc.create_element("div").unwrap();
            el.set_attribute("id", id).unwrap();
            doc.body().append_child(&el).unwrap();
        }
        doc
    }

    fn text(doc: &MemoryDocument, id: &str) -> String {
        doc.element_by_id(id).map(|n| n.text()).unwrap_or_default()
    }

    #[test]
    fn test_response_success_range() {
        assert!(FetchResponse::new(200, "").is_success());
        assert!(FetchResponse::new(204, "").is_success());
        assert!(!FetchResponse::new(304, "").is_success());
        assert!(!FetchResponse::new(404, "").is_success());
        assert!(!FetchResponse::new(199, "").is_success());
    }

    #[test]
    fn test_mount_success() {
        let doc = page();
        let source = Canned::new(Ok(FetchResponse::new(200, JANE)));
        let icons = CountingIcons::default();
        let config = SiteConfig::default();

        let effects = block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap();

        assert_eq!(*source.requests.borrow(), vec!["profile.json".to_string()]);
        assert_eq!(icons.0.get(), 1);
        assert_eq!(text(&doc, "name"), "Jane");
        assert_eq!(doc.query_selector_all(".skill-card").len(), 1);
        assert_eq!(effects.cards.len(), 1);
    }

    #[test]
    fn test_status_failure_writes_error_text() {
        let doc = page();
        let source = Canned::new(Ok(FetchResponse::new(404, JANE)));
        let icons = CountingIcons::default();
        let config = SiteConfig::default();

        let err = block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap_err();

        assert_eq!(err, FolioError::Status(404));
        assert_eq!(text(&doc, "name"), "Loading error");
        assert_eq!(text(&doc, "role"), "");
        assert!(doc.query_selector(".skill-card").is_none());
        assert_eq!(icons.0.get(), 0);
    }

    #[test]
    fn test_transport_failure() {
        let doc = page();
        let source = Canned::new(Err(FolioError::Transport("offline".into())));
        let icons = CountingIcons::default();
        let config = SiteConfig {
            error_text: "Chyba načítání".into(),
            ..SiteConfig::default()
        };

        let err = block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap_err();

        assert!(err.is_load_failure());
        assert_eq!(text(&doc, "name"), "Chyba načítání");
        assert_eq!(icons.0.get(), 0);
    }

    #[test]
    fn test_parse_failure() {
        let doc = page();
        let source = Canned::new(Ok(FetchResponse::new(200, "{\"name\": \"Jane\"}")));
        let icons = CountingIcons::default();
        let config = SiteConfig::default();

        let err = block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap_err();

        assert!(matches!(err, FolioError::Parse(_)));
        assert_eq!(text(&doc, "name"), "Loading error");
    }

    #[test]
    fn test_render_failure_skips_icons_and_effects() {
        let doc = MemoryDocument::new();
        for id in ["name", "role"] {
            let el = doc.create_element("div").unwrap();
            el.set_attribute("id", id).unwrap();
            doc.body().append_child(&el).unwrap();
        }
        let source = Canned::new(Ok(FetchResponse::new(200, JANE)));
        let icons = CountingIcons::default();
        let config = SiteConfig::default();

        let err = block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap_err();

        assert_eq!(err, FolioError::MissingElement("#skills-container".into()));
        // Partial output stays, the name is not overwritten with the error text.
        assert_eq!(text(&doc, "name"), "Jane");
        assert_eq!(icons.0.get(), 0);
        assert!(doc.head().query_selector_all("style").is_empty());
    }

    #[test]
    fn test_custom_data_url() {
        let doc = page();
        let source = Canned::new(Ok(FetchResponse::new(200, JANE)));
        let icons = CountingIcons::default();
        let config = SiteConfig {
            data_url: "/api/me.json".into(),
            ..SiteConfig::default()
        };
        block_on(Bootstrap::new(&doc, &source, &icons, &config).mount()).unwrap();
        assert_eq!(*source.requests.borrow(), vec!["/api/me.json".to_string()]);
    }
}
