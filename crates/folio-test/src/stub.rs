//! Stand-ins for the external collaborators: the data source and the icon
//! library.

use async_trait::async_trait;
use folio_core::dom::memory::MemoryDocument;
use folio_core::{DataSource, DomDocument, DomNode, FetchResponse, FolioError, IconAnnotator, Result};
use std::cell::{Cell, RefCell};

/// A data source with one canned answer. Records every requested URL.
#[derive(Debug)]
pub struct StubSource {
    answer: Result<FetchResponse>,
    requests: RefCell<Vec<String>>,
}

impl StubSource {
    /// Answer `200 OK` with `body`.
    #[must_use]
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    /// Answer with an arbitrary status.
    #[must_use]
    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            answer: Ok(FetchResponse::new(status, body)),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// Fail before any HTTP answer.
    #[must_use]
    pub fn unreachable(reason: impl Into<String>) -> Self {
        Self {
            answer: Err(FolioError::Transport(reason.into())),
            requests: RefCell::new(Vec::new()),
        }
    }

    /// URLs requested so far.
    #[must_use]
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl DataSource for StubSource {
    async fn fetch(&self, url: &str) -> Result<FetchResponse> {
        self.requests.borrow_mut().push(url.to_string());
        self.answer.clone()
    }
}

/// Icon library stand-in: puts an `svg.lucide` glyph inside every marker
/// element it finds and counts how often it was invoked.
#[derive(Debug)]
pub struct StubIcons {
    doc: MemoryDocument,
    attribute: String,
    calls: Cell<usize>,
}

impl StubIcons {
    /// Annotate markers named by `attribute` in `doc`.
    #[must_use]
    pub fn new(doc: &MemoryDocument, attribute: impl Into<String>) -> Self {
        Self {
            doc: doc.clone(),
            attribute: attribute.into(),
            calls: Cell::new(0),
        }
    }

    /// Number of `create_icons` calls.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl IconAnnotator for StubIcons {
    /// # Panics
    ///
    /// Panics if a glyph cannot be inserted; the in-memory DOM only
    /// refuses malformed input, so that is a bug in the stub.
    fn create_icons(&self) {
        self.calls.set(self.calls.get() + 1);
        for marker in self.doc.query_selector_all(&format!("[{}]", self.attribute)) {
            let Some(name) = marker.attribute(&self.attribute) else {
                continue;
            };
            let glyph = self.doc.create_element("svg").expect("svg element");
            glyph
                .set_attribute("class", &format!("lucide lucide-{name}"))
                .expect("glyph class");
            marker.append_child(&glyph).expect("glyph insertion");
        }
    }
}
