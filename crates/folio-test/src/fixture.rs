//! Page fixtures and canned portfolio documents.
//!
//! [`PageFixture`] builds the host page skeleton (the anchors `index.html`
//! provides) in a [`MemoryDocument`]. Parts can be left out to exercise
//! the optional-element paths.
//!
//! # Example
//!
//! ```ignore
//! use folio_test::fixture::PageFixture;
//!
//! let doc = PageFixture::new().without_contact().build();
//! assert!(doc.element_by_id("contact-container").is_none());
//! ```

use folio_core::dom::memory::{MemoryDocument, MemoryNode};
use folio_core::{About, Contact, DomDocument, DomNode, Portfolio, Project, Skill};

/// The end-to-end example document.
pub const JANE_JSON: &str = r#"{
    "name": "Jane",
    "role": "Engineer",
    "skills": [{"icon": "code", "title": "Go", "desc": "x"}],
    "projects": [],
    "contact": {"email": "j@x.com", "location": "NYC"}
}"#;

/// Which parts of the host page to build.
#[derive(Debug, Clone)]
pub struct PageFixture {
    navbar: bool,
    cursor_glow: bool,
    about: bool,
    contact: bool,
    sections: bool,
}

impl Default for PageFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl PageFixture {
    /// The full page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            navbar: true,
            cursor_glow: true,
            about: true,
            contact: true,
            sections: true,
        }
    }

    /// Leave out `#navbar`.
    #[must_use]
    pub const fn without_navbar(mut self) -> Self {
        self.navbar = false;
        self
    }

    /// Leave out `.cursor-glow`.
    #[must_use]
    pub const fn without_cursor_glow(mut self) -> Self {
        self.cursor_glow = false;
        self
    }

    /// Leave out `#about-text`.
    #[must_use]
    pub const fn without_about(mut self) -> Self {
        self.about = false;
        self
    }

    /// Leave out `#contact-container`.
    #[must_use]
    pub const fn without_contact(mut self) -> Self {
        self.contact = false;
        self
    }

    /// Don't tag the section blocks with `.section`.
    #[must_use]
    pub const fn without_sections(mut self) -> Self {
        self.sections = false;
        self
    }

    /// Build the document.
    ///
    /// # Panics
    ///
    /// Panics if the in-memory DOM rejects the skeleton, which would be a
    /// bug in the DOM.
    #[must_use]
    pub fn build(&self) -> MemoryDocument {
        let doc = MemoryDocument::new();
        let body = doc.body();

        if self.cursor_glow {
            append(&doc, &body, "div", &[("class", "cursor-glow")]);
        }
        if self.navbar {
            let nav = append(&doc, &body, "nav", &[("id", "navbar")]);
            append(&doc, &nav, "a", &[("class", "logo"), ("href", "#")]);
        }

        let hero = append(&doc, &body, "header", &[("class", "hero")]);
        append(&doc, &hero, "h1", &[("id", "name")]);
        append(&doc, &hero, "p", &[("id", "role")]);

        let section_class = if self.sections { "section" } else { "block" };
        let section = |id: &str, inner: Option<(&str, &str)>| {
            let s = append(&doc, &body, "section", &[("id", id), ("class", section_class)]);
            if let Some((tag, inner_id)) = inner {
                append(&doc, &s, tag, &[("id", inner_id)]);
            }
        };

        section("about", self.about.then_some(("p", "about-text")));
        section("skills", Some(("div", "skills-container")));
        section("projects", Some(("div", "projects-container")));
        section("contact", self.contact.then_some(("div", "contact-container")));

        doc
    }
}

fn append(doc: &MemoryDocument, parent: &MemoryNode, tag: &str, attrs: &[(&str, &str)]) -> MemoryNode {
    let node = doc.create_element(tag).expect("fixture tag");
    for (name, value) in attrs {
        node.set_attribute(name, value).expect("fixture attribute");
    }
    parent.append_child(&node).expect("fixture append");
    node
}

/// A fuller portfolio with about text, several skills and projects.
#[must_use]
pub fn sample_portfolio() -> Portfolio {
    let skill = |icon: &str, title: &str, desc: &str| Skill {
        icon: icon.to_string(),
        title: title.to_string(),
        description: desc.to_string(),
    };
    let project = |title: &str, desc: &str, tags: &[&str]| Project {
        title: title.to_string(),
        description: desc.to_string(),
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    };

    Portfolio {
        name: "Tereza Nováková".to_string(),
        role: "Full-stack developer".to_string(),
        about: Some(About {
            description: "I build fast, accessible web apps.".to_string(),
        }),
        skills: vec![
            skill("code", "Rust", "Systems and WebAssembly"),
            skill("database", "PostgreSQL", "Schema design and tuning"),
            skill("cloud", "DevOps", "CI pipelines and containers"),
        ],
        projects: vec![
            project("Folio", "This very page.", &["rust", "wasm", "css"]),
            project("Ledger", "Personal finance tracker.", &["rust", "sql", "rust"]),
        ],
        contact: Contact {
            email: "tereza@example.com".to_string(),
            location: "Brno, CZ".to_string(),
        },
    }
}

/// Serialize a portfolio to the JSON the page fetches.
///
/// # Panics
///
/// Panics if serialization fails, which the model cannot trigger.
#[must_use]
pub fn portfolio_json(portfolio: &Portfolio) -> String {
    serde_json::to_string(portfolio).expect("portfolio serializes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_fixture_has_all_anchors() {
        let doc = PageFixture::new().build();
        for id in [
            "navbar",
            "name",
            "role",
            "about-text",
            "skills-container",
            "projects-container",
            "contact-container",
        ] {
            assert!(doc.element_by_id(id).is_some(), "missing #{id}");
        }
        assert!(doc.query_selector(".cursor-glow").is_some());
        assert_eq!(doc.query_selector_all(".section").len(), 4);
    }

    #[test]
    fn test_optional_parts() {
        let doc = PageFixture::new()
            .without_navbar()
            .without_cursor_glow()
            .without_about()
            .without_contact()
            .without_sections()
            .build();
        assert!(doc.element_by_id("navbar").is_none());
        assert!(doc.query_selector(".cursor-glow").is_none());
        assert!(doc.element_by_id("about-text").is_none());
        assert!(doc.element_by_id("contact-container").is_none());
        assert!(doc.query_selector(".section").is_none());
        assert!(doc.element_by_id("skills-container").is_some());
    }

    #[test]
    fn test_sample_roundtrips_through_json() {
        let sample = sample_portfolio();
        let parsed = Portfolio::from_json(&portfolio_json(&sample)).unwrap();
        assert_eq!(parsed, sample);
    }

    #[test]
    fn test_jane_parses() {
        let jane = Portfolio::from_json(JANE_JSON).unwrap();
        assert_eq!(jane.skills[0].title, "Go");
    }
}
