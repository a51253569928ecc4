//! Portfolio document model.
//!
//! Mirrors the JSON served at the data URL:
//!
//! ```json
//! {
//!   "name": "Jane",
//!   "role": "Engineer",
//!   "about": { "description": "..." },
//!   "skills": [{ "icon": "code", "title": "Rust", "desc": "..." }],
//!   "projects": [{ "title": "Folio", "desc": "...", "tags": ["wasm"] }],
//!   "contact": { "email": "jane@example.com", "location": "Prague" }
//! }
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// The whole portfolio document. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Display name.
    pub name: String,
    /// Job title or tagline.
    pub role: String,
    /// Optional about section.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub about: Option<About>,
    /// Skills in display order.
    pub skills: Vec<Skill>,
    /// Projects in display order.
    pub projects: Vec<Project>,
    /// Contact details.
    pub contact: Contact,
}

impl Portfolio {
    /// Parse a portfolio document.
    ///
    /// Missing required fields are reported here rather than surfacing
    /// halfway through rendering.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// About section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct About {
    /// Free text shown in the about block.
    pub description: String,
}

/// A single skill card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Lucide icon name, e.g. `code` or `database`.
    pub icon: String,
    /// Card title.
    pub title: String,
    /// Card body.
    #[serde(rename = "desc")]
    pub description: String,
}

/// A single project card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Project title.
    pub title: String,
    /// Project summary.
    #[serde(rename = "desc")]
    pub description: String,
    /// Technology labels, rendered as-is (order kept, duplicates kept).
    pub tags: Vec<String>,
}

/// Contact block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Email address, used for both the `mailto:` target and the label.
    pub email: String,
    /// Free-form location.
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const JANE: &str = r#"{
        "name": "Jane",
        "role": "Engineer",
        "skills": [{"icon": "code", "title": "Go", "desc": "x"}],
        "projects": [],
        "contact": {"email": "j@x.com", "location": "NYC"}
    }"#;

    #[test]
    fn test_parse_minimal_document() {
        let p = Portfolio::from_json(JANE).unwrap();
        assert_eq!(p.name, "Jane");
        assert_eq!(p.role, "Engineer");
        assert!(p.about.is_none());
        assert_eq!(p.skills.len(), 1);
        assert_eq!(p.skills[0].description, "x");
        assert!(p.projects.is_empty());
        assert_eq!(p.contact.location, "NYC");
    }

    #[test]
    fn test_parse_about_and_project() {
        let json = r#"{
            "name": "A", "role": "B",
            "about": {"description": "Hi"},
            "skills": [],
            "projects": [{"title": "P", "desc": "D", "tags": ["a", "a", "b"], "image": "p.png"}],
            "contact": {"email": "e", "location": "l"}
        }"#;
        let p = Portfolio::from_json(json).unwrap();
        assert_eq!(p.about.unwrap().description, "Hi");
        assert_eq!(p.projects[0].tags, vec!["a", "a", "b"]);
    }

    #[test]
    fn test_project_image_of_any_shape_is_ignored() {
        let json = r#"{
            "name": "A", "role": "B", "skills": [],
            "projects": [
                {"title": "P", "desc": "D", "tags": [], "image": {"src": "p.png", "alt": "x"}},
                {"title": "Q", "desc": "E", "tags": [], "image": null}
            ],
            "contact": {"email": "e", "location": "l"}
        }"#;
        let p = Portfolio::from_json(json).unwrap();
        assert_eq!(p.projects.len(), 2);
        assert_eq!(p.projects[1].title, "Q");
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{
            "name": "A", "role": "B", "github": "x",
            "skills": [], "projects": [],
            "contact": {"email": "e", "location": "l", "phone": "1"}
        }"#;
        assert!(Portfolio::from_json(json).is_ok());
    }

    #[test]
    fn test_missing_required_field_is_parse_error() {
        let json = r#"{"name": "A", "role": "B", "skills": [], "projects": []}"#;
        let err = Portfolio::from_json(json).unwrap_err();
        assert!(err.is_load_failure());
        assert!(err.to_string().contains("contact"));
    }

    #[test]
    fn test_skill_uses_desc_key() {
        let skill = Skill {
            icon: "code".into(),
            title: "Rust".into(),
            description: "Systems".into(),
        };
        let json = serde_json::to_value(&skill).unwrap();
        assert_eq!(json["desc"], "Systems");
    }

    #[test]
    fn test_not_json() {
        assert!(Portfolio::from_json("<html>404</html>").is_err());
    }
}
