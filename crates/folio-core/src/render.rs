//! Section renderers.
//!
//! Each renderer owns one container, clears it, and writes its section
//! from the corresponding slice of the [`Portfolio`]. Renderers never read
//! each other's output, so calling one twice with the same data leaves the
//! same DOM as calling it once.
//!
//! Values go through `set_text`/`set_attribute`, never through HTML
//! parsing.

use crate::config::SiteConfig;
use crate::dom::{DomDocument, DomNode, ElementBuilder};
use crate::error::{FolioError, Result};
use crate::model::{Contact, Portfolio, Project, Skill};

/// Icon shown in the project overlay link.
pub const EXTERNAL_LINK_ICON: &str = "external-link";
/// Icon in front of the email address.
pub const MAIL_ICON: &str = "mail";
/// Icon in front of the location.
pub const MAP_PIN_ICON: &str = "map-pin";

/// Renders the portfolio sections into a document.
#[derive(Debug)]
pub struct SectionRenderer<'a, D: DomDocument> {
    doc: &'a D,
    config: &'a SiteConfig,
}

impl<'a, D: DomDocument> SectionRenderer<'a, D> {
    /// Create a renderer for `doc`.
    pub const fn new(doc: &'a D, config: &'a SiteConfig) -> Self {
        Self { doc, config }
    }

    fn require(&self, id: &str) -> Result<D::Node> {
        self.doc
            .element_by_id(id)
            .ok_or_else(|| FolioError::MissingElement(format!("#{id}")))
    }

    fn icon(&self, name: &str) -> ElementBuilder {
        ElementBuilder::new("i").attr(&self.config.icon_attribute, name)
    }

    /// Render every section in page order: profile, skills, projects,
    /// contact. Stops at the first failure.
    pub fn render_all(&self, portfolio: &Portfolio) -> Result<()> {
        self.render_profile(portfolio)?;
        self.render_skills(&portfolio.skills)?;
        self.render_projects(&portfolio.projects)?;
        self.render_contact(&portfolio.contact)?;
        Ok(())
    }

    /// Name, role and the optional about text.
    ///
    /// The about text is written only when the document has an `about`
    /// block and the page has the about element.
    pub fn render_profile(&self, portfolio: &Portfolio) -> Result<()> {
        let anchors = &self.config.anchors;
        self.require(&anchors.name)?.set_text(&portfolio.name);
        self.require(&anchors.role)?.set_text(&portfolio.role);

        if let Some(about) = &portfolio.about {
            if let Some(el) = self.doc.element_by_id(&anchors.about) {
                el.set_text(&about.description);
            }
        }
        Ok(())
    }

    /// One `.skill-card` per skill, in order.
    pub fn render_skills(&self, skills: &[Skill]) -> Result<()> {
        let container = self.require(&self.config.anchors.skills)?;
        container.clear_children();

        for skill in skills {
            let card = self.skill_card(skill).build(self.doc)?;
            container.append_child(&card)?;
        }
        tracing::debug!(count = skills.len(), "rendered skills");
        Ok(())
    }

    /// `div.skill-card > (i[icon], h3, p)`
    pub fn skill_card(&self, skill: &Skill) -> ElementBuilder {
        ElementBuilder::new("div")
            .class("skill-card")
            .child(self.icon(&skill.icon))
            .child(ElementBuilder::new("h3").text(&skill.title))
            .child(ElementBuilder::new("p").text(&skill.description))
    }

    /// One `.project-card` per project, in order.
    pub fn render_projects(&self, projects: &[Project]) -> Result<()> {
        let container = self.require(&self.config.anchors.projects)?;
        container.clear_children();

        for project in projects {
            let card = self.project_card(project).build(self.doc)?;
            container.append_child(&card)?;
        }
        tracing::debug!(count = projects.len(), "rendered projects");
        Ok(())
    }

    /// Image placeholder with an overlay link, then title, summary and one
    /// `span` per tag.
    pub fn project_card(&self, project: &Project) -> ElementBuilder {
        let image = ElementBuilder::new("div").class("project-img").child(
            ElementBuilder::new("div").class("project-overlay").child(
                ElementBuilder::new("a")
                    .class("btn-icon")
                    .attr("href", "#")
                    .child(self.icon(EXTERNAL_LINK_ICON)),
            ),
        );

        let tags = ElementBuilder::new("div").class("tags").children(
            project
                .tags
                .iter()
                .map(|tag| ElementBuilder::new("span").text(tag)),
        );

        let info = ElementBuilder::new("div")
            .class("project-info")
            .child(ElementBuilder::new("h3").text(&project.title))
            .child(ElementBuilder::new("p").text(&project.description))
            .child(tags);

        ElementBuilder::new("div")
            .class("project-card")
            .child(image)
            .child(info)
    }

    /// Mail link and location line. The contact container is optional:
    /// without it nothing is rendered.
    pub fn render_contact(&self, contact: &Contact) -> Result<()> {
        let Some(container) = self.doc.element_by_id(&self.config.anchors.contact) else {
            tracing::debug!("no contact container, skipping");
            return Ok(());
        };
        container.clear_children();

        let mail = ElementBuilder::new("a")
            .class("contact-item")
            .attr("href", format!("mailto:{}", contact.email))
            .child(self.icon(MAIL_ICON))
            .child(ElementBuilder::new("span").text(&contact.email));

        let location = ElementBuilder::new("div")
            .class("contact-item")
            .child(self.icon(MAP_PIN_ICON))
            .child(ElementBuilder::new("span").text(&contact.location));

        container.append_child(&mail.build(self.doc)?)?;
        container.append_child(&location.build(self.doc)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::memory::{MemoryDocument, MemoryNode};
    use crate::model::About;
    use proptest::prelude::*;

    fn page(ids: &[&str]) -> MemoryDocument {
        let doc = MemoryDocument::new();
        for id in ids {
            let el = doc.create_element("div").unwrap();
            el.set_attribute("id", id).unwrap();
            doc.body().append_child(&el).unwrap();
        }
        doc
    }

    fn full_page() -> MemoryDocument {
        page(&[
            "name",
            "role",
            "about-text",
            "skills-container",
            "projects-container",
            "contact-container",
        ])
    }

    fn skill(icon: &str, title: &str, desc: &str) -> Skill {
        Skill {
            icon: icon.into(),
            title: title.into(),
            description: desc.into(),
        }
    }

    fn project(title: &str, tags: &[&str]) -> Project {
        Project {
            title: title.into(),
            description: format!("{title} summary"),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn portfolio() -> Portfolio {
        Portfolio {
            name: "Jane".into(),
            role: "Engineer".into(),
            about: Some(About {
                description: "I build things".into(),
            }),
            skills: vec![skill("code", "Go", "x")],
            projects: vec![project("Folio", &["rust", "wasm"])],
            contact: Contact {
                email: "j@x.com".into(),
                location: "NYC".into(),
            },
        }
    }

    fn by_id(doc: &MemoryDocument, id: &str) -> MemoryNode {
        doc.element_by_id(id).unwrap()
    }

    #[test]
    fn test_profile_sets_name_role_about() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_profile(&portfolio())
            .unwrap();
        assert_eq!(by_id(&doc, "name").text(), "Jane");
        assert_eq!(by_id(&doc, "role").text(), "Engineer");
        assert_eq!(by_id(&doc, "about-text").text(), "I build things");
    }

    #[test]
    fn test_profile_without_about_data_leaves_element() {
        let doc = full_page();
        by_id(&doc, "about-text").set_text("static");
        let config = SiteConfig::default();
        let mut p = portfolio();
        p.about = None;
        SectionRenderer::new(&doc, &config).render_profile(&p).unwrap();
        assert_eq!(by_id(&doc, "about-text").text(), "static");
    }

    #[test]
    fn test_profile_without_about_element_is_fine() {
        let doc = page(&["name", "role"]);
        let config = SiteConfig::default();
        assert!(SectionRenderer::new(&doc, &config)
            .render_profile(&portfolio())
            .is_ok());
    }

    #[test]
    fn test_profile_requires_name() {
        let doc = page(&["role"]);
        let config = SiteConfig::default();
        let err = SectionRenderer::new(&doc, &config)
            .render_profile(&portfolio())
            .unwrap_err();
        assert_eq!(err, FolioError::MissingElement("#name".into()));
    }

    #[test]
    fn test_skill_card_structure() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_skills(&[skill("database", "SQL", "Queries")])
            .unwrap();
        assert_eq!(
            by_id(&doc, "skills-container").inner_html(),
            "<div class=\"skill-card\"><i data-lucide=\"database\"></i>\
             <h3>SQL</h3><p>Queries</p></div>"
        );
    }

    #[test]
    fn test_skills_require_container() {
        let doc = page(&["name"]);
        let config = SiteConfig::default();
        let err = SectionRenderer::new(&doc, &config)
            .render_skills(&[])
            .unwrap_err();
        assert_eq!(err, FolioError::MissingElement("#skills-container".into()));
    }

    #[test]
    fn test_project_card_structure() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_projects(&[project("Folio", &["rust"])])
            .unwrap();
        assert_eq!(
            by_id(&doc, "projects-container").inner_html(),
            "<div class=\"project-card\">\
             <div class=\"project-img\"><div class=\"project-overlay\">\
             <a class=\"btn-icon\" href=\"#\"><i data-lucide=\"external-link\"></i></a>\
             </div></div>\
             <div class=\"project-info\"><h3>Folio</h3><p>Folio summary</p>\
             <div class=\"tags\"><span>rust</span></div></div></div>"
        );
    }

    #[test]
    fn test_project_tags_keep_duplicates_and_order() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_projects(&[project("P", &["b", "a", "b"])])
            .unwrap();
        let tags: Vec<String> = doc
            .query_selector_all(".tags > span")
            .iter()
            .map(DomNode::text)
            .collect();
        assert_eq!(tags, vec!["b", "a", "b"]);
    }

    #[test]
    fn test_contact_structure() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_contact(&portfolio().contact)
            .unwrap();
        let items = doc.query_selector_all(".contact-item");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].tag_name(), "a");
        assert_eq!(items[0].attribute("href").as_deref(), Some("mailto:j@x.com"));
        assert_eq!(items[0].text(), "j@x.com");
        assert!(doc.query_selector("a.contact-item [data-lucide='mail']").is_some());
        assert_eq!(items[1].text(), "NYC");
        assert!(doc
            .query_selector("div.contact-item [data-lucide='map-pin']")
            .is_some());
    }

    #[test]
    fn test_contact_missing_container_skips() {
        let doc = page(&["name", "role", "skills-container", "projects-container"]);
        let config = SiteConfig::default();
        assert!(SectionRenderer::new(&doc, &config)
            .render_contact(&portfolio().contact)
            .is_ok());
        assert!(doc.query_selector(".contact-item").is_none());
    }

    #[test]
    fn test_markup_in_data_stays_text() {
        let doc = full_page();
        let config = SiteConfig::default();
        SectionRenderer::new(&doc, &config)
            .render_skills(&[skill("code", "<script>x</script>", "a & b")])
            .unwrap();
        assert!(doc.query_selector("script").is_none());
        assert_eq!(doc.query_selector(".skill-card h3").unwrap().text(), "<script>x</script>");
    }

    #[test]
    fn test_custom_icon_attribute() {
        let doc = full_page();
        let config = SiteConfig {
            icon_attribute: "data-icon".into(),
            ..SiteConfig::default()
        };
        SectionRenderer::new(&doc, &config)
            .render_skills(&[skill("code", "Go", "x")])
            .unwrap();
        assert!(doc.query_selector("[data-icon='code']").is_some());
        assert!(doc.query_selector("[data-lucide]").is_none());
    }

    #[test]
    fn test_render_all_order_stops_on_missing_container() {
        let doc = page(&["name", "role", "contact-container"]);
        let config = SiteConfig::default();
        let err = SectionRenderer::new(&doc, &config)
            .render_all(&portfolio())
            .unwrap_err();
        assert_eq!(err, FolioError::MissingElement("#skills-container".into()));
        // Profile ran before the failure, contact did not.
        assert_eq!(by_id(&doc, "name").text(), "Jane");
        assert!(doc.query_selector(".contact-item").is_none());
    }

    fn arb_text() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 <>&\"']{0,12}"
    }

    fn arb_skill() -> impl Strategy<Value = Skill> {
        ("[a-z-]{1,10}", arb_text(), arb_text()).prop_map(|(icon, title, description)| Skill {
            icon,
            title,
            description,
        })
    }

    fn arb_project() -> impl Strategy<Value = Project> {
        (arb_text(), arb_text(), prop::collection::vec("[a-c]{1,2}", 0..6)).prop_map(
            |(title, description, tags)| Project {
                title,
                description,
                tags,
            },
        )
    }

    proptest! {
        #[test]
        fn prop_skills_one_card_per_skill_in_order(skills in prop::collection::vec(arb_skill(), 0..8)) {
            let doc = full_page();
            let config = SiteConfig::default();
            SectionRenderer::new(&doc, &config).render_skills(&skills).unwrap();

            let cards = by_id(&doc, "skills-container").children();
            prop_assert_eq!(cards.len(), skills.len());
            for (card, skill) in cards.iter().zip(&skills) {
                let parts = card.children();
                prop_assert_eq!(parts[0].attribute("data-lucide"), Some(skill.icon.clone()));
                prop_assert_eq!(parts[1].text(), skill.title.clone());
                prop_assert_eq!(parts[2].text(), skill.description.clone());
            }
        }

        #[test]
        fn prop_project_tags_match_input(projects in prop::collection::vec(arb_project(), 0..5)) {
            let doc = full_page();
            let config = SiteConfig::default();
            SectionRenderer::new(&doc, &config).render_projects(&projects).unwrap();

            let cards = by_id(&doc, "projects-container").children();
            prop_assert_eq!(cards.len(), projects.len());
            for (card, project) in cards.iter().zip(&projects) {
                let tags: Vec<String> = card
                    .query_selector_all(".tags > span")
                    .iter()
                    .map(DomNode::text)
                    .collect();
                prop_assert_eq!(&tags, &project.tags);
            }
        }

        #[test]
        fn prop_rendering_twice_is_idempotent(
            skills in prop::collection::vec(arb_skill(), 0..5),
            projects in prop::collection::vec(arb_project(), 0..5),
        ) {
            let mut p = portfolio();
            p.skills = skills;
            p.projects = projects;

            let once = full_page();
            let twice = full_page();
            let config = SiteConfig::default();
            SectionRenderer::new(&once, &config).render_all(&p).unwrap();
            let renderer = SectionRenderer::new(&twice, &config);
            renderer.render_all(&p).unwrap();
            renderer.render_all(&p).unwrap();

            prop_assert_eq!(once.to_html(), twice.to_html());
        }
    }
}
