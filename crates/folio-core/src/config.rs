//! Page configuration.
//!
//! Every field has a default matching the stock page, so an empty TOML
//! document is a valid configuration:
//!
//! ```toml
//! data_url = "data/profile.json"
//!
//! [effects]
//! scroll_threshold = 80.0
//! ```

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Location of the portfolio document.
    pub data_url: String,
    /// Text written into the name element when loading fails.
    pub error_text: String,
    /// Attribute the icon library scans for.
    pub icon_attribute: String,
    /// Element ids and selectors the page provides.
    pub anchors: Anchors,
    /// Interaction effect tuning.
    pub effects: EffectsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            data_url: "profile.json".to_string(),
            error_text: "Loading error".to_string(),
            icon_attribute: "data-lucide".to_string(),
            anchors: Anchors::default(),
            effects: EffectsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Parse a TOML configuration, filling unspecified fields with defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        Ok(toml::from_str(input)?)
    }
}

/// DOM anchors. Ids are bare (`name`), selectors are CSS (`.section`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Anchors {
    pub name: String,
    pub role: String,
    pub about: String,
    pub skills: String,
    pub projects: String,
    pub contact: String,
    pub navbar: String,
    pub cursor_glow: String,
    pub section: String,
    pub skill_card: String,
}

impl Default for Anchors {
    fn default() -> Self {
        Self {
            name: "name".to_string(),
            role: "role".to_string(),
            about: "about-text".to_string(),
            skills: "skills-container".to_string(),
            projects: "projects-container".to_string(),
            contact: "contact-container".to_string(),
            navbar: "navbar".to_string(),
            cursor_glow: ".cursor-glow".to_string(),
            section: ".section".to_string(),
            skill_card: ".skill-card".to_string(),
        }
    }
}

/// Tuning for the interaction effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Vertical scroll offset (px) above which the navbar is `scrolled`.
    pub scroll_threshold: f64,
    /// Visible fraction that reveals a section.
    pub reveal_threshold: f64,
    /// Initial downward offset (px) of hidden sections.
    pub reveal_offset: f64,
    /// CSS transition applied to sections.
    pub reveal_transition: String,
    /// Divisor turning pointer offset (px) into tilt (deg).
    pub tilt_divisor: f64,
    /// Perspective distance (px) of the tilt transform.
    pub perspective: f64,
    /// Upward lift (px) of a tilted card.
    pub lift: f64,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 50.0,
            reveal_threshold: 0.15,
            reveal_offset: 50.0,
            reveal_transition: "all 0.8s ease-out".to_string(),
            tilt_divisor: 10.0,
            perspective: 1000.0,
            lift: 10.0,
        }
    }
}
