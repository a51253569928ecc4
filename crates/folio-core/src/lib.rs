//! Core of the Folio portfolio page.
//!
//! This crate is platform independent:
//! - Data model: [`Portfolio`] and its sections
//! - DOM abstraction: [`DomDocument`], [`DomNode`], plus an in-memory
//!   implementation in [`dom::memory`]
//! - Section renderers: [`SectionRenderer`]
//! - Interaction effects: [`Effects`]
//! - The page sequence: [`Bootstrap`]
//!
//! The browser runtime lives in the `folio` crate.

#![allow(clippy::module_name_repetitions, clippy::doc_markdown)]

pub mod bootstrap;
mod config;
pub mod dom;
pub mod effects;
mod error;
mod geometry;
mod model;
pub mod render;
pub mod selector;

pub use bootstrap::{Bootstrap, DataSource, FetchResponse, IconAnnotator};
pub use config::{Anchors, EffectsConfig, SiteConfig};
pub use dom::{DomDocument, DomNode, ElementBuilder};
pub use effects::{
    CursorGlow, Effects, IntersectionEntry, MagneticCard, NavbarScroll, RevealState,
    RevealTracker, TiltTransform,
};
pub use error::{FolioError, Result};
pub use geometry::{Point, Rect};
pub use model::{About, Contact, Portfolio, Project, Skill};
pub use render::SectionRenderer;
pub use selector::{Selector, SelectorError};
