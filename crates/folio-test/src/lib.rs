//! Testing harness for the Folio portfolio page.
//!
//! Runs the real pipeline from `folio-core` on an in-memory page:
//!
//! ```ignore
//! use folio_test::{PageHarness, fixture::JANE_JSON};
//!
//! let mut page = PageHarness::new();
//! page.boot_json(JANE_JSON);
//! page.assert_text("#name", "Jane")
//!     .assert_count(".skill-card", 1);
//!
//! page.scroll_to(51.0);
//! page.assert_class("#navbar", "scrolled");
//! ```

#![allow(clippy::missing_const_for_fn, clippy::doc_markdown)]

pub mod fixture;
mod harness;
mod stub;

pub use fixture::{portfolio_json, sample_portfolio, PageFixture, JANE_JSON};
pub use harness::PageHarness;
pub use stub::{StubIcons, StubSource};
