//! Page-by-page harvesting of a paginated listing.
//!
//! - [`PageTemplate`] turns a page number into a URL
//! - [`PageSource`] fetches the markup for a URL; [`HttpPageSource`] does it
//!   over HTTP, tests plug in canned pages
//! - [`Crawler`] walks the page range, parses every page and folds the
//!   results into a [`CrawlReport`]
//!
//! A page that cannot be fetched or parsed is logged and contributes no
//! records; it never stops the remaining pages.

pub mod crawler;
pub mod source;
pub mod template;

pub use crawler::{CrawlPlan, CrawlReport, Crawler, PageOutcome, PageStatus, PageSummary};
pub use source::{HttpPageSource, PageSource};
pub use template::PageTemplate;

use meeple_http::HttpError;

#[derive(thiserror::Error, Debug)]
pub enum CrawlError {
    #[error("invalid page URL template: {0}")]
    Template(String),

    #[error("fetch failed: {0}")]
    Fetch(#[from] HttpError),

    #[error("page range is empty or starts at 0")]
    InvalidRange,
}
