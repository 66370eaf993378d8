//! Listing-page extraction for board-game catalogues.
//!
//! - [`selectors`]: the structural queries that locate cards and their fields
//! - [`tree`]: the markup tree abstraction and its `scraper`-backed implementation
//! - [`extract`]: per-card field extraction and whole-page parsing
//! - [`normalize`]: whitespace trimming and price digit extraction
//! - [`record`]: the [`Game`] record and the un-normalized [`RawCard`]
//!
//! ```
//! use meeple_catalog::{parse_listing, SelectorSpec, Selectors};
//!
//! let selectors = Selectors::compile(&SelectorSpec::default()).unwrap();
//! let html = r#"<div class="product-item">
//!   <a class="name"> Catan </a><span class="price">1 990 ₽</span>
//! </div>"#;
//! let games = parse_listing(html, &selectors);
//! assert_eq!(games[0].title, "Catan");
//! assert_eq!(games[0].price, Some(1990));
//! assert_eq!(games[0].age, "No information");
//! ```

pub mod extract;
pub mod normalize;
pub mod record;
pub mod selectors;
pub mod tree;

pub use extract::{extract_card, extract_records, parse_listing};
pub use normalize::{PriceFormatError, parse_price, trim};
pub use record::{Game, RawCard};
pub use selectors::{Field, Query, SelectorSpec, Selectors};
pub use tree::{Document, MarkupNode, MarkupTree};

/// Failures while preparing selectors.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("invalid {field} selector `{selector}`: {message}")]
    Selector {
        field: Field,
        selector: String,
        message: String,
    },
}
