//! CSS selectors for the listing markup.
//!
//! Defaults target the hobbygames.ru catalogue. When the site changes its
//! markup, override the affected entries through configuration instead of
//! editing [`SelectorSpec::default`].

use scraper::Selector;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CatalogError;

/// Which part of a listing a selector locates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Card,
    Title,
    Price,
    Players,
    Duration,
    Age,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Field::Card => "card",
            Field::Title => "title",
            Field::Price => "price",
            Field::Players => "players",
            Field::Duration => "duration",
            Field::Age => "age",
        })
    }
}

/// Selector strings as they appear in configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorSpec {
    /// Product card container.
    pub card: String,
    pub title: String,
    pub price: String,
    pub players: String,
    pub duration: String,
    pub age: String,
}

impl Default for SelectorSpec {
    fn default() -> Self {
        Self {
            card: ".product-item  ".into(),
            title: ".name".into(),
            price: "span.price".into(),
            players: ".params__item.players".into(),
            duration: ".params__item.time".into(),
            age: ".age__number".into(),
        }
    }
}

/// A compiled selector that remembers its source text.
#[derive(Debug, Clone)]
pub struct Query {
    raw: String,
    compiled: Selector,
}

impl Query {
    /// Compile `raw`, ignoring whitespace around it.
    ///
    /// ```
    /// use meeple_catalog::{Field, Query};
    ///
    /// let q = Query::parse(Field::Card, " .product-item  ").unwrap();
    /// assert_eq!(q.as_str(), ".product-item");
    /// assert!(Query::parse(Field::Title, "").is_err());
    /// ```
    pub fn parse(field: Field, raw: &str) -> Result<Self, CatalogError> {
        let trimmed = raw.trim();
        let compiled = Selector::parse(trimmed).map_err(|e| CatalogError::Selector {
            field,
            selector: raw.to_string(),
            message: e.to_string(),
        })?;
        Ok(Self {
            raw: trimmed.to_string(),
            compiled,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn selector(&self) -> &Selector {
        &self.compiled
    }
}

/// Every query the extractor needs, compiled once per run.
#[derive(Debug, Clone)]
pub struct Selectors {
    pub card: Query,
    pub title: Query,
    pub price: Query,
    pub players: Query,
    pub duration: Query,
    pub age: Query,
}

impl Selectors {
    pub fn compile(spec: &SelectorSpec) -> Result<Self, CatalogError> {
        let selectors = Self {
            card: Query::parse(Field::Card, &spec.card)?,
            title: Query::parse(Field::Title, &spec.title)?,
            price: Query::parse(Field::Price, &spec.price)?,
            players: Query::parse(Field::Players, &spec.players)?,
            duration: Query::parse(Field::Duration, &spec.duration)?,
            age: Query::parse(Field::Age, &spec.age)?,
        };
        tracing::debug!(
            card = selectors.card.as_str(),
            title = selectors.title.as_str(),
            price = selectors.price.as_str(),
            players = selectors.players.as_str(),
            duration = selectors.duration.as_str(),
            age = selectors.age.as_str(),
            "catalog.selectors.compiled"
        );
        Ok(selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_compile() {
        let s = Selectors::compile(&SelectorSpec::default()).unwrap();
        assert_eq!(s.card.as_str(), ".product-item");
        assert_eq!(s.price.as_str(), "span.price");
    }

    #[test]
    fn invalid_selector_names_the_field() {
        let spec = SelectorSpec {
            age: "..broken[".into(),
            ..SelectorSpec::default()
        };
        match Selectors::compile(&spec) {
            Err(CatalogError::Selector { field, selector, .. }) => {
                assert_eq!(field, Field::Age);
                assert_eq!(selector, "..broken[");
            }
            other => panic!("expected selector error, got {other:?}"),
        }
    }
}
