//! Queryable markup trees.
//!
//! Extraction only needs two capabilities: find every node matching a
//! query, and read the text under a node. Keeping them behind traits lets
//! tests drive the extractor with hand-built trees.

use scraper::{ElementRef, Html};

use crate::selectors::Query;

pub trait MarkupNode {
    /// Concatenated text of every descendant matching `query`, in document
    /// order. Empty when nothing matches.
    fn text_of(&self, query: &Query) -> String;
}

pub trait MarkupTree {
    type Node<'a>: MarkupNode
    where
        Self: 'a;

    /// All nodes matching `query`, in document order.
    fn select<'a>(&'a self, query: &Query) -> Vec<Self::Node<'a>>;
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse a full HTML document.
    ///
    /// The parser recovers from malformed markup the way browsers do; a blank
    /// body is an empty document.
    pub fn parse(markup: &str) -> Self {
        let html = Html::parse_document(markup);
        if !html.errors.is_empty() {
            tracing::trace!(count = html.errors.len(), "catalog.document.recovered_errors");
        }
        Self { html }
    }
}

impl MarkupTree for Document {
    type Node<'a> = ElementRef<'a>;

    fn select<'a>(&'a self, query: &Query) -> Vec<ElementRef<'a>> {
        self.html.select(query.selector()).collect()
    }
}

impl MarkupNode for ElementRef<'_> {
    fn text_of(&self, query: &Query) -> String {
        self.select(query.selector()).flat_map(|el| el.text()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::Field;

    fn q(raw: &str) -> Query {
        Query::parse(Field::Title, raw).unwrap()
    }

    #[test]
    fn blank_body_has_no_nodes() {
        assert!(Document::parse("").select(&q(".a")).is_empty());
        assert!(Document::parse(" \n\t").select(&q(".a")).is_empty());
    }

    #[test]
    fn broken_markup_still_parses() {
        let doc = Document::parse("<div class='a'><p>unclosed");
        assert_eq!(doc.select(&q(".a")).len(), 1);
    }

    #[test]
    fn text_of_concatenates_all_matches() {
        let doc = Document::parse(
            "<div class='card'><i class='x'>one</i><b>skip</b><i class='x'>two <em>three</em></i></div>",
        );
        let cards = doc.select(&q(".card"));
        assert_eq!(cards[0].text_of(&q(".x")), "onetwo three");
        assert_eq!(cards[0].text_of(&q(".missing")), "");
    }

    #[test]
    fn text_of_only_looks_below_the_node() {
        let doc = Document::parse(
            "<span class='price'>outside</span><div class='card'><span class='price'>inside</span></div>",
        );
        let cards = doc.select(&q(".card"));
        assert_eq!(cards[0].text_of(&q("span.price")), "inside");
    }
}
