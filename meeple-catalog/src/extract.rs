use meeple_common::NO_INFORMATION;

use crate::normalize::normalize;
use crate::record::{Game, RawCard};
use crate::selectors::Selectors;
use crate::tree::{Document, MarkupNode, MarkupTree};

/// Read the five fields of one card.
///
/// Never fails: missing text fields fall back to [`NO_INFORMATION`], a
/// missing price stays empty.
pub fn extract_card<N: MarkupNode>(card: &N, selectors: &Selectors) -> RawCard {
    RawCard {
        title: or_sentinel(card.text_of(&selectors.title)),
        price: card.text_of(&selectors.price),
        players: or_sentinel(card.text_of(&selectors.players)),
        duration: or_sentinel(card.text_of(&selectors.duration)),
        age: or_sentinel(card.text_of(&selectors.age)),
    }
}

fn or_sentinel(text: String) -> String {
    if text.is_empty() {
        NO_INFORMATION.to_string()
    } else {
        text
    }
}

/// One [`Game`] per card in `tree`, in document order.
pub fn extract_records<T: MarkupTree>(tree: &T, selectors: &Selectors) -> Vec<Game> {
    tree.select(&selectors.card)
        .iter()
        .map(|card| normalize(extract_card(card, selectors)))
        .collect()
}

/// Parse a listing page and extract its records.
///
/// A page without cards, blank bodies included, yields an empty vector.
pub fn parse_listing(markup: &str, selectors: &Selectors) -> Vec<Game> {
    let games = extract_records(&Document::parse(markup), selectors);
    tracing::debug!(cards = games.len(), "catalog.listing.parsed");
    games
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selectors::{Query, SelectorSpec};
    use std::collections::HashMap;

    /// A card whose fields are keyed by selector text.
    struct FakeCard(HashMap<&'static str, &'static str>);

    impl MarkupNode for FakeCard {
        fn text_of(&self, query: &Query) -> String {
            self.0.get(query.as_str()).copied().unwrap_or_default().to_string()
        }
    }

    struct FakeTree(Vec<FakeCard>);

    impl MarkupTree for FakeTree {
        type Node<'a> = &'a FakeCard;

        fn select<'a>(&'a self, query: &Query) -> Vec<&'a FakeCard> {
            if query.as_str() == ".product-item" {
                self.0.iter().collect()
            } else {
                Vec::new()
            }
        }
    }

    impl MarkupNode for &FakeCard {
        fn text_of(&self, query: &Query) -> String {
            (**self).text_of(query)
        }
    }

    fn selectors() -> Selectors {
        Selectors::compile(&SelectorSpec::default()).unwrap()
    }

    fn card(fields: &[(&'static str, &'static str)]) -> FakeCard {
        FakeCard(fields.iter().copied().collect())
    }

    #[test]
    fn missing_fields_use_sentinel_except_price() {
        let raw = extract_card(&card(&[]), &selectors());
        assert_eq!(raw.title, NO_INFORMATION);
        assert_eq!(raw.players, NO_INFORMATION);
        assert_eq!(raw.duration, NO_INFORMATION);
        assert_eq!(raw.age, NO_INFORMATION);
        assert_eq!(raw.price, "");
    }

    #[test]
    fn whitespace_only_text_is_not_missing() {
        let raw = extract_card(&card(&[(".name", "  ")]), &selectors());
        assert_eq!(raw.title, "  ");
        assert_eq!(normalize(raw).title, "");
    }

    #[test]
    fn synthetic_tree_yields_records_in_order() {
        let tree = FakeTree(vec![
            card(&[
                (".name", " Catan "),
                ("span.price", "1 990 ₽"),
                (".params__item.players", "3–4"),
                (".params__item.time", "60–90 мин"),
                (".age__number", "10+"),
            ]),
            card(&[(".name", "Каркассон"), ("span.price", "2 490 ₽")]),
        ]);

        let games = extract_records(&tree, &selectors());
        assert_eq!(games.len(), 2);
        assert_eq!(
            games[0],
            Game {
                title: "Catan".into(),
                price: Some(1990),
                players: "3–4".into(),
                duration: "60–90 мин".into(),
                age: "10+".into(),
            }
        );
        assert_eq!(games[1].title, "Каркассон");
        assert_eq!(games[1].price, Some(2490));
        assert_eq!(games[1].players, NO_INFORMATION);
    }

    #[test]
    fn identical_cards_are_not_deduplicated() {
        let tree = FakeTree(vec![
            card(&[(".name", "Uno")]),
            card(&[(".name", "Uno")]),
        ]);
        let games = extract_records(&tree, &selectors());
        assert_eq!(games.len(), 2);
        assert_eq!(games[0], games[1]);
    }

    #[test]
    fn no_cards_is_an_empty_result() {
        assert!(extract_records(&FakeTree(Vec::new()), &selectors()).is_empty());
        let games = parse_listing("<html><body><p>Ничего не найдено</p></body></html>", &selectors());
        assert!(games.is_empty());
    }

    #[test]
    fn empty_markup_is_an_empty_listing() {
        assert!(parse_listing("", &selectors()).is_empty());
    }
}
