//! Text clean-up applied to every extracted field.

use regex::Regex;
use std::sync::LazyLock;

use crate::record::{Game, RawCard};

// `\d` would also accept non-ASCII digits.
static NON_DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^0-9]").expect("static regex compiles"));

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceFormatError {
    #[error("no digits in price `{input}`")]
    Empty { input: String },

    #[error("price digits `{digits}` do not fit in u64")]
    Overflow { digits: String },
}

/// Strip leading and trailing whitespace.
pub fn trim(text: &str) -> &str {
    text.trim()
}

/// Keep only ASCII digits and read them as one base-10 number.
///
/// Separators, currency signs and the decimal point are all dropped, so any
/// fraction digits end up concatenated onto the whole part.
///
/// ```
/// use meeple_catalog::parse_price;
///
/// assert_eq!(parse_price("1 990 ₽").unwrap(), 1990);
/// assert_eq!(parse_price("1 234,56 ₽").unwrap(), 123456);
/// assert!(parse_price("").is_err());
/// ```
pub fn parse_price(text: &str) -> Result<u64, PriceFormatError> {
    let digits = NON_DIGIT.replace_all(text, "");
    if digits.is_empty() {
        return Err(PriceFormatError::Empty {
            input: text.to_string(),
        });
    }
    digits.parse::<u64>().map_err(|_| PriceFormatError::Overflow {
        digits: digits.into_owned(),
    })
}

/// Turn extracted card text into a [`Game`].
///
/// An unparseable price becomes `None`; it never fails the card.
pub fn normalize(raw: RawCard) -> Game {
    let price = match parse_price(trim(&raw.price)) {
        Ok(p) => Some(p),
        Err(e) => {
            tracing::debug!(title = %trim(&raw.title), error = %e, "catalog.price.unknown");
            None
        }
    };

    Game {
        title: trim(&raw.title).to_string(),
        price,
        players: trim(&raw.players).to_string(),
        duration: trim(&raw.duration).to_string(),
        age: trim(&raw.age).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meeple_common::NO_INFORMATION;

    #[test]
    fn trim_is_idempotent() {
        for s in ["", "   ", "\n\t Catan \u{a0}", "10+", " a b "] {
            assert_eq!(trim(trim(s)), trim(s));
        }
    }

    #[test]
    fn trim_handles_unicode_whitespace() {
        assert_eq!(trim("\u{a0}3–4\u{2003}"), "3–4");
    }

    #[test]
    fn price_keeps_fraction_digits() {
        assert_eq!(parse_price("1 234,56 ₽"), Ok(123456));
    }

    #[test]
    fn price_ignores_non_ascii_digits() {
        // Arabic-Indic digits are dropped like any other symbol.
        assert_eq!(parse_price("٣ 450 руб."), Ok(450));
    }

    #[test]
    fn empty_price_is_an_error() {
        assert_eq!(
            parse_price(""),
            Err(PriceFormatError::Empty { input: String::new() })
        );
        assert!(matches!(
            parse_price("Нет в наличии"),
            Err(PriceFormatError::Empty { .. })
        ));
    }

    #[test]
    fn huge_price_overflows() {
        let err = parse_price("99999999999999999999999 ₽").unwrap_err();
        assert!(matches!(err, PriceFormatError::Overflow { .. }));
    }

    #[test]
    fn normalize_trims_every_field() {
        let game = normalize(RawCard {
            title: "\n  Catan ".into(),
            price: " 1 990 ₽\n".into(),
            players: " 3–4 ".into(),
            duration: "\t60–90 мин".into(),
            age: "10+ ".into(),
        });
        assert_eq!(
            game,
            Game {
                title: "Catan".into(),
                price: Some(1990),
                players: "3–4".into(),
                duration: "60–90 мин".into(),
                age: "10+".into(),
            }
        );
    }

    #[test]
    fn normalize_keeps_sentinels_and_unknown_price() {
        let game = normalize(RawCard {
            title: NO_INFORMATION.into(),
            price: String::new(),
            players: NO_INFORMATION.into(),
            duration: NO_INFORMATION.into(),
            age: NO_INFORMATION.into(),
        });
        assert_eq!(game.title, NO_INFORMATION);
        assert_eq!(game.price, None);
        assert_eq!(game.age, NO_INFORMATION);
    }
}
