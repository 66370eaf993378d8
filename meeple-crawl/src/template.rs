use url::Url;

use crate::CrawlError;

const PLACEHOLDER: &str = "{page}";

/// A listing URL with a `{page}` placeholder.
///
/// ```
/// use meeple_crawl::PageTemplate;
///
/// let t = PageTemplate::new("https://hobbygames.ru/nastolnie/ekbg?page={page}&parameter_type=0").unwrap();
/// assert_eq!(t.render(3), "https://hobbygames.ru/nastolnie/ekbg?page=3&parameter_type=0");
/// ```
#[derive(Debug, Clone)]
pub struct PageTemplate {
    raw: String,
}

impl PageTemplate {
    /// Accepts templates that contain the placeholder and render to a valid
    /// absolute URL.
    pub fn new(raw: &str) -> Result<Self, CrawlError> {
        let raw = raw.trim();
        if !raw.contains(PLACEHOLDER) {
            return Err(CrawlError::Template(format!("missing {PLACEHOLDER} in `{raw}`")));
        }
        let template = Self {
            raw: raw.to_string(),
        };
        Url::parse(&template.render(1))
            .map_err(|e| CrawlError::Template(format!("`{raw}`: {e}")))?;
        Ok(template)
    }

    pub fn render(&self, page: u32) -> String {
        self.raw.replace(PLACEHOLDER, &page.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_placeholder_is_replaced() {
        let t = PageTemplate::new("https://example.com/p/{page}?page={page}").unwrap();
        assert_eq!(t.render(12), "https://example.com/p/12?page=12");
    }

    #[test]
    fn template_without_placeholder_is_rejected() {
        assert!(matches!(
            PageTemplate::new("https://example.com/list"),
            Err(CrawlError::Template(_))
        ));
    }

    #[test]
    fn relative_template_is_rejected() {
        assert!(matches!(
            PageTemplate::new("/nastolnie/ekbg?page={page}"),
            Err(CrawlError::Template(_))
        ));
    }
}
