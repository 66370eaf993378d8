use anyhow::{Context, Result};
use meeple_catalog::Selectors;
use meeple_config::MeepleConfig;
use meeple_crawl::{CrawlPlan, Crawler, HttpPageSource, PageTemplate};
use meeple_http::HttpClient;
use std::time::Duration;

/// Wire the HTTP client, selectors and page plan from configuration.
pub fn build_crawler(cfg: &MeepleConfig) -> Result<Crawler<HttpPageSource>> {
    let client = HttpClient::new()
        .context("failed to build HTTP client")?
        .with_timeout(cfg.crawl.timeout_secs.map(Duration::from_secs));

    let mut source = HttpPageSource::new(client);
    if let Some(agent) = cfg.crawl.user_agent.as_deref() {
        source = source.with_user_agent(agent);
    }

    let template = PageTemplate::new(&cfg.source.url_template)?;
    let selectors = Selectors::compile(&cfg.selectors).context("failed to compile selectors")?;
    let plan = CrawlPlan {
        first_page: cfg.crawl.first_page,
        pages: cfg.crawl.pages,
        concurrency: cfg.crawl.concurrency,
    };

    tracing::debug!(?plan, timeout_secs = ?cfg.crawl.timeout_secs, "harvest.crawler.built");
    Ok(Crawler::new(source, template, selectors, plan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds() {
        assert!(build_crawler(&MeepleConfig::default()).is_ok());
    }

    #[test]
    fn bad_selector_fails_at_startup() {
        let mut cfg = MeepleConfig::default();
        cfg.selectors.card = "div[".into();
        let err = build_crawler(&cfg).err().expect("selector error");
        assert!(format!("{err:#}").contains("card"));
    }

    #[test]
    fn relative_template_fails_at_startup() {
        let mut cfg = MeepleConfig::default();
        cfg.source.url_template = "list?page={page}".into();
        assert!(build_crawler(&cfg).is_err());
    }
}
