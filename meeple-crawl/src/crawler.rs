use futures::{StreamExt, stream};
use meeple_catalog::{Game, Selectors, parse_listing};
use serde::Serialize;
use std::ops::RangeInclusive;

use crate::CrawlError;
use crate::source::PageSource;
use crate::template::PageTemplate;

/// Which pages to visit and how many to keep in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlPlan {
    pub first_page: u32,
    pub pages: u32,
    pub concurrency: usize,
}

impl Default for CrawlPlan {
    fn default() -> Self {
        Self {
            first_page: 1,
            pages: 9,
            concurrency: 1,
        }
    }
}

impl CrawlPlan {
    pub fn page_numbers(&self) -> Result<RangeInclusive<u32>, CrawlError> {
        if self.first_page == 0 || self.pages == 0 {
            return Err(CrawlError::InvalidRange);
        }
        let last = self
            .first_page
            .checked_add(self.pages - 1)
            .ok_or(CrawlError::InvalidRange)?;
        Ok(self.first_page..=last)
    }
}

/// Result of fetching and parsing one page.
#[derive(Debug)]
pub struct PageOutcome {
    pub page: u32,
    pub url: String,
    pub result: Result<Vec<Game>, CrawlError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum PageStatus {
    Parsed { records: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageSummary {
    pub page: u32,
    pub url: String,
    #[serde(flatten)]
    pub status: PageStatus,
}

/// Everything a run produced, in page order.
#[derive(Debug, Default, Serialize)]
pub struct CrawlReport {
    pub games: Vec<Game>,
    pub pages: Vec<PageSummary>,
}

impl CrawlReport {
    fn absorb(mut self, outcome: PageOutcome) -> Self {
        let status = match outcome.result {
            Ok(mut games) => {
                let records = games.len();
                self.games.append(&mut games);
                PageStatus::Parsed { records }
            }
            Err(e) => PageStatus::Failed {
                error: e.to_string(),
            },
        };
        self.pages.push(PageSummary {
            page: outcome.page,
            url: outcome.url,
            status,
        });
        self
    }

    pub fn failed_pages(&self) -> impl Iterator<Item = &PageSummary> {
        self.pages
            .iter()
            .filter(|p| matches!(p.status, PageStatus::Failed { .. }))
    }

    pub fn is_complete(&self) -> bool {
        self.failed_pages().next().is_none()
    }
}

/// Walks a page range and collects every listing it can parse.
pub struct Crawler<S> {
    source: S,
    template: PageTemplate,
    selectors: Selectors,
    plan: CrawlPlan,
}

impl<S: PageSource> Crawler<S> {
    pub fn new(source: S, template: PageTemplate, selectors: Selectors, plan: CrawlPlan) -> Self {
        Self {
            source,
            template,
            selectors,
            plan,
        }
    }

    /// Fetch and parse a single page. Failures end up in the outcome.
    pub async fn crawl_page(&self, page: u32) -> PageOutcome {
        let url = self.template.render(page);
        tracing::debug!(page, url = %url, "crawl.page.start");

        let result = self.fetch_and_parse(&url).await;
        match &result {
            Ok(games) => tracing::info!(page, records = games.len(), "crawl.page.parsed"),
            Err(e) => tracing::warn!(page, url = %url, error = %e, "crawl.page.skipped"),
        }

        PageOutcome { page, url, result }
    }

    async fn fetch_and_parse(&self, url: &str) -> Result<Vec<Game>, CrawlError> {
        let body = self.source.fetch(url).await?;
        // The parsed tree stays inside this synchronous call.
        Ok(parse_listing(&body, &self.selectors))
    }

    /// Visit every page in the plan.
    ///
    /// Up to `plan.concurrency` pages are fetched at once; the report is
    /// always ordered by page number, then by position on the page.
    pub async fn run(&self) -> Result<CrawlReport, CrawlError> {
        let pages = self.plan.page_numbers()?;
        let concurrency = self.plan.concurrency.max(1);
        tracing::info!(
            template = self.template.as_str(),
            first_page = *pages.start(),
            last_page = *pages.end(),
            concurrency,
            "crawl.run.start"
        );

        let report = stream::iter(pages)
            .map(|page| self.crawl_page(page))
            .buffered(concurrency)
            .fold(CrawlReport::default(), |report, outcome| async move {
                report.absorb(outcome)
            })
            .await;

        tracing::info!(
            records = report.games.len(),
            pages = report.pages.len(),
            failed = report.failed_pages().count(),
            "crawl.run.done"
        );
        Ok(report)
    }
}
