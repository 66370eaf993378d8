use clap::Parser;
use meeple_common::OutputFormat;
use meeple_config::MeepleConfig;
use std::path::PathBuf;

/// Harvest board-game listings and print one record per line.
#[derive(Debug, Parser)]
#[command(name = "meeple", version)]
pub struct Cli {
    /// Configuration file; `meeple.yaml` is read when present if omitted.
    #[arg(short, long, env = "MEEPLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Number of listing pages to fetch.
    #[arg(long)]
    pub pages: Option<u32>,

    /// First page number.
    #[arg(long)]
    pub first_page: Option<u32>,

    /// Pages fetched at once.
    #[arg(long)]
    pub concurrency: Option<usize>,

    /// Output format: text or json.
    #[arg(long)]
    pub format: Option<OutputFormat>,

    /// Exit with an error if any page failed.
    #[arg(long)]
    pub strict: bool,

    /// Mirror log events to stderr.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn apply(&self, cfg: &mut MeepleConfig) {
        if let Some(pages) = self.pages {
            cfg.crawl.pages = pages;
        }
        if let Some(first) = self.first_page {
            cfg.crawl.first_page = first;
        }
        if let Some(n) = self.concurrency {
            cfg.crawl.concurrency = n;
        }
        if let Some(format) = self.format {
            cfg.output.format = format;
        }
    }
}
