use anyhow::{Context, Result, bail};
use clap::Parser;
use meeple_common::observability::init_logging;
use meeple_config::{DEFAULT_CONFIG_FILE, MeepleConfig, MeepleConfigLoader};
use std::io::Write;

use cli::Cli;
mod cli;
mod harvest;
mod render;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file, flags win over both)
    let cfg = load_config(&cli)?;

    let mut logging = cfg.logging.clone();
    logging.stderr |= cli.verbose;
    init_logging(&logging)?;

    let crawler = harvest::build_crawler(&cfg)?;
    let report = crawler.run().await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    render::write_games(&mut out, &report.games, cfg.output.format)?;
    out.flush().context("failed to flush stdout")?;

    if cli.strict && !report.is_complete() {
        let failed: Vec<String> = report
            .failed_pages()
            .map(|p| format!("{} ({})", p.page, p.url))
            .collect();
        bail!("{} page(s) failed: {}", failed.len(), failed.join(", "));
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<MeepleConfig> {
    let loader = match &cli.config {
        Some(path) => MeepleConfigLoader::new().with_file(path),
        None => MeepleConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg = loader.load().context("failed to load configuration")?;
    cli.apply(&mut cfg);
    cfg.validate().context("invalid command-line overrides")?;
    Ok(cfg)
}
