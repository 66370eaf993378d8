use anyhow::Result;
use meeple_catalog::Game;
use meeple_common::OutputFormat;
use std::io::Write;

/// One line per game, in the order given.
pub fn write_games<W: Write>(out: &mut W, games: &[Game], format: OutputFormat) -> Result<()> {
    for game in games {
        match format {
            OutputFormat::Text => writeln!(out, "{game}")?,
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, game)?;
                out.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}
