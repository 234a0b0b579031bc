//! JSON output for scraped records.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use serde::Serialize;

/// Write `records` as pretty JSON to `output`, or to stdout when `None`.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    records: &T,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(records)?;
    match output {
        Some(path) => {
            std::fs::write(path, format!("{json}\n"))
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), "records written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{json}")?;
        }
    }
    Ok(())
}
