use colored::*;
use std::io::{self, Write};

use crate::batch::UploadOutcome;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The bare URL, one per line.
    #[default]
    Url,
    /// `![](url)`, ready to paste into a Markdown document.
    Markdown,
}

impl OutputFormat {
    fn render(self, url: &str) -> String {
        match self {
            OutputFormat::Url => url.to_string(),
            OutputFormat::Markdown => format!("![]({})", url),
        }
    }
}

/// Writes successes to `out` and failures to `err`, in outcome order.
///
/// Returns `true` when every upload succeeded.
pub fn print_outcomes<O: Write, E: Write>(
    outcomes: &[UploadOutcome],
    format: OutputFormat,
    out: &mut O,
    err: &mut E,
) -> io::Result<bool> {
    let mut all_ok = true;
    for outcome in outcomes {
        match &outcome.result {
            Ok(url) => writeln!(out, "{}", format.render(url))?,
            Err(e) => {
                all_ok = false;
                writeln!(
                    err,
                    "{} {}: {}",
                    "Upload failed for".red(),
                    outcome.path.display(),
                    e
                )?;
            }
        }
    }
    out.flush()?;
    Ok(all_ok)
}
