use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Width of the separator printed under the banner
const SEPARATOR_WIDTH: usize = 30;

/// How a report is written out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Banner followed by one URL per line
    #[default]
    Text,
    /// The report as a JSON object
    Json,
}

/// Links extracted from the content region of one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkReport {
    /// URL the page was fetched from, as configured
    pub source_url: String,

    /// Whether the content region was present
    pub content_found: bool,

    /// Absolute link targets in document order
    pub links: Vec<String>,
}

impl LinkReport {
    /// Create a new report
    pub fn new(source_url: String, content_found: bool, links: Vec<String>) -> Self {
        Self {
            source_url,
            content_found,
            links,
        }
    }

    /// Two-line banner that precedes the links in text output
    pub fn banner(&self) -> String {
        format!(
            "'{}' から見つかったリンク:\n{}",
            self.source_url,
            "-".repeat(SEPARATOR_WIDTH)
        )
    }

    /// Writes the report in the given format
    pub fn write<W: Write>(&self, out: &mut W, format: OutputFormat) -> io::Result<()> {
        match format {
            OutputFormat::Text => self.write_text(out),
            OutputFormat::Json => self.write_json(out),
        }
    }

    /// Writes the banner and then each link on its own line
    pub fn write_text<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.banner())?;
        for link in &self.links {
            writeln!(out, "{}", link)?;
        }
        out.flush()
    }

    /// Writes the report as pretty-printed JSON
    pub fn write_json<W: Write>(&self, out: &mut W) -> io::Result<()> {
        serde_json::to_writer_pretty(&mut *out, self)?;
        writeln!(out)?;
        out.flush()
    }
}
