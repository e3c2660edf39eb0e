use clap::{Parser, ValueEnum};
use page_links::OutputFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-links")]
#[command(about = "Lists the links found in the main content of a web page")]
#[command(version)]
pub struct Args {
    /// Page to fetch (defaults to the built-in URL or the config file's)
    pub url: Option<String>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// CSS selector for the content region
    #[arg(short, long)]
    pub selector: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = FormatArg::Text)]
    pub format: FormatArg,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Text,
    Json,
}

/// Convert from CLI argument format to the library's output format
pub fn convert_format(arg: FormatArg) -> OutputFormat {
    match arg {
        FormatArg::Text => OutputFormat::Text,
        FormatArg::Json => OutputFormat::Json,
    }
}
