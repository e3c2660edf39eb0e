use clap::Parser;
use page_links::LinkExtractor;

mod args;
use args::{Args, convert_format};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    // Config file first, then command-line overrides
    let mut extractor = match &args.config {
        Some(path) => LinkExtractor::default().with_config_file(path)?,
        None => LinkExtractor::default(),
    };
    if let Some(url) = &args.url {
        extractor = extractor.with_source_url(url);
    }
    if let Some(selector) = &args.selector {
        extractor = extractor.with_content_selector(selector);
    }

    let report = match extractor.extract().await {
        Ok(report) => report,
        Err(e) => {
            ::log::error!(
                "Failed to extract links from {}: {}",
                extractor.config().source_url,
                e
            );
            return Err(e.into());
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    report.write(&mut out, convert_format(args.format))?;

    Ok(())
}
