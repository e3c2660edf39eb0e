pub mod config;
pub mod error;
pub mod fetch;
pub mod parsers;
pub mod resolve;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{DEFAULT_SOURCE_URL, ExtractorConfig};
pub use error::{ExtractError, FetchError, Result};
pub use results::{LinkReport, OutputFormat};

use fetch::HttpFetcher;
use url::Url;

/// Builder that fetches one page and extracts the links in its content region
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    config: ExtractorConfig,
}

impl LinkExtractor {
    /// Create a new extractor for the given page URL
    pub fn new(source_url: &str) -> Self {
        Self {
            config: ExtractorConfig::new(source_url),
        }
    }

    /// Replace the page URL
    pub fn with_source_url(mut self, source_url: &str) -> Self {
        self.config.source_url = source_url.to_string();
        self
    }

    /// Set the CSS selector locating the content region
    pub fn with_content_selector(mut self, selector: &str) -> Self {
        self.config.content_selector = selector.to_string();
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ExtractorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config = ExtractorConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self> {
        let config = serde_json::from_str(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Fetch the page and extract its links
    pub async fn extract(&self) -> Result<LinkReport> {
        let fetcher = HttpFetcher::new()?;
        self.extract_with(&fetcher).await
    }

    /// Fetch the page with the given fetcher and extract its links
    pub async fn extract_with(&self, fetcher: &HttpFetcher) -> Result<LinkReport> {
        let base = self.source_url()?;
        ::log::info!("Extracting links from: {}", base);

        let html = fetcher.fetch(&base).await?;
        self.links_from_html(&base, &html)
    }

    /// Extract links from an already fetched page body
    pub fn extract_from_html(&self, html: &str) -> Result<LinkReport> {
        let base = self.source_url()?;
        self.links_from_html(&base, html)
    }

    fn source_url(&self) -> Result<Url> {
        Url::parse(&self.config.source_url).map_err(|source| ExtractError::InvalidUrl {
            url: self.config.source_url.clone(),
            source,
        })
    }

    fn links_from_html(&self, base: &Url, html: &str) -> Result<LinkReport> {
        let content = parsers::html::content_links(html, &self.config.content_selector)?;
        if !content.found {
            ::log::info!(
                "No '{}' element in {}, no links to report",
                self.config.content_selector,
                base
            );
        }

        let links = resolve::resolve_links(base, &content.hrefs);
        ::log::info!("Found {} links in {}", links.len(), base);

        Ok(LinkReport::new(
            self.config.source_url.clone(),
            content.found,
            links,
        ))
    }
}
