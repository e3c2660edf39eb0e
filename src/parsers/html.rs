use crate::error::{ExtractError, Result};
use crate::parsers::ContentLinks;
use scraper::{Html, Selector};

/// Anchors that carry a link target
const LINK_SELECTOR: &str = "a[href]";

/// Parses HTML and collects the href of every anchor inside the first element
/// matching `content_selector`.
///
/// Malformed markup is recovered by the parser. A document with no matching
/// element yields an empty result with `found == false`.
pub fn content_links(html: &str, content_selector: &str) -> Result<ContentLinks> {
    let region_selector = parse_selector(content_selector)?;
    let link_selector = parse_selector(LINK_SELECTOR)?;

    let doc = Html::parse_document(html);

    let Some(region) = doc.select(&region_selector).next() else {
        ::log::debug!("No element matches '{}'", content_selector);
        return Ok(ContentLinks::not_found());
    };

    let hrefs = region
        .select(&link_selector)
        .filter_map(|e| e.value().attr("href"))
        .map(|s| s.to_string())
        .collect::<Vec<String>>();

    ::log::debug!(
        "HTML parser found {} links in '{}'",
        hrefs.len(),
        content_selector
    );
    if !hrefs.is_empty() {
        ::log::debug!(
            "First few links: {:?}",
            hrefs.iter().take(5).collect::<Vec<_>>()
        );
    }

    Ok(ContentLinks::new(hrefs))
}

/// Compiles a CSS selector, keeping the offending input in the error
pub fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: e.to_string(),
    })
}
