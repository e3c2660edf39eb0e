use url::Url;

/// Resolves a single href against the page URL
///
/// An href that already carries a scheme is returned exactly as written.
/// Scheme-relative and path-relative hrefs take the scheme, authority and
/// path of `base`. An href the URL parser rejects is passed through as is.
pub fn resolve(base: &Url, href: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }

    match base.join(href) {
        Ok(url) => url.to_string(),
        Err(e) => {
            ::log::warn!("Cannot resolve link '{}', keeping it as is: {}", href, e);
            href.to_string()
        }
    }
}

/// Resolves every href in order, one output per href, duplicates kept
pub fn resolve_links<S: AsRef<str>>(base: &Url, hrefs: &[S]) -> Vec<String> {
    hrefs.iter().map(|href| resolve(base, href.as_ref())).collect()
}
