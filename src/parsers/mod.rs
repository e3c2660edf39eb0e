pub mod html;


/// Links found in the content region of a page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentLinks {
    /// Whether the content region exists in the document
    pub found: bool,
    /// Raw href values in document order, duplicates kept
    pub hrefs: Vec<String>,
}

impl ContentLinks {
    /// Creates a result for a region that was found
    pub fn new(hrefs: Vec<String>) -> Self {
        Self { found: true, hrefs }
    }

    /// Creates a result for a document without a content region
    pub fn not_found() -> Self {
        Self::default()
    }
}
