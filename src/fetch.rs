use crate::error::FetchError;
use encoding_rs::{Encoding, UTF_8};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use url::Url;

/// How far into the body to look for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

/// Retrieves pages over HTTP
///
/// Requests go out without custom headers, timeouts or retries. Redirects are
/// followed; the final response must carry a success status.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Fetches `url` and returns the decoded body
    ///
    /// The body is read as raw bytes and decoded with the charset from the
    /// `Content-Type` header, else the one declared in a `<meta>` tag, else
    /// UTF-8. A byte order mark overrides both.
    pub async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        ::log::debug!("GET {}", url);
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string());

        let bytes = response.bytes().await?;
        let encoding = detect_encoding(content_type.as_deref(), &bytes);
        let (body, used, had_errors) = encoding.decode(&bytes);
        if had_errors {
            ::log::warn!("Malformed {} sequences in {}", used.name(), url);
        }
        ::log::debug!(
            "Fetched {} bytes from {} as {}",
            bytes.len(),
            url,
            used.name()
        );

        Ok(body.into_owned())
    }
}

/// Picks the encoding of a page body
fn detect_encoding(content_type: Option<&str>, body: &[u8]) -> &'static Encoding {
    content_type
        .and_then(header_charset)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .or_else(|| meta_charset(body).and_then(|label| Encoding::for_label(label.as_bytes())))
        .unwrap_or(UTF_8)
}

/// `charset` parameter of a `Content-Type` value
fn header_charset(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("charset") {
            Some(value.trim().trim_matches(|c: char| c == '"' || c == '\''))
        } else {
            None
        }
    })
}

/// Charset declared by a `<meta charset>` or `<meta http-equiv>` tag near the
/// start of the body
fn meta_charset(body: &[u8]) -> Option<String> {
    let head = &body[..body.len().min(META_SNIFF_LIMIT)];
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();

    head.match_indices("<meta").find_map(|(start, _)| {
        let tag = &head[start..];
        let tag = &tag[..tag.find('>').unwrap_or(tag.len())];
        let value = &tag[tag.find("charset=")? + "charset=".len()..];
        let value = value.trim_start_matches(|c: char| c == '"' || c == '\'' || c == ' ');
        let end = value
            .find(|c: char| c == '"' || c == '\'' || c == ';' || c == '/' || c.is_whitespace())
            .unwrap_or(value.len());
        let label = &value[..end];
        (!label.is_empty()).then(|| label.to_string())
    })
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Fetcher that ignores proxy settings from the environment
    pub(crate) fn local_fetcher() -> HttpFetcher {
        HttpFetcher::with_client(Client::builder().no_proxy().build().unwrap())
    }

    /// Serves a single canned HTTP response on a local port and returns its URL
    pub(crate) async fn serve_once(status_line: &str, body: &str) -> Url {
        serve_bytes(status_line, "text/html; charset=utf-8", body.as_bytes()).await
    }

    /// Like `serve_once`, with a raw body and a chosen content type
    pub(crate) async fn serve_bytes(status_line: &str, content_type: &str, body: &[u8]) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let mut response = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            content_type,
            body.len()
        )
        .into_bytes();
        response.extend_from_slice(body);

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            socket.write_all(&response).await.unwrap();
            socket.shutdown().await.unwrap();
        });

        Url::parse(&format!("http://{}/a/b", addr)).unwrap()
    }

    /// "日本" in Shift_JIS
    const NIHON_SJIS: &[u8] = &[0x93, 0xfa, 0x96, 0x7b];

    fn sjis_page(head: &str) -> Vec<u8> {
        let mut page = format!("<html><head>{}</head><body><main><a href=\"/", head).into_bytes();
        page.extend_from_slice(NIHON_SJIS);
        page.extend_from_slice(b"\">x</a></main></body></html>");
        page
    }

    #[test]
    fn test_header_charset() {
        assert_eq!(header_charset("text/html; charset=Shift_JIS"), Some("Shift_JIS"));
        assert_eq!(header_charset("text/html;Charset=\"utf-8\""), Some("utf-8"));
        assert_eq!(header_charset("text/html"), None);
    }

    #[test]
    fn test_meta_charset() {
        assert_eq!(
            meta_charset(br#"<html><head><meta charset="Shift_JIS"></head>"#).as_deref(),
            Some("shift_jis")
        );
        assert_eq!(
            meta_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=euc-jp">"#
            )
            .as_deref(),
            Some("euc-jp")
        );
        assert_eq!(meta_charset(br#"<meta name="viewport" content="x">"#), None);
    }

    #[test]
    fn test_detect_encoding_precedence() {
        let page = sjis_page(r#"<meta charset="shift_jis">"#);

        assert_eq!(detect_encoding(Some("text/html"), &page), encoding_rs::SHIFT_JIS);
        assert_eq!(
            detect_encoding(Some("text/html; charset=euc-jp"), &page),
            encoding_rs::EUC_JP
        );
        assert_eq!(
            detect_encoding(Some("text/html; charset=bogus"), &page),
            encoding_rs::SHIFT_JIS
        );
        assert_eq!(detect_encoding(None, b"<main></main>"), UTF_8);
    }

    #[tokio::test]
    async fn test_fetch_decodes_meta_charset() {
        let page = sjis_page(r#"<meta charset="Shift_JIS">"#);
        let url = serve_bytes("200 OK", "text/html", &page).await;

        let body = local_fetcher().fetch(&url).await.unwrap();
        assert!(body.contains("<a href=\"/日本\">"));
        assert!(!body.contains('\u{fffd}'));
    }

    #[tokio::test]
    async fn test_fetch_decodes_header_charset() {
        let page = sjis_page("");
        let url = serve_bytes("200 OK", "text/html; charset=shift_jis", &page).await;

        let body = local_fetcher().fetch(&url).await.unwrap();
        assert!(body.contains("/日本"));
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let url = serve_once("200 OK", "<main><a href=\"/x\">x</a></main>").await;

        let body = local_fetcher().fetch(&url).await.unwrap();
        assert_eq!(body, "<main><a href=\"/x\">x</a></main>");
    }

    #[tokio::test]
    async fn test_fetch_not_found() {
        let url = serve_once("404 Not Found", "").await;

        let err = local_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Status { status: 404, .. }));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_fetch_server_error() {
        let url = serve_once("503 Service Unavailable", "down").await;

        let err = local_fetcher().fetch(&url).await.unwrap_err();
        assert_eq!(err.status(), Some(503));
    }

    #[tokio::test]
    async fn test_fetch_connection_refused() {
        // Bind and drop to get a port nobody listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let url = Url::parse(&format!("http://{}/", addr)).unwrap();
        let err = local_fetcher().fetch(&url).await.unwrap_err();
        assert!(matches!(err, FetchError::Request(_)));
        assert_eq!(err.status(), None);
    }
}
