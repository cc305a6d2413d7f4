//! Loads text from an `http(s)` URL.
//!
//! A download is treated as PDF when the content type or the path says so,
//! or when the body starts with the `%PDF` magic bytes. Plain text is cut off
//! at [`Limits::text`]; a PDF larger than [`Limits::pdf`] is rejected.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::redirect::Policy;
use reqwest::Url;

use super::{non_blank, pdf, LoadError, LoadedDocument};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const READ_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_REDIRECTS: usize = 10;
const PDF_MAGIC: &[u8] = b"%PDF";

/// Size caps applied while the body streams in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    pub text: usize,
    pub pdf: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            text: 2 * 1024 * 1024,
            pdf: 512 * 1024 * 1024,
        }
    }
}

/// Whether `input` should be fetched rather than read from disk.
pub fn is_url(input: &str) -> bool {
    let lower = input.trim_start().to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// PDF hint from the response headers or the URL path, before any body bytes.
pub fn pdf_hint(content_type: Option<&str>, url: &str) -> bool {
    let by_type = content_type.is_some_and(|ct| ct.to_ascii_lowercase().contains("pdf"));
    let path = url.split(['?', '#']).next().unwrap_or(url);
    by_type || path.to_ascii_lowercase().ends_with(".pdf")
}

/// Name shown in the history: the last path segment, else the host.
pub fn document_name(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return url.to_string();
    };
    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .or_else(|| parsed.host_str().map(str::to_string))
        .unwrap_or_else(|| url.to_string())
}

/// Response body, classified once it is complete.
#[derive(Debug, PartialEq, Eq)]
pub enum Body {
    Text(String),
    Pdf(Vec<u8>),
}

/// Accumulates body chunks while enforcing [`Limits`].
#[derive(Debug)]
pub struct BodyCollector {
    hinted_pdf: bool,
    limits: Limits,
    bytes: Vec<u8>,
}

impl BodyCollector {
    pub fn new(hinted_pdf: bool, limits: Limits) -> Self {
        Self {
            hinted_pdf,
            limits,
            bytes: Vec::new(),
        }
    }

    fn is_pdf(&self) -> bool {
        self.hinted_pdf || self.bytes.starts_with(PDF_MAGIC)
    }

    /// Appends a chunk. `Ok(false)` means the text cap is reached and the
    /// rest of the body should not be read.
    pub fn push(&mut self, chunk: &[u8]) -> Result<bool, LoadError> {
        self.bytes.extend_from_slice(chunk);

        if self.is_pdf() {
            if self.bytes.len() > self.limits.pdf {
                return Err(LoadError::TooLarge {
                    limit: self.limits.pdf as u64,
                });
            }
            return Ok(true);
        }
        // Fewer than four bytes cannot rule the magic out yet.
        if self.bytes.len() >= PDF_MAGIC.len() && self.bytes.len() >= self.limits.text {
            self.bytes.truncate(self.limits.text);
            return Ok(false);
        }
        Ok(true)
    }

    pub fn finish(self) -> Body {
        if self.is_pdf() {
            Body::Pdf(self.bytes)
        } else {
            Body::Text(String::from_utf8_lossy(&self.bytes).into_owned())
        }
    }
}

fn download_error(err: reqwest::Error) -> LoadError {
    LoadError::Download(err.to_string())
}

/// Downloads `url` and extracts its text.
pub async fn load(url: &str) -> Result<LoadedDocument, LoadError> {
    load_with_limits(url, Limits::default()).await
}

pub async fn load_with_limits(url: &str, limits: Limits) -> Result<LoadedDocument, LoadError> {
    let client = reqwest::Client::builder()
        .redirect(Policy::limited(MAX_REDIRECTS))
        .connect_timeout(CONNECT_TIMEOUT)
        .read_timeout(READ_TIMEOUT)
        .build()
        .map_err(download_error)?;

    let mut response = client
        .get(url)
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(download_error)?;

    if response
        .content_length()
        .is_some_and(|len| len > limits.pdf as u64)
    {
        return Err(LoadError::TooLarge {
            limit: limits.pdf as u64,
        });
    }

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let mut body = BodyCollector::new(pdf_hint(content_type.as_deref(), url), limits);

    while let Some(chunk) = response.chunk().await.map_err(download_error)? {
        if !body.push(&chunk)? {
            tracing::debug!(url, limit = limits.text, "text download truncated");
            break;
        }
    }

    let text = match body.finish() {
        Body::Text(text) => text,
        Body::Pdf(bytes) => tokio::task::spawn_blocking(move || pdf::extract_text(&bytes))
            .await
            .map_err(|e| LoadError::PdfParse(e.to_string()))??,
    };

    let name = document_name(url);
    let text = non_blank(text, &name)?;
    Ok(LoadedDocument {
        name,
        uri: Some(url.to_string()),
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL: Limits = Limits { text: 8, pdf: 16 };

    #[test]
    fn test_is_url() {
        assert!(is_url("https://example.com/a.txt"));
        assert!(is_url("HTTP://example.com"));
        assert!(!is_url("notes.txt"));
        assert!(!is_url("ftp://example.com/a.txt"));
    }

    #[test]
    fn test_pdf_hint_from_content_type_or_path() {
        assert!(pdf_hint(Some("application/PDF"), "https://x.org/doc"));
        assert!(pdf_hint(None, "https://x.org/paper.Pdf?download=1"));
        assert!(!pdf_hint(Some("text/plain; charset=utf-8"), "https://x.org/a.txt"));
        assert!(!pdf_hint(None, "https://x.org/pdf-guide.html"));
    }

    #[test]
    fn test_document_name() {
        assert_eq!(document_name("https://x.org/books/moby.txt?x=1"), "moby.txt");
        assert_eq!(document_name("https://x.org/books/"), "books");
        assert_eq!(document_name("https://x.org"), "x.org");
    }

    #[test]
    fn test_text_body_truncated_at_cap() {
        let mut body = BodyCollector::new(false, SMALL);
        assert!(body.push(b"hello ").unwrap());
        assert!(!body.push(b"world!").unwrap());
        assert_eq!(body.finish(), Body::Text("hello wo".to_string()));
    }

    #[test]
    fn test_magic_bytes_detect_pdf_across_chunks() {
        let mut body = BodyCollector::new(false, SMALL);
        assert!(body.push(b"%P").unwrap());
        assert!(body.push(b"DF-1.7 body").unwrap());
        assert_eq!(body.finish(), Body::Pdf(b"%PDF-1.7 body".to_vec()));
    }

    #[test]
    fn test_pdf_over_cap_is_rejected() {
        let mut body = BodyCollector::new(true, SMALL);
        assert!(body.push(&[0; 16]).unwrap());
        assert!(matches!(
            body.push(&[0; 1]),
            Err(LoadError::TooLarge { limit: 16 })
        ));
    }

    #[test]
    fn test_short_body_stays_text() {
        let mut body = BodyCollector::new(false, SMALL);
        assert!(body.push(b"%P").unwrap());
        assert_eq!(body.finish(), Body::Text("%P".to_string()));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_download_error() {
        // Port 9 on localhost is closed; no external network is touched.
        let result = load("http://127.0.0.1:9/book.txt").await;
        assert!(matches!(result, Err(LoadError::Download(_))));
    }
}
