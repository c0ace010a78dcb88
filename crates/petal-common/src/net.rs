//! Document fetch for the Petal engine.
//!
//! The parser never touches the network: this module hands it a complete body
//! string, or fails before the parser is ever invoked. Bodies that still carry
//! a transfer or content encoding are rejected, because nothing downstream
//! knows how to dechunk or decompress them.
//!
//! TODO: dechunk `transfer-encoding: chunked` bodies instead of rejecting them.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use reqwest::Version;
use thiserror::Error;

use crate::url::{Scheme, Url};
use crate::warning::warn_once;

/// User-Agent header sent with all requests.
const USER_AGENT: &str = "Petal/0.1";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Response headers the engine refuses to accept.
const FORBIDDEN_HEADERS: &[&str] = &["transfer-encoding", "content-encoding"];

/// Why a fetch failed.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The URL could not be split into its parts.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The scheme is not one of http, https, file or data.
    #[error("unknown scheme {0}")]
    UnsupportedScheme(String),

    /// The server answered with something other than 200.
    #[error("{status}: {reason}")]
    Status {
        /// Numeric status code.
        status: u16,
        /// Reason phrase, empty when the server sent none.
        reason: String,
    },

    /// The response carries a transfer or content encoding.
    #[error("response uses unsupported {0}")]
    UnsupportedEncoding(String),

    /// The transport failed.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// A local file could not be read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// The path that was requested.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A `data:` payload could not be decoded to text.
    #[error("failed to decode data URL: {0}")]
    Decode(String),
}

/// A fetched document: lowercased header names and the full body text.
#[derive(Debug, Clone, Default)]
pub struct Response {
    /// Status code (always 200 for a returned response).
    pub status: u16,
    /// Header names lowercased, values trimmed. A repeated header keeps its
    /// last value.
    pub headers: HashMap<String, String>,
    /// The complete response payload.
    pub body: String,
}

/// Fetch `url` and return its headers and body.
///
/// Dispatches on the scheme: http and https go over the network, `file://`
/// reads from disk and `data:` decodes the inline payload.
///
/// # Errors
///
/// Returns a [`FetchError`] for malformed or unsupported URLs, non-200
/// statuses, forbidden encodings, transport failures and unreadable files.
pub fn fetch(url: &str) -> Result<Response, FetchError> {
    let url = Url::parse(url)?;
    match url.scheme {
        Scheme::Http | Scheme::Https => fetch_http(&url),
        Scheme::File => read_file(&url.path),
        Scheme::Data => decode_data_url(&url.path),
    }
}

/// Read a local file as a response with no headers.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the file cannot be read as UTF-8 text.
pub fn read_file(path: &str) -> Result<Response, FetchError> {
    let body = std::fs::read_to_string(path).map_err(|source| FetchError::Io {
        path: PathBuf::from(path),
        source,
    })?;
    Ok(Response {
        status: 200,
        headers: HashMap::new(),
        body,
    })
}

/// Reject header sets that announce a transfer or content encoding.
///
/// # Errors
///
/// Returns [`FetchError::UnsupportedEncoding`] naming the first offending
/// header.
pub fn check_encodings(headers: &HashMap<String, String>) -> Result<(), FetchError> {
    FORBIDDEN_HEADERS
        .iter()
        .find(|name| headers.contains_key(**name))
        .map_or(Ok(()), |name| {
            Err(FetchError::UnsupportedEncoding((*name).to_string()))
        })
}

fn fetch_http(url: &Url) -> Result<Response, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()?;

    // HTTP/1.0 keeps well-behaved servers from chunking the body.
    let response = client
        .get(url.to_string())
        .version(Version::HTTP_10)
        .header("Connection", "close")
        .header("User-Agent", USER_AGENT)
        .send()?;

    let status = response.status();
    if status.as_u16() != 200 {
        return Err(FetchError::Status {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    let headers: HashMap<String, String> = response
        .headers()
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_ascii_lowercase(),
                String::from_utf8_lossy(value.as_bytes()).trim().to_string(),
            )
        })
        .collect();

    check_encodings(&headers)?;

    match headers.get("content-type") {
        Some(kind) if kind.starts_with("text/") => {}
        Some(kind) => warn_once("Fetch", &format!("{url} is {kind}; parsing it as markup")),
        None => warn_once("Fetch", &format!("{url} sent no content-type")),
    }

    let body = response.text()?;
    Ok(Response {
        status: 200,
        headers,
        body,
    })
}

/// Decode the part of a data URL after `data:`.
///
/// `;base64` payloads are base64-decoded; anything else is taken literally.
fn decode_data_url(payload: &str) -> Result<Response, FetchError> {
    let Some((metadata, data)) = payload.split_once(',') else {
        return Err(FetchError::InvalidUrl(format!("data:{payload}")));
    };

    let body = if metadata.ends_with(";base64") {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(data)
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.to_string()))?
    } else {
        data.to_string()
    };

    let mut headers = HashMap::new();
    let media_type = metadata.trim_end_matches(";base64");
    if !media_type.is_empty() {
        let _ = headers.insert("content-type".to_string(), media_type.to_string());
    }

    Ok(Response {
        status: 200,
        headers,
        body,
    })
}
