//! Request-target splitting for the fetch collaborator.
//!
//! [URL Standard](https://url.spec.whatwg.org/)
//!
//! NOTE: This is a deliberately small splitter, not the URL Standard's parsing
//! algorithm. It understands `scheme://host[:port]/path` for http and https,
//! `file://` paths, and `data:` payloads.

use std::fmt;

use crate::net::FetchError;

/// The schemes the fetch collaborator knows how to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// Plain-text HTTP, default port 80.
    Http,
    /// HTTP over TLS, default port 443.
    Https,
    /// A path on the local filesystem.
    File,
    /// An inline `data:` payload.
    Data,
}

impl Scheme {
    /// The port used when the URL does not name one.
    #[must_use]
    pub const fn default_port(self) -> Option<u16> {
        match self {
            Self::Http => Some(80),
            Self::Https => Some(443),
            Self::File | Self::Data => None,
        }
    }

    /// The scheme as written before `:`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
            Self::File => "file",
            Self::Data => "data",
        }
    }
}

/// A split request target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Url {
    /// Scheme, lowercased.
    pub scheme: Scheme,
    /// Host name; empty for `file` and `data`.
    pub host: String,
    /// Port; the scheme default when none was written.
    pub port: Option<u16>,
    /// Path for http(s) and file (always starting with `/` for http(s)),
    /// or everything after `data:` for data URLs.
    pub path: String,
}

impl Url {
    /// Split `input` into scheme, host, port and path.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidUrl`] when there is no `://` separator or
    /// the port is not a number, and [`FetchError::UnsupportedScheme`] for any
    /// scheme other than http, https, file and data.
    pub fn parse(input: &str) -> Result<Self, FetchError> {
        if let Some(payload) = input.strip_prefix("data:") {
            return Ok(Self {
                scheme: Scheme::Data,
                host: String::new(),
                port: None,
                path: payload.to_string(),
            });
        }

        let Some((scheme, rest)) = input.split_once("://") else {
            return Err(FetchError::InvalidUrl(input.to_string()));
        };

        let scheme = match scheme.to_ascii_lowercase().as_str() {
            "http" => Scheme::Http,
            "https" => Scheme::Https,
            "file" => Scheme::File,
            _ => return Err(FetchError::UnsupportedScheme(scheme.to_string())),
        };

        if scheme == Scheme::File {
            return Ok(Self {
                scheme,
                host: String::new(),
                port: None,
                path: rest.to_string(),
            });
        }

        let (authority, path) = match rest.split_once('/') {
            Some((authority, path)) => (authority, format!("/{path}")),
            None => (rest, "/".to_string()),
        };

        let (host, port) = match authority.split_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| FetchError::InvalidUrl(input.to_string()))?;
                (host, Some(port))
            }
            None => (authority, scheme.default_port()),
        };

        if host.is_empty() {
            return Err(FetchError::InvalidUrl(input.to_string()));
        }

        Ok(Self {
            scheme,
            host: host.to_string(),
            port,
            path,
        })
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.scheme {
            Scheme::Data => write!(f, "data:{}", self.path),
            Scheme::File => write!(f, "file://{}", self.path),
            Scheme::Http | Scheme::Https => {
                write!(f, "{}://{}", self.scheme.as_str(), self.host)?;
                if let Some(port) = self.port
                    && Some(port) != self.scheme.default_port()
                {
                    write!(f, ":{port}")?;
                }
                write!(f, "{}", self.path)
            }
        }
    }
}
