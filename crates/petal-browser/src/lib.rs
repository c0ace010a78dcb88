//! High-level browser API for the Petal engine.
//!
//! # Scope
//!
//! This crate provides:
//! - **Document Loading** - fetch or read a page, parse it and lay it out
//! - **Font Metrics** - system fonts measured through fontdue
//! - **Viewport** - scroll offset and culling of off-screen words
//! - **Software Rendering** - headless screenshot generation
//!
//! # Not Yet Implemented
//!
//! - Interactive windows and input events
//! - Following links

pub mod font_metrics;
pub mod renderer;
pub mod viewport;

pub use petal_common as common;
pub use petal_dom as dom;
pub use petal_html as html;
pub use petal_layout as layout;

pub use font_metrics::{FontdueFont, SystemFontProvider};
pub use renderer::Renderer;
pub use viewport::Viewport;

use std::collections::HashMap;

use petal_common::net::{self, FetchError};
use petal_common::warning::clear_warnings;
use petal_dom::DomTree;
use petal_html::{HtmlParser, ParseIssue};
use petal_layout::{DisplayList, FontCache, FontProvider, LayoutConfig};
use thiserror::Error;

/// A fully loaded, parsed and laid-out document.
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    /// Source path or URL
    pub source_path: String,

    /// Response headers, lowercased (empty for local files)
    pub headers: HashMap<String, String>,

    /// Original HTML source
    pub html_source: String,

    /// Parsed document tree
    pub dom: DomTree,

    /// Recoveries the parser performed
    pub parse_issues: Vec<ParseIssue>,

    /// Positioned words, in document order
    pub display_list: DisplayList,
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Failed to read a local file
    #[error("failed to read '{path}': {source}")]
    File {
        /// The path that was requested
        path: String,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to fetch a URL
    #[error("failed to fetch '{url}': {source}")]
    Network {
        /// The URL that was requested
        url: String,
        /// Why the fetch failed
        #[source]
        source: FetchError,
    },
}

/// Load a document from a file path or URL.
///
/// Anything containing `://` or starting with `data:` goes through
/// [`petal_common::fetch`]; everything else is read from disk. Warnings from
/// a previous page are cleared first.
///
/// # Errors
///
/// Returns a [`LoadError`] if the file cannot be read or the fetch fails.
/// Parsing and layout themselves never fail.
pub fn load_document<P: FontProvider>(
    path: &str,
    fonts: &FontCache<P>,
    config: &LayoutConfig,
) -> Result<LoadedDocument, LoadError> {
    clear_warnings();

    let (headers, body) = if path.contains("://") || path.starts_with("data:") {
        let response = net::fetch(path).map_err(|source| LoadError::Network {
            url: path.to_string(),
            source,
        })?;
        (response.headers, response.body)
    } else {
        let response = net::read_file(path).map_err(|err| match err {
            FetchError::Io { source, .. } => LoadError::File {
                path: path.to_string(),
                source,
            },
            other => LoadError::Network {
                url: path.to_string(),
                source: other,
            },
        })?;
        (response.headers, response.body)
    };

    let mut doc = parse_html_string(&body, fonts, config);
    doc.source_path = path.to_string();
    doc.headers = headers;
    Ok(doc)
}

/// Parse and lay out an HTML string that is already in memory.
#[must_use]
pub fn parse_html_string<P: FontProvider>(
    html: &str,
    fonts: &FontCache<P>,
    config: &LayoutConfig,
) -> LoadedDocument {
    let (dom, parse_issues) = HtmlParser::new(html).run_with_issues();
    let display_list = petal_layout::layout(&dom, fonts, config);

    LoadedDocument {
        source_path: String::new(),
        headers: HashMap::new(),
        html_source: html.to_string(),
        dom,
        parse_issues,
        display_list,
    }
}
