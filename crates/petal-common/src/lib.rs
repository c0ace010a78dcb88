//! Common utilities for the Petal engine.
//!
//! This crate provides shared infrastructure used by the loader and renderer:
//! - **Warning System** - colored, de-duplicated terminal output
//! - **URL splitting** - scheme, host, port and path of a request target
//! - **Fetch** - the document fetch collaborator (http, https, file, data)

pub mod net;
pub mod url;
pub mod warning;

pub use net::{FetchError, Response, fetch};
pub use url::{Scheme, Url};
