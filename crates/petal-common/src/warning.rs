//! De-duplicated diagnostics for degraded output.
//!
//! Font discovery and fetch report things that make the page look worse but
//! do not stop it loading. Each `(component, message)` pair is printed to
//! stderr once until [`clear_warnings`] starts a new page.

use std::collections::HashSet;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};

use owo_colors::OwoColorize;

/// Every `[component] message` key printed since the last clear.
static WARNED: LazyLock<Mutex<HashSet<String>>> = LazyLock::new(|| Mutex::new(HashSet::new()));

fn warned() -> MutexGuard<'static, HashSet<String>> {
    // A panic elsewhere never leaves the set half-written.
    WARNED.lock().unwrap_or_else(PoisonError::into_inner)
}

fn key(component: &str, message: &str) -> String {
    format!("[{component}] {message}")
}

/// Print a yellow warning unless the same one was already printed.
///
/// # Example
/// ```
/// use petal_common::warning::{has_warned, warn_once};
///
/// warn_once("Fonts", "no bold face found; using a fallback");
/// assert!(has_warned("Fonts", "no bold face found; using a fallback"));
/// ```
pub fn warn_once(component: &str, message: &str) {
    if warned().insert(key(component, message)) {
        eprintln!("{}", format!("[Petal {component}] ⚠ {message}").yellow());
    }
}

/// Whether `warn_once(component, message)` has fired since the last clear.
#[must_use]
pub fn has_warned(component: &str, message: &str) -> bool {
    warned().contains(&key(component, message))
}

/// Forget every recorded warning. Called when a new page is loaded.
pub fn clear_warnings() {
    warned().clear();
}
