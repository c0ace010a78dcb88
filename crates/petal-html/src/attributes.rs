//! Tag-interior scanning.
//!
//! The scanner sees only the text between `<` and `>`. It splits on
//! whitespace, so quoted values containing spaces are not reassembled;
//! malformed input simply produces whatever tokens fall out.

use petal_dom::AttributesMap;

/// A tag name and its attributes, as scanned from a tag interior.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScannedTag {
    /// Lowercased first token. Closing tags keep their leading `/`,
    /// declarations and comments their leading `!`. Empty if the interior
    /// held no tokens.
    pub name: String,
    /// Lowercased keys to verbatim values. Bare keys map to `""`.
    pub attrs: AttributesMap,
}

/// Split a tag interior into its name and attributes.
///
/// ```
/// use petal_html::scan_tag;
///
/// let tag = scan_tag(r#"A HREF="Index.html" hidden"#);
/// assert_eq!(tag.name, "a");
/// assert_eq!(tag.attrs["href"], "Index.html");
/// assert_eq!(tag.attrs["hidden"], "");
/// ```
#[must_use]
pub fn scan_tag(interior: &str) -> ScannedTag {
    let mut parts = interior.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();

    let mut attrs = AttributesMap::new();
    for pair in parts {
        let (key, value) = match pair.split_once('=') {
            Some((key, value)) => (key, strip_quotes(value)),
            None => (pair, ""),
        };
        // Later duplicates win.
        let _ = attrs.insert(key.to_lowercase(), value.to_string());
    }

    ScannedTag { name, attrs }
}

/// Remove one pair of matching quotes around a value of more than two bytes.
fn strip_quotes(value: &str) -> &str {
    if value.len() > 2 {
        for quote in ['"', '\''] {
            if let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
            {
                return inner;
            }
        }
    }
    value
}
