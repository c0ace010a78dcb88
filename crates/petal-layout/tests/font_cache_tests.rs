//! Integration tests for font keys and the font cache.

#![allow(clippy::float_cmp)]

use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use petal_layout::{
    ApproximateFont, ApproximateFontProvider, FontCache, FontKey, FontMetrics, FontProvider,
    Slant, Weight,
};

/// Provider that counts how many fonts it has been asked to build.
#[derive(Default)]
struct CountingProvider {
    realized: AtomicUsize,
}

impl FontProvider for CountingProvider {
    type Font = ApproximateFont;

    fn realize(&self, key: FontKey) -> ApproximateFont {
        let _ = self.realized.fetch_add(1, Ordering::SeqCst);
        ApproximateFont::new(key)
    }
}

#[test]
fn test_same_key_returns_same_handle() {
    let cache = FontCache::new(CountingProvider::default());
    let key = FontKey::new(16, Weight::Bold, Slant::Italic);

    let first = cache.get(key);
    let second = cache.get(key);

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(cache.provider().realized.load(Ordering::SeqCst), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_distinct_keys_realized_separately() {
    let cache = FontCache::new(CountingProvider::default());
    assert!(cache.is_empty());

    let _ = cache.get(FontKey::new(16, Weight::Normal, Slant::Roman));
    let _ = cache.get(FontKey::new(16, Weight::Bold, Slant::Roman));
    let _ = cache.get(FontKey::new(14, Weight::Normal, Slant::Roman));
    let _ = cache.get(FontKey::new(16, Weight::Normal, Slant::Roman));

    assert_eq!(cache.len(), 3);
    assert_eq!(cache.provider().realized.load(Ordering::SeqCst), 3);
}

#[test]
fn test_shared_cache_across_threads() {
    let cache = Arc::new(FontCache::new(CountingProvider::default()));
    let key = FontKey::default();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let cache = Arc::clone(&cache);
            std::thread::spawn(move || cache.get(key))
        })
        .collect();
    let fonts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

    assert!(fonts.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    assert_eq!(cache.provider().realized.load(Ordering::SeqCst), 1);
}

#[test]
fn test_default_key() {
    let key = FontKey::default();
    assert_eq!(key.size, 16);
    assert_eq!(key.weight, Weight::Normal);
    assert_eq!(key.slant, Slant::Roman);
}

#[test]
fn test_pixel_size_clamped() {
    assert_eq!(FontKey::new(-4, Weight::Normal, Slant::Roman).pixel_size(), 1.0);
    assert_eq!(FontKey::new(20, Weight::Normal, Slant::Roman).pixel_size(), 20.0);
}

#[test]
fn test_weight_and_slant_names() {
    assert_eq!(Weight::Bold.to_string(), "bold");
    assert_eq!(Slant::Italic.as_ref(), "italic");
    assert_eq!(Weight::from_str("normal").unwrap(), Weight::Normal);
    assert_eq!(Slant::from_str("roman").unwrap(), Slant::Roman);
    assert!(Slant::from_str("oblique").is_err());
}

#[test]
fn test_approximate_metrics() {
    let cache = FontCache::new(ApproximateFontProvider);
    let regular = cache.get(FontKey::default());
    assert_eq!(regular.measure("Hello"), 40.0);
    assert_eq!(regular.measure(" "), 8.0);
    assert_eq!(regular.ascent(), 12.0);
    assert_eq!(regular.descent(), 4.0);
    assert_eq!(regular.linespace(), 16.0);

    let bold = cache.get(FontKey::new(16, Weight::Bold, Slant::Roman));
    assert_eq!(bold.measure("Hello"), 50.0);
}
