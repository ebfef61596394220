//! Per-row image presentation state.
//!
//! Each row with an image address gets a probe task; its state machine is
//! driven by the probe's completion event. Rows without an image, or whose
//! probe failed, fall back to a generated letter placeholder.

use std::borrow::Cow;
use url::Url;

/// Load state of one row's image probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThumbState {
    /// Probe in flight; the row shows a spinner cell.
    Loading,
    /// The image address answered successfully.
    Loaded,
    /// The probe failed; the row shows the letter placeholder.
    Failed,
}

/// Placeholder shown when a category has no usable name to draw a letter from.
pub const PLACEHOLDER_SENTINEL: char = '?';

/// First letter of the name, uppercased; the sentinel for empty names.
pub fn placeholder_letter(name: &str) -> char {
    match name.trim().chars().next() {
        Some(c) => c.to_uppercase().next().unwrap_or(PLACEHOLDER_SENTINEL),
        None => PLACEHOLDER_SENTINEL,
    }
}

/// Append the cache-bust parameter to an image address.
///
/// `stamp` is the store's refresh timestamp, `None` until a refresh has
/// occurred, after which probes must bypass any cached copy of an image that
/// may have been re-uploaded at the same address. Addresses that do not
/// parse as URLs are returned untouched; the probe will fail on its own and
/// the row falls back to the placeholder.
pub fn cache_busted(address: &str, stamp: Option<i64>) -> Cow<'_, str> {
    let Some(stamp) = stamp else {
        return Cow::Borrowed(address);
    };
    match Url::parse(address) {
        Ok(mut url) => {
            url.query_pairs_mut().append_pair("v", &stamp.to_string());
            Cow::Owned(String::from(url))
        }
        Err(_) => Cow::Borrowed(address),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_placeholder_uppercases_first_letter() {
        assert_eq!(placeholder_letter("fruit"), 'F');
        assert_eq!(placeholder_letter("Dairy"), 'D');
        assert_eq!(placeholder_letter("  bakery"), 'B');
    }

    #[test]
    fn test_placeholder_sentinel_for_empty_name() {
        assert_eq!(placeholder_letter(""), '?');
        assert_eq!(placeholder_letter("   "), '?');
    }

    #[test]
    fn test_placeholder_handles_non_ascii() {
        assert_eq!(placeholder_letter("épices"), 'É');
        assert_eq!(placeholder_letter("Обувь"), 'О');
    }

    #[test]
    fn test_placeholder_keeps_non_alphabetic() {
        assert_eq!(placeholder_letter("100% Juice"), '1');
    }

    #[test]
    fn test_no_stamp_leaves_address_alone() {
        let address = "https://cdn.example.com/fruit.png";
        let result = cache_busted(address, None);
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, address);
    }

    #[test]
    fn test_stamp_appends_query_parameter() {
        let result = cache_busted("https://cdn.example.com/fruit.png", Some(1_700_000_000_000));
        assert_eq!(
            result,
            "https://cdn.example.com/fruit.png?v=1700000000000"
        );
    }

    #[test]
    fn test_stamp_preserves_existing_query() {
        let result = cache_busted("https://cdn.example.com/img.png?size=64", Some(42));
        assert_eq!(result, "https://cdn.example.com/img.png?size=64&v=42");
    }

    #[test]
    fn test_unparseable_address_returned_untouched() {
        let result = cache_busted("not a url at all", Some(42));
        assert_eq!(result, "not a url at all");
    }
}
