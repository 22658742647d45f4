//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the fingerprint of the static assets, computed at build time.
///
/// Usage in templates: `/static/css/main.css?v={{ ""|asset_version }}`
#[askama::filter_fn]
pub fn asset_version(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("ASSET_VERSION"))
}

/// Spells out an item count for screen readers.
///
/// Usage in templates: `{{ count|item_count_label }}` renders `"1 item in cart"`,
/// `"3 items in cart"`, or `"Cart is empty"`.
#[askama::filter_fn]
pub fn item_count_label(count: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    let count = count.to_string();
    Ok(match count.as_str() {
        "0" => "Cart is empty".to_string(),
        "1" => "1 item in cart".to_string(),
        _ => format!("{count} items in cart"),
    })
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_asset_version_is_set() {
        assert!(!env!("ASSET_VERSION").is_empty());
    }
}
