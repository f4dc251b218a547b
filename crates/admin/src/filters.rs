//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Badge classes for a gift card status.
///
/// Usage in templates: `{{ card.status|status_badge }}`
#[askama::filter_fn]
pub fn status_badge(
    value: impl Display,
    _env: &dyn askama::Values,
) -> askama::Result<&'static str> {
    Ok(match value.to_string().as_str() {
        "active" => "bg-green-100 text-green-700 dark:bg-green-900/30 dark:text-green-400",
        "redeemed" => "bg-blue-100 text-blue-700 dark:bg-blue-900/30 dark:text-blue-400",
        _ => "bg-gray-100 text-gray-700 dark:bg-gray-800 dark:text-gray-400",
    })
}
