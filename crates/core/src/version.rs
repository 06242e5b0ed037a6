//! Chrome version extraction from free-text support strings.
//!
//! Support strings look like `"chrome: 120, edge: 120, firefox: 121"`. Only the
//! Chrome entry is used to order features by how recently they shipped.

use std::sync::LazyLock;

use regex::Regex;

/// Versions at or above this value are treated as missing data.
pub const MAX_PLAUSIBLE_VERSION: u32 = 900;

static CHROME_VERSION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"chrome:\s*(\d+)").expect("chrome version pattern is valid"));

/// Extracts the Chrome version from a support string.
///
/// Returns `None` when there is no `chrome: <integer>` token, when the number
/// does not fit in a `u32`, or when it is not below [`MAX_PLAUSIBLE_VERSION`].
#[must_use]
pub fn chrome_version(support_info: &str) -> Option<u32> {
    let captures = CHROME_VERSION.captures(support_info)?;
    let version: u32 = captures.get(1)?.as_str().parse().ok()?;
    (version < MAX_PLAUSIBLE_VERSION).then_some(version)
}
