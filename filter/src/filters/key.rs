//! Query-string key parsing
//!
//! `id[eq]` -> (`id`, `EQ`)

use super::method::Method;
use crate::error::FilterResult;

/// Split a raw key into field name and method
///
/// Only the first `[` and the first `]` after it are considered; anything
/// following the closing bracket is ignored. A key without brackets, without
/// a closing bracket, or with empty brackets defaults to `EQ`.
pub fn parse_key(key: &str) -> FilterResult<(String, Method)> {
    let Some(open) = key.find('[') else {
        return Ok((key.to_string(), Method::Eq));
    };

    let name = key[..open].to_string();
    let rest = &key[open + 1..];

    let method = match rest.find(']') {
        Some(close) if close > 0 => rest[..close].to_uppercase().parse()?,
        _ => Method::Eq,
    };

    Ok((name, method))
}
