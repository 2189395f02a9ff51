//! Permalink derivation.
//!
//! Posts and comments share one key namespace. A post's key is derived from
//! its blog and title; a comment's key is the instant it was written.
//!
//! Neither scheme is collision-free: titles that differ only in punctuation
//! map to the same post permalink, and two comments written within the same
//! millisecond map to the same comment permalink. The store's unique index
//! turns both cases into [`BlogError::DuplicateKey`](crate::error::BlogError).

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

/// Blog names are case-insensitive; everything stores them lowercased.
pub fn normalize_blog_name(blog_name: &str) -> String {
    blog_name.to_lowercase()
}

/// Replaces every maximal run of characters outside `[0-9a-zA-Z]` with a
/// single `_`.
pub fn sanitize(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut in_run = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }

    out
}

pub fn post_permalink(blog_name: &str, title: &str) -> String {
    format!("{}.{}", normalize_blog_name(blog_name), sanitize(title))
}

/// Formats `instant` at millisecond resolution, dropping the fraction when
/// it is zero: `2024-01-01T00:00:00Z`, `2024-01-01T00:00:00.250Z`.
pub fn comment_permalink(instant: DateTime<Utc>) -> String {
    instant
        .trunc_subsecs(3)
        .to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
