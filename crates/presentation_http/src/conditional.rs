//! Validators and conditional request evaluation
//!
//! `If-None-Match` wins over `If-Modified-Since`: when a client sends entity
//! tags the date is ignored, even if none of the tags match.

use axum::http::{HeaderMap, header};
use chrono::{DateTime, Utc};

/// Weak entity tag of `content`
///
/// One tag covers every content encoding the compression layer produces.
#[must_use]
pub fn etag_for(content: &[u8]) -> String {
    format!("W/\"{}\"", blake3::hash(content).to_hex())
}

/// Format as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`)
#[must_use]
pub fn http_date(time: DateTime<Utc>) -> String {
    time.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parse an HTTP date; `None` for anything unparseable
#[must_use]
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(value.trim())
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn opaque_tag(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix("W/").unwrap_or(tag)
}

/// Weak comparison of an `If-None-Match` list against `etag`
#[must_use]
pub fn etag_matches(if_none_match: &str, etag: &str) -> bool {
    let ours = opaque_tag(etag);
    if_none_match
        .split(',')
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .any(|candidate| candidate == "*" || opaque_tag(candidate) == ours)
}

/// Whether a resource modified at `modified` is unchanged since `since`
///
/// Compared at whole-second resolution, the precision of HTTP dates.
#[must_use]
pub fn unmodified_since(modified: DateTime<Utc>, since: DateTime<Utc>) -> bool {
    modified.timestamp() <= since.timestamp()
}

/// Whether the request can be answered with `304 Not Modified`
#[must_use]
pub fn is_not_modified(
    headers: &HeaderMap,
    etag: &str,
    last_modified: Option<DateTime<Utc>>,
) -> bool {
    if let Some(value) = headers.get(header::IF_NONE_MATCH) {
        return value
            .to_str()
            .is_ok_and(|if_none_match| etag_matches(if_none_match, etag));
    }

    let since = headers
        .get(header::IF_MODIFIED_SINCE)
        .and_then(|v| v.to_str().ok())
        .and_then(parse_http_date);
    match (last_modified, since) {
        (Some(modified), Some(since)) => unmodified_since(modified, since),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    use super::*;

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 2, 8, 49, 37).unwrap()
    }

    #[test]
    fn etag_is_weak_quoted_blake3() {
        let tag = etag_for(b"{}");
        assert!(tag.starts_with("W/\"") && tag.ends_with('"'));
        assert_eq!(tag.len(), 64 + 4);
        assert_eq!(tag, etag_for(b"{}"));
        assert_ne!(tag, etag_for(b"[]"));
    }

    #[test]
    fn http_date_roundtrip() {
        let formatted = http_date(stamp());
        assert_eq!(formatted, "Mon, 02 Mar 2026 08:49:37 GMT");
        assert_eq!(parse_http_date(&formatted), Some(stamp()));
        assert_eq!(parse_http_date("yesterday"), None);
    }

    #[test]
    fn if_none_match_forms() {
        let etag = "\"abc\"";
        assert!(etag_matches("\"abc\"", etag));
        assert!(etag_matches("W/\"abc\"", etag));
        assert!(etag_matches("\"x\", \"abc\"", etag));
        assert!(etag_matches("*", etag));
        assert!(!etag_matches("\"abcd\"", etag));
        assert!(!etag_matches("", etag));
    }

    #[test]
    fn date_comparison_ignores_subseconds() {
        let modified = stamp() + chrono::Duration::milliseconds(400);
        assert!(unmodified_since(modified, stamp()));
        assert!(!unmodified_since(stamp() + chrono::Duration::seconds(1), stamp()));
    }

    #[test]
    fn entity_tags_take_precedence_over_dates() {
        let mut headers = HeaderMap::new();
        headers.insert(header::IF_NONE_MATCH, HeaderValue::from_static("\"other\""));
        headers.insert(
            header::IF_MODIFIED_SINCE,
            HeaderValue::from_str(&http_date(stamp())).unwrap(),
        );
        assert!(!is_not_modified(&headers, "\"abc\"", Some(stamp())));

        headers.remove(header::IF_NONE_MATCH);
        assert!(is_not_modified(&headers, "\"abc\"", Some(stamp())));
    }

    #[test]
    fn no_validators_means_modified() {
        assert!(!is_not_modified(&HeaderMap::new(), "\"abc\"", Some(stamp())));
    }
}
