// ABOUTME: Tests for rate limit header extraction and parsing.
// ABOUTME: Verifies values parse leniently and malformed input is ignored.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::headers::RateLimitHeaders;

#[test]
fn test_reads_headers_from_map() {
    let mut map = HeaderMap::new();
    map.insert("x-ratelimit-limit", HeaderValue::from_static("60"));
    map.insert("x-ratelimit-remaining", HeaderValue::from_static("42"));
    map.insert("x-ratelimit-reset", HeaderValue::from_static("17"));
    map.insert("content-type", HeaderValue::from_static("application/json"));

    let headers = RateLimitHeaders::from_header_map(&map);

    assert_eq!(headers.limit.as_deref(), Some("60"));
    assert_eq!(headers.parsed_limit(), Some(60.0));
    assert_eq!(headers.parsed_remaining(), Some(42.0));
    assert_eq!(headers.parsed_reset_secs(), Some(17));
}

#[test]
fn test_header_names_are_case_insensitive() {
    let mut map = HeaderMap::new();
    let name = HeaderName::from_bytes(b"X-RateLimit-Remaining").unwrap();
    map.insert(name, HeaderValue::from_static("3"));

    let headers = RateLimitHeaders::from_header_map(&map);

    assert_eq!(headers.parsed_remaining(), Some(3.0));
    assert!(headers.limit.is_none());
}

#[test]
fn test_empty_map_yields_empty_headers() {
    let headers = RateLimitHeaders::from_header_map(&HeaderMap::new());
    assert!(headers.is_empty());
    assert_eq!(headers.parsed_limit(), None);
}

#[test]
fn test_non_numeric_values_parse_as_absent() {
    let headers = RateLimitHeaders::new()
        .limit("not-a-number")
        .remaining("inf")
        .reset("-4");

    assert!(!headers.is_empty());
    assert_eq!(headers.parsed_limit(), None);
    assert_eq!(headers.parsed_remaining(), None);
    assert_eq!(headers.parsed_reset_secs(), None);
}

#[test]
fn test_fractional_and_padded_values() {
    let headers = RateLimitHeaders::new().limit(" 59.5 ").reset("1.2");

    assert_eq!(headers.parsed_limit(), Some(59.5));
    assert_eq!(headers.parsed_reset_secs(), Some(2));
}
