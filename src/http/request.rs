//! Request handling and normalization.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every inbound request
//! - Normalize search query parameters into a [`SearchRequest`]
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Query decoding is infallible; validation decides what is acceptable
//! - First occurrence of a repeated key wins

use axum::http::{HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use url::form_urlencoded;
use uuid::Uuid;

use crate::config::{SearchConfig, LIMIT_CEILING};
use crate::error::SearchError;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Message returned when `q` is missing or blank.
pub const QUERY_REQUIRED_MESSAGE: &str = "Parâmetro \"q\" é obrigatório.";

/// Generates UUID v4 request IDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV4;

impl MakeRequestId for MakeRequestUuidV4 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Read the request ID set by the request-id layer.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// A validated, normalized search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Trimmed, never empty.
    pub query: String,
    /// Always within `[1, min(max_limit, LIMIT_CEILING)]`.
    pub limit: u32,
    /// Trimmed; `None` when absent or blank.
    pub sort: Option<String>,
}

impl SearchRequest {
    /// Normalize a raw query string (without the leading `?`).
    pub fn from_raw_query(raw: Option<&str>, bounds: &SearchConfig) -> Result<Self, SearchError> {
        let pairs: Vec<(String, String)> = raw
            .map(|raw| form_urlencoded::parse(raw.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self::from_pairs(&pairs, bounds)
    }

    /// Normalize decoded query pairs.
    pub fn from_pairs(pairs: &[(String, String)], bounds: &SearchConfig) -> Result<Self, SearchError> {
        let query = first(pairs, "q").unwrap_or_default().trim();
        if query.is_empty() {
            return Err(SearchError::Validation(QUERY_REQUIRED_MESSAGE.to_string()));
        }

        let sort = first(pairs, "sort")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Ok(Self {
            query: query.to_string(),
            limit: normalize_limit(first(pairs, "limit"), bounds),
            sort,
        })
    }
}

fn first<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

/// Resolve the requested limit: missing, unparseable or zero falls back to
/// the default, then the result is clamped to `[1, max_limit]`. The upper
/// bound never exceeds [`LIMIT_CEILING`], even for configs built in code.
pub fn normalize_limit(raw: Option<&str>, bounds: &SearchConfig) -> u32 {
    let requested = raw
        .and_then(parse_leading_int)
        .filter(|n| *n != 0)
        .unwrap_or_else(|| i64::from(bounds.default_limit));

    // Fits in u32 after the clamp.
    let ceiling = bounds.max_limit.clamp(1, LIMIT_CEILING);
    requested.clamp(1, i64::from(ceiling)) as u32
}

/// Integer prefix of `raw`: optional whitespace and sign, then decimal
/// digits, or hex digits after a `0x`/`0X` prefix.
/// `"12abc"` → 12, `"3.9"` → 3, `"0x10"` → 16, `"abc"` → `None`.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match rest.get(..2) {
        Some("0x" | "0X") => (16, &rest[2..]),
        _ => (10, rest),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> SearchConfig {
        SearchConfig::default()
    }

    fn parse(raw: &str) -> Result<SearchRequest, SearchError> {
        SearchRequest::from_raw_query(Some(raw), &bounds())
    }

    #[test]
    fn test_missing_or_blank_query_rejected() {
        for raw in ["", "limit=10", "q=", "q=%20%20", "q=+++&sort=price_asc"] {
            match parse(raw) {
                Err(SearchError::Validation(msg)) => assert_eq!(msg, QUERY_REQUIRED_MESSAGE),
                other => panic!("expected validation error for {raw:?}, got {other:?}"),
            }
        }
        assert!(SearchRequest::from_raw_query(None, &bounds()).is_err());
    }

    #[test]
    fn test_query_trimmed_and_decoded() {
        let req = parse("q=+notebook%20gamer+").unwrap();
        assert_eq!(req.query, "notebook gamer");
        assert_eq!(req.limit, 20);
        assert_eq!(req.sort, None);
    }

    #[test]
    fn test_limit_normalization() {
        let cases = [
            (None, 20),
            (Some("10"), 10),
            (Some("9999"), 50),
            (Some("50"), 50),
            (Some("51"), 50),
            (Some("1"), 1),
            (Some("0"), 20),
            (Some("-5"), 1),
            (Some("abc"), 20),
            (Some(""), 20),
            (Some("12abc"), 12),
            (Some(" 7"), 7),
            (Some("3.9"), 3),
            (Some("+8"), 8),
            (Some("99999999999999999999999"), 50),
            (Some("0x10"), 16),
            (Some("0X1f"), 31),
            (Some("0x1g"), 1),
            (Some("0x"), 20),
            (Some("-0x10"), 1),
            (Some("0x7fffffffffffffffff"), 50),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalize_limit(raw, &bounds()), expected, "limit {raw:?}");
        }
    }

    #[test]
    fn test_sort_passthrough() {
        let req = parse("q=tv&sort=+price_desc+").unwrap();
        assert_eq!(req.sort.as_deref(), Some("price_desc"));

        let req = parse("q=tv&sort=%20").unwrap();
        assert_eq!(req.sort, None);
    }

    #[test]
    fn test_limit_never_exceeds_page_size() {
        let wide = SearchConfig {
            default_limit: 200,
            max_limit: 1000,
        };
        assert_eq!(normalize_limit(Some("9999"), &wide), LIMIT_CEILING);
        assert_eq!(normalize_limit(None, &wide), LIMIT_CEILING);

        let narrow = SearchConfig {
            default_limit: 5,
            max_limit: 10,
        };
        assert_eq!(normalize_limit(Some("30"), &narrow), 10);
        assert_eq!(normalize_limit(None, &narrow), 5);
    }

    #[test]
    fn test_first_occurrence_wins() {
        let req = parse("q=first&q=second&limit=5&limit=40").unwrap();
        assert_eq!(req.query, "first");
        assert_eq!(req.limit, 5);
    }

    #[test]
    fn test_request_ids_are_unique() {
        let mut make = MakeRequestUuidV4;
        let req = Request::new(());
        let a = make.make_request_id(&req).unwrap();
        let b = make.make_request_id(&req).unwrap();
        assert_ne!(a.header_value(), b.header_value());
    }
}
