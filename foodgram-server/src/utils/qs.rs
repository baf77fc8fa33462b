//! Raw query-string helpers
//!
//! The recipe listing accepts a repeated `tags` parameter
//! (`?tags=lunch&tags=dinner`), which the form deserializer behind
//! `axum::extract::Query` cannot represent. These helpers parse a raw query
//! string into (key, value) pairs with percent-decoding.

/// Percent-decode a query component (`+` means space)
pub fn percent_decode(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                out.push(b' ');
                i += 1;
            }
            b'%' if i + 2 < bytes.len() => {
                let hex = &value[i + 1..i + 3];
                if let Ok(byte) = u8::from_str_radix(hex, 16) {
                    out.push(byte);
                    i += 3;
                } else {
                    out.push(b'%');
                    i += 1;
                }
            }
            b => {
                out.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Split a raw query string into decoded (key, value) pairs
pub fn parse_pairs(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .map(|pair| match pair.split_once('=') {
            Some((k, v)) => (percent_decode(k), percent_decode(v)),
            None => (percent_decode(pair), String::new()),
        })
        .collect()
}

/// Loose boolean parse for filter flags (`1`, `true`, `True` are truthy)
pub fn parse_flag(value: &str) -> bool {
    matches!(value, "1") || value.eq_ignore_ascii_case("true")
}
