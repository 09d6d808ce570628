// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Percent encoding for cookie values and form bodies

/// URL encode a string
pub(crate) fn percent_encode(s: &str) -> String {
    let mut result = String::new();
    for c in s.chars() {
        match c {
            'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_' | '.' | '~' => result.push(c),
            ' ' => result.push('+'),
            _ => {
                for byte in c.to_string().bytes() {
                    result.push_str(&format!("%{:02X}", byte));
                }
            }
        }
    }
    result
}

/// Decode a percent-encoded string
///
/// Invalid escape sequences are kept verbatim rather than rejected; the
/// wire value is preserved separately so nothing is lost.
pub(crate) fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut result = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => {
                result.push(b' ');
                i += 1;
            }
            b'%' => match (hex_val(bytes.get(i + 1)), hex_val(bytes.get(i + 2))) {
                (Some(hi), Some(lo)) => {
                    result.push(hi << 4 | lo);
                    i += 3;
                }
                _ => {
                    result.push(b'%');
                    i += 1;
                }
            },
            b => {
                result.push(b);
                i += 1;
            }
        }
    }
    String::from_utf8_lossy(&result).into_owned()
}

fn hex_val(b: Option<&u8>) -> Option<u8> {
    match b? {
        b @ b'0'..=b'9' => Some(b - b'0'),
        b @ b'a'..=b'f' => Some(b - b'a' + 10),
        b @ b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Encode flat name/value pairs as an application/x-www-form-urlencoded body
pub(crate) fn form_urlencode(pairs: &[(String, String)]) -> String {
    pairs
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_unreserved() {
        assert_eq!(percent_encode("abc-XYZ_0.9~"), "abc-XYZ_0.9~");
    }

    #[test]
    fn test_encode_reserved() {
        assert_eq!(percent_encode("foo[bar]"), "foo%5Bbar%5D");
        assert_eq!(percent_encode("a b&c"), "a+b%26c");
    }

    #[test]
    fn test_decode_round_trip() {
        let original = "a value; with=special&chars[]";
        assert_eq!(percent_decode(&percent_encode(original)), original);
    }

    #[test]
    fn test_decode_invalid_sequence_kept() {
        assert_eq!(percent_decode("100%"), "100%");
        assert_eq!(percent_decode("%zz"), "%zz");
    }

    #[test]
    fn test_form_urlencode() {
        let pairs = vec![
            ("foo[bar]".to_string(), "baz".to_string()),
            ("q".to_string(), "a b".to_string()),
        ];
        assert_eq!(form_urlencode(&pairs), "foo%5Bbar%5D=baz&q=a+b");
    }
}
