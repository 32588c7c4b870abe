//! Percent encoding as OAuth 1.0 defines it (RFC 5849 section 3.6).
//!
//! Only `A-Z a-z 0-9 - . _ ~` pass through. Everything else is escaped with
//! upper-case hex digits, so a space becomes `%20` and never `+`.

use std::borrow::Cow;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const OAUTH_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode `input` with the OAuth unreserved set.
pub fn percent_encode(input: &str) -> Cow<'_, str> {
    utf8_percent_encode(input, OAUTH_ENCODE_SET).into()
}

/// Serialize pairs as `k1=v1&k2=v2`, encoding both sides.
pub(crate) fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use percent_encoding::percent_decode_str;
    use pretty_assertions::assert_eq;

    #[test]
    fn unreserved_untouched() {
        let unreserved = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-._~";
        assert_eq!(percent_encode(unreserved), unreserved);
    }

    #[test]
    fn reserved_escaped() {
        assert_eq!(percent_encode(" "), "%20");
        assert_eq!(percent_encode("+"), "%2B");
        assert_eq!(percent_encode("&=/"), "%26%3D%2F");
        assert_eq!(percent_encode("*"), "%2A");
        assert_eq!(
            percent_encode("Hello Ladies + Gentlemen, a signed OAuth request!"),
            "Hello%20Ladies%20%2B%20Gentlemen%2C%20a%20signed%20OAuth%20request%21"
        );
    }

    #[test]
    fn multibyte_escaped() {
        assert_eq!(percent_encode("少女"), "%E5%B0%91%E5%A5%B3");
    }

    #[test]
    fn decode_restores_input() {
        for input in &[
            "",
            "plain",
            "a b+c",
            "http://printer.example.com/ready",
            "終末旅行 ~-._",
            "%20 already escaped",
        ] {
            let encoded = percent_encode(input);
            assert!(!encoded.contains(' '));
            assert!(!encoded.contains('+'));
            let decoded = percent_decode_str(&encoded).decode_utf8().unwrap();
            assert_eq!(&decoded, input);
        }
    }

    #[test]
    fn pairs_keep_order() {
        let pairs = vec![("b", "x y"), ("a", "1+1")];
        assert_eq!(
            encode_pairs(pairs.iter().map(|(k, v)| (*k, *v))),
            "b=x%20y&a=1%2B1"
        );
        assert_eq!(encode_pairs(Vec::<(&str, &str)>::new()), "");
    }
}
