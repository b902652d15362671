use percent_encoding::{utf8_percent_encode, AsciiSet, PercentEncode};
use std::borrow::Cow;
use std::collections::BTreeMap;

// https://tools.ietf.org/html/rfc5849#section-3.6
// * ALPHA, DIGIT, '-', '.', '_', '~' MUST NOT be encoded.
// * All other characters MUST be encoded.
// * The two hexadecimal characters used to represent encoded
//   characters MUST be uppercase.
const TARGETS_FOR_PARAMS: &AsciiSet = &percent_encoding::NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

pub fn percent_encode(input: &str) -> PercentEncode<'_> {
    utf8_percent_encode(input, TARGETS_FOR_PARAMS)
}

/// Joins pairs as `key=value&...`, both sides percent encoded, keeping the given order.
pub fn encode_pairs<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    pairs
        .into_iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<String>>()
        .join("&")
}

/// Generates a query string like `?screen_name=john_doe`.
#[cfg_attr(not(feature = "reqwest"), allow(dead_code))]
pub fn http_query_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    format!("?{}", encode_pairs(pairs))
}

/// Splits an URL into its base string URI (no query, no fragment) and its decoded query.
pub fn url_to_endpoint_and_queries(url: &url::Url) -> (&str, BTreeMap<Cow<'_, str>, Cow<'_, str>>) {
    // later duplicates overwrite earlier ones.
    let map = url.query_pairs().collect::<BTreeMap<_, _>>();
    (&url[..url::Position::AfterPath], map)
}
