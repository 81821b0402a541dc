//! Parameter Codec
//!
//! Form and query-string parameter encoding.
//!
//! Token endpoints assert the exact serialized request body, so encoding
//! must be byte-stable: callers pass an explicit ordered sequence of pairs
//! and the output follows that order exactly. Serialization is a pure
//! function of its input and never depends on a map's iteration order.

use url::form_urlencoded;

/// Serialize ordered pairs as an `application/x-www-form-urlencoded` body.
///
/// Reserved characters are percent-encoded, space becomes `+`. Empty values
/// encode as `key=`; pairs the caller did not supply are simply absent from
/// the output.
pub fn form_encode<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in pairs {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Serialize ordered pairs as a URL query-string suffix (no leading `?`).
///
/// Same encoding rules as [`form_encode`], so a redirect URL and a request
/// body built from the same pairs are byte-identical.
pub fn query_string<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    form_encode(pairs)
}
