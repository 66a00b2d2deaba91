//! Share-link query plumbing. Everything here works on the raw query string
//! (no leading `?`), so the encoder/decoder can be exercised natively without
//! a browser location object.
//!
//! The `attrs` parameter carries the selected ids joined with a literal `,`.
//! Ids are simple identifiers and need no escaping; the decoder still
//! percent-decodes the value so links produced by stricter serializers
//! (`%2C` separators) round-trip fine. Foreign parameters are preserved
//! byte-for-byte and never re-encoded.

use std::borrow::Cow;

pub const ATTRS_PARAM: &str = "attrs";

fn decode_component(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Splits a raw query into its `key=value` segments, dropping empty ones
/// (stray `&&` or a lone trailing `&`). A leading `?` is tolerated.
fn segments(query: &str) -> impl Iterator<Item = &str> {
    query
        .trim_start_matches('?')
        .split('&')
        .filter(|segment| !segment.is_empty())
}

fn segment_key(segment: &str) -> String {
    let raw_key = segment.split('=').next().unwrap_or(segment);
    decode_component(raw_key)
}

fn is_attrs(segment: &str) -> bool {
    segment_key(segment) == ATTRS_PARAM
}

/// Reads the `attrs` parameter out of a raw query string.
///
/// Returns `None` when the parameter is absent. When present, the value is
/// percent-decoded, split on `,`, whitespace-trimmed and cleared of empty
/// entries, so `?attrs=creative, bold,,` decodes to `["creative", "bold"]`.
/// The ids are NOT validated against the catalog here; filtering against
/// rendered cards happens at the point of restoration.
pub fn parse_attrs(query: &str) -> Option<Vec<String>> {
    let segment = segments(query).find(|segment| is_attrs(segment))?;
    let raw_value = segment.split_once('=').map(|(_, v)| v).unwrap_or("");
    let value = decode_component(raw_value);
    Some(
        value
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
    )
}

/// Sets the `attrs` parameter to `ids` joined with `,`, preserving every
/// other parameter untouched. An existing `attrs` keeps its position; later
/// duplicates are dropped; otherwise the parameter is appended.
pub fn set_attrs(query: &str, ids: &[String]) -> String {
    let encoded = format!("{ATTRS_PARAM}={}", ids.join(","));
    let mut out: Vec<Cow<'_, str>> = Vec::new();
    let mut replaced = false;
    for segment in segments(query) {
        if is_attrs(segment) {
            if !replaced {
                out.push(Cow::Owned(encoded.clone()));
                replaced = true;
            }
        } else {
            out.push(Cow::Borrowed(segment));
        }
    }
    if !replaced {
        out.push(Cow::Owned(encoded));
    }
    out.join("&")
}

/// Drops the `attrs` parameter, preserving everything else. An empty result
/// means the address bar should lose its query string entirely.
pub fn remove_attrs(query: &str) -> String {
    segments(query)
        .filter(|segment| !is_attrs(segment))
        .collect::<Vec<_>>()
        .join("&")
}
