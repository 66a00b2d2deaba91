use super::*;

fn owned(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}

#[test]
fn parse_share_query_filters_unknown_ids() {
    assert_eq!(
        parse_share_query("attrs=creative,bold,unknownid"),
        owned(&["creative", "bold"])
    );
}

#[test]
fn parse_share_query_tolerates_absent_and_empty_values() {
    assert!(parse_share_query("").is_empty());
    assert!(parse_share_query("attrs=").is_empty());
    assert!(parse_share_query("theme=dark").is_empty());
}

#[test]
fn build_share_query_appends_and_preserves() {
    assert_eq!(
        build_share_query("theme=dark", owned(&["focused", "analytical"])),
        "theme=dark&attrs=focused,analytical"
    );
}

// Round-trip law: encoding any subset and decoding it back yields exactly the
// catalog-known part of that subset, in order, with no extras.
#[test]
fn share_query_round_trips_catalog_subsets() {
    let subsets: &[&[&str]] = &[
        &[],
        &["creative"],
        &["focused", "analytical"],
        &["bold", "creative", "curious", "empathic"],
        &["visionary", "notreal", "adaptable"],
    ];
    for subset in subsets {
        let query = build_share_query("", owned(subset));
        let expected: Vec<String> = subset
            .iter()
            .filter(|id| catalog::is_known(id))
            .map(|id| id.to_string())
            .collect();
        assert_eq!(parse_share_query(&query), expected, "subset {subset:?}");
    }
}

#[test]
fn catalog_export_matches_definitions() {
    assert_eq!(ATTRIBUTES.len(), 10);
    assert!(ATTRIBUTES.iter().all(|attr| !attr.title.is_empty()));
    assert!(ATTRIBUTES.iter().all(|attr| !attr.description.is_empty()));
}
