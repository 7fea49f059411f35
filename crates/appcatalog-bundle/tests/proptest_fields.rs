//! Property tests for filename-derived display names.

use appcatalog_bundle::name_from_file_name;
use proptest::prelude::*;

proptest! {
    #[test]
    fn reverse_dns_names_yield_app_component(
        parts in prop::collection::vec("[A-Za-z0-9_-]{1,12}", 1..6),
        app in "[A-Za-z0-9_-]{1,16}",
        ext in "[a-z]{1,4}",
    ) {
        let file_name = format!("{}.{app}.{ext}", parts.join("."));
        prop_assert_eq!(name_from_file_name(&file_name), app.as_str());
    }

    #[test]
    fn names_without_dots_are_returned_whole(name in "[^.]{0,32}") {
        prop_assert_eq!(name_from_file_name(&name), name.as_str());
    }

    #[test]
    fn derived_name_never_contains_dot(name in ".{0,48}") {
        let derived = name_from_file_name(&name);
        prop_assert!(!derived.contains('.') || derived == name);
    }
}
