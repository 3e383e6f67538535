//! Property tests for location selection and module entries.

use std::path::Path;

use proptest::prelude::*;
use serde_yaml_ng::{Mapping, Value};

use postrun::domain::services::{parse_spec, select_location};
use postrun::domain::value_objects::Location;
use postrun::PostrunError;

/// `modules:` document with one `mod_<location>` entry per location
fn catalog(locations: &[String]) -> Value {
    let mut per_location = Mapping::new();
    for location in locations {
        let mut spec = Mapping::new();
        spec.insert("url".into(), format!("https://example.com/{}.git", location).into());
        spec.insert("ref".into(), location.clone().into());

        let mut modules = Mapping::new();
        modules.insert(format!("mod_{}", location).into(), Value::Mapping(spec));
        per_location.insert(location.clone().into(), Value::Mapping(modules));
    }

    let mut root = Mapping::new();
    root.insert("modules".into(), Value::Mapping(per_location));
    Value::Mapping(root)
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: the requested location wins, else `default`, else LocationMissing.
    #[test]
    fn property_location_falls_back_to_default(
        mut locations in proptest::collection::vec("[a-z]{2,4}[0-9]", 0..4),
        include_default in any::<bool>(),
        requested in "[a-z]{2,4}[0-9]",
    ) {
        if include_default {
            locations.push("default".to_string());
        }
        let document = catalog(&locations);

        let result = select_location(
            &document,
            &Location::new(requested.as_str()),
            "production",
            Path::new("modules.yaml"),
        );

        if locations.contains(&requested) {
            let selection = result.unwrap();
            prop_assert!(!selection.fell_back);
            prop_assert_eq!(selection.names(), vec![format!("mod_{}", requested)]);
        } else if include_default {
            let selection = result.unwrap();
            prop_assert!(selection.fell_back);
            prop_assert_eq!(selection.names(), vec!["mod_default".to_string()]);
        } else {
            let is_location_missing = matches!(result, Err(PostrunError::LocationMissing { .. }));
            prop_assert!(is_location_missing);
        }
    }

    /// PROPERTY: a non-blank ref override always replaces the catalog ref.
    #[test]
    fn property_ref_override_wins(
        catalog_ref in proptest::option::of("[a-z0-9.]{1,8}"),
        override_ref in "[a-zA-Z0-9/_.-]{1,16}",
    ) {
        let mut entry = Mapping::new();
        entry.insert("url".into(), "https://example.com/roles.git".into());
        if let Some(r) = &catalog_ref {
            entry.insert("ref".into(), r.clone().into());
        }

        let spec = parse_spec("production", "roles", &Value::Mapping(entry), Some(&override_ref))
            .unwrap();

        prop_assert_eq!(spec.git_ref(), override_ref.as_str());
        prop_assert_eq!(spec.name(), "roles");
    }

    /// PROPERTY: without an override, a blank or missing ref is always rejected.
    #[test]
    fn property_blank_ref_is_rejected(
        blank in proptest::option::of("[ \t]{0,3}"),
    ) {
        let mut entry = Mapping::new();
        entry.insert("url".into(), "https://example.com/roles.git".into());
        if let Some(r) = &blank {
            entry.insert("ref".into(), r.clone().into());
        }

        let result = parse_spec("production", "roles", &Value::Mapping(entry), None);

        let is_invalid_module = matches!(result, Err(PostrunError::InvalidModule { .. }));
        prop_assert!(is_invalid_module);
    }
}
