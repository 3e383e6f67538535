//! Property tests for the local presence check.

use proptest::prelude::*;
use tempfile::TempDir;

use postrun::domain::services::LocalPresenceChecker;
use postrun::domain::value_objects::NamingDelimiter;
use postrun::infrastructure::LocalFs;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: underscore staging wins, dash staging is the fallback.
    #[test]
    fn property_underscore_wins_then_dash(
        name in "[a-z]{1,6}(_[a-z]{1,6}){1,2}",
        underscore_staged in any::<bool>(),
        dash_staged in any::<bool>(),
    ) {
        let root = TempDir::new().unwrap();
        if underscore_staged {
            std::fs::create_dir_all(root.path().join(&name)).unwrap();
        }
        if dash_staged {
            std::fs::create_dir_all(root.path().join(name.replace('_', "-"))).unwrap();
        }

        let result = LocalPresenceChecker::new(&LocalFs::new()).check(&name, root.path());

        prop_assert_eq!(result.exists, underscore_staged || dash_staged);
        if underscore_staged {
            prop_assert_eq!(result.delimiter, NamingDelimiter::Underscore);
        } else if dash_staged {
            prop_assert_eq!(result.delimiter, NamingDelimiter::Dash);
        }
    }

    /// PROPERTY: applying a delimiter only ever swaps `_` for `-`.
    #[test]
    fn property_delimiter_only_swaps_underscores(name in "[a-z_]{1,12}") {
        prop_assert_eq!(NamingDelimiter::Underscore.apply(&name), name.clone());
        let dashed = NamingDelimiter::Dash.apply(&name);
        prop_assert_eq!(dashed.len(), name.len());
        prop_assert!(!dashed.contains('_'));
    }
}
