#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;
use postrun::domain::services::{parse_spec, select_location};
use postrun::domain::value_objects::Location;

fuzz_target!(|data: &[u8]| {
    let Ok(content) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = serde_yaml_ng::from_str::<serde_yaml_ng::Value>(content) else {
        return;
    };

    // Location selection and entry parsing must never panic
    for location in ["dc1", "default"] {
        let Ok(selection) = select_location(
            &document,
            &Location::new(location),
            "fuzz",
            Path::new("modules.yaml"),
        ) else {
            continue;
        };
        for name in selection.names() {
            if let Some(entry) = document
                .get("modules")
                .and_then(|m| m.get(location))
                .and_then(|l| l.get(name.as_str()))
            {
                let _ = parse_spec("fuzz", &name, entry, None);
                let _ = parse_spec("fuzz", &name, entry, Some("main"));
            }
        }
    }
});
