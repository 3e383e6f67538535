//! Module catalog service
//!
//! Turns a raw `modules.yaml` document into the [`ModuleSet`] for one
//! environment and location:
//!
//! ```yaml
//! modules:
//!   dc1:
//!     roles: { url: https://git.example.com/roles.git, ref: production }
//!   default:
//!     roles: { url: https://git.example.com/roles.git, ref: master }
//! ```
//!
//! A missing location falls back to `default`; a missing `default` is a
//! configuration error for the environment.

use std::ffi::OsStr;
use std::path::{Component, Path};

use serde_yaml_ng::{Mapping, Value};

use crate::domain::entities::{ModuleSet, ModuleSpec};
use crate::domain::ports::{CatalogRepository, DeployEvent, DeployEventSink};
use crate::domain::value_objects::{Location, DEFAULT_LOCATION};
use crate::error::{PostrunError, PostrunResult};

/// Caller restriction to a single module, optionally at another ref
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleRequest {
    pub module: Option<String>,
    pub git_ref: Option<String>,
}

impl ModuleRequest {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn single(module: impl Into<String>) -> Self {
        Self {
            module: Some(module.into()),
            git_ref: None,
        }
    }

    pub fn with_ref(mut self, git_ref: impl Into<String>) -> Self {
        self.git_ref = Some(git_ref.into());
        self
    }
}

/// Resolves per-environment module sets from a [`CatalogRepository`]
pub struct ModuleCatalog<R: CatalogRepository> {
    repository: R,
}

impl<R: CatalogRepository> ModuleCatalog<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Modules to deploy for `environment` at `location`
    ///
    /// A missing catalog or an unknown requested module yields an empty
    /// set after reporting the condition to `events`.
    pub fn resolve(
        &self,
        environment: &str,
        location: &Location,
        request: &ModuleRequest,
        events: &dyn DeployEventSink,
    ) -> PostrunResult<ModuleSet> {
        let path = self.repository.catalog_path(environment);
        let Some(document) = self.repository.load(environment)? else {
            events.on_event(DeployEvent::CatalogMissing {
                environment: environment.to_string(),
                path,
            });
            return Ok(ModuleSet::new());
        };

        let selection = select_location(&document, location, environment, &path)?;
        if selection.fell_back {
            events.on_event(DeployEvent::LocationFallback {
                environment: environment.to_string(),
                location: location.to_string(),
            });
        }

        match request.module.as_deref() {
            None => selection.modules(environment, &path),
            Some(name) => {
                let Some(value) = selection.entry(name) else {
                    events.on_event(DeployEvent::ModuleNotFound {
                        environment: environment.to_string(),
                        module: name.to_string(),
                    });
                    return Ok(ModuleSet::new());
                };
                let spec = parse_spec(environment, name, value, request.git_ref.as_deref())?;
                Ok(std::iter::once(spec).collect())
            }
        }
    }
}

/// Module mapping chosen for a location
#[derive(Debug)]
pub struct LocationSelection<'a> {
    /// `None` when the location key is present but empty
    entries: Option<&'a Mapping>,
    /// True when `default` replaced the requested location
    pub fell_back: bool,
}

impl<'a> LocationSelection<'a> {
    fn entry(&self, name: &str) -> Option<&'a Value> {
        self.entries?.get(name)
    }

    /// Names of all modules in the selection, in document order
    pub fn names(&self) -> Vec<String> {
        self.entries
            .map(|m| m.keys().filter_map(scalar_to_string).collect())
            .unwrap_or_default()
    }

    fn modules(&self, environment: &str, path: &Path) -> PostrunResult<ModuleSet> {
        let mut set = ModuleSet::new();
        let Some(entries) = self.entries else {
            return Ok(set);
        };
        for (key, value) in entries {
            let name = scalar_to_string(key).ok_or_else(|| PostrunError::InvalidCatalog {
                file: path.to_path_buf(),
                message: format!("module names must be strings, found {:?}", key),
            })?;
            set.insert(parse_spec(environment, &name, value, None)?);
        }
        Ok(set)
    }
}

/// Pick `modules.<location>`, falling back to `modules.default`
pub fn select_location<'a>(
    document: &'a Value,
    location: &Location,
    environment: &str,
    path: &Path,
) -> PostrunResult<LocationSelection<'a>> {
    let locations = document
        .get("modules")
        .and_then(Value::as_mapping)
        .ok_or_else(|| PostrunError::InvalidCatalog {
            file: path.to_path_buf(),
            message: "missing top-level 'modules' mapping".to_string(),
        })?;

    let (value, fell_back) = match locations.get(location.as_str()) {
        Some(value) => (value, false),
        None => match locations.get(DEFAULT_LOCATION) {
            Some(value) => (value, !location.is_default()),
            None => {
                return Err(PostrunError::LocationMissing {
                    environment: environment.to_string(),
                    location: location.to_string(),
                })
            }
        },
    };

    let entries = match value {
        Value::Null => None,
        Value::Mapping(mapping) => Some(mapping),
        other => {
            return Err(PostrunError::InvalidCatalog {
                file: path.to_path_buf(),
                message: format!("modules for a location must be a mapping, found {:?}", other),
            })
        }
    };

    Ok(LocationSelection { entries, fell_back })
}

/// Build a [`ModuleSpec`] from one `{url, ref}` entry
///
/// `ref_override` replaces the catalog ref and makes it optional. A
/// missing or empty ref is rejected so no default branch is ever cloned
/// by accident.
pub fn parse_spec(
    environment: &str,
    name: &str,
    value: &Value,
    ref_override: Option<&str>,
) -> PostrunResult<ModuleSpec> {
    let invalid = |message: &str| PostrunError::InvalidModule {
        environment: environment.to_string(),
        module: name.to_string(),
        message: message.to_string(),
    };

    if !is_plain_name(name) {
        return Err(invalid("module name must be a single directory name"));
    }

    let fields = value
        .as_mapping()
        .ok_or_else(|| invalid("expected a mapping with 'url' and 'ref'"))?;

    let url = fields
        .get("url")
        .and_then(scalar_to_string)
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| invalid("missing 'url'"))?;

    let git_ref = match ref_override.map(str::trim).filter(|r| !r.is_empty()) {
        Some(r) => r.to_string(),
        None => fields
            .get("ref")
            .and_then(scalar_to_string)
            .filter(|r| !r.trim().is_empty())
            .ok_or_else(|| invalid("missing or empty 'ref'"))?,
    };

    Ok(ModuleSpec::new(name, url, git_ref))
}

/// True when `name` joins onto a directory as exactly one child entry
fn is_plain_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(first)), None) => first == OsStr::new(name),
        _ => false,
    }
}

fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::deploy_events::testing::RecordingEventSink;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct MemoryCatalogs {
        documents: HashMap<String, String>,
    }

    impl MemoryCatalogs {
        fn with(environment: &str, yaml: &str) -> Self {
            let mut documents = HashMap::new();
            documents.insert(environment.to_string(), yaml.to_string());
            Self { documents }
        }
    }

    impl CatalogRepository for MemoryCatalogs {
        fn catalog_path(&self, environment: &str) -> PathBuf {
            PathBuf::from(format!("/envs/{}/modules.yaml", environment))
        }

        fn load(&self, environment: &str) -> PostrunResult<Option<Value>> {
            match self.documents.get(environment) {
                Some(yaml) => Ok(Some(serde_yaml_ng::from_str(yaml)?)),
                None => Ok(None),
            }
        }
    }

    const CATALOG: &str = r#"
modules:
  dc1:
    roles:
      url: https://example.com/roles.git
      ref: dc1-stable
    apt_mirror:
      url: https://example.com/apt-mirror.git
      ref: v1.2
  default:
    roles:
      url: https://example.com/roles.git
      ref: production
"#;

    fn catalog() -> ModuleCatalog<MemoryCatalogs> {
        ModuleCatalog::new(MemoryCatalogs::with("production", CATALOG))
    }

    #[test]
    fn resolve_present_location() {
        let sink = RecordingEventSink::new();
        let modules = catalog()
            .resolve("production", &Location::new("dc1"), &ModuleRequest::all(), &sink)
            .unwrap();

        assert_eq!(modules.len(), 2);
        assert_eq!(modules.get("roles").unwrap().git_ref(), "dc1-stable");
        assert_eq!(modules.get("apt_mirror").unwrap().git_ref(), "v1.2");
        assert!(sink.events().is_empty());
    }

    #[test]
    fn resolve_falls_back_to_default() {
        let sink = RecordingEventSink::new();
        let modules = catalog()
            .resolve("production", &Location::new("dc9"), &ModuleRequest::all(), &sink)
            .unwrap();

        let expected: ModuleSet =
            std::iter::once(ModuleSpec::new("roles", "https://example.com/roles.git", "production"))
                .collect();
        assert_eq!(modules, expected);
        assert_eq!(
            sink.events(),
            vec![DeployEvent::LocationFallback {
                environment: "production".to_string(),
                location: "dc9".to_string(),
            }]
        );
    }

    #[test]
    fn resolve_default_location_does_not_report_fallback() {
        let sink = RecordingEventSink::new();
        catalog()
            .resolve("production", &Location::default(), &ModuleRequest::all(), &sink)
            .unwrap();
        assert!(sink.events().is_empty());
    }

    #[test]
    fn resolve_missing_catalog_is_empty() {
        let sink = RecordingEventSink::new();
        let modules = catalog()
            .resolve("staging", &Location::default(), &ModuleRequest::all(), &sink)
            .unwrap();

        assert!(modules.is_empty());
        assert!(matches!(
            sink.events().as_slice(),
            [DeployEvent::CatalogMissing { environment, .. }] if environment == "staging"
        ));
    }

    #[test]
    fn resolve_missing_default_is_location_error() {
        let yaml = "modules:\n  dc1:\n    roles: { url: u, ref: r }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let err = catalog
            .resolve("production", &Location::new("dc2"), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap_err();

        assert!(matches!(err, PostrunError::LocationMissing { ref location, .. } if location == "dc2"));
    }

    #[test]
    fn resolve_single_module_with_ref_override() {
        let request = ModuleRequest::single("roles").with_ref("feature-x");
        let modules = catalog()
            .resolve("production", &Location::new("dc1"), &request, &RecordingEventSink::new())
            .unwrap();

        assert_eq!(modules.len(), 1);
        let roles = modules.get("roles").unwrap();
        assert_eq!(roles.git_ref(), "feature-x");
        assert_eq!(roles.source_url(), "https://example.com/roles.git");
    }

    #[test]
    fn resolve_single_module_keeps_catalog_ref() {
        let modules = catalog()
            .resolve(
                "production",
                &Location::new("dc1"),
                &ModuleRequest::single("apt_mirror"),
                &RecordingEventSink::new(),
            )
            .unwrap();

        assert_eq!(modules.get("apt_mirror").unwrap().git_ref(), "v1.2");
    }

    #[test]
    fn resolve_unknown_module_is_empty() {
        let sink = RecordingEventSink::new();
        let modules = catalog()
            .resolve("production", &Location::new("dc1"), &ModuleRequest::single("nope"), &sink)
            .unwrap();

        assert!(modules.is_empty());
        assert_eq!(
            sink.events(),
            vec![DeployEvent::ModuleNotFound {
                environment: "production".to_string(),
                module: "nope".to_string(),
            }]
        );
    }

    #[test]
    fn resolve_rejects_missing_ref() {
        let yaml = "modules:\n  default:\n    roles: { url: https://example.com/roles.git }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let err = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap_err();

        assert!(matches!(err, PostrunError::InvalidModule { ref module, .. } if module == "roles"));
    }

    #[test]
    fn resolve_rejects_empty_ref() {
        let yaml = "modules:\n  default:\n    roles: { url: u, ref: '' }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let err = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap_err();
        assert!(matches!(err, PostrunError::InvalidModule { .. }));
    }

    #[test]
    fn ref_override_fills_missing_ref() {
        let yaml = "modules:\n  default:\n    roles: { url: u }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let request = ModuleRequest::single("roles").with_ref("hotfix");
        let modules = catalog
            .resolve("production", &Location::default(), &request, &RecordingEventSink::new())
            .unwrap();
        assert_eq!(modules.get("roles").unwrap().git_ref(), "hotfix");
    }

    #[test]
    fn numeric_refs_are_stringified() {
        let yaml = "modules:\n  default:\n    ntp: { url: u, ref: 2.1 }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let modules = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap();
        assert_eq!(modules.get("ntp").unwrap().git_ref(), "2.1");
    }

    #[test]
    fn empty_location_yields_no_modules() {
        let yaml = "modules:\n  default:\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let modules = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap();
        assert!(modules.is_empty());
    }

    #[test]
    fn missing_modules_key_is_invalid_catalog() {
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", "roles: {}\n"));
        let err = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap_err();
        assert!(matches!(err, PostrunError::InvalidCatalog { .. }));
    }

    #[test]
    fn selection_lists_names() {
        let document: Value = serde_yaml_ng::from_str(CATALOG).unwrap();
        let selection =
            select_location(&document, &Location::new("dc1"), "production", Path::new("m.yaml"))
                .unwrap();
        assert_eq!(selection.names(), vec!["roles", "apt_mirror"]);
        assert!(!selection.fell_back);
    }

    fn entry() -> Value {
        serde_yaml_ng::from_str("{ url: https://example.com/roles.git, ref: production }").unwrap()
    }

    #[test]
    fn parse_spec_rejects_names_outside_target_dir() {
        for name in ["", ".", "..", "../roles", "a/b", "/etc", "roles/", "./roles"] {
            let err = parse_spec("production", name, &entry(), None).unwrap_err();
            assert!(
                matches!(err, PostrunError::InvalidModule { ref module, .. } if module == name),
                "name {:?} was accepted",
                name
            );
        }
    }

    #[test]
    fn parse_spec_accepts_plain_names() {
        for name in ["roles", "apt_mirror", "apt-mirror", "ntp.v2", "..roles"] {
            let spec = parse_spec("production", name, &entry(), None).unwrap();
            assert_eq!(spec.name(), name);
        }
    }

    #[test]
    fn resolve_rejects_parent_dir_module() {
        let yaml = "modules:\n  default:\n    '..': { url: u, ref: master }\n    roles: { url: u, ref: master }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let err = catalog
            .resolve("production", &Location::default(), &ModuleRequest::all(), &RecordingEventSink::new())
            .unwrap_err();
        assert!(matches!(err, PostrunError::InvalidModule { ref module, .. } if module == ".."));
    }

    #[test]
    fn single_request_rejects_empty_module_name() {
        let yaml = "modules:\n  default:\n    '': { url: u, ref: master }\n";
        let catalog = ModuleCatalog::new(MemoryCatalogs::with("production", yaml));
        let err = catalog
            .resolve("production", &Location::default(), &ModuleRequest::single(""), &RecordingEventSink::new())
            .unwrap_err();
        assert!(matches!(err, PostrunError::InvalidModule { .. }));
    }
}
