//! Module specification entity
//!
//! A [`ModuleSpec`] is one resolved catalog entry: where a module comes
//! from and which ref to check out. A [`ModuleSet`] is the name-keyed
//! collection handed to the orchestrator for one environment.

use std::collections::BTreeMap;

/// One module to deploy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleSpec {
    name: String,
    source_url: String,
    git_ref: String,
}

impl ModuleSpec {
    pub fn new(
        name: impl Into<String>,
        source_url: impl Into<String>,
        git_ref: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_url: source_url.into(),
            git_ref: git_ref.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Branch or tag to check out
    pub fn git_ref(&self) -> &str {
        &self.git_ref
    }

}

/// Modules of one environment, unique by name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleSet {
    modules: BTreeMap<String, ModuleSpec>,
}

impl ModuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a module, replacing any entry with the same name
    pub fn insert(&mut self, spec: ModuleSpec) -> Option<ModuleSpec> {
        self.modules.insert(spec.name().to_string(), spec)
    }

    pub fn get(&self, name: &str) -> Option<&ModuleSpec> {
        self.modules.get(name)
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Modules in name order
    pub fn iter(&self) -> impl Iterator<Item = &ModuleSpec> {
        self.modules.values()
    }
}

impl FromIterator<ModuleSpec> for ModuleSet {
    fn from_iter<I: IntoIterator<Item = ModuleSpec>>(iter: I) -> Self {
        let mut set = ModuleSet::new();
        for spec in iter {
            set.insert(spec);
        }
        set
    }
}

impl IntoIterator for ModuleSet {
    type Item = ModuleSpec;
    type IntoIter = std::collections::btree_map::IntoValues<String, ModuleSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.modules.into_values()
    }
}
