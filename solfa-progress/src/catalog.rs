//! Static module layout.
//!
//! Module completion percentages are derived by dividing the completed
//! submodules by the statically known submodule list per module. The
//! value is never stored, so it cannot drift from the underlying set.

use std::collections::{BTreeMap, BTreeSet};

/// The application's fixed module → submodule layout.
#[derive(Debug, Clone, Default)]
pub struct ModuleCatalog {
    modules: BTreeMap<String, Vec<String>>,
}

impl ModuleCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a module with its submodule identifiers.
    #[must_use]
    pub fn with_module(
        mut self,
        module_id: impl Into<String>,
        submodules: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.modules.insert(
            module_id.into(),
            submodules.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Number of submodules in a module, or 0 for an unknown module.
    #[must_use]
    pub fn submodule_count(&self, module_id: &str) -> usize {
        self.modules.get(module_id).map_or(0, Vec::len)
    }

    /// Percentage of a module's submodules present in `completed`.
    #[must_use]
    pub fn completion_percent(&self, module_id: &str, completed: &BTreeSet<String>) -> u8 {
        let Some(submodules) = self.modules.get(module_id) else {
            return 0;
        };
        if submodules.is_empty() {
            return 0;
        }
        let done = submodules
            .iter()
            .filter(|id| completed.contains(*id))
            .count();
        ((done * 100) / submodules.len()) as u8
    }
}
