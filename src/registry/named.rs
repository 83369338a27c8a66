//! Name-indexed directory of factories.

use crate::error::{Result, SelectionError};
use std::collections::HashMap;
use std::fmt;

/// Maps string names to factories of one value kind over one entity category.
///
/// Names are unique: registering a name twice is a programming error and is
/// reported rather than silently shadowing the first definition. A registry
/// is filled once at start-up and only read afterwards.
pub struct Registry<F> {
    entries: HashMap<String, F>,
}

impl<F: Clone> Registry<F> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `factory` under `name`.
    ///
    /// # Errors
    /// [`SelectionError::DuplicateRegistration`] if `name` is already present.
    pub fn register(&mut self, name: &str, factory: F) -> Result<()> {
        if self.entries.contains_key(name) {
            return Err(SelectionError::DuplicateRegistration(name.to_string()));
        }
        self.entries.insert(name.to_string(), factory);
        Ok(())
    }

    /// Retrieve a copy of the factory registered under `name`.
    ///
    /// # Errors
    /// [`SelectionError::NotRegistered`] if `name` is absent.
    pub fn get(&self, name: &str) -> Result<F> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| SelectionError::NotRegistered(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<F: Clone> Default for Registry<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for Registry<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("entries", &self.entries.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Interaction;
    use crate::registry::binder::bind;
    use crate::registry::types::{Args, CutFactory};

    fn fiducial(i: &Interaction) -> bool {
        i.is_fiducial
    }

    #[test]
    fn test_register_and_get() {
        let mut registry: Registry<CutFactory<Interaction>> = Registry::new();
        registry.register("true_fiducial_cut", bind(fiducial)).unwrap();

        assert!(registry.contains("true_fiducial_cut"));
        assert_eq!(registry.len(), 1);

        let cut = registry.get("true_fiducial_cut").unwrap()(&Args::default()).unwrap();
        let inside = Interaction {
            is_fiducial: true,
            ..Default::default()
        };
        assert!(cut(&inside));
        assert!(!cut(&Interaction::default()));
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry: Registry<CutFactory<Interaction>> = Registry::new();
        registry.register("reco_fiducial_cut", bind(fiducial)).unwrap();

        let result = registry.register("reco_fiducial_cut", bind(fiducial));
        assert_eq!(
            result,
            Err(SelectionError::DuplicateRegistration(
                "reco_fiducial_cut".to_string()
            ))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_distinct_names_never_fail() {
        let mut registry: Registry<u32> = Registry::new();
        for (i, name) in ["a", "b", "c", "d"].iter().enumerate() {
            assert!(registry.register(name, i as u32).is_ok());
        }
        assert_eq!(registry.names(), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_get_missing() {
        let registry: Registry<u32> = Registry::default();
        assert!(registry.is_empty());
        match registry.get("true_missing") {
            Err(SelectionError::NotRegistered(name)) => assert_eq!(name, "true_missing"),
            other => panic!("Expected NotRegistered, got {other:?}"),
        }
    }
}
