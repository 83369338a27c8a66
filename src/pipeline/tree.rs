//! Branch expansion for one configured tree.

use crate::config::TreeConfig;
use crate::error::Result;
use crate::pipeline::{construct, NamedVar};
use crate::registry::Catalog;
use log::debug;
use std::collections::BTreeMap;

/// Build every branch of `tree`, sorted by output name.
///
/// `both` branches expand into a truth and a reco branch, `both_particle`
/// into a truth-particle and a reco-particle branch. When two branches
/// resolve to the same output name the first definition is kept.
pub fn build_tree(catalog: &Catalog, tree: &TreeConfig, is_mc: bool) -> Result<Vec<NamedVar>> {
    let mut branches: BTreeMap<String, NamedVar> = BTreeMap::new();
    for branch in &tree.branches {
        for category in branch.category()?.expand() {
            let named = construct(
                catalog,
                &tree.cuts,
                branch,
                &tree.mode,
                Some(category),
                is_mc,
            )?;
            if branches.contains_key(&named.name) {
                debug!("Tree {}: keeping first definition of {}", tree.name, named.name);
                continue;
            }
            branches.insert(named.name.clone(), named);
        }
    }
    Ok(branches.into_values().collect())
}
