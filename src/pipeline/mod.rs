//! Configuration-driven pipeline builder.
//!
//! [`construct`] turns a list of configured cuts and one configured branch
//! into a named per-event transform:
//!
//! 1. each cut is resolved by category, negated if its name starts with `!`,
//!    and bucketed ([`CutBuckets`]);
//! 2. spill cuts are lifted to event cuts;
//! 3. each bucket is AND-composed;
//! 4. the branch is resolved into an engine target, going through a selector
//!    when one is named;
//! 5. everything is handed to a [`MatchingPlan`] (or an [`EventPlan`] in
//!    `event` mode).
//!
//! All configuration errors surface here, before any event is processed.
//!
//! # Example
//! ```rust,ignore
//! let catalog = Catalog::with_defaults()?;
//! let cuts = vec![
//!     CutConfig::new("fiducial_cut", "reco"),
//!     CutConfig::new("neutrino", "true"),
//! ];
//! let branch = BranchConfig::new("visible_energy", "reco");
//! let var = construct(&catalog, &cuts, &branch, "reco", None, true)?;
//! let values = var.evaluate(&event);
//! ```

pub mod cuts;
pub mod exposure;
pub mod measurement;
pub mod tree;

pub use cuts::{all_of, lift_spill_cut, negate, CutBuckets};
pub use exposure::construct_exposure_vars;
pub use tree::build_tree;

use crate::config::{BranchConfig, Category, CutConfig, Mode};
use crate::engine::{EventPlan, MatchingPlan};
use crate::error::Result;
use crate::record::Event;
use crate::registry::Catalog;
use log::debug;
use std::fmt;
use std::sync::Arc;

/// Per-event transform producing zero, one or many values.
pub type EventVar = Arc<dyn Fn(&Event) -> Vec<f64> + Send + Sync>;

/// An output column: its name and the transform filling it.
#[derive(Clone)]
pub struct NamedVar {
    pub name: String,
    pub var: EventVar,
}

impl NamedVar {
    pub fn new(name: &str, var: EventVar) -> Self {
        Self {
            name: name.to_string(),
            var,
        }
    }

    pub fn evaluate(&self, event: &Event) -> Vec<f64> {
        (self.var)(event)
    }
}

impl fmt::Debug for NamedVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NamedVar")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Build the transform for `branch` under `cuts`.
///
/// `category` overrides the branch's own category; it is how `both`
/// branches are expanded. `is_mc` selects the data/simulation matching
/// policy.
///
/// # Errors
/// An illegal mode, a missing or unknown category, an unregistered name or a
/// bad parameter count.
pub fn construct(
    catalog: &Catalog,
    cuts: &[CutConfig],
    branch: &BranchConfig,
    mode: &str,
    category: Option<Category>,
    is_mc: bool,
) -> Result<NamedVar> {
    let mode = Mode::parse(mode, &branch.name)?;
    let buckets = CutBuckets::build(catalog, cuts)?;
    let category = match category {
        Some(category) => category,
        None => branch.category()?,
    };

    let named = match mode.universe() {
        Some(primary) => {
            let measurement = measurement::resolve(catalog, branch, category)?;
            let plan = MatchingPlan {
                primary,
                primary_cut: buckets.interaction(primary),
                secondary_cut: buckets.secondary(primary.opposite()),
                particle_cut: buckets.particle(primary),
                target: measurement.target,
                event_cut: buckets.event(),
                is_mc,
            };
            NamedVar {
                name: measurement.name,
                var: Arc::new(move |event: &Event| plan.evaluate(event)),
            }
        }
        None => {
            let (name, var) = measurement::resolve_event(catalog, branch, category)?;
            let plan = EventPlan {
                event_cut: buckets.event(),
                var,
            };
            NamedVar {
                name,
                var: Arc::new(move |event: &Event| plan.evaluate(event)),
            }
        }
    };

    debug!(
        "Constructed {} ({:?} mode, {} cuts, simulation: {})",
        named.name,
        mode,
        buckets.len(),
        is_mc
    );
    Ok(named)
}
