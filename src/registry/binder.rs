//! Adapts plain per-category functions into registry factories.
//!
//! Physics functions come in two shapes: `fn(&T) -> V`, which ignores any
//! configured parameters, and `fn(&T, &Args) -> V`, which reads them. Both are
//! wrapped into the uniform [`Factory`] shape the registries store. The
//! lookup name of a function is its category prefix joined to its declared
//! name, e.g. `reco_particle_ke` or `spill_beam_quality_cut`.

use crate::error::{Result, SelectionError};
use crate::record::Universe;
use crate::registry::types::{Args, EntityFn, Factory};
use std::sync::Arc;

pub const EVENT_PREFIX: &str = "event";
pub const SPILL_PREFIX: &str = "spill";

/// Applicability scope of a function across the truth/reco universes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    True,
    Reco,
    Both,
}

impl Scope {
    pub fn universes(self) -> &'static [Universe] {
        match self {
            Scope::True => &[Universe::Truth],
            Scope::Reco => &[Universe::Reco],
            Scope::Both => &[Universe::Truth, Universe::Reco],
        }
    }
}

/// `true_<name>` or `reco_<name>`.
pub fn interaction_name(universe: Universe, name: &str) -> String {
    format!("{}_{}", universe.prefix(), name)
}

/// `true_particle_<name>` or `reco_particle_<name>`.
pub fn particle_name(universe: Universe, name: &str) -> String {
    format!("{}_particle_{}", universe.prefix(), name)
}

pub fn event_name(name: &str) -> String {
    format!("{EVENT_PREFIX}_{name}")
}

pub fn spill_name(name: &str) -> String {
    format!("{SPILL_PREFIX}_{name}")
}

/// Accepted parameter counts for a parameterized function, with defaults
/// substituted when the configuration supplies none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    counts: Counts,
    defaults: &'static [f64],
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Counts {
    Any,
    Range(usize, usize),
    OneOf(&'static [usize]),
}

impl Counts {
    fn accepts(self, n: usize) -> bool {
        match self {
            Counts::Any => true,
            Counts::Range(min, max) => (min..=max).contains(&n),
            Counts::OneOf(counts) => counts.contains(&n),
        }
    }

    fn describe(self) -> String {
        match self {
            Counts::Any => "any number of".to_string(),
            Counts::Range(min, max) if min == max => min.to_string(),
            Counts::Range(min, max) => format!("{min} to {max}"),
            Counts::OneOf(counts) => counts
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" or "),
        }
    }
}

impl ParameterSpec {
    pub const fn any() -> Self {
        Self {
            counts: Counts::Any,
            defaults: &[],
        }
    }

    pub const fn exactly(n: usize) -> Self {
        Self::range(n, n)
    }

    pub const fn range(min: usize, max: usize) -> Self {
        Self {
            counts: Counts::Range(min, max),
            defaults: &[],
        }
    }

    /// One of the listed counts, e.g. `&[0, 2]` for an optional interval.
    pub const fn one_of(counts: &'static [usize]) -> Self {
        Self {
            counts: Counts::OneOf(counts),
            defaults: &[],
        }
    }

    pub const fn with_defaults(mut self, defaults: &'static [f64]) -> Self {
        self.defaults = defaults;
        self
    }

    /// Check `args` against this spec, filling in defaults.
    pub fn resolve(&self, name: &str, args: &Args) -> Result<Args> {
        let mut resolved = args.clone();
        if resolved.params.is_empty() && !self.defaults.is_empty() {
            resolved.params = self.defaults.to_vec();
        }

        if !self.counts.accepts(resolved.params.len()) {
            return Err(SelectionError::ParameterCount {
                name: name.to_string(),
                expected: self.counts.describe(),
                got: resolved.params.len(),
            });
        }
        Ok(resolved)
    }
}

/// Wrap a parameterless function. Configured parameters are ignored.
pub fn bind<T: 'static, V: 'static>(f: fn(&T) -> V) -> Factory<T, V> {
    Arc::new(move |_args: &Args| {
        let bound: EntityFn<T, V> = Arc::new(f);
        Ok(bound)
    })
}

/// Wrap a function reading its parameters (and scorers) from [`Args`].
///
/// `spec` is checked when the factory is instantiated, so a wrong parameter
/// count is reported at build time.
pub fn bind_with<T: 'static, V: 'static>(
    name: &str,
    f: fn(&T, &Args) -> V,
    spec: ParameterSpec,
) -> Factory<T, V> {
    let name = name.to_string();
    Arc::new(move |args: &Args| {
        let args = spec.resolve(&name, args)?;
        let bound: EntityFn<T, V> = Arc::new(move |entity: &T| f(entity, &args));
        Ok(bound)
    })
}
