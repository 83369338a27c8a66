//! Core type definitions for the named factory registry.

use crate::error::Result;
use crate::record::Particle;
use std::fmt;
use std::sync::Arc;

/// Value emitted whenever a requested cross-category quantity cannot be
/// resolved (no match, no parent neutrino, no selected particle).
pub const NO_MATCH_VALUE: f64 = f64::NAN;

/// A function applied to one entity of type `T`.
pub type EntityFn<T, V> = Arc<dyn Fn(&T) -> V + Send + Sync>;

/// Predicate over an entity.
///
/// # Example
/// ```rust,ignore
/// let fiducial: CutFn<Interaction> = Arc::new(|i| i.is_fiducial);
/// ```
pub type CutFn<T> = EntityFn<T, bool>;

/// Numeric extractor over an entity.
pub type VarFn<T> = EntityFn<T, f64>;

/// Reduces an interaction to the index of one of its particles.
///
/// `None` is the "no index" sentinel and is never a valid index.
pub type SelectorFn<T> = EntityFn<T, Option<usize>>;

/// Parameterized factory stored in a registry.
///
/// Instantiation happens once, at build time. Parameter-shape problems are
/// reported here so that they surface before any event is processed.
pub type Factory<T, V> = Arc<dyn Fn(&Args) -> Result<EntityFn<T, V>> + Send + Sync>;

pub type CutFactory<T> = Factory<T, bool>;
pub type VarFactory<T> = Factory<T, f64>;
pub type SelectorFactory<T> = Factory<T, Option<usize>>;

/// Functions deciding what "primary" and "PID" mean for a particle.
///
/// Truth particles always use the stored fields. Reco particles use whatever
/// the [`Catalog`](super::Catalog) has been configured with.
#[derive(Clone)]
pub struct Scorers {
    primary: VarFn<Particle>,
    pid: VarFn<Particle>,
}

impl Scorers {
    pub fn new(primary: VarFn<Particle>, pid: VarFn<Particle>) -> Self {
        Self { primary, pid }
    }

    /// Scorers reading `is_primary` and `pid` straight from the record.
    pub fn from_fields() -> Self {
        Self {
            primary: Arc::new(|p: &Particle| if p.is_primary { 1.0 } else { 0.0 }),
            pid: Arc::new(|p: &Particle| f64::from(p.pid)),
        }
    }

    pub fn primary(&self, particle: &Particle) -> f64 {
        (self.primary)(particle)
    }

    pub fn is_primary(&self, particle: &Particle) -> bool {
        self.primary(particle) == 1.0
    }

    /// PID code of `particle`, NaN when the scorer cannot decide.
    pub fn pid(&self, particle: &Particle) -> f64 {
        (self.pid)(particle)
    }

    pub fn is_species(&self, particle: &Particle, species: u16) -> bool {
        self.pid(particle) == f64::from(species)
    }

    pub(crate) fn set_primary(&mut self, primary: VarFn<Particle>) {
        self.primary = primary;
    }

    pub(crate) fn set_pid(&mut self, pid: VarFn<Particle>) {
        self.pid = pid;
    }
}

impl Default for Scorers {
    fn default() -> Self {
        Self::from_fields()
    }
}

impl fmt::Debug for Scorers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scorers").finish_non_exhaustive()
    }
}

/// Arguments handed to a factory when it is instantiated.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Ordered parameter list from the configuration.
    pub params: Vec<f64>,
    /// Scorers for the category being instantiated.
    pub scorers: Scorers,
}

impl Args {
    pub fn new(params: Vec<f64>) -> Self {
        Self {
            params,
            scorers: Scorers::default(),
        }
    }

    pub fn with_scorers(mut self, scorers: Scorers) -> Self {
        self.scorers = scorers;
        self
    }
}
