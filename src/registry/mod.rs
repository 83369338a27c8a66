//! Named factory registry for cuts, variables and selectors.
//!
//! Physics functions are plain Rust functions over one entity category
//! ([`Interaction`](crate::Interaction), [`Particle`](crate::Particle),
//! [`Event`](crate::Event), [`Spill`](crate::Spill) or
//! [`Neutrino`](crate::Neutrino)). The [binder] turns them into parameterized
//! factories and the [`Catalog`] stores each factory under its category-prefixed
//! name, one [`Registry`] per (value kind × category).
//!
//! ## Architecture
//!
//! - **types**: function and factory aliases, [`Args`] and [`Scorers`]
//! - **named**: the generic name-unique [`Registry`]
//! - **binder**: [`bind`], [`bind_with`] and naming helpers
//! - **catalog**: the explicit directory of every registry
//! - **selectors**: leading-particle selectors
//! - **defaults**: the built-in vocabulary
//!
//! ## Usage
//!
//! ```rust,ignore
//! use selection_engine::registry::{bind, Catalog, Scope};
//!
//! fn long_track(p: &Particle) -> bool { p.ke > 500.0 }
//!
//! let mut catalog = Catalog::with_defaults()?;
//! catalog.register_particle_cut(Scope::Both, "long_track", bind(long_track))?;
//! ```

pub mod binder;
pub mod catalog;
pub mod defaults;
pub mod named;
pub mod selectors;
pub mod types;

pub use binder::{bind, bind_with, ParameterSpec, Scope};
pub use catalog::Catalog;
pub use named::Registry;
pub use selectors::leading_particle_index;
pub use types::{
    Args, CutFactory, CutFn, EntityFn, Factory, Scorers, SelectorFactory, SelectorFn, VarFactory,
    VarFn, NO_MATCH_VALUE,
};
