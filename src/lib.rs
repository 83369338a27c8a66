//! # Selection Engine
//!
//! A configuration-driven engine for composing cuts and variables over
//! particle-interaction event records, with truth/reco matching.
//!
//! Each event carries two collections of interactions: the simulated truth
//! and the reconstructed candidates, cross-linked by match ids. An analysis
//! names cuts and variables from a [`Catalog`] in a YAML file; the pipeline
//! builder composes them into per-event transforms that emit zero, one or
//! many values per event.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use selection_engine::{construct, BranchConfig, Catalog, CutConfig};
//!
//! let catalog = Catalog::with_defaults()?;
//! let cuts = vec![
//!     CutConfig::new("fiducial_cut", "reco"),
//!     CutConfig::new("neutrino", "true"),
//! ];
//! let var = construct(
//!     &catalog,
//!     &cuts,
//!     &BranchConfig::new("neutrino_energy", "mctruth"),
//!     "reco",
//!     None,
//!     true,
//! )?;
//!
//! // One value per fiducial reco interaction matched to a neutrino.
//! let values = var.evaluate(&event);
//! # Ok::<(), selection_engine::SelectionError>(())
//! ```
//!
//! ### From a configuration file
//!
//! ```rust,ignore
//! use selection_engine::{Analysis, AnalysisConfig};
//!
//! let config = AnalysisConfig::from_file("analysis.yaml")?;
//! let analysis = Analysis::from_config(&config)?;
//! for sample in &analysis.samples {
//!     for tree in &sample.trees {
//!         let rows = tree.evaluate_batch(&events, &analysis.parallel);
//!     }
//! }
//! # Ok::<(), selection_engine::SelectionError>(())
//! ```
//!
//! ### Custom vocabulary
//!
//! ```rust,ignore
//! use selection_engine::{bind, Catalog, Interaction, Scope};
//!
//! fn n_particles(interaction: &Interaction) -> f64 {
//!     interaction.particles.len() as f64
//! }
//!
//! let mut catalog = Catalog::with_defaults()?;
//! catalog.register_interaction_var(Scope::Both, "n_particles", bind(n_particles))?;
//! # Ok::<(), selection_engine::SelectionError>(())
//! ```

pub mod analysis;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod registry;

pub use analysis::{Analysis, Row, SampleSelection, Tree, TreeRow};
pub use config::{
    AnalysisConfig, BranchConfig, Category, CutConfig, GeneralConfig, Mode, ParallelConfig,
    SampleConfig, ScorerConfig, TreeConfig,
};
pub use engine::{EventPlan, MatchingPlan, ParticleLookup, Target};
pub use error::{Result, SelectionError};
pub use pipeline::{
    all_of, build_tree, construct, construct_exposure_vars, lift_spill_cut, negate, CutBuckets,
    EventVar, NamedVar,
};
pub use record::{species, Event, Header, Interaction, Neutrino, Particle, Spill, Universe};
pub use registry::{
    bind, bind_with, leading_particle_index, Args, Catalog, CutFactory, CutFn, ParameterSpec,
    Scope, Scorers, SelectorFactory, SelectorFn, VarFactory, VarFn, NO_MATCH_VALUE,
};
