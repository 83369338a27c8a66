//! The catalog: every registry the pipeline builder resolves names against.

use crate::error::Result;
use crate::record::{Event, Interaction, Neutrino, Particle, Spill, Universe};
use crate::registry::binder::{event_name, interaction_name, particle_name, spill_name, Scope};
use crate::registry::named::Registry;
use crate::registry::types::{Args, CutFactory, Scorers, SelectorFactory, VarFactory};
use log::debug;

/// Explicit, passed-by-reference directory of every registry.
///
/// One registry exists per (value kind × entity category). A catalog is
/// filled once, before any configuration is read, and is only read while
/// pipelines are built and evaluated. Tests construct isolated catalogs with
/// [`Catalog::new`]; applications use [`Catalog::with_defaults`].
///
/// # Example
/// ```rust,ignore
/// let mut catalog = Catalog::with_defaults()?;
/// catalog.set_pid_scorer("lax_muon_pid")?;
/// let fiducial = catalog.interaction_cuts(Universe::Reco).get("reco_fiducial_cut")?;
/// ```
#[derive(Debug, Default)]
pub struct Catalog {
    true_cuts: Registry<CutFactory<Interaction>>,
    reco_cuts: Registry<CutFactory<Interaction>>,
    true_particle_cuts: Registry<CutFactory<Particle>>,
    reco_particle_cuts: Registry<CutFactory<Particle>>,
    event_cuts: Registry<CutFactory<Event>>,
    spill_cuts: Registry<CutFactory<Spill>>,

    true_vars: Registry<VarFactory<Interaction>>,
    reco_vars: Registry<VarFactory<Interaction>>,
    mctruth_vars: Registry<VarFactory<Neutrino>>,
    true_particle_vars: Registry<VarFactory<Particle>>,
    reco_particle_vars: Registry<VarFactory<Particle>>,
    event_vars: Registry<VarFactory<Event>>,

    true_selectors: Registry<SelectorFactory<Interaction>>,
    reco_selectors: Registry<SelectorFactory<Interaction>>,

    reco_scorers: Scorers,
}

impl Catalog {
    /// Empty catalog with field-reading scorers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog holding the built-in vocabulary.
    pub fn with_defaults() -> Result<Self> {
        let mut catalog = Self::new();
        super::defaults::register_defaults(&mut catalog)?;
        Ok(catalog)
    }

    pub fn register_interaction_cut(
        &mut self,
        scope: Scope,
        name: &str,
        factory: CutFactory<Interaction>,
    ) -> Result<&mut Self> {
        for &universe in scope.universes() {
            let full = interaction_name(universe, name);
            debug!("Registering interaction cut {full}");
            match universe {
                Universe::Truth => self.true_cuts.register(&full, factory.clone())?,
                Universe::Reco => self.reco_cuts.register(&full, factory.clone())?,
            }
        }
        Ok(self)
    }

    pub fn register_particle_cut(
        &mut self,
        scope: Scope,
        name: &str,
        factory: CutFactory<Particle>,
    ) -> Result<&mut Self> {
        for &universe in scope.universes() {
            let full = particle_name(universe, name);
            debug!("Registering particle cut {full}");
            match universe {
                Universe::Truth => self.true_particle_cuts.register(&full, factory.clone())?,
                Universe::Reco => self.reco_particle_cuts.register(&full, factory.clone())?,
            }
        }
        Ok(self)
    }

    pub fn register_event_cut(
        &mut self,
        name: &str,
        factory: CutFactory<Event>,
    ) -> Result<&mut Self> {
        let full = event_name(name);
        debug!("Registering event cut {full}");
        self.event_cuts.register(&full, factory)?;
        Ok(self)
    }

    pub fn register_spill_cut(
        &mut self,
        name: &str,
        factory: CutFactory<Spill>,
    ) -> Result<&mut Self> {
        let full = spill_name(name);
        debug!("Registering spill cut {full}");
        self.spill_cuts.register(&full, factory)?;
        Ok(self)
    }

    pub fn register_interaction_var(
        &mut self,
        scope: Scope,
        name: &str,
        factory: VarFactory<Interaction>,
    ) -> Result<&mut Self> {
        for &universe in scope.universes() {
            let full = interaction_name(universe, name);
            debug!("Registering interaction variable {full}");
            match universe {
                Universe::Truth => self.true_vars.register(&full, factory.clone())?,
                Universe::Reco => self.reco_vars.register(&full, factory.clone())?,
            }
        }
        Ok(self)
    }

    pub fn register_particle_var(
        &mut self,
        scope: Scope,
        name: &str,
        factory: VarFactory<Particle>,
    ) -> Result<&mut Self> {
        for &universe in scope.universes() {
            let full = particle_name(universe, name);
            debug!("Registering particle variable {full}");
            match universe {
                Universe::Truth => self.true_particle_vars.register(&full, factory.clone())?,
                Universe::Reco => self.reco_particle_vars.register(&full, factory.clone())?,
            }
        }
        Ok(self)
    }

    /// Neutrino variables live under the truth prefix: `true_<name>`.
    pub fn register_mctruth_var(
        &mut self,
        name: &str,
        factory: VarFactory<Neutrino>,
    ) -> Result<&mut Self> {
        let full = interaction_name(Universe::Truth, name);
        debug!("Registering mctruth variable {full}");
        self.mctruth_vars.register(&full, factory)?;
        Ok(self)
    }

    pub fn register_event_var(
        &mut self,
        name: &str,
        factory: VarFactory<Event>,
    ) -> Result<&mut Self> {
        let full = event_name(name);
        debug!("Registering event variable {full}");
        self.event_vars.register(&full, factory)?;
        Ok(self)
    }

    /// Selectors apply to both universes.
    pub fn register_selector(
        &mut self,
        name: &str,
        factory: SelectorFactory<Interaction>,
    ) -> Result<&mut Self> {
        for &universe in Scope::Both.universes() {
            let full = interaction_name(universe, name);
            debug!("Registering selector {full}");
            match universe {
                Universe::Truth => self.true_selectors.register(&full, factory.clone())?,
                Universe::Reco => self.reco_selectors.register(&full, factory.clone())?,
            }
        }
        Ok(self)
    }

    pub fn interaction_cuts(&self, universe: Universe) -> &Registry<CutFactory<Interaction>> {
        match universe {
            Universe::Truth => &self.true_cuts,
            Universe::Reco => &self.reco_cuts,
        }
    }

    pub fn particle_cuts(&self, universe: Universe) -> &Registry<CutFactory<Particle>> {
        match universe {
            Universe::Truth => &self.true_particle_cuts,
            Universe::Reco => &self.reco_particle_cuts,
        }
    }

    pub fn event_cuts(&self) -> &Registry<CutFactory<Event>> {
        &self.event_cuts
    }

    pub fn spill_cuts(&self) -> &Registry<CutFactory<Spill>> {
        &self.spill_cuts
    }

    pub fn interaction_vars(&self, universe: Universe) -> &Registry<VarFactory<Interaction>> {
        match universe {
            Universe::Truth => &self.true_vars,
            Universe::Reco => &self.reco_vars,
        }
    }

    pub fn particle_vars(&self, universe: Universe) -> &Registry<VarFactory<Particle>> {
        match universe {
            Universe::Truth => &self.true_particle_vars,
            Universe::Reco => &self.reco_particle_vars,
        }
    }

    pub fn mctruth_vars(&self) -> &Registry<VarFactory<Neutrino>> {
        &self.mctruth_vars
    }

    pub fn event_vars(&self) -> &Registry<VarFactory<Event>> {
        &self.event_vars
    }

    pub fn selectors(&self, universe: Universe) -> &Registry<SelectorFactory<Interaction>> {
        match universe {
            Universe::Truth => &self.true_selectors,
            Universe::Reco => &self.reco_selectors,
        }
    }

    /// Scorers in effect for `universe`. Truth always reads the stored fields.
    pub fn scorers(&self, universe: Universe) -> Scorers {
        match universe {
            Universe::Truth => Scorers::from_fields(),
            Universe::Reco => self.reco_scorers.clone(),
        }
    }

    /// Instantiation arguments for a function of `universe`.
    pub fn args(&self, universe: Universe, params: &[f64]) -> Args {
        Args::new(params.to_vec()).with_scorers(self.scorers(universe))
    }

    /// Use the reco particle variable `name` as the primary classifier.
    ///
    /// Only pipelines built after this call see the new scorer.
    pub fn set_primary_scorer(&mut self, name: &str) -> Result<()> {
        let scorer = self.reco_particle_vars.get(&particle_name(Universe::Reco, name))?(
            &self.args(Universe::Reco, &[]),
        )?;
        debug!("Primary scorer set to {name}");
        self.reco_scorers.set_primary(scorer);
        Ok(())
    }

    /// Use the reco particle variable `name` as the PID classifier.
    pub fn set_pid_scorer(&mut self, name: &str) -> Result<()> {
        let scorer = self.reco_particle_vars.get(&particle_name(Universe::Reco, name))?(
            &self.args(Universe::Reco, &[]),
        )?;
        debug!("PID scorer set to {name}");
        self.reco_scorers.set_pid(scorer);
        Ok(())
    }
}
