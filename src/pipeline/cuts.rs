//! Cut resolution, negation and AND-composition.

use crate::config::{Category, CutConfig};
use crate::error::{Result, SelectionError};
use crate::record::{Event, Interaction, Particle, Spill, Universe};
use crate::registry::binder::{event_name, interaction_name, particle_name, spill_name};
use crate::registry::{Args, Catalog, CutFactory, CutFn, Registry};
use std::sync::Arc;

/// Logical AND of `cuts`. An empty list always passes.
pub fn all_of<T: 'static>(cuts: Vec<CutFn<T>>) -> CutFn<T> {
    Arc::new(move |entity: &T| cuts.iter().all(|cut| cut(entity)))
}

pub fn negate<T: 'static>(cut: CutFn<T>) -> CutFn<T> {
    Arc::new(move |entity: &T| !cut(entity))
}

/// Lift a spill cut to the event level.
///
/// Simulated events carry no spill information and always pass, negated or
/// not. Data events are judged on their trigger spill; data without one
/// fails.
pub fn lift_spill_cut(cut: CutFn<Spill>, negated: bool) -> CutFn<Event> {
    Arc::new(move |event: &Event| {
        if event.header.is_mc {
            return true;
        }
        match &event.trigger_spill {
            Some(spill) => cut(spill) != negated,
            None => false,
        }
    })
}

pub(crate) fn instantiate<T: 'static>(
    registry: &Registry<CutFactory<T>>,
    name: &str,
    args: &Args,
    negated: bool,
) -> Result<CutFn<T>> {
    let cut = registry.get(name)?(args)?;
    Ok(if negated { negate(cut) } else { cut })
}

/// Configured cuts grouped by category.
#[derive(Default)]
pub struct CutBuckets {
    true_cuts: Vec<CutFn<Interaction>>,
    reco_cuts: Vec<CutFn<Interaction>>,
    true_particle_cuts: Vec<CutFn<Particle>>,
    reco_particle_cuts: Vec<CutFn<Particle>>,
    event_cuts: Vec<CutFn<Event>>,
}

impl CutBuckets {
    /// Resolve every cut against `catalog`.
    ///
    /// # Errors
    /// A missing or unknown category, an unregistered name or a bad
    /// parameter count.
    pub fn build(catalog: &Catalog, cuts: &[CutConfig]) -> Result<Self> {
        let mut buckets = Self::default();
        for cut in cuts {
            let (name, negated) = cut.base_name();
            let category = cut.category()?;
            match category {
                Category::True | Category::Reco => {
                    let universe = interaction_universe(category);
                    let resolved = instantiate(
                        catalog.interaction_cuts(universe),
                        &interaction_name(universe, name),
                        &catalog.args(universe, &cut.parameters),
                        negated,
                    )?;
                    buckets.interaction_mut(universe).push(resolved);
                }
                Category::TrueParticle | Category::RecoParticle => {
                    let universe = particle_universe(category);
                    let resolved = instantiate(
                        catalog.particle_cuts(universe),
                        &particle_name(universe, name),
                        &catalog.args(universe, &cut.parameters),
                        negated,
                    )?;
                    buckets.particle_mut(universe).push(resolved);
                }
                Category::Event => {
                    let resolved = instantiate(
                        catalog.event_cuts(),
                        &event_name(name),
                        &Args::new(cut.parameters.clone()),
                        negated,
                    )?;
                    buckets.event_cuts.push(resolved);
                }
                Category::Spill => {
                    let spill_cut = instantiate(
                        catalog.spill_cuts(),
                        &spill_name(name),
                        &Args::new(cut.parameters.clone()),
                        false,
                    )?;
                    buckets.event_cuts.push(lift_spill_cut(spill_cut, negated));
                }
                Category::Mctruth | Category::Both | Category::BothParticle => {
                    return Err(SelectionError::UnknownCategory {
                        category: category.to_string(),
                        context: format!("cut {}", cut.name),
                    });
                }
            }
        }
        Ok(buckets)
    }

    fn interaction_mut(&mut self, universe: Universe) -> &mut Vec<CutFn<Interaction>> {
        match universe {
            Universe::Truth => &mut self.true_cuts,
            Universe::Reco => &mut self.reco_cuts,
        }
    }

    fn particle_mut(&mut self, universe: Universe) -> &mut Vec<CutFn<Particle>> {
        match universe {
            Universe::Truth => &mut self.true_particle_cuts,
            Universe::Reco => &mut self.reco_particle_cuts,
        }
    }

    fn interaction_bucket(&self, universe: Universe) -> &Vec<CutFn<Interaction>> {
        match universe {
            Universe::Truth => &self.true_cuts,
            Universe::Reco => &self.reco_cuts,
        }
    }

    /// Composed interaction cut of `universe`.
    pub fn interaction(&self, universe: Universe) -> CutFn<Interaction> {
        all_of(self.interaction_bucket(universe).clone())
    }

    /// Composed interaction cut of `universe`, `None` when nothing was
    /// configured for it.
    pub fn secondary(&self, universe: Universe) -> Option<CutFn<Interaction>> {
        let bucket = self.interaction_bucket(universe);
        (!bucket.is_empty()).then(|| all_of(bucket.clone()))
    }

    pub fn particle(&self, universe: Universe) -> CutFn<Particle> {
        let bucket = match universe {
            Universe::Truth => &self.true_particle_cuts,
            Universe::Reco => &self.reco_particle_cuts,
        };
        all_of(bucket.clone())
    }

    /// Event cuts, including lifted spill cuts.
    pub fn event(&self) -> CutFn<Event> {
        all_of(self.event_cuts.clone())
    }

    pub fn len(&self) -> usize {
        self.true_cuts.len()
            + self.reco_cuts.len()
            + self.true_particle_cuts.len()
            + self.reco_particle_cuts.len()
            + self.event_cuts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn interaction_universe(category: Category) -> Universe {
    if category == Category::True {
        Universe::Truth
    } else {
        Universe::Reco
    }
}

fn particle_universe(category: Category) -> Universe {
    if category == Category::TrueParticle {
        Universe::Truth
    } else {
        Universe::Reco
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fiducial() -> CutFn<Interaction> {
        Arc::new(|i: &Interaction| i.is_fiducial)
    }

    fn inside() -> Interaction {
        Interaction {
            is_fiducial: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_of_empty_is_true() {
        let cut: CutFn<Interaction> = all_of(Vec::new());
        assert!(cut(&Interaction::default()));
        assert!(cut(&inside()));
    }

    #[test]
    fn test_cut_and_its_negation_is_false() {
        let cut = all_of(vec![fiducial(), negate(fiducial())]);
        assert!(!cut(&Interaction::default()));
        assert!(!cut(&inside()));
    }

    #[test]
    fn test_double_negation_is_identity() {
        let twice = negate(negate(fiducial()));
        for i in [Interaction::default(), inside()] {
            assert_eq!(twice(&i), fiducial()(&i));
        }
    }

    #[test]
    fn test_lifted_spill_cut() {
        let strong: CutFn<Spill> = Arc::new(|s: &Spill| s.tor875 > 1.0);
        let lifted = lift_spill_cut(strong.clone(), false);
        let negated = lift_spill_cut(strong, true);

        let mut event = Event::default();
        event.header.is_mc = true;
        assert!(lifted(&event));
        assert!(negated(&event));

        event.header.is_mc = false;
        assert!(!lifted(&event));
        assert!(!negated(&event));

        event.trigger_spill = Some(Spill {
            tor875: 2.0,
            ..Default::default()
        });
        assert!(lifted(&event));
        assert!(!negated(&event));
    }

    #[test]
    fn test_buckets_by_category() {
        let catalog = Catalog::with_defaults().unwrap();
        let cuts = vec![
            CutConfig::new("fiducial_cut", "reco"),
            CutConfig::new("!cosmic", "true"),
            CutConfig::new("is_primary", "reco_particle"),
            CutConfig::new("is_mc", "event"),
            CutConfig::new("beam_quality_cut", "spill"),
        ];
        let buckets = CutBuckets::build(&catalog, &cuts).unwrap();
        assert_eq!(buckets.len(), 5);
        assert!(buckets.secondary(Universe::Truth).is_some());
        assert!(buckets.secondary(Universe::Reco).is_some());

        let truth_cut = buckets.interaction(Universe::Truth);
        let nu = Interaction {
            nu_id: 0,
            ..Default::default()
        };
        assert!(truth_cut(&nu));
        assert!(!truth_cut(&Interaction::default()));
    }

    #[test]
    fn test_empty_secondary_is_absent() {
        let catalog = Catalog::with_defaults().unwrap();
        let buckets =
            CutBuckets::build(&catalog, &[CutConfig::new("fiducial_cut", "reco")]).unwrap();
        assert!(buckets.secondary(Universe::Truth).is_none());
        assert!(buckets.particle(Universe::Reco)(&Particle::default()));
    }

    #[test]
    fn test_bucket_errors() {
        let catalog = Catalog::with_defaults().unwrap();

        let missing = CutConfig {
            name: "fiducial_cut".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            CutBuckets::build(&catalog, &[missing]),
            Err(SelectionError::MissingCategory(_))
        ));

        let unregistered = CutConfig::new("neutrino", "reco");
        assert!(matches!(
            CutBuckets::build(&catalog, &[unregistered]),
            Err(SelectionError::NotRegistered(name)) if name == "reco_neutrino"
        ));

        let mctruth = CutConfig::new("neutrino_energy", "mctruth");
        assert!(matches!(
            CutBuckets::build(&catalog, &[mctruth]),
            Err(SelectionError::UnknownCategory { .. })
        ));

        let bad_params = CutConfig::new("ke_cut", "true_particle").with_parameters(&[1.0, 2.0]);
        assert!(matches!(
            CutBuckets::build(&catalog, &[bad_params]),
            Err(SelectionError::ParameterCount { .. })
        ));
    }
}
