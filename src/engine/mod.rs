//! Truth/reco matching and iteration engine.
//!
//! A [`MatchingPlan`] is the per-event transform a pipeline resolves to in
//! `true` and `reco` modes. It walks the primary interaction collection,
//! filters with the primary cut, resolves each interaction's match in the
//! opposite collection, applies the secondary cut and emits one value per
//! accepted interaction, or one value per passing particle for particle-level
//! targets.
//!
//! ## Acceptance
//!
//! | secondary cut | matched | simulation | data, reco primary |
//! |---------------|---------|------------|--------------------|
//! | none          | any     | accept     | accept             |
//! | present       | yes     | cut(match) | accept             |
//! | present       | no      | reject     | accept             |
//!
//! Truth never gates data: real data carries no truth, so a reco-primary
//! plan over data accepts regardless of matching and reports
//! [`NO_MATCH_VALUE`] for every truth-side quantity.
//!
//! Evaluation is a pure function of the event; plans are `Send + Sync` and
//! may be shared across threads.

mod lookup;

pub use lookup::ParticleLookup;

use crate::record::{Event, Interaction, Neutrino, Particle, Universe};
use crate::registry::{CutFn, VarFn, NO_MATCH_VALUE};

/// What a plan measures.
#[derive(Clone)]
pub enum Target {
    /// Interaction variable in `universe`.
    Interaction {
        universe: Universe,
        var: VarFn<Interaction>,
    },
    /// Parent-neutrino variable, reached through a truth interaction.
    Neutrino(VarFn<Neutrino>),
    /// Particle variable in `universe`; one value per passing particle.
    Particle {
        universe: Universe,
        var: VarFn<Particle>,
    },
}

impl Target {
    pub fn universe(&self) -> Universe {
        match self {
            Target::Interaction { universe, .. } | Target::Particle { universe, .. } => *universe,
            Target::Neutrino(_) => Universe::Truth,
        }
    }
}

/// Per-event transform for `true` and `reco` modes.
#[derive(Clone)]
pub struct MatchingPlan {
    pub primary: Universe,
    pub primary_cut: CutFn<Interaction>,
    /// Cut on the matched interaction; `None` when no opposite-universe cut
    /// was configured.
    pub secondary_cut: Option<CutFn<Interaction>>,
    /// Cut on the primary interaction's particles.
    pub particle_cut: CutFn<Particle>,
    pub target: Target,
    pub event_cut: CutFn<Event>,
    pub is_mc: bool,
}

impl MatchingPlan {
    /// Whether truth is unavailable to this plan.
    fn ungated(&self) -> bool {
        self.primary == Universe::Reco && !self.is_mc
    }

    /// Values emitted for `event`, in primary collection order and then
    /// particle order.
    pub fn evaluate(&self, event: &Event) -> Vec<f64> {
        let mut values = Vec::new();
        if !(self.event_cut)(event) {
            return values;
        }

        let lookup = match &self.target {
            Target::Particle { universe, .. } if *universe != self.primary => {
                Some(ParticleLookup::build(event.interactions(*universe)))
            }
            _ => None,
        };

        let ungated = self.ungated();
        for interaction in event.interactions(self.primary) {
            if !(self.primary_cut)(interaction) {
                continue;
            }

            let matched = if ungated {
                None
            } else {
                event.matched(interaction, self.primary)
            };

            let accepted = ungated
                || match (&self.secondary_cut, matched) {
                    (None, _) => true,
                    (Some(cut), Some(other)) => cut(other),
                    (Some(_), None) => false,
                };
            if !accepted {
                continue;
            }

            self.emit(event, interaction, matched, lookup.as_ref(), &mut values);
        }
        values
    }

    fn emit(
        &self,
        event: &Event,
        interaction: &Interaction,
        matched: Option<&Interaction>,
        lookup: Option<&ParticleLookup<'_>>,
        values: &mut Vec<f64>,
    ) {
        match &self.target {
            Target::Interaction { universe, var } => {
                let value = if *universe == self.primary {
                    var(interaction)
                } else {
                    matched.map_or(NO_MATCH_VALUE, |other| var(other))
                };
                values.push(value);
            }
            Target::Neutrino(var) => {
                let truth = match self.primary {
                    Universe::Truth => Some(interaction),
                    Universe::Reco => matched,
                };
                let value = truth
                    .and_then(|t| t.neutrino_index())
                    .and_then(|idx| event.neutrinos.get(idx))
                    .map_or(NO_MATCH_VALUE, |nu| var(nu));
                values.push(value);
            }
            Target::Particle { var, .. } => {
                let passing = interaction
                    .particles
                    .iter()
                    .filter(|p| (self.particle_cut)(*p));
                match lookup {
                    None => values.extend(passing.map(|p| var(p))),
                    Some(lookup) => values.extend(
                        passing.map(|p| lookup.resolve(p).map_or(NO_MATCH_VALUE, |other| var(other))),
                    ),
                }
            }
        }
    }
}

/// Per-event transform for `event` mode: one value per passing event.
#[derive(Clone)]
pub struct EventPlan {
    pub event_cut: CutFn<Event>,
    pub var: VarFn<Event>,
}

impl EventPlan {
    pub fn evaluate(&self, event: &Event) -> Vec<f64> {
        if (self.event_cut)(event) {
            vec![(self.var)(event)]
        } else {
            Vec::new()
        }
    }
}
