//! Id-indexed particle lookup across a whole universe.

use crate::record::{Interaction, Particle};
use std::collections::HashMap;

/// Maps particle ids to particles over every interaction of one universe.
///
/// Built once per event. Particle matches are ids, not indices, and may
/// point into any interaction of the opposite universe, so a per-interaction
/// table would miss them. When two particles share an id the first one wins.
#[derive(Debug, Default)]
pub struct ParticleLookup<'a> {
    by_id: HashMap<i64, &'a Particle>,
}

impl<'a> ParticleLookup<'a> {
    pub fn build(interactions: &'a [Interaction]) -> Self {
        let mut by_id = HashMap::new();
        for particle in interactions.iter().flat_map(|i| i.particles.iter()) {
            by_id.entry(particle.id).or_insert(particle);
        }
        Self { by_id }
    }

    pub fn get(&self, id: i64) -> Option<&'a Particle> {
        self.by_id.get(&id).copied()
    }

    /// Counterpart of `particle` in the indexed universe.
    pub fn resolve(&self, particle: &Particle) -> Option<&'a Particle> {
        particle.match_id().and_then(|id| self.get(id))
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}
