//! Selectors reducing an interaction's particle list to a single index.
//!
//! A selector lets a particle-level variable be broadcast upwards to the
//! interaction level: the selector picks one particle and the variable is
//! evaluated on it. An interaction without a qualifying particle selects
//! nothing, and any variable built on top of it yields
//! [`NO_MATCH_VALUE`](super::NO_MATCH_VALUE).

use crate::error::Result;
use crate::record::{species, Interaction};
use crate::registry::binder::{bind_with, ParameterSpec};
use crate::registry::types::{Args, Scorers, SelectorFactory};
use crate::registry::Catalog;

/// Index of the highest kinetic energy particle of `species`.
///
/// Only particles with positive kinetic energy qualify, so NaN, zero and
/// negative energies never win. Ties keep the first particle encountered.
pub fn leading_particle_index(
    interaction: &Interaction,
    species: u16,
    scorers: &Scorers,
) -> Option<usize> {
    let mut leading: Option<(usize, f64)> = None;
    for (index, particle) in interaction.particles.iter().enumerate() {
        if !scorers.is_species(particle, species) || particle.ke.is_nan() || particle.ke <= 0.0 {
            continue;
        }
        match leading {
            Some((_, ke)) if particle.ke <= ke => {}
            _ => leading = Some((index, particle.ke)),
        }
    }
    leading.map(|(index, _)| index)
}

fn leading_photon(interaction: &Interaction, args: &Args) -> Option<usize> {
    leading_particle_index(interaction, species::PHOTON, &args.scorers)
}

fn leading_electron(interaction: &Interaction, args: &Args) -> Option<usize> {
    leading_particle_index(interaction, species::ELECTRON, &args.scorers)
}

fn leading_muon(interaction: &Interaction, args: &Args) -> Option<usize> {
    leading_particle_index(interaction, species::MUON, &args.scorers)
}

fn leading_pion(interaction: &Interaction, args: &Args) -> Option<usize> {
    leading_particle_index(interaction, species::PION, &args.scorers)
}

fn leading_proton(interaction: &Interaction, args: &Args) -> Option<usize> {
    leading_particle_index(interaction, species::PROTON, &args.scorers)
}

fn selector(name: &str, f: fn(&Interaction, &Args) -> Option<usize>) -> SelectorFactory<Interaction> {
    bind_with(name, f, ParameterSpec::any())
}

/// Register the leading-particle selectors for both universes.
pub fn register_selectors(catalog: &mut Catalog) -> Result<()> {
    catalog
        .register_selector("leading_photon", selector("leading_photon", leading_photon))?
        .register_selector("leading_electron", selector("leading_electron", leading_electron))?
        .register_selector("leading_muon", selector("leading_muon", leading_muon))?
        .register_selector("leading_pion", selector("leading_pion", leading_pion))?
        .register_selector("leading_proton", selector("leading_proton", leading_proton))?;
    Ok(())
}
