//! Interaction-level cuts and variables.

use crate::error::Result;
use crate::record::{species, Interaction, Neutrino};
use crate::registry::binder::{bind, bind_with, ParameterSpec, Scope};
use crate::registry::types::{Args, CutFactory, Scorers};
use crate::registry::Catalog;

/// Kinetic energy thresholds (MeV) above which a primary counts.
const PHOTON_THRESHOLD: &[f64] = &[25.0];
const ELECTRON_THRESHOLD: &[f64] = &[25.0];
const MUON_THRESHOLD: &[f64] = &[143.425];
const PION_THRESHOLD: &[f64] = &[25.0];
const PROTON_THRESHOLD: &[f64] = &[50.0];

/// Primaries of `species` with kinetic energy of at least `threshold`.
fn count_primaries(interaction: &Interaction, species: u16, threshold: f64, scorers: &Scorers) -> usize {
    interaction
        .particles
        .iter()
        .filter(|p| scorers.is_species(p, species) && scorers.is_primary(p) && p.ke >= threshold)
        .count()
}

fn no_cut(_: &Interaction) -> bool {
    true
}

fn fiducial_cut(i: &Interaction) -> bool {
    i.is_fiducial
}

fn containment_cut(i: &Interaction) -> bool {
    i.is_contained
}

fn valid_flashmatch(i: &Interaction) -> bool {
    i.is_flash_matched && !i.flash_time.is_nan()
}

/// Valid flash match, optionally inside `[params[0], params[1]]`.
fn flash_cut(i: &Interaction, args: &Args) -> bool {
    if !valid_flashmatch(i) {
        return false;
    }
    match args.params.as_slice() {
        [low, high] => i.flash_time >= *low && i.flash_time <= *high,
        _ => true,
    }
}

fn single_muon(i: &Interaction, args: &Args) -> bool {
    count_primaries(i, species::MUON, args.params[0], &args.scorers) == 1
}

fn single_proton(i: &Interaction, args: &Args) -> bool {
    count_primaries(i, species::PROTON, args.params[0], &args.scorers) == 1
}

fn single_electron(i: &Interaction, args: &Args) -> bool {
    count_primaries(i, species::ELECTRON, args.params[0], &args.scorers) == 1
}

fn no_photons(i: &Interaction, args: &Args) -> bool {
    count_primaries(i, species::PHOTON, args.params[0], &args.scorers) == 0
}

fn no_charged_pions(i: &Interaction, args: &Args) -> bool {
    count_primaries(i, species::PION, args.params[0], &args.scorers) == 0
}

fn neutrino(i: &Interaction) -> bool {
    i.nu_id >= 0
}

fn cosmic(i: &Interaction) -> bool {
    !neutrino(i)
}

fn iscc(i: &Interaction) -> bool {
    i.current_type == 0
}

fn id(i: &Interaction) -> f64 {
    i.id as f64
}

fn vertex_x(i: &Interaction) -> f64 {
    i.vertex[0]
}

fn vertex_y(i: &Interaction) -> f64 {
    i.vertex[1]
}

fn vertex_z(i: &Interaction) -> f64 {
    i.vertex[2]
}

fn flash_time(i: &Interaction) -> f64 {
    i.flash_time
}

/// Summed kinetic energy of the primary particles.
fn visible_energy(i: &Interaction, args: &Args) -> f64 {
    i.particles
        .iter()
        .filter(|p| args.scorers.is_primary(p))
        .map(|p| p.ke)
        .sum()
}

fn primary_multiplicity(i: &Interaction, args: &Args) -> f64 {
    i.particles
        .iter()
        .filter(|p| args.scorers.is_primary(p))
        .count() as f64
}

fn neutrino_energy(n: &Neutrino) -> f64 {
    n.energy
}

fn pdg(n: &Neutrino) -> f64 {
    f64::from(n.pdg)
}

fn current_type(n: &Neutrino) -> f64 {
    f64::from(n.current_type)
}

fn interaction_mode(n: &Neutrino) -> f64 {
    f64::from(n.interaction_mode)
}

fn threshold(
    name: &str,
    f: fn(&Interaction, &Args) -> bool,
    defaults: &'static [f64],
) -> CutFactory<Interaction> {
    bind_with(name, f, ParameterSpec::exactly(1).with_defaults(defaults))
}

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
    catalog
        .register_interaction_cut(Scope::Both, "no_cut", bind(no_cut))?
        .register_interaction_cut(Scope::Both, "fiducial_cut", bind(fiducial_cut))?
        .register_interaction_cut(Scope::Both, "containment_cut", bind(containment_cut))?
        .register_interaction_cut(Scope::Both, "valid_flashmatch", bind(valid_flashmatch))?
        .register_interaction_cut(
            Scope::Both,
            "flash_cut",
            bind_with("flash_cut", flash_cut, ParameterSpec::one_of(&[0, 2])),
        )?
        .register_interaction_cut(
            Scope::Both,
            "single_muon",
            threshold("single_muon", single_muon, MUON_THRESHOLD),
        )?
        .register_interaction_cut(
            Scope::Both,
            "single_proton",
            threshold("single_proton", single_proton, PROTON_THRESHOLD),
        )?
        .register_interaction_cut(
            Scope::Both,
            "single_electron",
            threshold("single_electron", single_electron, ELECTRON_THRESHOLD),
        )?
        .register_interaction_cut(
            Scope::Both,
            "no_photons",
            threshold("no_photons", no_photons, PHOTON_THRESHOLD),
        )?
        .register_interaction_cut(
            Scope::Both,
            "no_charged_pions",
            threshold("no_charged_pions", no_charged_pions, PION_THRESHOLD),
        )?
        .register_interaction_cut(Scope::True, "neutrino", bind(neutrino))?
        .register_interaction_cut(Scope::True, "cosmic", bind(cosmic))?
        .register_interaction_cut(Scope::True, "iscc", bind(iscc))?;

    catalog
        .register_interaction_var(Scope::Both, "id", bind(id))?
        .register_interaction_var(Scope::Both, "vertex_x", bind(vertex_x))?
        .register_interaction_var(Scope::Both, "vertex_y", bind(vertex_y))?
        .register_interaction_var(Scope::Both, "vertex_z", bind(vertex_z))?
        .register_interaction_var(Scope::Both, "flash_time", bind(flash_time))?
        .register_interaction_var(
            Scope::Both,
            "visible_energy",
            bind_with("visible_energy", visible_energy, ParameterSpec::any()),
        )?
        .register_interaction_var(
            Scope::Both,
            "primary_multiplicity",
            bind_with("primary_multiplicity", primary_multiplicity, ParameterSpec::any()),
        )?;

    catalog
        .register_mctruth_var("neutrino_energy", bind(neutrino_energy))?
        .register_mctruth_var("pdg", bind(pdg))?
        .register_mctruth_var("current_type", bind(current_type))?
        .register_mctruth_var("interaction_mode", bind(interaction_mode))?;
    Ok(())
}
