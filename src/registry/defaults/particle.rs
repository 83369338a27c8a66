//! Particle-level cuts and variables, plus the reco scorer candidates.

use crate::error::Result;
use crate::record::{species, Particle};
use crate::registry::binder::{bind, bind_with, ParameterSpec, Scope};
use crate::registry::types::Args;
use crate::registry::Catalog;

fn is_primary(p: &Particle, args: &Args) -> bool {
    args.scorers.is_primary(p)
}

fn containment_cut(p: &Particle) -> bool {
    p.is_contained
}

fn is_pid(p: &Particle, args: &Args) -> bool {
    args.scorers.pid(p) == args.params[0]
}

fn ke_cut(p: &Particle, args: &Args) -> bool {
    p.ke >= args.params[0]
}

fn id(p: &Particle) -> f64 {
    p.id as f64
}

fn ke(p: &Particle) -> f64 {
    p.ke
}

fn pid(p: &Particle, args: &Args) -> f64 {
    args.scorers.pid(p)
}

fn primary_classification(p: &Particle, args: &Args) -> f64 {
    args.scorers.primary(p)
}

fn momentum(p: &Particle) -> f64 {
    p.momentum.iter().map(|c| c * c).sum::<f64>().sqrt()
}

/// Cosine of the angle to the beam (z) axis. NaN for a null momentum.
fn cos_theta(p: &Particle) -> f64 {
    let norm = momentum(p);
    if norm == 0.0 {
        return f64::NAN;
    }
    p.momentum[2] / norm
}

fn default_primary_classification(p: &Particle) -> f64 {
    if p.is_primary {
        1.0
    } else {
        0.0
    }
}

/// Primary when the primary softmax score clears a relaxed threshold.
fn lax_primary_classification(p: &Particle) -> f64 {
    if p.primary_scores[1] > 0.10 {
        1.0
    } else {
        0.0
    }
}

fn default_pid(p: &Particle) -> f64 {
    f64::from(p.pid)
}

/// Muon whenever the muon score exceeds 0.25, otherwise the highest score.
fn lax_muon_pid(p: &Particle) -> f64 {
    if p.pid_scores[usize::from(species::MUON)] > 0.25 {
        return f64::from(species::MUON);
    }
    let mut best = 0;
    for (index, score) in p.pid_scores.iter().enumerate() {
        if *score > p.pid_scores[best] {
            best = index;
        }
    }
    best as f64
}

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
    catalog
        .register_particle_cut(
            Scope::Both,
            "is_primary",
            bind_with("is_primary", is_primary, ParameterSpec::any()),
        )?
        .register_particle_cut(Scope::Both, "containment_cut", bind(containment_cut))?
        .register_particle_cut(
            Scope::Both,
            "is_pid",
            bind_with("is_pid", is_pid, ParameterSpec::exactly(1).with_defaults(&[0.0])),
        )?
        .register_particle_cut(
            Scope::Both,
            "ke_cut",
            bind_with("ke_cut", ke_cut, ParameterSpec::exactly(1)),
        )?;

    catalog
        .register_particle_var(Scope::Both, "id", bind(id))?
        .register_particle_var(Scope::Both, "ke", bind(ke))?
        .register_particle_var(Scope::Both, "pid", bind_with("pid", pid, ParameterSpec::any()))?
        .register_particle_var(
            Scope::Both,
            "primary_classification",
            bind_with("primary_classification", primary_classification, ParameterSpec::any()),
        )?
        .register_particle_var(Scope::Both, "momentum", bind(momentum))?
        .register_particle_var(Scope::Both, "cos_theta", bind(cos_theta))?
        .register_particle_var(
            Scope::Reco,
            "default_primary_classification",
            bind(default_primary_classification),
        )?
        .register_particle_var(
            Scope::Reco,
            "lax_primary_classification",
            bind(lax_primary_classification),
        )?
        .register_particle_var(Scope::Reco, "default_pid", bind(default_pid))?
        .register_particle_var(Scope::Reco, "lax_muon_pid", bind(lax_muon_pid))?;
    Ok(())
}
