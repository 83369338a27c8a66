//! Measurement resolution: turns a branch into a named engine target.

use crate::config::{BranchConfig, Category};
use crate::engine::Target;
use crate::error::{Result, SelectionError};
use crate::record::{Event, Interaction, Universe};
use crate::registry::binder::{event_name, interaction_name, particle_name};
use crate::registry::{Args, Catalog, VarFn, NO_MATCH_VALUE};
use std::sync::Arc;

/// Resolved measurement of a `true` or `reco` mode pipeline.
pub struct Measurement {
    pub name: String,
    pub target: Target,
}

/// Resolve `branch` as a measurement of `category`.
pub fn resolve(catalog: &Catalog, branch: &BranchConfig, category: Category) -> Result<Measurement> {
    match (category, branch.selector.as_deref()) {
        (Category::True | Category::TrueParticle, Some(selector)) => {
            selected(catalog, branch, Universe::Truth, selector)
        }
        (Category::Reco | Category::RecoParticle, Some(selector)) => {
            selected(catalog, branch, Universe::Reco, selector)
        }
        (Category::True | Category::Reco, None) => {
            let universe = if category == Category::True {
                Universe::Truth
            } else {
                Universe::Reco
            };
            let name = interaction_name(universe, &branch.name);
            let var = catalog.interaction_vars(universe).get(&name)?(
                &catalog.args(universe, &branch.parameters),
            )?;
            Ok(Measurement {
                name,
                target: Target::Interaction { universe, var },
            })
        }
        (Category::Mctruth, _) => {
            let name = interaction_name(Universe::Truth, &branch.name);
            let var = catalog.mctruth_vars().get(&name)?(&Args::new(branch.parameters.clone()))?;
            Ok(Measurement {
                name,
                target: Target::Neutrino(var),
            })
        }
        (Category::TrueParticle | Category::RecoParticle, None) => {
            let universe = if category == Category::TrueParticle {
                Universe::Truth
            } else {
                Universe::Reco
            };
            let name = particle_name(universe, &branch.name);
            let var = catalog.particle_vars(universe).get(&name)?(
                &catalog.args(universe, &branch.parameters),
            )?;
            Ok(Measurement {
                name,
                target: Target::Particle { universe, var },
            })
        }
        _ => Err(unknown(category, branch)),
    }
}

/// Interaction variable evaluating a particle variable on the particle a
/// selector picks. Named `<prefix>_<selector>_<name>`.
fn selected(
    catalog: &Catalog,
    branch: &BranchConfig,
    universe: Universe,
    selector_name: &str,
) -> Result<Measurement> {
    let selector = catalog
        .selectors(universe)
        .get(&interaction_name(universe, selector_name))?(&catalog.args(universe, &[]))?;
    let particle_var = catalog
        .particle_vars(universe)
        .get(&particle_name(universe, &branch.name))?(
        &catalog.args(universe, &branch.parameters),
    )?;

    let var: VarFn<Interaction> = Arc::new(move |interaction: &Interaction| {
        selector(interaction)
            .and_then(|index| interaction.particles.get(index))
            .map_or(NO_MATCH_VALUE, |particle| particle_var(particle))
    });
    Ok(Measurement {
        name: format!("{}_{}_{}", universe.prefix(), selector_name, branch.name),
        target: Target::Interaction { universe, var },
    })
}

/// Event variable for `event` mode. Only the `event` category is legal.
pub fn resolve_event(
    catalog: &Catalog,
    branch: &BranchConfig,
    category: Category,
) -> Result<(String, VarFn<Event>)> {
    if category != Category::Event {
        return Err(unknown(category, branch));
    }
    let name = event_name(&branch.name);
    let var = catalog.event_vars().get(&name)?(&Args::new(branch.parameters.clone()))?;
    Ok((name, var))
}

fn unknown(category: Category, branch: &BranchConfig) -> SelectionError {
    SelectionError::UnknownCategory {
        category: category.to_string(),
        context: format!("variable {}", branch.name),
    }
}
