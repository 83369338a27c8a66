//! Built-in vocabulary of cuts, variables and selectors.
//!
//! Everything here is registered from one start-up routine,
//! [`register_defaults`], so registration order never depends on module
//! initialization.

mod event;
mod interaction;
mod particle;

use crate::error::Result;
use crate::registry::selectors::register_selectors;
use crate::registry::Catalog;
use log::debug;

/// Register the built-in vocabulary into `catalog`.
///
/// # Errors
/// [`SelectionError::DuplicateRegistration`](crate::SelectionError::DuplicateRegistration)
/// if `catalog` already holds one of the built-in names.
pub fn register_defaults(catalog: &mut Catalog) -> Result<()> {
    interaction::register(catalog)?;
    particle::register(catalog)?;
    event::register(catalog)?;
    register_selectors(catalog)?;
    debug!("Registered built-in vocabulary");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SelectionError;
    use crate::record::Universe;

    #[test]
    fn test_defaults_register_once() {
        let catalog = Catalog::with_defaults().unwrap();
        for universe in [Universe::Truth, Universe::Reco] {
            let p = universe.prefix();
            assert!(catalog.interaction_cuts(universe).contains(&format!("{p}_no_cut")));
            assert!(catalog.interaction_vars(universe).contains(&format!("{p}_vertex_x")));
            assert!(catalog
                .particle_cuts(universe)
                .contains(&format!("{p}_particle_is_primary")));
            assert!(catalog.particle_vars(universe).contains(&format!("{p}_particle_ke")));
            assert!(catalog.selectors(universe).contains(&format!("{p}_leading_muon")));
        }
        assert!(catalog.interaction_cuts(Universe::Truth).contains("true_neutrino"));
        assert!(!catalog.interaction_cuts(Universe::Reco).contains("reco_neutrino"));
        assert!(catalog
            .particle_vars(Universe::Reco)
            .contains("reco_particle_lax_muon_pid"));
        assert!(!catalog
            .particle_vars(Universe::Truth)
            .contains("true_particle_lax_muon_pid"));
        assert!(catalog.mctruth_vars().contains("true_neutrino_energy"));
        assert!(catalog.event_cuts().contains("event_is_mc"));
        assert!(catalog.spill_cuts().contains("spill_beam_quality_cut"));
    }

    #[test]
    fn test_registering_defaults_twice_fails() {
        let mut catalog = Catalog::with_defaults().unwrap();
        assert!(matches!(
            register_defaults(&mut catalog),
            Err(SelectionError::DuplicateRegistration(_))
        ));
    }
}
