//! Exposure accounting: livetime and POT after exposure-decrementing cuts.
//!
//! Some cuts reduce the recorded exposure rather than reject candidates,
//! e.g. a beam-quality cut removes spills from the POT count. These cuts are
//! flagged with `decrements_exposure` and are accounted here, independently
//! of whether the event is selected by the main analysis cuts.

use crate::config::{Category, CutConfig};
use crate::error::{Result, SelectionError};
use crate::pipeline::cuts::{all_of, instantiate};
use crate::pipeline::{EventVar, NamedVar};
use crate::record::Event;
use crate::registry::binder::{event_name, spill_name};
use crate::registry::{Args, Catalog, CutFn};
use log::debug;
use std::sync::Arc;

pub const LIVETIME: &str = "livetime";
pub const POT: &str = "pot";

/// Build the `livetime` and `pot` variables for `cuts`.
///
/// Only cuts flagged `decrements_exposure` take part, and they must be
/// `event` or `spill` cuts. Event cuts gate emission: an event failing them
/// contributes no value. Spill cuts are applied to every spill of a data
/// event when summing POT.
///
/// Simulated events report their exposure once per subrun, on the first
/// event; every other simulated event contributes zero.
pub fn construct_exposure_vars(catalog: &Catalog, cuts: &[CutConfig]) -> Result<Vec<NamedVar>> {
    let mut event_cuts = Vec::new();
    let mut spill_cuts = Vec::new();

    for cut in cuts.iter().filter(|c| c.decrements_exposure) {
        let (name, negated) = cut.base_name();
        let args = Args::new(cut.parameters.clone());
        match cut.category()? {
            Category::Event => event_cuts.push(instantiate(
                catalog.event_cuts(),
                &event_name(name),
                &args,
                negated,
            )?),
            Category::Spill => spill_cuts.push(instantiate(
                catalog.spill_cuts(),
                &spill_name(name),
                &args,
                negated,
            )?),
            other => {
                return Err(SelectionError::UnknownCategory {
                    category: other.to_string(),
                    context: format!("exposure cut {}", cut.name),
                })
            }
        }
    }
    debug!(
        "Exposure accounting with {} event and {} spill cuts",
        event_cuts.len(),
        spill_cuts.len()
    );

    let event_cut = all_of(event_cuts);
    let spill_cut = all_of(spill_cuts);

    let livetime = gated(event_cut.clone(), |event: &Event| {
        let header = &event.header;
        if header.is_mc {
            if header.first_in_subrun {
                header.n_generated as f64
            } else {
                0.0
            }
        } else {
            (event.spills.len() + header.n_offbeam_spills as usize) as f64
        }
    });

    let pot = gated(event_cut, move |event: &Event| {
        let header = &event.header;
        if header.is_mc {
            if header.first_in_subrun {
                header.pot
            } else {
                0.0
            }
        } else {
            event
                .spills
                .iter()
                .filter(|spill| spill_cut(*spill))
                .map(|spill| spill.tor875)
                .sum()
        }
    });

    Ok(vec![NamedVar::new(LIVETIME, livetime), NamedVar::new(POT, pot)])
}

/// One value per event passing `cut`.
fn gated<F>(cut: CutFn<Event>, f: F) -> EventVar
where
    F: Fn(&Event) -> f64 + Send + Sync + 'static,
{
    Arc::new(move |event: &Event| if cut(event) { vec![f(event)] } else { Vec::new() })
}
