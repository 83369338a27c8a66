//! Event-level and spill-level cuts and variables.

use crate::error::Result;
use crate::record::{Event, Spill};
use crate::registry::binder::{bind, bind_with, ParameterSpec};
use crate::registry::types::Args;
use crate::registry::Catalog;

fn no_cut(_: &Event) -> bool {
    true
}

/// Trigger time inside `[params[0], params[1]]`; passes without parameters.
fn global_trigger_time_cut(event: &Event, args: &Args) -> bool {
    match args.params.as_slice() {
        [low, high] => {
            let t = event.header.global_trigger_time;
            t >= *low && t <= *high
        }
        _ => true,
    }
}

fn is_mc(event: &Event) -> bool {
    event.header.is_mc
}

fn run(event: &Event) -> f64 {
    f64::from(event.header.run)
}

fn subrun(event: &Event) -> f64 {
    f64::from(event.header.subrun)
}

fn event_number(event: &Event) -> f64 {
    f64::from(event.header.event)
}

fn global_trigger_time(event: &Event) -> f64 {
    event.header.global_trigger_time
}

fn spill_no_cut(_: &Spill) -> bool {
    true
}

/// Beam intensity, horn current and beam monitors inside nominal ranges.
fn beam_quality_cut(spill: &Spill) -> bool {
    let fields = [
        spill.tor860,
        spill.tor875,
        spill.lm875a,
        spill.lm875b,
        spill.lm875c,
        spill.horn_current,
    ];
    if fields.iter().any(|f| f.is_nan()) {
        return false;
    }
    spill.tor860 > 100e9
        && spill.tor875 > 100e9
        && spill.lm875a > 1e-2
        && spill.lm875b > 1e-2
        && spill.lm875c > 1e-2
        && spill.horn_current > 173.0
        && spill.horn_current < 175.0
}

pub(super) fn register(catalog: &mut Catalog) -> Result<()> {
    catalog
        .register_event_cut("no_cut", bind(no_cut))?
        .register_event_cut(
            "global_trigger_time_cut",
            bind_with(
                "global_trigger_time_cut",
                global_trigger_time_cut,
                ParameterSpec::one_of(&[0, 2]),
            ),
        )?
        .register_event_cut("is_mc", bind(is_mc))?
        .register_event_var("run", bind(run))?
        .register_event_var("subrun", bind(subrun))?
        .register_event_var("event", bind(event_number))?
        .register_event_var("global_trigger_time", bind(global_trigger_time))?
        .register_spill_cut("no_cut", bind(spill_no_cut))?
        .register_spill_cut("beam_quality_cut", bind(beam_quality_cut))?;
    Ok(())
}
