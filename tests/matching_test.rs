//! Integration tests for truth/reco matching.
//!
//! These tests build pipelines through the public API and check the
//! matching policy on small hand-written events.

use selection_engine::{
    construct, species, BranchConfig, Catalog, CutConfig, Event, Interaction, Neutrino, NamedVar,
    Particle, Result,
};

fn particle(id: i64, pid: u16, ke: f64, match_ids: Vec<i64>) -> Particle {
    Particle {
        id,
        pid,
        ke,
        is_primary: true,
        match_ids,
        ..Default::default()
    }
}

/// One neutrino, one truth interaction T0 and two reco interactions:
/// A (mutually matched with T0) and B (unmatched).
fn two_candidate_event(is_mc: bool) -> Event {
    let mut event = Event {
        neutrinos: vec![Neutrino {
            id: 0,
            energy: 1.25,
            pdg: 14,
            current_type: 0,
            ..Default::default()
        }],
        truth: vec![Interaction {
            id: 0,
            nu_id: 0,
            is_fiducial: true,
            match_ids: vec![0],
            particles: vec![
                particle(10, species::MUON, 400.0, vec![100]),
                particle(11, species::PROTON, 80.0, vec![]),
            ],
            ..Default::default()
        }],
        reco: vec![
            Interaction {
                id: 0,
                is_fiducial: true,
                match_ids: vec![0],
                particles: vec![
                    particle(100, species::MUON, 390.0, vec![10]),
                    particle(101, species::PROTON, 60.0, vec![]),
                    particle(102, species::PHOTON, 30.0, vec![-1]),
                ],
                ..Default::default()
            },
            Interaction {
                id: 1,
                is_fiducial: true,
                ..Default::default()
            },
        ],
        ..Default::default()
    };
    event.header.is_mc = is_mc;
    event
}

fn build(cuts: &[CutConfig], branch: BranchConfig, mode: &str, is_mc: bool) -> Result<NamedVar> {
    let catalog = Catalog::with_defaults()?;
    construct(&catalog, cuts, &branch, mode, None, is_mc)
}

#[test]
fn test_unmatched_candidates_kept_without_truth_cut() {
    let var = build(
        &[CutConfig::new("fiducial_cut", "reco")],
        BranchConfig::new("id", "reco"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(var.evaluate(&two_candidate_event(true)), vec![0.0, 1.0]);
}

#[test]
fn test_truth_cut_requires_match_in_simulation() {
    let cuts = vec![
        CutConfig::new("fiducial_cut", "reco"),
        CutConfig::new("neutrino", "true"),
    ];
    let var = build(&cuts, BranchConfig::new("id", "reco"), "reco", true).unwrap();
    assert_eq!(var.evaluate(&two_candidate_event(true)), vec![0.0]);
}

#[test]
fn test_truth_cut_never_gates_data() {
    let cuts = vec![
        CutConfig::new("fiducial_cut", "reco"),
        CutConfig::new("neutrino", "true"),
    ];
    let var = build(&cuts, BranchConfig::new("id", "reco"), "reco", false).unwrap();
    assert_eq!(var.evaluate(&two_candidate_event(false)), vec![0.0, 1.0]);
}

#[test]
fn test_data_reports_no_match_for_truth_quantities() {
    let var = build(&[], BranchConfig::new("id", "true"), "reco", false).unwrap();
    let values = var.evaluate(&two_candidate_event(false));
    assert_eq!(values.len(), 2);
    assert!(values.iter().all(|v| v.is_nan()));
}

#[test]
fn test_sentinel_for_unmatched_candidate() {
    let var = build(&[], BranchConfig::new("id", "true"), "reco", true).unwrap();
    let values = var.evaluate(&two_candidate_event(true));
    assert_eq!(values.len(), 2);
    assert_eq!(values[0], 0.0);
    assert!(values[1].is_nan());
}

#[test]
fn test_truth_mode_symmetry() {
    let mut event = two_candidate_event(true);
    event.truth.push(Interaction {
        id: 1,
        nu_id: -1,
        is_fiducial: true,
        ..Default::default()
    });

    let var = build(&[], BranchConfig::new("id", "true"), "true", true).unwrap();
    assert_eq!(var.evaluate(&event), vec![0.0, 1.0]);

    let gated = build(
        &[CutConfig::new("fiducial_cut", "reco")],
        BranchConfig::new("id", "true"),
        "true",
        true,
    )
    .unwrap();
    assert_eq!(gated.evaluate(&event), vec![0.0]);

    event.reco[0].is_fiducial = false;
    assert!(gated.evaluate(&event).is_empty());
}

/// Two reciprocal pairs T0<->R0 and T1<->R1.
fn reciprocal_event(neutrinos: [bool; 2], fiducial: [bool; 2]) -> Event {
    let mut event = Event::default();
    event.header.is_mc = true;
    for i in 0..2 {
        event.truth.push(Interaction {
            id: 10 + i as i64,
            nu_id: if neutrinos[i] { 0 } else { -1 },
            match_ids: vec![i as i64],
            ..Default::default()
        });
        event.reco.push(Interaction {
            id: 20 + i as i64,
            is_fiducial: fiducial[i],
            match_ids: vec![i as i64],
            ..Default::default()
        });
    }
    event
}

/// Accepted (truth id, reco id) pairs when iterating in `mode`.
fn accepted_pairs(cuts: &[CutConfig], mode: &str, event: &Event) -> Vec<(f64, f64)> {
    let truth = build(cuts, BranchConfig::new("id", "true"), mode, true).unwrap();
    let reco = build(cuts, BranchConfig::new("id", "reco"), mode, true).unwrap();
    truth
        .evaluate(event)
        .into_iter()
        .zip(reco.evaluate(event))
        .collect()
}

#[test]
fn test_both_iteration_directions_accept_the_same_pairs() {
    let truth_cut = [CutConfig::new("neutrino", "true")];
    let reco_cut = [CutConfig::new("fiducial_cut", "reco")];
    let both = [
        CutConfig::new("neutrino", "true"),
        CutConfig::new("fiducial_cut", "reco"),
    ];

    for (neutrinos, fiducial, expected) in [
        ([true, false], [true, false], vec![(10.0, 20.0)]),
        ([false, true], [false, true], vec![(11.0, 21.0)]),
        ([true, true], [true, true], vec![(10.0, 20.0), (11.0, 21.0)]),
        ([false, false], [false, false], vec![]),
    ] {
        let event = reciprocal_event(neutrinos, fiducial);

        // A truth cut gating reco iteration selects the same pairs as the
        // matching reco cut gating truth iteration.
        assert_eq!(accepted_pairs(&truth_cut, "reco", &event), expected);
        assert_eq!(accepted_pairs(&reco_cut, "true", &event), expected);

        assert_eq!(accepted_pairs(&both, "reco", &event), expected);
        assert_eq!(accepted_pairs(&both, "true", &event), expected);
    }

    // A pair failing the cut on either side is rejected in both directions.
    let event = reciprocal_event([true, true], [true, false]);
    assert_eq!(accepted_pairs(&both, "reco", &event), vec![(10.0, 20.0)]);
    assert_eq!(accepted_pairs(&both, "true", &event), vec![(10.0, 20.0)]);
}

#[test]
fn test_neutrino_through_match() {
    let var = build(&[], BranchConfig::new("neutrino_energy", "mctruth"), "reco", true).unwrap();
    assert_eq!(var.name, "true_neutrino_energy");
    let values = var.evaluate(&two_candidate_event(true));
    assert_eq!(values[0], 1.25);
    assert!(values[1].is_nan());

    let truth_mode =
        build(&[], BranchConfig::new("pdg", "mctruth"), "true", true).unwrap();
    assert_eq!(truth_mode.evaluate(&two_candidate_event(true)), vec![14.0]);
}

#[test]
fn test_particle_fan_out() {
    let var = build(
        &[CutConfig::new("fiducial_cut", "reco")],
        BranchConfig::new("ke", "reco_particle"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(var.name, "reco_particle_ke");
    assert_eq!(
        var.evaluate(&two_candidate_event(true)),
        vec![390.0, 60.0, 30.0]
    );

    let above_50 = build(
        &[CutConfig::new("ke_cut", "reco_particle").with_parameters(&[50.0])],
        BranchConfig::new("ke", "reco_particle"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(above_50.evaluate(&two_candidate_event(true)), vec![390.0, 60.0]);
}

#[test]
fn test_cross_universe_particle_values() {
    let var = build(&[], BranchConfig::new("ke", "true_particle"), "reco", true).unwrap();
    let values = var.evaluate(&two_candidate_event(true));
    assert_eq!(values.len(), 3);
    assert_eq!(values[0], 400.0);
    assert!(values[1].is_nan());
    assert!(values[2].is_nan());
}

#[test]
fn test_particle_cut_applies_to_primary_universe_only() {
    // A truth-particle cut rejecting every particle does not filter the reco
    // particles walked in reco mode.
    let var = build(
        &[CutConfig::new("ke_cut", "true_particle").with_parameters(&[1.0e9])],
        BranchConfig::new("ke", "reco_particle"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(var.evaluate(&two_candidate_event(true)).len(), 3);
}

#[test]
fn test_selector_broadcast() {
    let var = build(
        &[],
        BranchConfig::new("ke", "reco").with_selector("leading_muon"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(var.name, "reco_leading_muon_ke");
    let values = var.evaluate(&two_candidate_event(true));
    assert_eq!(values[0], 390.0);
    assert!(values[1].is_nan());

    // Same input, same output.
    let again = var.evaluate(&two_candidate_event(true));
    assert_eq!(values[0], again[0]);
}

#[test]
fn test_interaction_threshold_cut() {
    let single_muon = build(
        &[CutConfig::new("single_muon", "reco")],
        BranchConfig::new("id", "reco"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(single_muon.evaluate(&two_candidate_event(true)), vec![0.0]);

    let no_muon = build(
        &[CutConfig::new("!single_muon", "reco")],
        BranchConfig::new("id", "reco"),
        "reco",
        true,
    )
    .unwrap();
    assert_eq!(no_muon.evaluate(&two_candidate_event(true)), vec![1.0]);
}

#[test]
fn test_event_cut_gates_everything() {
    let var = build(
        &[CutConfig::new("is_mc", "event")],
        BranchConfig::new("id", "reco"),
        "reco",
        false,
    )
    .unwrap();
    assert!(var.evaluate(&two_candidate_event(false)).is_empty());
}
