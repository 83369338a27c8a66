//! Benchmarks for pipeline evaluation.
//!
//! Measures per-event cost of interaction-level, particle-level and
//! cross-universe pipelines, and serial versus parallel batch evaluation.

use anyhow::Result;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use selection_engine::{
    construct, species, Analysis, AnalysisConfig, BranchConfig, Catalog, CutConfig, Event,
    Interaction, NamedVar, Neutrino, ParallelConfig, Particle,
};

const PIDS: [u16; 5] = [
    species::PHOTON,
    species::ELECTRON,
    species::MUON,
    species::PION,
    species::PROTON,
];

/// A simulated event with `n` mutually matched truth/reco interaction pairs,
/// each carrying `particles` matched particles.
fn generate_event(seed: usize, n: usize, particles: usize) -> Event {
    let mut event = Event::default();
    event.header.is_mc = true;
    for i in 0..n {
        event.neutrinos.push(Neutrino {
            id: i as i64,
            energy: 0.5 + (seed + i) as f64 * 0.01,
            ..Default::default()
        });
        let mut truth = Interaction {
            id: i as i64,
            nu_id: i as i64,
            is_fiducial: true,
            match_ids: vec![i as i64],
            ..Default::default()
        };
        let mut reco = truth.clone();
        reco.nu_id = -1;
        reco.is_fiducial = (seed + i) % 3 != 0;
        for j in 0..particles {
            let id = (i * particles + j) as i64;
            let particle = Particle {
                id,
                pid: PIDS[(seed + j) % PIDS.len()],
                ke: 20.0 + ((seed * 7 + j * 13) % 400) as f64,
                is_primary: j % 2 == 0,
                momentum: [0.1, 0.2, 0.9],
                match_ids: vec![id],
                ..Default::default()
            };
            truth.particles.push(particle.clone());
            reco.particles.push(particle);
        }
        event.truth.push(truth);
        event.reco.push(reco);
    }
    event
}

fn pipeline(branch: BranchConfig) -> Result<NamedVar> {
    let catalog = Catalog::with_defaults()?;
    let cuts = vec![
        CutConfig::new("fiducial_cut", "reco"),
        CutConfig::new("neutrino", "true"),
        CutConfig::new("is_primary", "reco_particle"),
    ];
    Ok(construct(&catalog, &cuts, &branch, "reco", None, true)?)
}

fn bench_single_event(c: &mut Criterion) -> Result<()> {
    let event = generate_event(1, 8, 12);
    let mut group = c.benchmark_group("single_event");

    let branches = [
        ("interaction", BranchConfig::new("visible_energy", "reco")),
        ("neutrino", BranchConfig::new("neutrino_energy", "mctruth")),
        ("particle", BranchConfig::new("ke", "reco_particle")),
        ("cross_universe_particle", BranchConfig::new("ke", "true_particle")),
        (
            "selector",
            BranchConfig::new("ke", "reco").with_selector("leading_muon"),
        ),
    ];
    for (label, branch) in branches {
        let var = pipeline(branch)?;
        group.bench_function(label, |b| b.iter(|| black_box(var.evaluate(black_box(&event)))));
    }
    group.finish();
    Ok(())
}

fn bench_batch(c: &mut Criterion) -> Result<()> {
    let config = AnalysisConfig::from_yaml_str(
        r#"
samples:
  - { name: mc, is_mc: true }
trees:
  - name: candidates
    mode: reco
    cuts:
      - { name: fiducial_cut, type: reco }
      - { name: neutrino, type: true }
    branches:
      - { name: visible_energy, type: both }
      - { name: ke, type: both_particle }
      - { name: neutrino_energy, type: mctruth }
"#,
    )?;
    let analysis = Analysis::from_config(&config)?;
    let tree = analysis
        .sample("mc")
        .and_then(|s| s.tree("candidates"))
        .ok_or_else(|| anyhow::anyhow!("tree not built"))?;

    let mut group = c.benchmark_group("batch");
    for size in [100, 1000, 10000] {
        let events: Vec<Event> = (0..size).map(|i| generate_event(i, 4, 6)).collect();
        let serial = ParallelConfig {
            enable_event_parallelism: false,
            ..ParallelConfig::default()
        };
        let parallel = ParallelConfig {
            min_batch_size_for_parallelism: 1,
            ..ParallelConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("serial", size), &events, |b, events| {
            b.iter(|| black_box(tree.evaluate_batch(events, &serial)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &events, |b, events| {
            b.iter(|| black_box(tree.evaluate_batch(events, &parallel)))
        });
    }
    group.finish();
    Ok(())
}

fn benchmarks(c: &mut Criterion) {
    if let Err(err) = bench_single_event(c) {
        eprintln!("single_event benchmark setup failed: {err}");
    }
    if let Err(err) = bench_batch(c) {
        eprintln!("batch benchmark setup failed: {err}");
    }
}

criterion_group!(benches, benchmarks);
criterion_main!(benches);
