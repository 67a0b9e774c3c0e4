// https://florianovictor.medium.com/rust-adventures-criterion-50754cb3295
// https://bheisler.github.io/criterion.rs/book/getting_started.html

use autocall_pricing::simulation::{MonteCarloConfig, MonteCarloNoteSimulator};
use autocall_pricing::{evaluate, NoteParameters, ObservationSchedule};

use criterion::{black_box, criterion_group, criterion_main, Criterion};

criterion_group!(benches, criterion_note_simulation);
criterion_main!(benches);

pub fn criterion_note_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Autocallable note Monte Carlo simulation");

    group.bench_function("evaluate a single simulated path", |b| {
        let params = NoteParameters::default();
        let config = MonteCarloConfig {
            nr_paths: 1,
            ..Default::default()
        };
        let simulator = MonteCarloNoteSimulator::gbm(config).unwrap();
        let schedule = ObservationSchedule::for_steps(&params, 252);
        let path = simulator.simulate_path(0, schedule.step_count());
        b.iter(|| evaluate(black_box(&path), &schedule, &params))
    });
    group.bench_function("simulate and evaluate paths in parallel", |b| {
        b.iter(|| simulate_notes(black_box(10_000)))
    });

    group.finish()
}

fn simulate_notes(nr_paths: usize) {
    let params = NoteParameters::default();
    let config = MonteCarloConfig {
        nr_paths,
        ..Default::default()
    };

    let simulator = MonteCarloNoteSimulator::gbm(config).unwrap();
    let outcomes = simulator.run(&params).unwrap();
    assert_eq!(outcomes.len(), nr_paths);
}
