use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use string_evolver::{
    Alphabet, Candidate, EvolutionConfig, EvolutionParams, Evolver, Target,
    algorithms::elitist::{ElitistGA, evolve, select_elite},
};

// =============================================================================
// Helpers
// =============================================================================

fn config(population_size: usize, max_iterations: usize) -> EvolutionConfig {
    EvolutionParams {
        population_size,
        max_iterations,
        elitism: population_size / 10,
        crossover_num: 2,
        random_generated_candidate_num: population_size / 20,
        mutation_rate: 0.01,
    }
    .validate()
    .expect("benchmark config is valid")
}

fn random_target(length: usize, seed: u64) -> Target {
    let mut rng = Pcg64::seed_from_u64(seed);
    Target::random(length, &Alphabet::default(), &mut rng).expect("non-empty target")
}

// =============================================================================
// Generation step
// =============================================================================

fn bench_step_population_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ElitistGA/step");

    for pop_size in [100, 200, 600, 1000].iter() {
        group.throughput(Throughput::Elements(*pop_size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(pop_size), pop_size, |b, &size| {
            let target = random_target(100, 42);
            b.iter_batched(
                || ElitistGA::new(target.clone(), Alphabet::default(), config(size, 1), 42).unwrap(),
                |mut ga| {
                    ga.step();
                    black_box(ga)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_step_length_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("ElitistGA/target_length");

    for length in [32, 100, 256, 1024].iter() {
        group.throughput(Throughput::Elements(*length as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), length, |b, &len| {
            let target = random_target(len, 42);
            b.iter_batched(
                || ElitistGA::new(target.clone(), Alphabet::default(), config(200, 1), 42).unwrap(),
                |mut ga| {
                    ga.step();
                    black_box(ga)
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

// =============================================================================
// Selection and full runs
// =============================================================================

fn bench_select_elite(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_elite");
    let alphabet = Alphabet::default();
    let target = random_target(100, 7);

    for pop_size in [100, 600, 2000].iter() {
        let mut rng = Pcg64::seed_from_u64(7);
        let population: Vec<Candidate> = (0..*pop_size)
            .map(|_| Candidate::random(100, &alphabet, &mut rng))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(pop_size), &population, |b, pop| {
            b.iter(|| black_box(select_elite(pop, &target, 20).unwrap()));
        });
    }
    group.finish();
}

fn bench_full_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("evolve");
    group.sample_size(10);

    let alphabet = Alphabet::default();
    let target = random_target(30, 1);
    let config = config(300, 200);
    group.bench_function("length_30_pop_300", |b| {
        b.iter(|| {
            let mut rng = Pcg64::seed_from_u64(1);
            black_box(evolve(&target, &alphabet, &config, &mut rng).unwrap())
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_step_population_scaling,
    bench_step_length_scaling,
    bench_select_elite,
    bench_full_run,
);
criterion_main!(benches);
