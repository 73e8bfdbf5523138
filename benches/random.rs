use countdown::random::{seed_entropy, RandomSource, SourceBinding, WyRng};
use criterion::Criterion;
use rand::{
    rngs::{OsRng, SmallRng, StdRng},
    SeedableRng,
};

const SAMPLES: usize = 1000;

fn bench_uniform(bench: &mut Criterion) {
    let mut std = SourceBinding::new(OsRng, StdRng::from_os_rng());
    bench.bench_function("uniform-stdrng", |b| b.iter(|| std.uniform()));

    let mut small = SourceBinding::new(OsRng, SmallRng::from_os_rng());
    bench.bench_function("uniform-smallrng", |b| b.iter(|| small.uniform()));

    let mut wy = SourceBinding::new(OsRng, WyRng::seeded(seed_entropy().unwrap()));
    bench.bench_function("uniform-wyrng", |b| b.iter(|| wy.uniform()));
    bench.bench_function("below-wyrng", |b| b.iter(|| wy.below(1000)));
}

fn bench_secure(bench: &mut Criterion) {
    let mut rng = SourceBinding::new(OsRng, WyRng::seeded(0));
    let mut buf = [0u8; 4];
    bench.bench_function("fill-secure-osrng", |b| {
        b.iter(|| rng.fill_secure(&mut buf).unwrap())
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(SAMPLES)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_uniform(&mut criterion);
    bench_secure(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
