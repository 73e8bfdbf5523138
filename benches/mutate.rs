use countdown::{
    random::{SourceBinding, WyRng},
    Chromosome,
};
use criterion::Criterion;
use rand::rngs::StdRng;

const SAMPLES: usize = 2000;

fn bench_mutate(bench: &mut Criterion) {
    let mut rng = SourceBinding::<StdRng, WyRng>::seed_from_u64(0);
    let l = Chromosome::random(8, &mut rng).unwrap();
    let r = Chromosome::random(8, &mut rng).unwrap();

    bench.bench_function("mutate", |b| {
        b.iter(|| l.clone().mutate(0.001, &mut rng))
    });

    bench.bench_function("mate", |b| b.iter(|| l.mate(&r, 0.7, &mut rng).unwrap()));

    bench.bench_function("mate-mutate", |b| {
        b.iter(|| l.mate(&r, 0.7, &mut rng).unwrap().mutate(0.001, &mut rng))
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
    bench_mutate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
