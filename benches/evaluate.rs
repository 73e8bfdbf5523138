use countdown::{
    random::{SourceBinding, WyRng},
    Chromosome, OperatorTable, Puzzle,
};
use criterion::Criterion;
use rand::rngs::StdRng;

const SAMPLES: usize = 1000;

fn bench_evaluate(bench: &mut Criterion) {
    let mut rng = SourceBinding::<StdRng, WyRng>::seed_from_u64(0);
    let table = OperatorTable::default();
    let puzzle = Puzzle::new(145., table);
    for genes in [8, 64] {
        let chromosome = Chromosome::random(genes, &mut rng).unwrap();
        bench.bench_function(&format!("evaluate-{genes}"), |b| {
            b.iter(|| chromosome.evaluate(&table))
        });
        bench.bench_function(&format!("fitness-{genes}"), |b| {
            b.iter(|| chromosome.fitness(&puzzle))
        });
    }
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
    bench_evaluate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
