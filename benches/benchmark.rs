// Build and query benchmarks for the recommender
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use filmsim::prelude::*;
use filmsim::LabelField;
use rand::prelude::*;
use std::sync::Arc;

const WORDS: &[&str] = &[
    "detective", "heist", "love", "story", "war", "space", "robot", "family", "city", "night",
    "murder", "school", "journey", "island", "king", "ghost", "revenge", "dream", "secret", "river",
];
const GENRES: &[&str] = &["Drama", "Comedy", "Action", "Thriller", "Animation", "Horror", "Romance"];
const COUNTRIES: &[&str] = &["US", "FR", "GB", "DE", "IT", "JP", "KR"];

fn generate_item(rng: &mut StdRng, id: usize) -> CatalogItem {
    let overview: Vec<&str> = (0..12).map(|_| *WORDS.choose(rng).unwrap()).collect();
    let genres: Vec<&str> = GENRES.choose_multiple(rng, 2).copied().collect();
    let countries = format!("['{}']", COUNTRIES.choose(rng).unwrap());
    let actors: Vec<String> = (0..4).map(|_| format!("actor {}", rng.random_range(0..5000))).collect();

    let mut item = CatalogItem::new(&format!("movie {}", id))
        .with_overview(&overview.join(" "))
        .with_genres(genres)
        .with_countries(countries.as_str())
        .with_directors(format!("director {}", rng.random_range(0..800)).as_str())
        .with_number("runtime", rng.random_range(70.0..180.0))
        .with_number("averageRating", rng.random_range(1.0..10.0));
    item.actors = LabelField::Many(actors);
    item
}

fn generate_catalog(size: usize) -> Catalog {
    let mut rng = StdRng::seed_from_u64(42);
    Catalog::new((0..size).map(|i| generate_item(&mut rng, i)).collect())
}

fn benchmark_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    group.sample_size(10);

    for size in [1_000, 10_000].iter() {
        let catalog = generate_catalog(*size);
        group.bench_with_input(BenchmarkId::new("filmsim", size), size, |b, _| {
            b.iter(|| {
                let recommender = Recommender::build(catalog.clone(), PipelineConfig::default()).unwrap();
                black_box(recommender);
            });
        });
    }

    group.finish();
}

fn benchmark_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("query");

    let recommender = Recommender::build(generate_catalog(10_000), PipelineConfig::default()).unwrap();
    group.bench_function("filmsim_recommend", |b| {
        b.iter(|| {
            let neighbors = recommender.recommend(black_box(1234)).unwrap();
            black_box(neighbors);
        });
    });

    group.finish();
}

fn benchmark_concurrent_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_queries");

    let recommender = Arc::new(Recommender::build(generate_catalog(5_000), PipelineConfig::default()).unwrap());
    group.bench_function("filmsim_concurrent", |b| {
        b.iter(|| {
            let handles: Vec<_> = (0..8)
                .map(|i| {
                    let r = recommender.clone();
                    std::thread::spawn(move || r.recommend(i * 100))
                })
                .collect();
            for handle in handles {
                black_box(handle.join().unwrap().unwrap());
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_build, benchmark_query, benchmark_concurrent_queries);
criterion_main!(benches);
