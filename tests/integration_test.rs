// Integration tests for filmsim
use filmsim::prelude::*;
use filmsim::{BlockKind, FeatureSchema, SparseMatrix};
use filmsim_features::{fuse, FeatureBlock, HashedSetEncoder, MultiHotEncoder};
use std::sync::Arc;

fn abc_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogItem::new("A")
            .with_genres(vec!["Drama"])
            .with_overview("love story")
            .with_number("year", 2000.0),
        CatalogItem::new("B")
            .with_genres(vec!["Drama"])
            .with_overview("a love story drama")
            .with_number("year", 2001.0),
        CatalogItem::new("C")
            .with_genres(vec!["Action"])
            .with_overview("explosions")
            .with_number("year", 2020.0),
    ])
}

fn movie_catalog() -> Catalog {
    let json = r#"
        {"title": "Heat", "startYear": 1995, "overview": "A detective hunts a crew of bank robbers in Los Angeles.", "genres": ["Crime", "Thriller"], "directors": "Michael Mann", "actors": ["Al Pacino", "Robert De Niro"], "actorsName": ["Al Pacino", "Robert De Niro"], "production_countries": "['US']", "runtime": 170, "averageRating": 8.3}
        {"title": "Collateral", "startYear": 2004, "overview": "A cab driver is forced to drive a hitman around Los Angeles.", "genres": ["Crime", "Thriller"], "directors": "Michael Mann", "actors": ["Tom Cruise", "Jamie Foxx"], "production_countries": "['US']", "runtime": 150, "averageRating": 8.2}
        {"title": "Le Samouraï", "startYear": 1967, "overview": "Un tueur à gages solitaire est traqué par la police après un contrat.", "genres": ["Crime", "Thriller"], "directors": "Jean-Pierre Melville", "actors": ["Alain Delon"], "production_countries": "['FR', 'IT']", "runtime": 105, "averageRating": 8.0}
        {"title": "Amélie", "startYear": 2001, "overview": "Une jeune serveuse décide de changer la vie des autres.", "genres": ["Comedy", "Romance"], "directors": "Jean-Pierre Jeunet", "actors": ["Audrey Tautou"], "production_countries": "['FR', 'DE']", "runtime": 122, "averageRating": 8.3}
        {"title": "Toy Story", "startYear": 1995, "overview": "A cowboy doll is threatened by a new spaceman toy.", "genres": "Animation", "directors": "John Lasseter", "actors": ["Tom Hanks", "Tim Allen"], "production_countries": "['US']", "runtime": 81, "averageRating": 8.3}
        {"title": "Toy Story 2", "startYear": 1999, "overview": "The toy cowboy is stolen by a collector; his friends set out to rescue him.", "genres": "Animation", "directors": "John Lasseter", "actors": ["Tom Hanks", "Tim Allen"], "production_countries": "['US']", "runtime": 92, "averageRating": 8.3}
        {"title": "Ratatouille", "startYear": 2007, "overview": "A rat who can cook makes an unusual alliance with a young kitchen worker in Paris.", "genres": ["Animation", "Comedy"], "directors": "Brad Bird", "actors": ["Patton Oswalt"], "production_countries": "['US']", "runtime": 111, "averageRating": 8.1}
    "#;
    Catalog::from_json_str(json).unwrap()
}

#[test]
fn test_lexical_and_genre_overlap_ranks_closer() {
    let recommender = Recommender::build(abc_catalog(), PipelineConfig::default()).unwrap();
    let neighbors = recommender.index().query(0, 3).unwrap();

    assert_eq!(neighbors[0].row, 0);
    assert_eq!(neighbors[1].row, 1);
    assert_eq!(neighbors[2].row, 2);
    assert!(neighbors[1].distance < neighbors[2].distance);

    let excluded = recommender.recommend_k(0, 2).unwrap();
    assert_eq!(excluded.iter().map(|n| n.row).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_bare_genre_string_matches_list() {
    let bare: CatalogItem = serde_json::from_str(r#"{"genres": "Comedy"}"#).unwrap();
    let listed: CatalogItem = serde_json::from_str(r#"{"genres": ["Comedy"]}"#).unwrap();

    let rows = vec![bare.genre_labels(), listed.genre_labels(), vec!["Drama".to_string()]];
    let encoder = MultiHotEncoder::fit(&rows);
    let m = encoder.transform(&rows).unwrap();
    assert_eq!(m.dense_row(0), m.dense_row(1));
    assert_eq!(m.dense_row(0), vec![1.0, 0.0]);
}

#[test]
fn test_k_out_of_bounds() {
    let recommender = Recommender::build(abc_catalog(), PipelineConfig::default()).unwrap();
    let index = recommender.index();
    assert!(matches!(index.query(0, 0), Err(Error::InvalidInput(_))));
    assert!(matches!(index.query(0, 4), Err(Error::InvalidInput(_))));
}

#[test]
fn test_row_one_past_the_end() {
    let recommender = Recommender::build(abc_catalog(), PipelineConfig::default()).unwrap();
    assert!(matches!(
        recommender.index().query(3, 1),
        Err(Error::IndexOutOfRange { index: 3, len: 3 })
    ));
    assert!(matches!(recommender.recommend(3), Err(Error::IndexOutOfRange { .. })));
}

#[test]
fn test_fused_shape_matches_catalog() {
    let catalog = movie_catalog();
    let rows = catalog.len();
    let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
    let fused = recommender.fused();

    assert_eq!(fused.n_rows(), rows);
    let widths: usize = recommender.columns().iter().map(|c| c.width()).sum();
    assert_eq!(fused.n_cols(), widths);
    assert_eq!(fused.schema(), &FeatureSchema::v1());
    // averageRating and runtime; startYear is display-only
    assert_eq!(fused.block_range(BlockKind::Numeric).unwrap().len(), 2);
}

#[test]
fn test_query_returns_k_closest() {
    let catalog = movie_catalog();
    let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
    let matrix = recommender.fused().matrix().clone();
    let distance = recommender.index().distance_config();

    for q in 0..recommender.len() {
        let k = 3;
        let neighbors = recommender.recommend_k(q, k).unwrap();
        assert_eq!(neighbors.len(), k);

        let mut rows: Vec<usize> = neighbors.iter().map(|n| n.row).collect();
        assert!(!rows.contains(&q));
        rows.sort_unstable();
        rows.dedup();
        assert_eq!(rows.len(), k);

        let worst = neighbors.last().unwrap().distance;
        for other in (0..recommender.len()).filter(|r| *r != q && !rows.contains(r)) {
            assert!(distance.distance(&matrix.row(q), &matrix.row(other)) >= worst);
        }
    }
}

#[test]
fn test_recommendations_follow_content() {
    let recommender = Recommender::build(movie_catalog(), PipelineConfig::default()).unwrap();

    let (row, neighbors) = recommender.recommend_by_title("Toy Story").unwrap();
    assert_eq!(row, 4);
    assert_eq!(neighbors.len(), 5);
    assert_eq!(recommender.item(neighbors[0].row).unwrap().title.as_deref(), Some("Toy Story 2"));

    let (_, neighbors) = recommender.recommend_by_title("Heat").unwrap();
    assert_eq!(recommender.item(neighbors[0].row).unwrap().title.as_deref(), Some("Collateral"));
}

#[test]
fn test_rebuild_is_idempotent() {
    let a = Recommender::build(movie_catalog(), PipelineConfig::default()).unwrap();
    let b = Recommender::build(movie_catalog(), PipelineConfig::default()).unwrap();
    assert_eq!(a.fused().matrix(), b.fused().matrix());
    for q in 0..a.len() {
        assert_eq!(a.recommend(q).unwrap(), b.recommend(q).unwrap());
    }

    let index = SimilarityIndex::build(a.fused().matrix().clone(), DistanceConfig::default()).unwrap();
    assert_eq!(index.query(2, 4).unwrap(), a.index().query(2, 4).unwrap());
}

#[test]
fn test_hashed_rows_deterministic() {
    let actors = vec![vec!["Tom Hanks".to_string(), "Tim Allen".to_string()]];
    let enc = HashedSetEncoder::new(256).unwrap();
    assert_eq!(enc.transform(&actors).unwrap(), enc.transform(&actors).unwrap());
}

#[test]
fn test_fusion_shape_mismatch() {
    let schema = FeatureSchema {
        version: 1,
        blocks: vec![BlockKind::Overview, BlockKind::Numeric],
    };
    let blocks = [
        FeatureBlock::new(BlockKind::Overview, SparseMatrix::zeros(3, 10)),
        FeatureBlock::new(BlockKind::Numeric, SparseMatrix::zeros(4, 2)),
    ];
    assert!(matches!(fuse(&schema, &blocks), Err(Error::ShapeMismatch { .. })));
}

#[test]
fn test_custom_config_and_metric() {
    let config = PipelineConfig {
        text_vocab_size: 5,
        director_hash_buckets: 8,
        actor_hash_buckets: 16,
        distance_metric: Metric::Cosine,
        ..PipelineConfig::default()
    };
    let recommender = Recommender::build(movie_catalog(), config).unwrap();
    let fused = recommender.fused();
    assert_eq!(fused.block_range(BlockKind::Overview).unwrap().len(), 5);
    assert_eq!(fused.block_range(BlockKind::Directors).unwrap().len(), 8);
    assert_eq!(fused.block_range(BlockKind::Actors).unwrap().len(), 16);
    assert_eq!(recommender.index().distance_config().metric, Metric::Cosine);
    assert_eq!(recommender.recommend(0).unwrap().len(), 5);
}

#[test]
fn test_missing_stopwords_directory_degrades() {
    let dir = tempfile::tempdir().unwrap();
    let config = PipelineConfig {
        stopword_dir: Some(dir.path().join("missing")),
        ..PipelineConfig::default()
    };
    let recommender = Recommender::build(movie_catalog(), config).unwrap();
    assert_eq!(recommender.report().degraded.len(), 2);
    assert_eq!(recommender.recommend(0).unwrap().len(), 5);
}

#[test]
fn test_catalog_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[{"title": "A", "genres": "Drama"}, {"title": "B", "genres": ["Drama"]}]"#,
    )
    .unwrap();

    let catalog = Catalog::load(&path).unwrap();
    let recommender = Recommender::build(catalog, PipelineConfig::default()).unwrap();
    let neighbors = recommender.recommend(0).unwrap();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].row, 1);
    assert_eq!(neighbors[0].distance, 0.0);
}

#[test]
fn test_shared_across_threads() {
    let recommender = Arc::new(Recommender::build(movie_catalog(), PipelineConfig::default()).unwrap());
    let expected = recommender.recommend(1).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let r = recommender.clone();
            std::thread::spawn(move || r.recommend(1).unwrap())
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), expected);
    }
}
