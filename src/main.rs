use anyhow::Context;
use clap::Parser;
use filmsim::{Catalog, CatalogItem, LabelField, Neighbor, PipelineConfig, Recommender};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Recommend movies similar to a chosen title
#[derive(Parser, Debug)]
#[command(name = "filmsim")]
#[command(about = "Content-based movie recommendations", long_about = None)]
struct Args {
    /// Path to the catalog (JSON array or JSON lines)
    #[arg(short, long)]
    catalog: PathBuf,

    /// Title to get recommendations for. Lists all titles when omitted.
    #[arg(short, long)]
    title: Option<String>,

    /// Pipeline configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Neighbors fetched per query, the selected movie included
    #[arg(short = 'k', long)]
    neighbors: Option<usize>,

    /// Print recommendations as JSON
    #[arg(long)]
    json: bool,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[derive(Serialize)]
struct Recommendation<'a> {
    row: usize,
    distance: f64,
    title: Option<&'a str>,
    genres: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = match args.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting filmsim v{}", env!("CARGO_PKG_VERSION"));

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(k) = args.neighbors {
        config.neighbor_count = k;
    }

    let catalog = Catalog::load(&args.catalog)
        .with_context(|| format!("loading catalog {}", args.catalog.display()))?;

    let Some(title) = args.title else {
        for title in catalog.titles() {
            println!("{}", title);
        }
        return Ok(());
    };

    let recommender = Recommender::build(catalog, config).context("building recommender")?;
    for degraded in &recommender.report().degraded {
        eprintln!("warning: {}", degraded);
    }

    let (row, neighbors) = recommender
        .recommend_by_title(&title)
        .with_context(|| format!("recommending for '{}'", title))?;

    if args.json {
        let out: Vec<Recommendation<'_>> = neighbors
            .iter()
            .filter_map(|n| recommender.item(n.row).map(|item| recommendation(n, item)))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    if let Some(film) = recommender.item(row) {
        print_selected(film);
    }
    println!();
    println!("Similar movies:");
    for n in &neighbors {
        if let Some(item) = recommender.item(n.row) {
            println!(
                "  {} - {:?}  (distance {:.4})",
                item.title.as_deref().unwrap_or("<untitled>"),
                item.genre_labels(),
                n.distance
            );
        }
    }
    Ok(())
}

fn recommendation<'a>(n: &Neighbor, item: &'a CatalogItem) -> Recommendation<'a> {
    Recommendation {
        row: n.row,
        distance: n.distance,
        title: item.title.as_deref(),
        genres: item.genre_labels(),
    }
}

fn print_selected(film: &CatalogItem) {
    let countries = match &film.production_countries {
        LabelField::One(raw) => raw.clone(),
        other => format!("{:?}", other.labels()),
    };
    println!("Selected movie");
    println!("  Title:     {}", film.title.as_deref().unwrap_or("<untitled>"));
    println!("  Genres:    {:?}", film.genre_labels());
    println!("  Year:      {}", film.start_year.as_deref().unwrap_or("?"));
    println!("  Countries: {}", countries);
    println!("  Actors:    {:?}", film.actors_name.labels());
    println!("  Synopsis:  {}", film.overview_text());
}
