use anyhow::{Context, Result};
use clap::Parser;
use shoprank::{load_catalog, Filters, SearchEngine, SearchOptions, SortOrder};
use std::time::Instant;

// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Catalog search and ranking engine", long_about = None)]
struct Args {
    /// Path to a JSON file holding an array of products
    #[arg(short, long, default_value = "catalog.json")]
    catalog: String,

    /// Free-text shopping query
    #[arg(short, long, default_value = "running shoes under $100 with good reviews")]
    query: String,

    /// Sort order: relevance, price-asc, price-desc, rating-desc
    #[arg(short, long, default_value = "relevance")]
    sort: String,

    /// Manual category filter ("All" disables it)
    #[arg(long, default_value = "All")]
    category: String,

    /// Manual minimum price filter
    #[arg(long)]
    min_price: Option<f64>,

    /// Manual maximum price filter
    #[arg(long)]
    max_price: Option<f64>,

    /// Manual minimum rating filter
    #[arg(long)]
    min_rating: Option<f64>,

    /// Maximum number of results to print
    #[arg(short = 'n', long)]
    limit: Option<usize>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let sort = match args.sort.as_str() {
        "price-asc" => SortOrder::PriceAsc,
        "price-desc" => SortOrder::PriceDesc,
        "rating-desc" => SortOrder::RatingDesc,
        _ => SortOrder::Relevance,
    };

    let start = Instant::now();
    let catalog = load_catalog(&args.catalog)
        .with_context(|| format!("loading catalog from {}", args.catalog))?;
    println!("Loaded {} products in {:?}", catalog.len(), start.elapsed());

    let start = Instant::now();
    let engine = SearchEngine::new(catalog);
    let stats = engine.model().stats();
    println!(
        "Indexed {} products ({} terms) in {:?}",
        stats.total_documents,
        stats.total_terms,
        start.elapsed()
    );

    let options = SearchOptions {
        filters: Filters {
            category: args.category,
            price_min: args.min_price,
            price_max: args.max_price,
            rating_min: args.min_rating,
        },
        sort,
        limit: args.limit,
    };

    println!();
    println!("Searching for: \"{}\"", args.query);

    let start = Instant::now();
    let result = engine.search(&args.query, &options);
    println!(
        "Found {} products in {:?}",
        result.items.len(),
        start.elapsed()
    );
    println!("Parsed constraints: {}", serde_json::to_string(&result.parsed)?);
    println!();

    for scored in &result.items {
        println!(
            "{:.3}\t{}\t${:.2}\t{}\t{:.1}",
            scored.score,
            scored.item.name,
            scored.item.price,
            scored.item.category,
            scored.item.rating
        );
    }

    Ok(())
}
