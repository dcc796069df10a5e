//! Seeded store demo
//!
//! Opens a store (YAML config path as first argument, in-memory otherwise),
//! seeds the demo locations, then runs a few queries and both reports.
//!
//! ```sh
//! RUST_LOG=locstore=debug cargo run --example seeded_query
//! ```

use locstore::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => StoreConfig::from_yaml_file(&path)?,
        None => StoreConfig::default(),
    };

    let service = LocationService::<DynStorage>::open(&config).await?;

    println!("All locations (best rated first):");
    for loc in service.query().await? {
        println!("  {:<22} {}  {}", loc.name, loc.rate, loc.geo.address);
    }

    service.set_filter_by(FilterUpdate::min_rate(4.0));
    service.set_sort_by(SortBy::ByName(Direction::Ascending));
    println!("\nRated 4+ by name:");
    for loc in service.query().await? {
        println!("  {:<22} {}", loc.name, loc.rate);
    }

    let top = service.query().await?;
    if let Some(id) = top.first().and_then(|l| l.id.clone()) {
        let mut loc = service.get_by_id(&id).await?;
        loc.rate = 3.0;
        let loc = service.save(loc).await?;
        println!("\nRe-rated {} to {}", loc.name, loc.rate);
    }

    let tiers = service.count_by_rate_tier().await?;
    println!("\nBy rate: {}", serde_json::to_string(&tiers)?);

    let recency = service.count_by_recency_tier().await?;
    println!("By last update: {}", serde_json::to_string(&recency)?);

    Ok(())
}
