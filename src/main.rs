use alnair_listings::format::{format_area, format_price};
use alnair_listings::sources::{AlnairClient, StaticDeveloperDirectory};
use alnair_listings::{Config, FilterOptions, ListingService, ListingSettings};
use chrono::Duration;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    info!(base_url = %config.api_base_url, "🏠 Alnair listings");

    let client = AlnairClient::from_config(&config)?;
    let developers = match &config.developers_file {
        Some(path) => StaticDeveloperDirectory::from_file(path).await?,
        None => StaticDeveloperDirectory::default(),
    };
    if developers.is_empty() {
        info!("No developer ids configured, developer filters will search by name");
    }

    let settings = ListingSettings {
        cache_ttl: Duration::seconds(config.cache_ttl_secs),
        ..Default::default()
    };
    let service = ListingService::with_settings(Arc::new(client), Arc::new(developers), settings);

    // Query string as the site would receive it, e.g. "locality=Dubai Marina&bedrooms=2&page=2"
    let query = std::env::args().nth(1).unwrap_or_default();
    let pairs: Vec<(String, String)> = url::form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .into_owned()
        .collect();

    let number = |key: &str, default: u32| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .and_then(|(_, v)| v.parse::<u32>().ok())
            .unwrap_or(default)
    };
    let page = number("page", 1);
    let limit = number("limit", 9);
    let filters = FilterOptions::from_query_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    info!(page, limit, ?filters, source = service.source_name(), "Loading listings");
    let result = service.get_paginated_properties(&filters, page, limit).await;

    if result.properties.is_empty() {
        println!("No properties found");
    }

    for (i, property) in result.properties.iter().enumerate() {
        println!("{}. {} (AED {})", i + 1, property.title, format_price(property.price));
        println!("   {} · {}", property.property_type, property.location);
        if let Some(bedrooms) = property.bedrooms {
            println!("   {} bedrooms", bedrooms);
        }
        if let Some(area) = property.area {
            println!("   {}", format_area(area));
        }
        let summary: String = property.plain_description().chars().take(120).collect();
        if !summary.is_empty() {
            println!("   {}", summary);
        }
        if let Some(developer) = &property.developer {
            println!("   Developer: {}", developer);
        }
        println!("   ID: {}", property.id);
        println!();
    }

    let pagination = result.pagination;
    println!(
        "Page {} of {} ({} properties)",
        pagination.page, pagination.total_pages, pagination.total
    );

    let json = serde_json::to_string_pretty(&result)?;
    tokio::fs::write("listings.json", json).await?;
    info!("💾 Saved page to listings.json");

    Ok(())
}
