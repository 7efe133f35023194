//! Runs against the live API.
//!
//! ```text
//! GSC_ACCESS_TOKEN=ya29... RUST_LOG=debug cargo run --example live_demo [site]
//! ```

use gsc_core::{Account, ClientConfig, Dimension, Operator, SearchType};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let token = std::env::var("GSC_ACCESS_TOKEN")
        .map_err(|_| "GSC_ACCESS_TOKEN must hold an OAuth access token")?;
    let mut account = Account::connect_with_config(&token, ClientConfig::from_env())?;

    println!("Web properties:");
    for (i, property) in account.webproperties().await?.iter().enumerate() {
        println!("  {}. {} ({})", i + 1, property.url(), property.permission());
    }

    let site = match std::env::args().nth(1) {
        Some(site) => site,
        None => match account.webproperties().await?.first() {
            Some(property) => property.url().to_string(),
            None => {
                println!("\nNo web properties on this account.");
                return Ok(());
            }
        },
    };

    println!("\nLast 7 days for {}:\n", site);
    let mut query = account.query(&site).await?;
    query
        .range_relative_str("", -7, 0)?
        .dimensions(&[Dimension::Date, Dimension::Page])
        .search_type(SearchType::Web)
        .filter(Dimension::Device, "MOBILE", Operator::Equals, false);

    let report = query.get().await?;
    for row in report.iter().take(10) {
        println!(
            "  {} {} clicks={} impressions={} ctr={:.3} position={}",
            row.dimension(Dimension::Date).unwrap_or("-"),
            row.dimension(Dimension::Page).unwrap_or("-"),
            row.clicks,
            row.impressions,
            row.ctr,
            row.position.map(|p| format!("{:.1}", p)).unwrap_or_else(|| "-".to_string())
        );
    }
    println!("\n{} rows in total", report.len());

    let mut inspect = account.inspect(&site).await?;
    inspect.add_url(site.as_str(), false);
    let inspection = inspect.get().await?;

    for (row, record) in inspection.iter().zip(inspection.to_flat_records()) {
        println!("\nInspection of {}:", row.inspection_url().unwrap_or("-"));
        for key in ["indexStatusResult.verdict", "indexStatusResult.coverageState"] {
            if let Some(value) = record.get(key) {
                println!("  {} = {}", key, value);
            }
        }
    }

    let dir = std::env::temp_dir();
    println!("\nSaved {}", report.to_disk_in(&dir, "")?.display());
    println!("Saved {}", inspection.to_disk_in(&dir, "")?.display());

    Ok(())
}
