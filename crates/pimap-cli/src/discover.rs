//! `discover` and `seller` command handlers.

use pimap_client::ApiClient;
use pimap_core::AppConfig;
use pimap_geo::Coordinate;

/// Fetch and print the sellers around a coordinate.
pub async fn run(
    config: &AppConfig,
    lat: f64,
    lng: f64,
    radius: Option<f64>,
    query: Option<&str>,
) -> anyhow::Result<()> {
    let client = ApiClient::from_config(config)?;
    let origin = Coordinate::sanitized(lat, lng);
    let radius_km = radius.unwrap_or(config.default_radius_km);

    tracing::info!(
        lat = origin.lat,
        lng = origin.lng,
        radius_km,
        query = query.unwrap_or(""),
        "fetching sellers"
    );
    let sellers = client.fetch_sellers_near(origin, radius_km, query).await?;

    println!(
        "{} seller(s) within {radius_km:.1} km of ({:.5}, {:.5}) at {}",
        sellers.len(),
        origin.lat,
        origin.lng,
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
    );
    for seller in &sellers {
        println!(
            "  {}  {:<30}  ({:.5}, {:.5})  trust {:.2}",
            seller.seller_id,
            seller.name,
            seller.coordinates.lat,
            seller.coordinates.lng,
            seller.trust_meter_rating,
        );
    }
    Ok(())
}

/// Print the extended record for one seller.
pub async fn show_seller(config: &AppConfig, seller_id: &str) -> anyhow::Result<()> {
    let client = ApiClient::from_config(config)?;
    let detail = client.fetch_seller(seller_id).await?;

    println!("{} — {}", detail.seller.seller_id, detail.seller.name);
    println!("  type:        {:?}", detail.seller.seller_type);
    println!(
        "  location:    ({:.5}, {:.5})",
        detail.seller.coordinates.lat, detail.seller.coordinates.lng
    );
    println!("  trust meter: {:.2}", detail.seller.trust_meter_rating);
    if let Some(rating) = detail.seller.average_rating {
        println!("  avg rating:  {rating:.2}");
    }
    if let Some(owner) = &detail.owner_username {
        println!("  owner:       {owner}");
    }
    if let Some(address) = &detail.address {
        println!("  address:     {address}");
    }
    if let Some(note) = &detail.seller.fulfillment_description {
        println!("  fulfillment: {note}");
    }
    Ok(())
}
