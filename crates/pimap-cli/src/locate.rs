//! `locate` command handler: run the origin-resolution chain headlessly.

use std::time::Duration;

use pimap_client::{ApiClient, IpLocator};
use pimap_core::{AppConfig, FindMePreference};
use pimap_map::{MapView, NoGps};

/// Resolve a starting origin the way the map does on load, then run the
/// initial seller fetch and print the outcome. The terminal has no device
/// GPS, so the gps tier always fails over.
pub async fn run(config: &AppConfig, find_me: Option<FindMePreference>) -> anyhow::Result<()> {
    let pref = find_me.unwrap_or(config.find_me);
    let client = ApiClient::from_config(config)?;
    let ip = IpLocator::new(
        &config.ip_lookup_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;

    let mut view = MapView::new(
        (1280.0, 800.0),
        config.default_radius_km,
        Duration::from_millis(config.banner_ttl_ms),
    );
    view.locate(
        pref,
        &NoGps,
        Duration::from_secs(config.gps_timeout_secs),
        &ip,
        &client,
    )
    .await;

    let center = view.center();
    println!(
        "origin: ({:.5}, {:.5}) at zoom {}",
        center.lat,
        center.lng,
        view.zoom()
    );
    println!("sellers in view: {}", view.markers().len());
    for notice in view.notices().active() {
        println!("notice [{:?}]: {}", notice.kind, notice.message);
    }
    Ok(())
}
