//! `center` and `geocode` command handlers.

use clap::Subcommand;

use pimap_client::{ApiClient, Geocoder};
use pimap_core::{AppConfig, MapCenter, MapCenterKind};
use pimap_geo::Coordinate;

#[derive(Debug, Subcommand)]
pub enum CenterAction {
    /// Show the persisted center of the given kind.
    Get {
        #[arg(value_name = "KIND")]
        kind: MapCenterKind,
    },
    /// Persist a center; requires a Pi access token.
    Set {
        #[arg(value_name = "KIND")]
        kind: MapCenterKind,
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
}

pub async fn run(
    config: &AppConfig,
    action: CenterAction,
    pi_token: Option<&str>,
) -> anyhow::Result<()> {
    let mut client = ApiClient::from_config(config)?;
    if let Some(token) = pi_token {
        let user = client.authenticate(token).await?;
        tracing::debug!(username = %user.username, "authenticated");
    }

    match action {
        CenterAction::Get { kind } => {
            match client.fetch_map_center(kind).await? {
                Some(center) => {
                    println!("{kind:?} center: ({:.5}, {:.5})", center.lat, center.lng);
                }
                None => println!("no {kind:?} center saved"),
            }
            Ok(())
        }
        CenterAction::Set { kind, lat, lng } => {
            let coord = Coordinate::sanitized(lat, lng);
            client.save_map_center(MapCenter::new(coord, kind)).await?;
            println!(
                "{kind:?} center saved at ({:.5}, {:.5})",
                coord.lat, coord.lng
            );
            Ok(())
        }
    }
}

/// Resolve a free-text place name and print the coordinate.
pub async fn geocode(config: &AppConfig, place: &str) -> anyhow::Result<()> {
    let geocoder = Geocoder::new(
        &config.geocode_base_url,
        config.request_timeout_secs,
        &config.user_agent,
    )?;
    match geocoder.search(place).await? {
        Some(coord) => println!("{place}: ({:.5}, {:.5})", coord.lat, coord.lng),
        None => println!("no results for \"{place}\""),
    }
    Ok(())
}
