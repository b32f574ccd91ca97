//! Best-effort origin resolution for the map's starting view.
//!
//! Tiers are tried in an order driven by the user's find-me preference,
//! each failure degrading to the next tier. Nothing here is fatal: the
//! terminal fallback is a whole-world view, so the map always renders.

use std::future::Future;
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;

use pimap_client::ApiError;
use pimap_core::FindMePreference;
use pimap_geo::{Coordinate, CITY_ZOOM, WORLD_CENTER, WORLD_ZOOM};

/// Failure modes of a device-GPS attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GpsError {
    #[error("location permission denied")]
    PermissionDenied,
    #[error("no position available")]
    Unavailable,
    #[error("position request timed out")]
    Timeout,
}

/// Device location capability, `navigator.geolocation`-equivalent.
///
/// Implementations should request a high-accuracy reading; the resolver
/// bounds every attempt with its own timeout, so providers need not
/// enforce one.
pub trait GpsProvider: Send + Sync {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GpsError>>;
}

/// Provider for environments without a positioning device (servers, CLI
/// runs). Every attempt reports [`GpsError::Unavailable`].
pub struct NoGps;

impl GpsProvider for NoGps {
    fn locate(&self) -> BoxFuture<'_, Result<Coordinate, GpsError>> {
        Box::pin(async { Err(GpsError::Unavailable) })
    }
}

/// Which tier produced the starting origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginSource {
    Gps,
    Ip,
    SearchCenter,
    WorldView,
}

/// Outcome of origin resolution. Always usable: when every tier fails the
/// origin is the world view, never an error.
#[derive(Debug, Clone)]
pub struct ResolvedOrigin {
    pub center: Coordinate,
    pub zoom: u8,
    pub source: OriginSource,
    /// User-facing message to raise as a transient banner, when a tier
    /// failed in a way the user should know about.
    pub notice: Option<String>,
}

impl ResolvedOrigin {
    fn located(center: Coordinate, source: OriginSource) -> Self {
        Self {
            center,
            zoom: CITY_ZOOM,
            source,
            notice: None,
        }
    }

    fn world_view(notice: Option<String>) -> Self {
        Self {
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
            source: OriginSource::WorldView,
            notice,
        }
    }
}

/// Resolve the map's starting origin per the user's preference.
///
/// - `SearchCentre`: the persisted search center only; no device location
///   is attempted. Unavailable → world view.
/// - `Auto`: IP lookup first (fast, no permission prompt), then GPS, then
///   the persisted search center, then world view.
/// - `Gps`: GPS only. Failure → world view plus a location-services
///   notice; deliberately no silent fallback to IP or search center.
///
/// `ip_lookup` and `search_center` are lazy futures so untried tiers cost
/// nothing; each is polled at most once.
pub async fn resolve_origin<Ip, Sc>(
    pref: FindMePreference,
    gps: &dyn GpsProvider,
    gps_timeout: Duration,
    ip_lookup: Ip,
    search_center: Sc,
) -> ResolvedOrigin
where
    Ip: Future<Output = Result<Coordinate, ApiError>>,
    Sc: Future<Output = Option<Coordinate>>,
{
    match pref {
        FindMePreference::SearchCentre => match search_center.await {
            Some(center) => ResolvedOrigin::located(center, OriginSource::SearchCenter),
            None => {
                tracing::debug!("no persisted search center; falling back to world view");
                ResolvedOrigin::world_view(Some(
                    "No saved search center yet — showing the whole map.".to_owned(),
                ))
            }
        },

        FindMePreference::Auto => {
            match ip_lookup.await {
                Ok(center) => return ResolvedOrigin::located(center, OriginSource::Ip),
                Err(err) => tracing::debug!(error = %err, "ip tier failed; trying gps"),
            }
            match locate_with_timeout(gps, gps_timeout).await {
                Ok(center) => return ResolvedOrigin::located(center, OriginSource::Gps),
                Err(err) => tracing::debug!(error = %err, "gps tier failed; trying search center"),
            }
            match search_center.await {
                Some(center) => ResolvedOrigin::located(center, OriginSource::SearchCenter),
                None => {
                    tracing::debug!("every auto tier failed; falling back to world view");
                    ResolvedOrigin::world_view(None)
                }
            }
        }

        FindMePreference::Gps => match locate_with_timeout(gps, gps_timeout).await {
            Ok(center) => ResolvedOrigin::located(center, OriginSource::Gps),
            Err(err) => {
                tracing::debug!(error = %err, "gps-only resolution failed");
                ResolvedOrigin::world_view(Some(
                    "Location services are disabled or unavailable on this device.".to_owned(),
                ))
            }
        },
    }
}

async fn locate_with_timeout(
    gps: &dyn GpsProvider,
    gps_timeout: Duration,
) -> Result<Coordinate, GpsError> {
    match tokio::time::timeout(gps_timeout, gps.locate()).await {
        Ok(result) => result,
        Err(_) => Err(GpsError::Timeout),
    }
}
