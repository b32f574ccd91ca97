//! Persisted map-center read/write.

use pimap_core::{MapCenter, MapCenterKind};
use pimap_geo::Coordinate;

use super::ApiClient;
use crate::error::ApiError;
use crate::retry::retry_with_backoff;

impl ApiClient {
    /// Read the persisted center of the given kind, if the user has one.
    ///
    /// `GET /map-center`. The backend wraps each center as a GeoJSON point
    /// (`{"type": "Point", "coordinates": [lng, lat]}`) under
    /// `search_map_center` / `sell_map_center`. A missing or malformed
    /// point means "location unavailable" and returns `Ok(None)`, not an
    /// error — callers fall through to the next origin tier.
    ///
    /// # Errors
    ///
    /// Propagates transport and status errors ([`ApiError::Http`],
    /// [`ApiError::UnexpectedStatus`], ...); never fails on body shape.
    pub async fn fetch_map_center(
        &self,
        kind: MapCenterKind,
    ) -> Result<Option<Coordinate>, ApiError> {
        let url = self.endpoint("/map-center");

        let body: serde_json::Value =
            retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
                let url = url.clone();
                async move {
                    let response = self.authorize(self.client.get(&url)).send().await?;
                    let response = Self::check_status(response, &url)?;
                    Self::parse_json(response, "map-center response").await
                }
            })
            .await?;

        let field = match kind {
            MapCenterKind::Search => "search_map_center",
            MapCenterKind::Sell => "sell_map_center",
        };

        let center = geojson_point(body.get(field));
        if center.is_none() {
            tracing::debug!(url, field, "no usable persisted map center");
        }
        Ok(center)
    }

    /// Persist a map center chosen in the picker flow.
    ///
    /// `PUT /map-center/save` with `{latitude, longitude, type}`.
    ///
    /// # Errors
    ///
    /// Propagates the standard taxonomy; a 401 surfaces as
    /// [`ApiError::Unauthenticated`] since saving requires a session.
    pub async fn save_map_center(&self, center: MapCenter) -> Result<(), ApiError> {
        let url = self.endpoint("/map-center/save");

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .authorize(self.client.put(&url).json(&center))
                    .send()
                    .await?;
                Self::check_status(response, &url)?;
                Ok(())
            }
        })
        .await
    }
}

/// Extract a sanitized coordinate from an optional GeoJSON point value.
fn geojson_point(value: Option<&serde_json::Value>) -> Option<Coordinate> {
    let pair = value?.get("coordinates")?.as_array()?;
    let lng = pair.first().and_then(serde_json::Value::as_f64)?;
    let lat = pair.get(1).and_then(serde_json::Value::as_f64)?;
    if lat.is_finite() && lng.is_finite() {
        Some(Coordinate::sanitized(lat, lng))
    } else {
        None
    }
}
