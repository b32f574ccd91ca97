//! Best-effort IP geolocation.
//!
//! First tier of the auto origin chain: fast, keyless, no permission
//! prompt. Accuracy is city-level at best, which is fine for an initial
//! map view.

use std::time::Duration;

use pimap_geo::Coordinate;

use crate::error::ApiError;

/// Client for a keyless `ip-api.com`-shaped lookup endpoint
/// (`{"lat": .., "lon": ..}` JSON body).
pub struct IpLocator {
    client: reqwest::Client,
    lookup_url: String,
}

impl IpLocator {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(lookup_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            lookup_url: lookup_url.to_owned(),
        })
    }

    /// Resolve the caller's public IP to an approximate coordinate.
    ///
    /// No retries: this is a best-effort tier and the resolver falls
    /// through to GPS on any failure.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport
    /// failure; [`ApiError::Deserialize`] when the body carries no finite
    /// `lat`/`lon` pair.
    pub async fn lookup(&self) -> Result<Coordinate, ApiError> {
        let response = self.client.get(&self.lookup_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.lookup_url.clone(),
            });
        }

        let body = response.text().await?;
        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|source| ApiError::Deserialize {
                context: "ip lookup response".to_owned(),
                source,
            })?;

        let lat = value.get("lat").and_then(serde_json::Value::as_f64);
        // ip-api spells longitude "lon"; tolerate "lng" for other providers.
        let lng = value
            .get("lon")
            .or_else(|| value.get("lng"))
            .and_then(serde_json::Value::as_f64);

        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                let coord = Coordinate::sanitized(lat, lng);
                tracing::debug!(lat = coord.lat, lng = coord.lng, "ip lookup resolved");
                Ok(coord)
            }
            _ => Err(ApiError::Deserialize {
                context: "ip lookup response".to_owned(),
                source: <serde_json::Error as serde::de::Error>::custom(
                    "body carries no lat/lon pair",
                ),
            }),
        }
    }
}
