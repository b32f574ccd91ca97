//! Place-name geocoding for the center-picker search box.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use pimap_geo::Coordinate;

use crate::error::ApiError;

/// Client for a Nominatim-shaped search endpoint
/// (`/search?q=..&format=json&limit=1`, body is an array of results with
/// string `lat`/`lon` fields).
pub struct Geocoder {
    client: reqwest::Client,
    base_url: String,
}

impl Geocoder {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }

    /// Resolve a free-text place name to a coordinate.
    ///
    /// Returns `Ok(None)` when the service finds nothing — "no such place"
    /// is a user-visible notice, not an error.
    ///
    /// # Errors
    ///
    /// [`ApiError::Http`] / [`ApiError::UnexpectedStatus`] on transport
    /// failure; [`ApiError::Deserialize`] when the body is not a JSON
    /// array.
    pub async fn search(&self, place: &str) -> Result<Option<Coordinate>, ApiError> {
        let encoded = utf8_percent_encode(place.trim(), NON_ALPHANUMERIC);
        let url = format!("{}/search?q={encoded}&format=json&limit=1", self.base_url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let results: Vec<serde_json::Value> =
            serde_json::from_str(&body).map_err(|source| ApiError::Deserialize {
                context: "geocode response".to_owned(),
                source,
            })?;

        let Some(hit) = results.first() else {
            tracing::debug!(place, "geocode returned no results");
            return Ok(None);
        };

        let lat = field_as_f64(hit, "lat");
        let lng = field_as_f64(hit, "lon");
        match (lat, lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => {
                Ok(Some(Coordinate::sanitized(lat, lng)))
            }
            _ => {
                tracing::debug!(place, "geocode hit carried no usable coordinates");
                Ok(None)
            }
        }
    }
}

/// Nominatim serializes lat/lon as strings; tolerate plain numbers too.
fn field_as_f64(value: &serde_json::Value, key: &str) -> Option<f64> {
    let field = value.get(key)?;
    field
        .as_f64()
        .or_else(|| field.as_str().and_then(|s| s.parse::<f64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_as_f64_reads_strings_and_numbers() {
        let v = json!({"lat": "51.50", "lon": -0.12});
        assert!((field_as_f64(&v, "lat").unwrap() - 51.5).abs() < 1e-9);
        assert!((field_as_f64(&v, "lon").unwrap() - (-0.12)).abs() < 1e-9);
        assert!(field_as_f64(&v, "alt").is_none());
    }
}
