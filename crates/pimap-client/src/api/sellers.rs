//! Seller discovery endpoints.

use serde_json::json;

use pimap_core::{Seller, SellerDetail};
use pimap_geo::Coordinate;

use super::ApiClient;
use crate::error::ApiError;
use crate::retry::retry_with_backoff;

impl ApiClient {
    /// Fetch sellers whose registered sell location falls within
    /// `radius_km` of `origin`, optionally filtered by a free-text query.
    ///
    /// `POST /sellers/fetch`. Records the backend returns without a usable
    /// coordinate pair are skipped with a debug log rather than failing
    /// the whole fetch; a map marker without a location cannot render
    /// anyway.
    ///
    /// # Errors
    ///
    /// - [`ApiError::RateLimited`] — HTTP 429 after all retries exhausted.
    /// - [`ApiError::NotFound`] — HTTP 404 (not retried).
    /// - [`ApiError::UnexpectedStatus`] — any other non-2xx status.
    /// - [`ApiError::Http`] — network or TLS failure after all retries.
    /// - [`ApiError::Deserialize`] — body is not a JSON array.
    pub async fn fetch_sellers_near(
        &self,
        origin: Coordinate,
        radius_km: f64,
        query: Option<&str>,
    ) -> Result<Vec<Seller>, ApiError> {
        let url = self.endpoint("/sellers/fetch");
        let mut body = json!({
            "origin": { "lat": origin.lat, "lng": origin.lng },
            "radius": radius_km,
        });
        if let Some(q) = query {
            body["query"] = json!(q);
        }

        let raw: Vec<serde_json::Value> =
            retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
                let url = url.clone();
                let body = body.clone();
                async move {
                    let response = self
                        .authorize(self.client.post(&url).json(&body))
                        .send()
                        .await?;
                    let response = Self::check_status(response, &url)?;
                    Self::parse_json(response, "sellers/fetch response").await
                }
            })
            .await?;

        let total = raw.len();
        let sellers: Vec<Seller> = raw.iter().filter_map(seller_from_value).collect();
        if sellers.len() < total {
            tracing::debug!(
                url,
                total,
                skipped = total - sellers.len(),
                "dropped seller records with unusable coordinates"
            );
        }

        Ok(sellers)
    }

    /// Fetch the extended view of one seller.
    ///
    /// `GET /sellers/:id`.
    ///
    /// # Errors
    ///
    /// Same taxonomy as [`ApiClient::fetch_sellers_near`]; a missing
    /// seller surfaces as [`ApiError::NotFound`].
    pub async fn fetch_seller(&self, seller_id: &str) -> Result<SellerDetail, ApiError> {
        let url = self.endpoint(&format!("/sellers/{seller_id}"));

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                let response = self.authorize(self.client.get(&url)).send().await?;
                let response = Self::check_status(response, &url)?;
                Self::parse_json(response, "seller detail response").await
            }
        })
        .await
    }
}

/// Leniently parse one seller record.
///
/// The backend has produced two coordinate shapes over time: a
/// `{lat, lng}` literal under `coordinates`, and a GeoJSON
/// `sell_map_center.coordinates` array in `[lng, lat]` order. Accept both;
/// reject records where neither yields a finite pair.
fn seller_from_value(value: &serde_json::Value) -> Option<Seller> {
    let coordinates = coordinate_from_value(value)?;

    let seller_id = value
        .get("seller_id")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())?
        .to_owned();
    let name = value
        .get("name")
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?
        .to_owned();

    Some(Seller {
        seller_id,
        name,
        image: value
            .get("image")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        seller_type: value
            .get("seller_type")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default(),
        coordinates,
        trust_meter_rating: value
            .get("trust_meter_rating")
            .and_then(number_or_string)
            .unwrap_or(0.0),
        average_rating: value.get("average_rating").and_then(number_or_string),
        fulfillment_method: value
            .get("fulfillment_method")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default(),
        fulfillment_description: value
            .get("fulfillment_description")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
        description: value
            .get("description")
            .and_then(serde_json::Value::as_str)
            .map(str::to_owned),
    })
}

fn coordinate_from_value(value: &serde_json::Value) -> Option<Coordinate> {
    if let Some(obj) = value.get("coordinates") {
        let lat = obj.get("lat").and_then(number_or_string);
        let lng = obj.get("lng").and_then(number_or_string);
        if let (Some(lat), Some(lng)) = (lat, lng) {
            if lat.is_finite() && lng.is_finite() {
                return Some(Coordinate::sanitized(lat, lng));
            }
        }
    }

    let point = value.get("sell_map_center")?.get("coordinates")?;
    let pair = point.as_array()?;
    let lng = pair.first().and_then(number_or_string)?;
    let lat = pair.get(1).and_then(number_or_string)?;
    if lat.is_finite() && lng.is_finite() {
        Some(Coordinate::sanitized(lat, lng))
    } else {
        None
    }
}

fn number_or_string(value: &serde_json::Value) -> Option<f64> {
    value
        .as_f64()
        .or_else(|| value.as_str().and_then(|s| s.parse::<f64>().ok()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_literal_coordinates() {
        let value = json!({
            "seller_id": "S1",
            "name": "Corner Stall",
            "coordinates": {"lat": 6.5, "lng": 3.4},
            "trust_meter_rating": 0.8
        });
        let seller = seller_from_value(&value).unwrap();
        assert_eq!(seller.seller_id, "S1");
        assert!((seller.coordinates.lat - 6.5).abs() < 1e-9);
    }

    #[test]
    fn parses_geojson_sell_map_center() {
        let value = json!({
            "seller_id": "S2",
            "name": "Pi Bakery",
            "sell_map_center": {"type": "Point", "coordinates": [3.4, 6.5]},
            "trust_meter_rating": "0.6"
        });
        let seller = seller_from_value(&value).unwrap();
        assert!((seller.coordinates.lat - 6.5).abs() < 1e-9);
        assert!((seller.coordinates.lng - 3.4).abs() < 1e-9);
        assert!((seller.trust_meter_rating - 0.6).abs() < 1e-9);
    }

    #[test]
    fn skips_record_without_coordinates() {
        let value = json!({"seller_id": "S3", "name": "Nowhere"});
        assert!(seller_from_value(&value).is_none());
    }

    #[test]
    fn skips_record_with_blank_id() {
        let value = json!({
            "seller_id": "  ",
            "name": "Ghost",
            "coordinates": {"lat": 1.0, "lng": 1.0}
        });
        assert!(seller_from_value(&value).is_none());
    }

    #[test]
    fn out_of_range_coordinates_are_sanitized() {
        let value = json!({
            "seller_id": "S4",
            "name": "Edge Case",
            "coordinates": {"lat": 95.0, "lng": 181.0}
        });
        let seller = seller_from_value(&value).unwrap();
        assert_eq!(seller.coordinates.lat, 90.0);
        assert_eq!(seller.coordinates.lng, -179.0);
    }
}
