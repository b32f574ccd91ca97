//! Domain types for seller discovery.

use serde::{Deserialize, Serialize};

use pimap_geo::Coordinate;

/// A seller as returned by the discovery endpoint and rendered as a map
/// marker. Lives only in memory: fetched per viewport query, merged into
/// the marker store keyed by `seller_id`, discarded on a new search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seller {
    /// Backend-assigned unique key; dedup is last-write-wins on this.
    pub seller_id: String,
    pub name: String,
    pub image: Option<String>,
    #[serde(default)]
    pub seller_type: SellerType,
    pub coordinates: Coordinate,
    /// Trust meter value, `0.0..=1.0` on the wire.
    pub trust_meter_rating: f64,
    pub average_rating: Option<f64>,
    #[serde(default)]
    pub fulfillment_method: FulfillmentMethod,
    pub fulfillment_description: Option<String>,
    pub description: Option<String>,
}

/// Extended seller view from `GET /sellers/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerDetail {
    #[serde(flatten)]
    pub seller: Seller,
    pub address: Option<String>,
    /// Owner's public profile name, when the backend exposes one.
    pub owner_username: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SellerType {
    #[serde(rename = "activeSeller")]
    #[default]
    Active,
    #[serde(rename = "inactiveSeller")]
    Inactive,
    #[serde(rename = "testSeller")]
    Test,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FulfillmentMethod {
    #[serde(rename = "Collection by buyer")]
    #[default]
    CollectionByBuyer,
    #[serde(rename = "Delivered to buyer")]
    DeliveredToBuyer,
}

/// Which origin-resolution strategy the user has asked for.
///
/// Read-only to this subsystem; set via user settings upstream. The wire
/// spellings (`auto`, `deviceGPS`, `searchCenter`) are the backend's
/// historical forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FindMePreference {
    #[serde(rename = "auto")]
    #[default]
    Auto,
    #[serde(rename = "deviceGPS", alias = "gps", alias = "GPS")]
    Gps,
    #[serde(rename = "searchCenter", alias = "searchCentre", alias = "search_center")]
    SearchCentre,
}

impl std::str::FromStr for FindMePreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "gps" | "deviceGPS" => Ok(Self::Gps),
            "search-centre" | "searchCenter" | "searchCentre" => Ok(Self::SearchCentre),
            other => Err(format!(
                "unknown find-me preference '{other}' (expected auto, gps, or search-centre)"
            )),
        }
    }
}

/// Whether a persisted map center is the buyer's search origin or the
/// seller's sell location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapCenterKind {
    Search,
    Sell,
}

impl std::str::FromStr for MapCenterKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Self::Search),
            "sell" => Ok(Self::Sell),
            other => Err(format!(
                "unknown map-center kind '{other}' (expected search or sell)"
            )),
        }
    }
}

/// A persisted map center, owned by the backend. This subsystem reads it
/// as a fallback origin and writes it from the center-picker save action.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "type")]
    pub kind: MapCenterKind,
}

impl MapCenter {
    /// Build a map center from an already-sanitized coordinate.
    #[must_use]
    pub fn new(coord: Coordinate, kind: MapCenterKind) -> Self {
        Self {
            latitude: coord.lat,
            longitude: coord.lng,
            kind,
        }
    }

    #[must_use]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::sanitized(self.latitude, self.longitude)
    }
}
