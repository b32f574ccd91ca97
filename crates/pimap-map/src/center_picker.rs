//! Map-center picker: choose and persist a search or sell origin.
//!
//! A focused flow, decoupled from discovery: no radius math, no seller
//! fetches. The user drags the pin or searches a place name, then saves;
//! the saved coordinate later serves as the search-center fallback tier.

use std::time::Duration;

use pimap_client::{ApiClient, ApiError, Geocoder};
use pimap_core::{MapCenter, MapCenterKind};
use pimap_geo::Coordinate;

use crate::notice::{NoticeBoard, NoticeKind};

pub struct CenterPicker {
    kind: MapCenterKind,
    pin: Coordinate,
    /// Set after a successful save; cleared the moment the pin moves
    /// again, so the confirmation dialog reflects the saved position only.
    saved: bool,
    notices: NoticeBoard,
}

impl CenterPicker {
    /// Start the picker at the previously saved center of `kind`, or at
    /// `fallback` when none is saved (or the load fails — the picker must
    /// open regardless).
    pub async fn load(
        client: &ApiClient,
        kind: MapCenterKind,
        fallback: Coordinate,
        banner_ttl: Duration,
    ) -> Self {
        let pin = match client.fetch_map_center(kind).await {
            Ok(Some(center)) => center,
            Ok(None) => fallback,
            Err(err) => {
                tracing::warn!(error = %err, "map-center load failed; starting at fallback");
                fallback
            }
        };
        Self {
            kind,
            pin,
            saved: false,
            notices: NoticeBoard::new(banner_ttl),
        }
    }

    #[must_use]
    pub fn pin(&self) -> Coordinate {
        self.pin
    }

    #[must_use]
    pub fn kind(&self) -> MapCenterKind {
        self.kind
    }

    /// `true` once the current pin position has been persisted.
    #[must_use]
    pub fn saved(&self) -> bool {
        self.saved
    }

    pub fn notices(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    /// Move the pin to a dragged/clicked position.
    pub fn drag_to(&mut self, coord: Coordinate) {
        self.pin = coord.sanitize();
        self.saved = false;
    }

    /// Move the pin to a geocoded place name. A miss raises a notice and
    /// leaves the pin where it was; returns whether the pin moved.
    pub async fn search(&mut self, geocoder: &Geocoder, place: &str) -> bool {
        match geocoder.search(place).await {
            Ok(Some(coord)) => {
                self.drag_to(coord);
                true
            }
            Ok(None) => {
                self.notices
                    .raise(NoticeKind::Info, format!("No results for \"{place}\"."));
                false
            }
            Err(err) => {
                tracing::warn!(error = %err, place, "geocode failed");
                self.notices
                    .raise(NoticeKind::Error, "Place search failed — please try again.");
                false
            }
        }
    }

    /// Persist the current pin position.
    ///
    /// # Errors
    ///
    /// Propagates the client error after raising a notice, so drivers can
    /// both show the banner and react programmatically.
    pub async fn save(&mut self, client: &ApiClient) -> Result<(), ApiError> {
        let center = MapCenter::new(self.pin, self.kind);
        match client.save_map_center(center).await {
            Ok(()) => {
                self.saved = true;
                tracing::debug!(
                    kind = ?self.kind,
                    lat = self.pin.lat,
                    lng = self.pin.lng,
                    "map center saved"
                );
                Ok(())
            }
            Err(err) => {
                self.notices
                    .raise(NoticeKind::Error, "Could not save your map center.");
                Err(err)
            }
        }
    }
}
