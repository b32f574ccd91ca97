//! Viewport controller: owns the logical map view and reacts to settle
//! events.
//!
//! The controller is deliberately renderer-free. An embedding UI forwards
//! its map library's move/zoom-end events to [`MapView::on_viewport_settle`]
//! and draws whatever [`MapView::markers`] holds afterwards; unit tests
//! drive the same seam directly.
//!
//! Every fetch carries a monotonic sequence number and responses older
//! than the newest applied one are dropped. The browser original had no
//! such gate, so a slow early response could overwrite fresher state
//! during rapid pan/zoom; the gate closes that race.

use std::time::Duration;

use pimap_client::{ApiClient, ApiError, IpLocator};
use pimap_core::{FindMePreference, MapCenterKind, Seller};
use pimap_geo::{
    project, search_radius_km, unproject, Bounds, Coordinate, CITY_ZOOM, WORLD_CENTER, WORLD_ZOOM,
};

use crate::markers::MarkerStore;
use crate::notice::{NoticeBoard, NoticeKind};
use crate::resolve::{resolve_origin, GpsProvider, ResolvedOrigin};

/// Viewport lifecycle. `FetchingMore` from the original design is not a
/// distinct phase: fetches overlap `Ready`, tracked by the in-flight
/// counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    LocatingUser,
    Ready,
}

/// Handle for one issued fetch; returned by [`MapView::begin_fetch`] and
/// redeemed by `apply_fetch`/`apply_search`.
#[derive(Debug, Clone, Copy)]
pub struct FetchTicket {
    seq: u64,
}

impl FetchTicket {
    #[must_use]
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

pub struct MapView {
    phase: Phase,
    center: Coordinate,
    zoom: u8,
    /// Screen size of the embedding viewport in pixels; used for
    /// fit-to-results zoom selection.
    viewport_px: (f64, f64),
    default_radius_km: f64,
    markers: MarkerStore,
    notices: NoticeBoard,
    next_seq: u64,
    applied_seq: u64,
    in_flight: u32,
}

impl MapView {
    #[must_use]
    pub fn new(viewport_px: (f64, f64), default_radius_km: f64, banner_ttl: Duration) -> Self {
        Self {
            phase: Phase::Initializing,
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
            viewport_px,
            default_radius_km,
            markers: MarkerStore::new(),
            notices: NoticeBoard::new(banner_ttl),
            next_seq: 0,
            applied_seq: 0,
            in_flight: 0,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn center(&self) -> Coordinate {
        self.center
    }

    #[must_use]
    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    #[must_use]
    pub fn markers(&self) -> &MarkerStore {
        &self.markers
    }

    pub fn notices(&mut self) -> &mut NoticeBoard {
        &mut self.notices
    }

    /// `true` while at least one fetch is awaiting a response.
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    // -----------------------------------------------------------------------
    // Pure state machine
    // -----------------------------------------------------------------------

    pub fn begin_locating(&mut self) {
        self.phase = Phase::LocatingUser;
    }

    /// Apply a resolved origin: sets center and zoom, raises any notice
    /// the resolver produced, and enters `Ready`.
    pub fn set_origin(&mut self, origin: ResolvedOrigin) {
        tracing::debug!(
            source = ?origin.source,
            lat = origin.center.lat,
            lng = origin.center.lng,
            zoom = origin.zoom,
            "origin resolved"
        );
        self.center = origin.center;
        self.zoom = origin.zoom;
        if let Some(message) = origin.notice {
            self.notices.raise(NoticeKind::Warning, message);
        }
        self.phase = Phase::Ready;
    }

    /// Issue a sequence number for a fetch about to go out.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.next_seq += 1;
        self.in_flight += 1;
        FetchTicket { seq: self.next_seq }
    }

    /// Apply a bounds-driven fetch result: merge into the marker store.
    ///
    /// Returns `false` when nothing was applied — the response was stale
    /// (an older request finishing after a newer one) or an error. Errors
    /// raise a notice and leave existing markers untouched.
    pub fn apply_fetch(&mut self, ticket: FetchTicket, result: Result<Vec<Seller>, ApiError>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(sellers) => {
                if ticket.seq <= self.applied_seq {
                    tracing::debug!(
                        seq = ticket.seq,
                        applied_seq = self.applied_seq,
                        "dropping stale seller fetch response"
                    );
                    return false;
                }
                let outcome = self.markers.merge(sellers);
                self.applied_seq = ticket.seq;
                tracing::debug!(
                    seq = ticket.seq,
                    added = outcome.added,
                    updated = outcome.updated,
                    total = self.markers.len(),
                    "merged seller fetch"
                );
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "seller fetch failed; keeping existing markers");
                self.notices
                    .raise(NoticeKind::Error, "Could not load sellers for this area.");
                false
            }
        }
    }

    /// Apply a text-search result: replace the marker store and fit the
    /// view to the result set. Shares the sequence space with bounds
    /// fetches, so a stale search result is dropped the same way.
    pub fn apply_search(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Seller>, ApiError>,
    ) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        match result {
            Ok(sellers) => {
                if ticket.seq <= self.applied_seq {
                    tracing::debug!(seq = ticket.seq, "dropping stale search response");
                    return false;
                }
                self.applied_seq = ticket.seq;
                if sellers.is_empty() {
                    self.notices
                        .raise(NoticeKind::Info, "No sellers matched your search.");
                }
                let coords: Vec<Coordinate> =
                    sellers.iter().map(|s| s.coordinates).collect();
                self.markers.replace(sellers);
                if let Some(bounds) = Bounds::around(&coords) {
                    self.fit_to(&bounds);
                }
                true
            }
            Err(err) => {
                tracing::warn!(error = %err, "seller search failed");
                self.notices
                    .raise(NoticeKind::Error, "Search failed — please try again.");
                false
            }
        }
    }

    /// Re-center on a clicked marker without changing zoom.
    ///
    /// The pan happens in pixel space: project, shift by the marker's
    /// anchor offset so the graphic (not its tip) lands at the viewport
    /// center, unproject. Returns `false` for an unknown seller id.
    pub fn focus_seller(&mut self, seller_id: &str, marker_anchor_px: (f64, f64)) -> bool {
        let Some(seller) = self.markers.get(seller_id) else {
            tracing::debug!(seller_id, "focus requested for unknown seller");
            return false;
        };
        let mut point = project(seller.coordinates, self.zoom);
        point.x += marker_anchor_px.0;
        point.y += marker_anchor_px.1;
        self.center = unproject(point, self.zoom);
        true
    }

    /// Move the view to contain `bounds`: center on its midpoint at the
    /// highest zoom (capped at city level) whose projected extent fits the
    /// viewport.
    fn fit_to(&mut self, bounds: &Bounds) {
        self.center = bounds.center();
        self.zoom = fit_zoom(bounds, self.viewport_px);
    }

    // -----------------------------------------------------------------------
    // Async drivers
    // -----------------------------------------------------------------------

    /// Resolve the starting origin (`Initializing → LocatingUser → Ready`)
    /// and issue the initial seller fetch at the default radius.
    pub async fn locate(
        &mut self,
        pref: FindMePreference,
        gps: &dyn GpsProvider,
        gps_timeout: Duration,
        ip: &IpLocator,
        client: &ApiClient,
    ) {
        self.begin_locating();
        let resolved = resolve_origin(pref, gps, gps_timeout, ip.lookup(), async {
            client
                .fetch_map_center(MapCenterKind::Search)
                .await
                .unwrap_or_else(|err| {
                    tracing::debug!(error = %err, "search-center load failed");
                    None
                })
        })
        .await;
        self.set_origin(resolved);

        let origin = self.center;
        let radius = self.default_radius_km;
        let ticket = self.begin_fetch();
        let result = client.fetch_sellers_near(origin, radius, None).await;
        self.apply_fetch(ticket, result);
    }

    /// React to the viewport settling after a pan or zoom: derive the
    /// effective radius from the visible bounds and merge in any sellers
    /// newly in range.
    ///
    /// The radius is half the visible diagonal, floored at the default
    /// discovery radius: zooming in far enough shrinks the diagonal below
    /// it, and a tighter view should not hide sellers the initial fetch
    /// already surfaced.
    pub async fn on_viewport_settle(&mut self, client: &ApiClient, bounds: Bounds) {
        self.center = bounds.center();
        let radius = search_radius_km(&bounds).max(self.default_radius_km);
        let ticket = self.begin_fetch();
        let result = client.fetch_sellers_near(bounds.center(), radius, None).await;
        self.apply_fetch(ticket, result);
    }

    /// Run an explicit text search, replacing the marker set with the
    /// server's results.
    pub async fn search(&mut self, client: &ApiClient, query: &str) {
        let origin = self.center;
        let radius = self.default_radius_km;
        let ticket = self.begin_fetch();
        let result = client.fetch_sellers_near(origin, radius, Some(query)).await;
        self.apply_search(ticket, result);
    }
}

/// Highest zoom (capped at [`CITY_ZOOM`]) at which the projected bounds fit
/// inside the viewport.
fn fit_zoom(bounds: &Bounds, viewport_px: (f64, f64)) -> u8 {
    for zoom in (WORLD_ZOOM..=CITY_ZOOM).rev() {
        let ne = project(bounds.ne, zoom);
        let sw = project(bounds.sw, zoom);
        let width = (ne.x - sw.x).abs();
        let height = (ne.y - sw.y).abs();
        if width <= viewport_px.0 && height <= viewport_px.1 {
            return zoom;
        }
    }
    WORLD_ZOOM
}

#[cfg(test)]
#[path = "viewport_test.rs"]
mod tests;
