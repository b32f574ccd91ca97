//! Seller-discovery map logic, independent of any rendering library.
//!
//! The pieces compose the way the browser app does, but every seam is
//! explicit: the viewport controller reacts to `on_viewport_settle` calls
//! instead of map-library callbacks, device GPS hides behind the
//! [`GpsProvider`] trait, and all HTTP goes through `pimap-client`.

mod center_picker;
mod markers;
mod notice;
mod resolve;
mod viewport;

pub use center_picker::CenterPicker;
pub use markers::{MarkerStore, MergeOutcome};
pub use notice::{Notice, NoticeBoard, NoticeKind};
pub use resolve::{resolve_origin, GpsError, GpsProvider, NoGps, OriginSource, ResolvedOrigin};
pub use viewport::{FetchTicket, MapView, Phase};
