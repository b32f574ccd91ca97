//! HTTP clients for the external Map of Pi backend and its geo
//! collaborators.
//!
//! [`ApiClient`] wraps the backend REST endpoints (seller discovery, map
//! center, auth). [`IpLocator`] and [`Geocoder`] wrap the keyless
//! IP-geolocation and place-name geocoding services. All transport is JSON
//! over HTTPS; transient failures are retried with exponential backoff.

mod api;
mod error;
mod geocode;
mod ip;
mod retry;

pub use api::ApiClient;
pub use error::ApiError;
pub use geocode::Geocoder;
pub use ip::IpLocator;
