// ucam-api: Async Rust client for the AXIS VAPIX camera HTTP surface

pub mod auth;
pub mod endpoint;
pub mod error;
pub mod transport;
pub mod vapix;

pub use auth::{AccessLevel, Credentials, resolve_credentials};
pub use endpoint::{DeviceEndpoint, Scheme};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
pub use vapix::{RawResponse, ServerReportMode, VapixClient};
