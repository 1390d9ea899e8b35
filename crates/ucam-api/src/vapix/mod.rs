// VAPIX client modules
//
// Hand-written client for the camera's VAPIX HTTP surface: CGI endpoints
// under `/axis-cgi/` and the JSON REST APIs under `/config/rest/`.

pub mod client;
pub mod lldp;
pub mod models;
pub mod param;
pub mod serverreport;

pub use client::{RawResponse, VapixClient};
pub use serverreport::ServerReportMode;
