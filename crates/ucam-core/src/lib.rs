//! Camera diagnostics core between `ucam-api` and the `ucam` CLI.
//!
//! - **[`Camera`]** - Facade owning one [`VapixClient`](ucam_api::VapixClient)
//!   per endpoint and handing out the components below.
//!
//! - **[`ParameterTree`]** / **[`ParameterStore`]** - Device configuration as
//!   a read-only tree of groups and leaves: dotted lookup, substring search,
//!   flattening and group listing.
//!
//! - **[`LogRetriever`]** - Downloads the server report archive, extracts the
//!   system/access/audit members, parses each line and filters by severity.
//!
//! - **[`DiagnosticsAggregator`]** - Fetches RTSP, RTP, stream profile and
//!   network groups concurrently into one best-effort [`DiagnosticsReport`].
//!
//! - **[`LldpClient`]** - LLDP agent status and link neighbours.

pub mod camera;
pub mod diagnostics;
pub mod error;
pub mod lldp;
pub mod logs;
pub mod params;

// ── Primary re-exports ──────────────────────────────────────────────
pub use camera::Camera;
pub use diagnostics::{
    DiagnosticsAggregator, DiagnosticsReport, NetworkDiagnostics, RtpConfig, RtspConfig,
    StreamProfile, Subsystem,
};
pub use error::CoreError;
pub use lldp::{LldpClient, LldpNeighbor, LldpStatus};
pub use logs::{
    LogCategory, LogEntry, LogQuery, LogReport, LogRetriever, LogTimestamp, Severity,
    classify_severity, parse_line,
};
pub use params::{DeviceInfo, ParamNode, ParameterStore, ParameterTree};
