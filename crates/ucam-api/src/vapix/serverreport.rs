// VAPIX server report endpoint
//
// `GET /axis-cgi/serverreport.cgi` returns either a plain-text summary or a
// tar archive with the device's log files.

use bytes::Bytes;
use serde::Serialize;
use tracing::debug;

use crate::error::Error;
use crate::vapix::client::VapixClient;

const SERVER_REPORT_PATH: &str = "axis-cgi/serverreport.cgi";

/// Output format of the server report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ServerReportMode {
    /// Single text document.
    Text,
    /// Tar archive of the core log files.
    Tar,
    /// Tar archive of the core logs plus a configuration snapshot.
    #[default]
    TarAll,
}

impl ServerReportMode {
    /// Value of the `mode` query parameter; text mode sends none.
    pub fn query_value(self) -> Option<&'static str> {
        match self {
            Self::Text => None,
            Self::Tar => Some("tar"),
            Self::TarAll => Some("tar_all"),
        }
    }
}

impl VapixClient {
    /// Download the server report.
    ///
    /// `GET /axis-cgi/serverreport.cgi[?mode=tar|tar_all]`
    pub async fn get_server_report(&self, mode: ServerReportMode) -> Result<Bytes, Error> {
        debug!(%mode, "fetching server report");
        let resp = match mode.query_value() {
            Some(value) => self.get(SERVER_REPORT_PATH, &[("mode", value)]).await?,
            None => self.get(SERVER_REPORT_PATH, &[]).await?,
        };
        Ok(resp.body)
    }
}
