// VAPIX LLDP endpoints
//
// `GET /config/rest/lldp/v1` (local status) and `.../neighbors`.
// Firmware versions disagree on the envelope, so these return the raw JSON
// and leave shape normalisation to `ucam-core`.

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::vapix::client::VapixClient;

const LLDP_BASE: &str = "config/rest/lldp/v1";

impl VapixClient {
    /// Raw LLDP status document.
    pub async fn get_lldp_status(&self) -> Result<Value, Error> {
        debug!("fetching LLDP status");
        self.get_json(LLDP_BASE, &[]).await
    }

    /// Raw LLDP neighbors document.
    pub async fn get_lldp_neighbors(&self) -> Result<Value, Error> {
        debug!("fetching LLDP neighbors");
        self.get_json(&format!("{LLDP_BASE}/neighbors"), &[]).await
    }
}
