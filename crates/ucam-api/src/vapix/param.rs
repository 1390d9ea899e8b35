// VAPIX parameter endpoints
//
// Device configuration through the JSON param API:
// `GET /config/rest/param/v2beta[/Group/Sub/Param]`.

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::vapix::client::VapixClient;
use crate::vapix::models::RestEnvelope;

const PARAM_BASE: &str = "config/rest/param/v2beta";

/// Convert a dotted parameter path (`Network.RTSP`) to the REST path form.
pub fn param_path(dotted: &str) -> String {
    let trimmed = dotted.trim_matches('.');
    if trimmed.is_empty() {
        PARAM_BASE.to_owned()
    } else {
        format!("{PARAM_BASE}/{}", trimmed.replace('.', "/"))
    }
}

impl VapixClient {
    /// Fetch the full parameter tree.
    ///
    /// `GET /config/rest/param/v2beta`
    pub async fn get_params(&self) -> Result<Value, Error> {
        debug!("fetching full parameter tree");
        self.get_param_path("").await
    }

    /// Fetch a parameter group or single parameter by dotted path.
    ///
    /// `GET /config/rest/param/v2beta/{Group}/{Sub}`. Both `Network.RTSP`
    /// and `Network/RTSP` are accepted.
    pub async fn get_param_path(&self, path: &str) -> Result<Value, Error> {
        let rest = param_path(&path.replace('/', "."));
        debug!(path = %rest, "fetching parameters");
        let envelope: RestEnvelope = self.get_json(&rest, &[]).await?;
        envelope.into_data()
    }
}
