//! Best-effort stream and network diagnostics.
//!
//! Four parameter groups are fetched concurrently. A failed fetch leaves its
//! field empty and records an error; it never aborts the other three.

mod model;

use chrono::Utc;
use strum::{Display, EnumIter};
use tracing::{info, warn};
use ucam_api::VapixClient;

use crate::error::CoreError;
use crate::params::{ParameterStore, ParameterTree};

pub use model::{DiagnosticsReport, NetworkDiagnostics, RtpConfig, RtspConfig, StreamProfile};

/// One independently fetched part of the report, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum Subsystem {
    #[strum(to_string = "RTSP config")]
    Rtsp,
    #[strum(to_string = "RTP config")]
    Rtp,
    #[strum(to_string = "Stream profiles")]
    StreamProfiles,
    #[strum(to_string = "Network config")]
    Network,
}

impl Subsystem {
    /// Parameter group backing this subsystem.
    pub fn group(self) -> &'static str {
        match self {
            Self::Rtsp => "Network.RTSP",
            Self::Rtp => "Network.RTP",
            Self::StreamProfiles => "StreamProfile",
            Self::Network => "Network",
        }
    }
}

/// Composes the four subsystem fetches into one report.
pub struct DiagnosticsAggregator<'a> {
    client: &'a VapixClient,
    store: ParameterStore<'a>,
}

impl<'a> DiagnosticsAggregator<'a> {
    pub fn new(client: &'a VapixClient) -> Self {
        Self {
            client,
            store: ParameterStore::new(client),
        }
    }

    /// Run all four fetches and wait for every outcome.
    pub async fn collect(&self) -> DiagnosticsReport {
        let (rtsp, rtp, profiles, network) = tokio::join!(
            self.fetch(Subsystem::Rtsp, RtspConfig::from_tree),
            self.fetch(Subsystem::Rtp, RtpConfig::from_tree),
            self.fetch(Subsystem::StreamProfiles, StreamProfile::list_from_tree),
            self.fetch(Subsystem::Network, NetworkDiagnostics::from_tree),
        );

        // Errors are recorded in subsystem order, not completion order.
        let mut errors = Vec::new();
        let rtsp = settle(Subsystem::Rtsp, rtsp, &mut errors);
        let rtp = settle(Subsystem::Rtp, rtp, &mut errors);
        let profiles = settle(Subsystem::StreamProfiles, profiles, &mut errors);
        let network = settle(Subsystem::Network, network, &mut errors);

        let endpoint = self.client.endpoint();
        info!(
            camera = %endpoint.identity(),
            failed = errors.len(),
            "diagnostics collected"
        );

        DiagnosticsReport {
            camera: endpoint.identity().to_owned(),
            address: endpoint.address().to_owned(),
            rtsp,
            rtp,
            profiles,
            network,
            errors,
            retrieved_at: Utc::now(),
        }
    }

    async fn fetch<T>(
        &self,
        subsystem: Subsystem,
        map: fn(&ParameterTree) -> T,
    ) -> Result<T, CoreError> {
        let tree = self.store.fetch_group(subsystem.group()).await?;
        Ok(map(&tree))
    }
}

fn settle<T>(
    subsystem: Subsystem,
    outcome: Result<T, CoreError>,
    errors: &mut Vec<String>,
) -> Option<T> {
    match outcome {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(%subsystem, error = %e, "diagnostics fetch failed");
            errors.push(format!("{subsystem}: {e}"));
            None
        }
    }
}
