// ── Camera facade ──
//
// One dispatcher per endpoint; every component borrows it.

use ucam_api::{DeviceEndpoint, TransportConfig, VapixClient};

use crate::diagnostics::{DiagnosticsAggregator, DiagnosticsReport};
use crate::error::CoreError;
use crate::lldp::LldpClient;
use crate::logs::LogRetriever;
use crate::params::ParameterStore;

/// A single camera and the operations available on it.
pub struct Camera {
    client: VapixClient,
}

impl Camera {
    /// Build the dispatcher for `endpoint`.
    pub fn new(endpoint: DeviceEndpoint, transport: &TransportConfig) -> Result<Self, CoreError> {
        Ok(Self {
            client: VapixClient::new(endpoint, transport)?,
        })
    }

    pub fn from_client(client: VapixClient) -> Self {
        Self { client }
    }

    pub fn endpoint(&self) -> &DeviceEndpoint {
        self.client.endpoint()
    }

    pub fn client(&self) -> &VapixClient {
        &self.client
    }

    pub fn params(&self) -> ParameterStore<'_> {
        ParameterStore::new(&self.client)
    }

    pub fn logs(&self) -> LogRetriever<'_> {
        LogRetriever::new(&self.client)
    }

    pub fn lldp(&self) -> LldpClient<'_> {
        LldpClient::new(&self.client)
    }

    /// Collect the stream and network diagnostics report.
    pub async fn diagnostics(&self) -> DiagnosticsReport {
        DiagnosticsAggregator::new(&self.client).collect().await
    }
}
