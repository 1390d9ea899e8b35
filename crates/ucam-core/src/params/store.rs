// ── Parameter store ──
//
// Fetches parameter groups through the dispatcher and decodes them into
// `ParameterTree`s. All network failures propagate unchanged.

use serde_json::Value;
use tracing::{debug, warn};
use ucam_api::VapixClient;

use super::device::DeviceInfo;
use super::tree::ParameterTree;
use crate::error::CoreError;

/// Read access to a device's configuration.
pub struct ParameterStore<'a> {
    client: &'a VapixClient,
}

impl<'a> ParameterStore<'a> {
    pub fn new(client: &'a VapixClient) -> Self {
        Self { client }
    }

    /// The full configuration, rooted at `root`.
    pub async fn fetch_all(&self) -> Result<ParameterTree, CoreError> {
        let value = self.client.get_params().await?;
        let tree = ParameterTree::from_value(ParameterTree::DEFAULT_ROOT, value)?;
        debug!(
            groups = tree.groups().len(),
            leaves = tree.leaf_count(),
            "fetched full configuration"
        );
        Ok(tree)
    }

    /// One group (`Network`, `Network.RTSP`, `Network/RTSP`), rooted at its
    /// last segment.
    pub async fn fetch_group(&self, group: &str) -> Result<ParameterTree, CoreError> {
        let dotted = normalize(group);
        if dotted.is_empty() {
            return self.fetch_all().await;
        }
        let root = dotted.rsplit('.').next().unwrap_or(&dotted).to_owned();
        let value = self.client.get_param_path(&dotted).await?;
        ParameterTree::from_value(root, value)
    }

    /// A single parameter or sub-tree as raw JSON.
    pub async fn fetch_parameter(&self, path: &str) -> Result<Value, CoreError> {
        let dotted = normalize(path);
        if dotted.is_empty() {
            return Err(CoreError::PathNotFound {
                path: path.to_owned(),
            });
        }
        Ok(self.client.get_param_path(&dotted).await?)
    }

    /// Product identity from the `Brand` group.
    pub async fn device_info(&self) -> Result<DeviceInfo, CoreError> {
        let tree = self.fetch_group("Brand").await?;
        Ok(DeviceInfo::from_tree(&tree))
    }

    /// Image and video source configuration.
    pub async fn image_config(&self) -> Result<ParameterTree, CoreError> {
        self.fetch_group("Image").await
    }

    /// Stream cache configuration.
    pub async fn stream_cache(&self) -> Result<ParameterTree, CoreError> {
        self.fetch_group("StreamCache").await
    }

    /// QoS configuration. Many firmwares lack the group, so any failure
    /// yields an empty tree.
    pub async fn qos_config(&self) -> ParameterTree {
        match self.fetch_group("Network.QoS").await {
            Ok(tree) => tree,
            Err(e) => {
                warn!(error = %e, "QoS configuration unavailable");
                ParameterTree::empty("QoS")
            }
        }
    }
}

fn normalize(path: &str) -> String {
    path.replace('/', ".").trim_matches('.').to_owned()
}

#[cfg(test)]
mod tests {
    use super::normalize;

    #[test]
    fn slashes_and_stray_dots_are_normalized() {
        assert_eq!(normalize("Network/RTSP"), "Network.RTSP");
        assert_eq!(normalize(".Brand."), "Brand");
        assert_eq!(normalize("/"), "");
    }
}
