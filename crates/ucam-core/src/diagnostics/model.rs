// ── Diagnostics models ──
//
// Typed views over parameter groups. Missing or unparseable leaves take the
// device defaults, so a sparse group still maps.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::params::{ParamNode, ParameterTree};

fn text(tree: &ParameterTree, path: &str) -> Option<String> {
    tree.get(path).and_then(ParamNode::as_str_lossy)
}

fn flag(tree: &ParameterTree, path: &str) -> Option<bool> {
    tree.get(path).and_then(ParamNode::as_bool)
}

fn number(tree: &ParameterTree, path: &str) -> Option<u64> {
    tree.get(path).and_then(ParamNode::as_u64)
}

/// RTSP server settings (`Network.RTSP`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RtspConfig {
    pub enabled: bool,
    pub port: u64,
    pub authentication: String,
    pub timeout_secs: u64,
    pub allow_path_arguments: bool,
}

impl RtspConfig {
    pub fn from_tree(tree: &ParameterTree) -> Self {
        Self {
            enabled: flag(tree, "Enabled").unwrap_or(true),
            port: number(tree, "Port").unwrap_or(554),
            authentication: text(tree, "Authentication").unwrap_or_else(|| "digest".into()),
            timeout_secs: number(tree, "Timeout").unwrap_or(60),
            allow_path_arguments: flag(tree, "AllowPathArguments").unwrap_or(true),
        }
    }
}

/// RTP port range and multicast settings (`Network.RTP`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RtpConfig {
    pub start_port: u64,
    pub end_port: u64,
    pub multicast_enabled: bool,
    pub multicast_address: String,
}

impl RtpConfig {
    pub fn from_tree(tree: &ParameterTree) -> Self {
        Self {
            start_port: number(tree, "StartPort").unwrap_or(50000),
            end_port: number(tree, "EndPort").unwrap_or(50999),
            multicast_enabled: flag(tree, "Multicast.Enabled").unwrap_or(false),
            multicast_address: text(tree, "Multicast.Address").unwrap_or_default(),
        }
    }
}

/// One stream profile from the `StreamProfile` group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreamProfile {
    pub name: String,
    pub description: String,
    pub video_codec: String,
    pub resolution: String,
    pub fps: u64,
    /// kbit/s, 0 for variable bitrate.
    pub bitrate: u64,
    pub gop_length: u64,
    pub compression: u64,
    pub parameters: Value,
}

impl StreamProfile {
    fn from_node(name: &str, node: &ParamNode) -> Self {
        let text = |path: &str| node.get(path).and_then(ParamNode::as_str_lossy);
        let number = |path: &str| node.get(path).and_then(ParamNode::as_u64);
        Self {
            name: name.to_owned(),
            description: text("Description").unwrap_or_default(),
            video_codec: text("VideoCodec").unwrap_or_else(|| "H.264".into()),
            resolution: text("Resolution").unwrap_or_default(),
            fps: number("Fps").unwrap_or(30),
            bitrate: number("Bitrate").unwrap_or(0),
            gop_length: number("GOPLength").unwrap_or(32),
            compression: number("Compression").unwrap_or(30),
            parameters: node
                .get("Parameters")
                .map_or_else(|| Value::Object(serde_json::Map::new()), ParamNode::to_value),
        }
    }

    /// Every sub-group of the `StreamProfile` tree is one profile; leaves at
    /// the top level (counters, limits) are skipped.
    pub fn list_from_tree(tree: &ParameterTree) -> Vec<Self> {
        tree.node()
            .as_node()
            .into_iter()
            .flatten()
            .filter(|(_, node)| !node.is_leaf())
            .map(|(name, node)| Self::from_node(name, node))
            .collect()
    }
}

/// Addressing summary from the `Network` group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDiagnostics {
    pub hostname: String,
    pub dhcp_enabled: bool,
    pub ip_address: String,
    pub subnet_mask: String,
    pub gateway: String,
    pub dns_servers: Vec<String>,
    pub mtu: u64,
    pub ipv6_enabled: bool,
}

impl NetworkDiagnostics {
    pub fn from_tree(tree: &ParameterTree) -> Self {
        Self {
            hostname: text(tree, "Bonjour.FriendlyName")
                .or_else(|| text(tree, "HostName"))
                .unwrap_or_default(),
            dhcp_enabled: flag(tree, "Interface.I0.DHCPEnabled").unwrap_or(true),
            ip_address: text(tree, "Interface.I0.IPAddress").unwrap_or_default(),
            subnet_mask: text(tree, "Interface.I0.SubnetMask").unwrap_or_default(),
            gateway: text(tree, "Interface.I0.Gateway").unwrap_or_default(),
            dns_servers: tree
                .get("DNSServers")
                .and_then(ParamNode::as_text_list)
                .unwrap_or_default(),
            mtu: number(tree, "Interface.I0.MTU").unwrap_or(1500),
            ipv6_enabled: flag(tree, "IPv6.Enabled").unwrap_or(false),
        }
    }
}

/// Best-effort stream and network report.
///
/// A field is `None` exactly when its fetch failed; the failure is then
/// listed in `errors` as `"<subsystem>: <error>"`, in subsystem order.
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticsReport {
    pub camera: String,
    pub address: String,
    pub rtsp: Option<RtspConfig>,
    pub rtp: Option<RtpConfig>,
    pub profiles: Option<Vec<StreamProfile>>,
    pub network: Option<NetworkDiagnostics>,
    pub errors: Vec<String>,
    pub retrieved_at: DateTime<Utc>,
}

impl DiagnosticsReport {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn tree(root: &str, value: Value) -> ParameterTree {
        ParameterTree::from_value(root, value).unwrap()
    }

    #[test]
    fn rtsp_reads_vapix_strings() {
        let rtsp = RtspConfig::from_tree(&tree(
            "RTSP",
            json!({ "Enabled": "no", "Port": "8554", "Authentication": "basic", "Timeout": 90 }),
        ));
        assert_eq!(
            rtsp,
            RtspConfig {
                enabled: false,
                port: 8554,
                authentication: "basic".into(),
                timeout_secs: 90,
                allow_path_arguments: true,
            }
        );
    }

    #[test]
    fn empty_groups_take_defaults() {
        let rtp = RtpConfig::from_tree(&tree("RTP", json!({})));
        assert_eq!((rtp.start_port, rtp.end_port), (50000, 50999));
        assert!(!rtp.multicast_enabled);

        let net = NetworkDiagnostics::from_tree(&tree("Network", json!({})));
        assert_eq!(net.mtu, 1500);
        assert!(net.dhcp_enabled);
        assert!(net.dns_servers.is_empty());
    }

    #[test]
    fn profiles_are_sub_groups_in_order() {
        let profiles = StreamProfile::list_from_tree(&tree(
            "StreamProfile",
            json!({
                "MaxGroups": "26",
                "Quality": {
                    "Description": "Best quality",
                    "Resolution": "1920x1080",
                    "Fps": "25",
                    "Parameters": { "videocodec": "h265" }
                },
                "Bandwidth": { "VideoCodec": "H.265", "Bitrate": 512 }
            }),
        ));
        let names: Vec<&str> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Quality", "Bandwidth"]);
        assert_eq!(profiles[0].fps, 25);
        assert_eq!(profiles[0].video_codec, "H.264");
        assert_eq!(profiles[0].parameters, json!({ "videocodec": "h265" }));
        assert_eq!(profiles[1].bitrate, 512);
        assert_eq!(profiles[1].gop_length, 32);
    }

    #[test]
    fn network_reads_interface_and_dns() {
        let net = NetworkDiagnostics::from_tree(&tree(
            "Network",
            json!({
                "Bonjour": { "FriendlyName": "lobby-cam" },
                "Interface": { "I0": {
                    "DHCPEnabled": "no",
                    "IPAddress": "10.0.0.20",
                    "SubnetMask": "255.255.255.0",
                    "Gateway": "10.0.0.1",
                    "MTU": "9000"
                }},
                "DNSServers": ["10.0.0.1"],
                "IPv6": { "Enabled": "yes" }
            }),
        ));
        assert_eq!(net.hostname, "lobby-cam");
        assert!(!net.dhcp_enabled);
        assert_eq!(net.ip_address, "10.0.0.20");
        assert_eq!(net.mtu, 9000);
        assert_eq!(net.dns_servers, vec!["10.0.0.1"]);
        assert!(net.ipv6_enabled);
    }
}
