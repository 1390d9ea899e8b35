//! Diagnostics command handler.

use serde::Serialize;
use serde_json::Value;
use tracing::warn;
use ucam_core::{Camera, DiagnosticsReport, ParameterTree};

use crate::cli::{DiagnosticsArgs, GlobalOpts};
use crate::error::CliError;
use crate::output::{self, yes_no};

/// Report plus the optional image, stream cache and QoS groups.
#[derive(Serialize)]
struct DiagnosticsOutput {
    #[serde(flatten)]
    report: DiagnosticsReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    extra: Option<ExtraGroups>,
}

#[derive(Serialize)]
struct ExtraGroups {
    image: Option<Value>,
    stream_cache: Option<Value>,
    qos: Value,
}

pub async fn handle(
    camera: &Camera,
    args: DiagnosticsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let mut report = camera.diagnostics().await;

    let extra = if args.extra {
        let store = camera.params();
        let (image, stream_cache, qos) =
            tokio::join!(store.image_config(), store.stream_cache(), store.qos_config());

        let mut keep = |label: &str, result: Result<ParameterTree, ucam_core::CoreError>| {
            result
                .map(|tree| tree.node().to_value())
                .map_err(|e| {
                    warn!(group = label, error = %e, "optional group unavailable");
                    report.errors.push(format!("{label}: {e}"));
                })
                .ok()
        };
        let image = keep("Image config", image);
        let stream_cache = keep("Stream cache", stream_cache);
        Some(ExtraGroups {
            image,
            stream_cache,
            qos: qos.node().to_value(),
        })
    } else {
        None
    };

    let data = DiagnosticsOutput { report, extra };
    let out = output::render(global.output, &data, render_plain)?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn render_plain(data: &DiagnosticsOutput) -> String {
    let report = &data.report;
    let mut sections = vec![output::detail(&[
        ("Camera", report.camera.clone()),
        ("Address", report.address.clone()),
        ("Retrieved", report.retrieved_at.to_rfc3339()),
    ])];

    sections.push(section(
        "RTSP",
        report.rtsp.as_ref().map(|rtsp| {
            output::detail(&[
                ("Enabled", yes_no(rtsp.enabled)),
                ("Port", rtsp.port.to_string()),
                ("Authentication", rtsp.authentication.clone()),
                ("Timeout", format!("{}s", rtsp.timeout_secs)),
                ("Path arguments", yes_no(rtsp.allow_path_arguments)),
            ])
        }),
    ));

    sections.push(section(
        "RTP",
        report.rtp.as_ref().map(|rtp| {
            output::detail(&[
                ("Ports", format!("{}-{}", rtp.start_port, rtp.end_port)),
                ("Multicast", yes_no(rtp.multicast_enabled)),
                ("Multicast address", rtp.multicast_address.clone()),
            ])
        }),
    ));

    sections.push(section(
        "Stream profiles",
        report.profiles.as_ref().map(|profiles| {
            if profiles.is_empty() {
                return "(none)".to_owned();
            }
            profiles
                .iter()
                .map(|p| {
                    let bitrate = if p.bitrate == 0 {
                        "VBR".to_owned()
                    } else {
                        format!("{} kbit/s", p.bitrate)
                    };
                    format!(
                        "{}  {} {} {}fps {bitrate} gop={}",
                        p.name, p.video_codec, p.resolution, p.fps, p.gop_length
                    )
                })
                .collect::<Vec<_>>()
                .join("\n")
        }),
    ));

    sections.push(section(
        "Network",
        report.network.as_ref().map(|net| {
            output::detail(&[
                ("Hostname", net.hostname.clone()),
                ("DHCP", yes_no(net.dhcp_enabled)),
                ("IP address", net.ip_address.clone()),
                ("Subnet mask", net.subnet_mask.clone()),
                ("Gateway", net.gateway.clone()),
                ("DNS", net.dns_servers.join(", ")),
                ("MTU", net.mtu.to_string()),
                ("IPv6", yes_no(net.ipv6_enabled)),
            ])
        }),
    ));

    if let Some(ref extra) = data.extra {
        for (title, group) in [("Image", &extra.image), ("Stream cache", &extra.stream_cache)] {
            sections.push(section(title, group.as_ref().map(group_lines)));
        }
        sections.push(section("QoS", Some(group_lines(&extra.qos))));
    }

    if !report.errors.is_empty() {
        sections.push(format!("[Errors]\n{}", report.errors.join("\n")));
    }

    sections.join("\n\n")
}

fn section(title: &str, body: Option<String>) -> String {
    format!("[{title}]\n{}", body.unwrap_or_else(|| "unavailable".into()))
}

/// Nested group as `path = value` lines, relative to the group.
fn group_lines(value: &Value) -> String {
    let mut lines = Vec::new();
    collect_lines(value, "", &mut lines);
    if lines.is_empty() {
        "(empty)".into()
    } else {
        lines.join("\n")
    }
}

fn collect_lines(value: &Value, prefix: &str, lines: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_lines(child, &path, lines);
            }
        }
        leaf => lines.push(format!("{prefix} = {}", output::value_text(leaf))),
    }
}
