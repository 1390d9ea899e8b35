#![allow(clippy::unwrap_used)]
// Integration tests for `ParameterStore` and LLDP decoding over HTTP.

use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ucam_api::{Credentials, DeviceEndpoint, TransportConfig};
use ucam_core::{Camera, CoreError, ParamNode};

// ── Helpers ─────────────────────────────────────────────────────────

const DIGEST_CHALLENGE: &str =
    r#"Digest realm="AXIS_ACCC8E123456", nonce="5f1a0b7c", algorithm=MD5, qop="auth""#;

async fn setup() -> (MockServer, Camera) {
    let server = MockServer::start().await;
    let addr = server.address();
    let endpoint = DeviceEndpoint::new(
        addr.ip().to_string(),
        addr.port(),
        Credentials::new("onvif", "viewer-pass"),
    );
    let camera = Camera::new(endpoint, &TransportConfig::default()).unwrap();
    (server, camera)
}

async fn serve(server: &MockServer, route: &str, data: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": data
        })))
        .mount(server)
        .await;
}

// ── Parameter store ─────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_all_is_rooted_at_root() {
    let (server, camera) = setup().await;
    serve(
        &server,
        "/config/rest/param/v2beta",
        json!({
            "Brand": { "Brand": "AXIS", "ProdNbr": "M3106-L" },
            "Network": { "Interface": { "I0": { "Active": "yes" } } }
        }),
    )
    .await;

    let tree = camera.params().fetch_all().await.unwrap();

    assert_eq!(tree.root(), "root");
    assert_eq!(tree.groups(), vec!["Brand", "Network"]);
    assert_eq!(
        tree.lookup("root.Network.Interface.I0.Active").unwrap(),
        &ParamNode::Leaf(json!("yes"))
    );
    assert_eq!(tree.leaf_count(), 3);
}

#[tokio::test]
async fn test_fetch_group_is_rooted_at_last_segment() {
    let (server, camera) = setup().await;
    serve(
        &server,
        "/config/rest/param/v2beta/Network/RTSP",
        json!({ "Enabled": "yes", "Port": "554" }),
    )
    .await;

    let tree = camera.params().fetch_group("Network.RTSP").await.unwrap();

    assert_eq!(tree.root(), "RTSP");
    let paths: Vec<String> = tree.flatten().into_iter().map(|(p, _)| p).collect();
    assert_eq!(paths, vec!["RTSP.Enabled", "RTSP.Port"]);
}

#[tokio::test]
async fn test_fetch_parameter_returns_raw_value() {
    let (server, camera) = setup().await;
    serve(
        &server,
        "/config/rest/param/v2beta/Brand/ProdFullName",
        json!("AXIS M3106-L Mk II Network Camera"),
    )
    .await;

    let value = camera
        .params()
        .fetch_parameter("Brand.ProdFullName")
        .await
        .unwrap();
    assert_eq!(value, json!("AXIS M3106-L Mk II Network Camera"));
}

#[tokio::test]
async fn test_non_mapping_group_is_malformed_config() {
    let (server, camera) = setup().await;
    serve(&server, "/config/rest/param/v2beta/Image", json!(["not", "a", "tree"])).await;

    let result = camera.params().image_config().await;
    assert!(
        matches!(result, Err(CoreError::MalformedConfig { .. })),
        "got: {result:?}"
    );
}

#[tokio::test]
async fn test_device_info_reads_brand_group() {
    let (server, camera) = setup().await;
    serve(
        &server,
        "/config/rest/param/v2beta/Brand",
        json!({ "Brand": "AXIS", "ProdNbr": "M3106-L", "ProdType": "Network Camera" }),
    )
    .await;

    let info = camera.params().device_info().await.unwrap();
    assert_eq!(info.brand, "AXIS");
    assert_eq!(info.product_number, "M3106-L");
}

#[tokio::test]
async fn test_missing_qos_group_yields_empty_tree() {
    let (server, camera) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config/rest/param/v2beta/Network/QoS"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let tree = camera.params().qos_config().await;
    assert_eq!(tree.root(), "QoS");
    assert!(tree.is_empty());
}

#[tokio::test]
async fn test_elevated_fetch_falls_back_to_primary_credentials() {
    let (server, camera) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config/rest/param/v2beta/Brand"))
        .and(header_regex("authorization", r#"^Digest .*username="onvif""#))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "success",
            "data": { "Brand": "AXIS" }
        })))
        .with_priority(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/config/rest/param/v2beta/Brand"))
        .respond_with(
            ResponseTemplate::new(401).insert_header("WWW-Authenticate", DIGEST_CHALLENGE),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tree = camera.params().fetch_group("Brand").await.unwrap();
    assert_eq!(tree.groups(), vec!["Brand"]);
}

#[tokio::test]
async fn test_rejected_credentials_are_authentication_failure() {
    let (server, camera) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config/rest/param/v2beta/Network"))
        .respond_with(
            ResponseTemplate::new(401).insert_header("WWW-Authenticate", DIGEST_CHALLENGE),
        )
        .expect(2)
        .mount(&server)
        .await;

    let result = camera.params().fetch_group("Network").await;
    assert!(
        matches!(result, Err(CoreError::AuthenticationFailed { .. })),
        "got: {result:?}"
    );
}

// ── LLDP ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_lldp_neighbors_decode_from_device() {
    let (server, camera) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config/rest/lldp/v1/neighbors"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "neighbors": [
                { "chassisId": "00:11:22:33:44:55", "portId": "gi1/0/7",
                  "systemName": "core-sw", "ttl": 120 }
            ]}
        })))
        .mount(&server)
        .await;

    let neighbors = camera.lldp().neighbors().await.unwrap();
    assert_eq!(neighbors.len(), 1);
    assert_eq!(neighbors[0].system_name, "core-sw");
    assert_eq!(neighbors[0].port_id, "gi1/0/7");
}

#[tokio::test]
async fn test_lldp_unsupported_firmware_is_not_found() {
    let (server, camera) = setup().await;
    Mock::given(method("GET"))
        .and(path("/config/rest/lldp/v1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let result = camera.lldp().status().await;
    assert!(matches!(result, Err(CoreError::NotFound { .. })), "got: {result:?}");
}
