// ── LLDP ──
//
// Firmware versions disagree on LLDP document shape: fields may be camelCase
// or PascalCase, the payload may sit under `data`, and neighbours may be a
// bare list, a `neighbors`/`Neighbors` list, or a single object.

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;
use ucam_api::VapixClient;

use crate::error::CoreError;

/// Local LLDP agent state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LldpStatus {
    pub enabled: bool,
    pub transmit_interval: u64,
    pub hold_multiplier: u64,
    pub chassis_id: String,
    pub port_id: String,
    pub system_name: String,
    pub system_description: String,
}

/// A switch or other device seen on the camera's link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LldpNeighbor {
    pub chassis_id: String,
    pub port_id: String,
    pub port_description: String,
    pub system_name: String,
    pub system_description: String,
    pub capabilities: Vec<String>,
    pub management_address: String,
    pub ttl: u64,
}

/// Field lookup accepting either casing, skipping nulls.
struct Fields<'a>(&'a Map<String, Value>);

impl Fields<'_> {
    fn get(&self, camel: &str) -> Option<&Value> {
        let mut pascal = String::with_capacity(camel.len());
        let mut chars = camel.chars();
        if let Some(first) = chars.next() {
            pascal.extend(first.to_uppercase());
            pascal.extend(chars);
        }
        [camel, pascal.as_str()]
            .into_iter()
            .filter_map(|key| self.0.get(key))
            .find(|v| !v.is_null())
    }

    fn text(&self, camel: &str) -> String {
        match self.get(camel) {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    }

    fn number(&self, camel: &str, default: u64) -> u64 {
        match self.get(camel) {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(default),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(default),
            _ => default,
        }
    }

    fn flag(&self, camel: &str) -> bool {
        match self.get(camel) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => {
                matches!(s.to_ascii_lowercase().as_str(), "yes" | "true" | "on")
            }
            _ => false,
        }
    }

    fn list(&self, camel: &str) -> Vec<String> {
        match self.get(camel) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_owned))
                .collect(),
            Some(Value::String(s)) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn unwrap_data(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn malformed(what: &str, value: &Value) -> CoreError {
    CoreError::MalformedConfig {
        message: format!("unexpected LLDP {what} document: {value}"),
    }
}

impl LldpStatus {
    pub fn from_value(value: Value) -> Result<Self, CoreError> {
        let value = unwrap_data(value);
        let Value::Object(map) = &value else {
            return Err(malformed("status", &value));
        };
        let f = Fields(map);
        Ok(Self {
            enabled: f.flag("enabled"),
            transmit_interval: f.number("transmitInterval", 30),
            hold_multiplier: f.number("holdMultiplier", 4),
            chassis_id: f.text("chassisId"),
            port_id: f.text("portId"),
            system_name: f.text("systemName"),
            system_description: f.text("systemDescription"),
        })
    }
}

impl LldpNeighbor {
    fn from_map(map: &Map<String, Value>) -> Self {
        let f = Fields(map);
        Self {
            chassis_id: f.text("chassisId"),
            port_id: f.text("portId"),
            port_description: f.text("portDescription"),
            system_name: f.text("systemName"),
            system_description: f.text("systemDescription"),
            capabilities: f.list("capabilities"),
            management_address: f.text("managementAddress"),
            ttl: f.number("ttl", 0),
        }
    }

    /// Decode any of the neighbour document shapes. An empty object means
    /// no neighbours.
    pub fn list_from_value(value: Value) -> Result<Vec<Self>, CoreError> {
        let value = unwrap_data(value);
        let items: &[Value] = match &value {
            Value::Array(items) => items.as_slice(),
            Value::Object(map) if map.is_empty() => &[],
            Value::Object(map) => match map.get("neighbors").or_else(|| map.get("Neighbors")) {
                Some(Value::Array(items)) => items.as_slice(),
                Some(other) => return Err(malformed("neighbors", other)),
                None => return Ok(vec![Self::from_map(map)]),
            },
            Value::Null => &[],
            other => return Err(malformed("neighbors", other)),
        };
        Ok(items
            .iter()
            .filter_map(Value::as_object)
            .map(Self::from_map)
            .collect())
    }
}

/// LLDP queries against one camera.
pub struct LldpClient<'a> {
    client: &'a VapixClient,
}

impl<'a> LldpClient<'a> {
    pub fn new(client: &'a VapixClient) -> Self {
        Self { client }
    }

    pub async fn status(&self) -> Result<LldpStatus, CoreError> {
        let raw = self.client.get_lldp_status().await?;
        LldpStatus::from_value(raw)
    }

    pub async fn neighbors(&self) -> Result<Vec<LldpNeighbor>, CoreError> {
        let raw = self.client.get_lldp_neighbors().await?;
        let neighbors = LldpNeighbor::list_from_value(raw)?;
        debug!(count = neighbors.len(), "decoded LLDP neighbors");
        Ok(neighbors)
    }
}
