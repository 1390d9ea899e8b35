// VAPIX REST wire types
//
// The `/config/rest/*` APIs wrap every payload in
// `{ "status": "success", "data": ... }` or
// `{ "status": "error", "error": { "code": ..., "message": ... } }`.

use serde::Deserialize;
use serde_json::Value;

/// REST envelope shared by the param and LLDP APIs.
#[derive(Debug, Deserialize)]
pub struct RestEnvelope {
    pub status: String,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<RestError>,
}

#[derive(Debug, Deserialize)]
pub struct RestError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

impl RestEnvelope {
    /// Unwrap `data`, or turn an error envelope into `Error::Api`.
    pub fn into_data(self) -> Result<Value, crate::Error> {
        if self.status == "success" {
            return Ok(self.data.unwrap_or(Value::Null));
        }
        let (code, message) = self
            .error
            .map(|e| (e.code, e.message))
            .unwrap_or_default();
        Err(crate::Error::Api {
            message: message.unwrap_or_else(|| format!("status={}", self.status)),
            code,
        })
    }
}
