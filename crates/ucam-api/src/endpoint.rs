// Device endpoint description
//
// A resolved address + credentials pair handed in by the caller. The api
// crate never reads config files or environment variables; whoever builds
// the `DeviceEndpoint` owns that concern.

use serde::Serialize;
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;

/// URL scheme used to reach the device.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, strum::Display, strum::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

/// Address and credentials for one camera.
///
/// Immutable once built: the `with_*` methods consume `self` and are meant
/// for construction only. If no admin credentials are set, every elevated
/// operation falls back to the primary credentials
/// (see [`resolve_credentials`](crate::auth::resolve_credentials)).
#[derive(Debug, Clone)]
pub struct DeviceEndpoint {
    address: String,
    port: u16,
    scheme: Scheme,
    name: Option<String>,
    credentials: Credentials,
    admin_credentials: Option<Credentials>,
}

impl DeviceEndpoint {
    pub fn new(address: impl Into<String>, port: u16, credentials: Credentials) -> Self {
        Self {
            address: address.into(),
            port,
            scheme: Scheme::Http,
            name: None,
            credentials,
            admin_credentials: None,
        }
    }

    /// Secondary credentials for vendor-specific (VAPIX admin) operations.
    pub fn with_admin_credentials(mut self, credentials: Credentials) -> Self {
        self.admin_credentials = Some(credentials);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_scheme(mut self, scheme: Scheme) -> Self {
        self.scheme = scheme;
        self
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn admin_credentials(&self) -> Option<&Credentials> {
        self.admin_credentials.as_ref()
    }

    /// Human-facing identity: the configured name, else the address.
    pub fn identity(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.address)
    }

    /// Root URL of the device, e.g. `http://192.168.1.10:80/`.
    pub fn base_url(&self) -> Result<Url, Error> {
        let host = if self.address.contains(':') && !self.address.starts_with('[') {
            format!("[{}]", self.address)
        } else {
            self.address.clone()
        };
        Ok(Url::parse(&format!("{}://{host}:{}/", self.scheme, self.port))?)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn creds() -> Credentials {
        Credentials::new("viewer", "secret")
    }

    #[test]
    fn base_url_includes_scheme_and_port() {
        let endpoint = DeviceEndpoint::new("192.168.1.10", 8080, creds());
        assert_eq!(endpoint.base_url().unwrap().as_str(), "http://192.168.1.10:8080/");

        let endpoint = endpoint.with_scheme(Scheme::Https);
        assert_eq!(endpoint.base_url().unwrap().as_str(), "https://192.168.1.10:8080/");
    }

    #[test]
    fn ipv6_addresses_are_bracketed() {
        let endpoint = DeviceEndpoint::new("fe80::1", 80, creds());
        assert_eq!(endpoint.base_url().unwrap().host_str(), Some("[fe80::1]"));
    }

    #[test]
    fn identity_prefers_name() {
        let endpoint = DeviceEndpoint::new("10.0.0.5", 80, creds());
        assert_eq!(endpoint.identity(), "10.0.0.5");
        let endpoint = endpoint.with_name("Lobby");
        assert_eq!(endpoint.identity(), "Lobby");
    }

    #[test]
    fn scheme_parses_case_insensitively() {
        assert_eq!("HTTPS".parse::<Scheme>().unwrap(), Scheme::Https);
        assert_eq!(Scheme::Http.to_string(), "http");
    }
}
