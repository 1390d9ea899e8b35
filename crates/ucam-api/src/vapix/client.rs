// VAPIX HTTP client
//
// Wraps `reqwest::Client` with challenge/response authentication and
// status classification. Endpoint modules (param, serverreport, lldp) are
// implemented as inherent methods in separate files to keep this module
// focused on transport mechanics.

use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{ACCEPT, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{Position, Url};

use crate::auth::{AccessLevel, Challenge, resolve_credentials};
use crate::endpoint::DeviceEndpoint;
use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw device response: status, content type, and body bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl RawResponse {
    /// Body decoded as UTF-8, replacing invalid sequences.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Request body plus its content type.
struct Payload<'a> {
    bytes: Bytes,
    content_type: &'a str,
}

/// Authenticated request dispatcher for one camera.
///
/// Each request is first sent without credentials. A `401` carrying a
/// `WWW-Authenticate` challenge is answered exactly once with the resolved
/// credentials (Digest preferred, Basic accepted); a second `401` is an
/// authentication failure. No other retries happen here.
pub struct VapixClient {
    http: reqwest::Client,
    endpoint: DeviceEndpoint,
    base_url: Url,
    timeout: Duration,
}

impl VapixClient {
    /// Create a client for `endpoint` from a `TransportConfig`.
    pub fn new(endpoint: DeviceEndpoint, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Self::with_client(http, endpoint, transport.timeout)
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        endpoint: DeviceEndpoint,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let base_url = endpoint.base_url()?;
        Ok(Self {
            http,
            endpoint,
            base_url,
            timeout,
        })
    }

    /// The endpoint this client talks to.
    pub fn endpoint(&self) -> &DeviceEndpoint {
        &self.endpoint
    }

    /// The device root URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a device path with optional query parameters.
    pub(crate) fn url(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, Error> {
        let mut url = self.base_url.join(path.trim_start_matches('/'))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// GET a path, with the access level inferred from the path.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<RawResponse, Error> {
        self.get_with_access(path, query, AccessLevel::for_path(path))
            .await
    }

    /// GET a path with an explicit access level.
    pub async fn get_with_access(
        &self,
        path: &str,
        query: &[(&str, &str)],
        access: AccessLevel,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path, query)?;
        self.send(Method::GET, url, None, None, access).await
    }

    /// PUT a body to a path, with the access level inferred from the path.
    pub async fn put(
        &self,
        path: &str,
        body: impl Into<Bytes>,
        content_type: &str,
    ) -> Result<RawResponse, Error> {
        let url = self.url(path, &[])?;
        let payload = Payload {
            bytes: body.into(),
            content_type,
        };
        self.send(Method::PUT, url, Some(payload), None, AccessLevel::for_path(path))
            .await
    }

    /// GET a path and decode the body as JSON.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.url(path, query)?;
        let resp = self
            .send(
                Method::GET,
                url,
                None,
                Some("application/json"),
                AccessLevel::for_path(path),
            )
            .await?;

        serde_json::from_slice(&resp.body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: resp.text_lossy(),
        })
    }

    /// Send a request, answering at most one authentication challenge.
    async fn send(
        &self,
        method: Method,
        url: Url,
        payload: Option<Payload<'_>>,
        accept: Option<&str>,
        access: AccessLevel,
    ) -> Result<RawResponse, Error> {
        debug!(%method, %url, ?access, "VAPIX request");

        let first = self
            .request(&method, &url, payload.as_ref(), accept)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        if first.status() != StatusCode::UNAUTHORIZED {
            return self.finish(first, &url).await;
        }

        let challenge = Challenge::select(
            first
                .headers()
                .get_all(WWW_AUTHENTICATE)
                .iter()
                .filter_map(|v| v.to_str().ok()),
        )
        .ok_or_else(|| Error::Authentication {
            message: "device returned 401 without a supported challenge".into(),
        })?;

        let credentials = resolve_credentials(&self.endpoint, access.is_elevated());
        debug!(username = %credentials.username, "answering authentication challenge");

        let retry = self.request(&method, &url, payload.as_ref(), accept);
        let retry = match challenge {
            Challenge::Digest(mut prompt) => {
                let uri = &url[Position::BeforePath..Position::AfterQuery];
                let context = digest_auth::AuthContext::new_with_method(
                    credentials.username.as_str(),
                    credentials.password(),
                    uri,
                    payload.as_ref().map(|p| p.bytes.as_ref()),
                    digest_auth::HttpMethod::from(method.as_str()),
                );
                let answer = prompt.respond(&context).map_err(|e| Error::Authentication {
                    message: format!("cannot answer digest challenge: {e}"),
                })?;
                retry.header(reqwest::header::AUTHORIZATION, answer.to_header_string())
            }
            Challenge::Basic => {
                retry.basic_auth(&credentials.username, Some(credentials.password()))
            }
        };

        let second = retry.send().await.map_err(|e| self.classify(e))?;
        if second.status() == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: format!("credentials rejected for user '{}'", credentials.username),
            });
        }

        self.finish(second, &url).await
    }

    fn request(
        &self,
        method: &Method,
        url: &Url,
        payload: Option<&Payload<'_>>,
        accept: Option<&str>,
    ) -> reqwest::RequestBuilder {
        let mut builder = self
            .http
            .request(method.clone(), url.clone())
            .timeout(self.timeout);
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT, accept);
        }
        if let Some(payload) = payload {
            builder = builder
                .header(CONTENT_TYPE, payload.content_type)
                .body(payload.bytes.clone());
        }
        builder
    }

    /// Classify the final status and read the body.
    async fn finish(&self, resp: reqwest::Response, url: &Url) -> Result<RawResponse, Error> {
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "device rejected the request".into(),
            });
        }
        if status == StatusCode::NOT_FOUND {
            return Err(Error::NotFound {
                path: url.path().to_owned(),
            });
        }
        if status.is_server_error() {
            return Err(Error::Server {
                status: status.as_u16(),
            });
        }

        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let body = resp.bytes().await.map_err(|e| self.classify(e))?;

        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        debug!(status = status.as_u16(), bytes = body.len(), "VAPIX response");
        Ok(RawResponse {
            status: status.as_u16(),
            content_type,
            body,
        })
    }

    fn classify(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout.as_secs(),
            }
        } else {
            Error::Transport(err)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::auth::Credentials;

    fn client() -> VapixClient {
        let endpoint = DeviceEndpoint::new("192.0.2.7", 8080, Credentials::new("u", "p"));
        VapixClient::new(endpoint, &TransportConfig::default()).unwrap()
    }

    #[test]
    fn url_joins_path_and_query() {
        let client = client();
        let url = client
            .url("/axis-cgi/serverreport.cgi", &[("mode", "tar_all")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://192.0.2.7:8080/axis-cgi/serverreport.cgi?mode=tar_all"
        );
    }

    #[test]
    fn url_without_query_has_no_question_mark() {
        let client = client();
        let url = client.url("config/rest/param/v2beta", &[]).unwrap();
        assert_eq!(url.as_str(), "http://192.0.2.7:8080/config/rest/param/v2beta");
    }
}
