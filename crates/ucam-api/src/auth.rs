use secrecy::{ExposeSecret, SecretString};

use crate::endpoint::DeviceEndpoint;

/// Username/password pair for HTTP challenge/response auth.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub(crate) fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

/// Privilege a request needs on the device.
///
/// VAPIX surfaces (`/axis-cgi/`, `/config/rest/`) are admin-only on most
/// firmware; everything else is served to the primary (viewer/ONVIF) account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessLevel {
    Standard,
    Elevated,
}

const ELEVATED_PREFIXES: &[&str] = &["/axis-cgi/", "/config/rest/"];

impl AccessLevel {
    /// Infer the access level from a request path.
    pub fn for_path(path: &str) -> Self {
        let normalized = path.trim_start_matches('/');
        if ELEVATED_PREFIXES
            .iter()
            .any(|prefix| normalized.starts_with(prefix.trim_start_matches('/')))
        {
            Self::Elevated
        } else {
            Self::Standard
        }
    }

    pub fn is_elevated(self) -> bool {
        matches!(self, Self::Elevated)
    }
}

/// Pick the credentials for a request.
///
/// Elevated requests use the admin credentials when they are set and fall
/// back to the primary credentials otherwise.
pub fn resolve_credentials(endpoint: &DeviceEndpoint, requires_elevated: bool) -> &Credentials {
    if requires_elevated {
        endpoint
            .admin_credentials()
            .unwrap_or_else(|| endpoint.credentials())
    } else {
        endpoint.credentials()
    }
}

/// An authentication challenge parsed from `WWW-Authenticate`.
#[derive(Debug)]
pub(crate) enum Challenge {
    Digest(digest_auth::WwwAuthenticateHeader),
    Basic,
}

impl Challenge {
    /// Pick the strongest usable challenge among the header values.
    ///
    /// Digest wins over Basic; unparseable digest prompts are skipped.
    pub(crate) fn select<'a>(values: impl IntoIterator<Item = &'a str>) -> Option<Self> {
        let mut basic = false;
        for value in values {
            let trimmed = value.trim();
            let scheme = trimmed.split_whitespace().next().unwrap_or_default();
            if scheme.eq_ignore_ascii_case("digest") {
                let params = trimmed.get(scheme.len()..).unwrap_or_default();
                if let Ok(prompt) = digest_auth::parse(params) {
                    return Some(Self::Digest(prompt));
                }
            } else if scheme.eq_ignore_ascii_case("basic") {
                basic = true;
            }
        }
        basic.then_some(Self::Basic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn endpoint() -> DeviceEndpoint {
        DeviceEndpoint::new("10.0.0.2", 80, Credentials::new("onvif", "viewer-pass"))
    }

    #[test]
    fn elevated_falls_back_to_primary_credentials() {
        let endpoint = endpoint();
        assert_eq!(resolve_credentials(&endpoint, true).username, "onvif");
        assert_eq!(resolve_credentials(&endpoint, false).username, "onvif");
    }

    #[test]
    fn elevated_prefers_admin_credentials() {
        let endpoint = endpoint().with_admin_credentials(Credentials::new("root", "admin-pass"));
        assert_eq!(resolve_credentials(&endpoint, true).username, "root");
        assert_eq!(resolve_credentials(&endpoint, true).password(), "admin-pass");
        assert_eq!(resolve_credentials(&endpoint, false).username, "onvif");
    }

    #[test]
    fn vapix_paths_are_elevated() {
        assert_eq!(AccessLevel::for_path("/axis-cgi/serverreport.cgi"), AccessLevel::Elevated);
        assert_eq!(AccessLevel::for_path("config/rest/param/v2beta"), AccessLevel::Elevated);
        assert_eq!(AccessLevel::for_path("/onvif/device_service"), AccessLevel::Standard);
    }

    #[test]
    fn digest_challenge_wins_over_basic() {
        let headers = [
            r#"Basic realm="AXIS_ACCC8E000000""#,
            r#"Digest realm="AXIS_ACCC8E000000", nonce="abc123", algorithm=MD5, qop="auth""#,
        ];
        assert!(matches!(Challenge::select(headers), Some(Challenge::Digest(_))));
    }

    #[test]
    fn basic_only_and_unknown_challenges() {
        assert!(matches!(
            Challenge::select([r#"Basic realm="cam""#]),
            Some(Challenge::Basic)
        ));
        assert!(Challenge::select([r#"Bearer realm="cam""#]).is_none());
        assert!(Challenge::select(std::iter::empty()).is_none());
    }
}
