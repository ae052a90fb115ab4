//! Gateway connection configuration.

use std::fmt;

/// Connection settings for the gateway: endpoint location and login
/// credentials. These are the only recognized options.
#[derive(Clone)]
pub struct GatewayConfig {
    /// Base endpoint location of the remote API.
    pub host: String,
    /// Login user.
    pub user: String,
    /// Login password.
    pub pass: String,
}

impl GatewayConfig {
    /// Creates a configuration from endpoint and credentials.
    #[must_use]
    pub fn new(
        host: impl Into<String>,
        user: impl Into<String>,
        pass: impl Into<String>,
    ) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            pass: pass.into(),
        }
    }
}

impl fmt::Debug for GatewayConfig {
    /// The password never reaches logs or debug output.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("pass", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stores_all_fields() {
        let config = GatewayConfig::new("https://panel:8080/remote", "admin", "secret");
        assert_eq!(config.host, "https://panel:8080/remote");
        assert_eq!(config.user, "admin");
        assert_eq!(config.pass, "secret");
    }

    #[test]
    fn debug_redacts_password() {
        let config = GatewayConfig::new("h", "u", "hunter2");
        let rendered = format!("{config:?}");
        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("hunter2"));
    }
}
