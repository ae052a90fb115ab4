//! Gateway-side errors.
//!
//! Only the explicit `initialize` path returns a Rust error. Operation
//! methods capture every failure, including these, as a fault in the
//! stored response so the chaining surface never raises.

use ispconfig_core::Fault;

/// Errors from establishing a session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// `initialize` ran without any stored configuration.
    #[error("gateway configuration is missing; supply host, user, and pass")]
    MissingConfig,
    /// The remote `login` call faulted.
    #[error("login failed: {0}")]
    Login(Fault),
}

impl GatewayError {
    /// The fault recorded when this error is captured in a response
    /// instead of returned.
    #[must_use]
    pub fn into_fault(self) -> Fault {
        match self {
            Self::MissingConfig => Fault::new("not_configured", self.to_string()),
            Self::Login(fault) => fault,
        }
    }
}
