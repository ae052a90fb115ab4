//! Remote fault values.
//!
//! A fault is what the control plane returns when a call is rejected
//! (bad credentials, unknown method, server-side validation failure).
//! At this layer a fault is ordinary data: it is stored, normalized,
//! and serialized, never raised.

use serde::{Deserialize, Serialize};

/// A remote-call failure value: an error code plus a human-readable message.
///
/// Field order matters for the serialized shape, which is part of the
/// output contract: `{"code":"...","message":"..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Fault {
    /// Remote error code (e.g. `"login_failed"`, `"permission_denied"`).
    pub code: String,
    /// Remote error message.
    pub message: String,
}

impl Fault {
    /// Creates a fault from code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}
