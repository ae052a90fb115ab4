//! Session tokens.

use serde_json::Value;

/// The opaque credential returned by the remote `login` call.
///
/// Whatever value the server returned is stored verbatim and replayed as
/// the first positional argument of every session-scoped call; the
/// gateway never inspects it.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionToken(Value);

impl SessionToken {
    /// Wraps the raw login reply.
    #[must_use]
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// The token as the JSON value sent on the wire.
    #[must_use]
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Consumes the token into its wire value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.0
    }
}
