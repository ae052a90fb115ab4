//! The remote transport seam.
//!
//! The control plane is reached through a generic "invoke remote
//! operation by name with positional arguments" contract. Implementing
//! the wire protocol is out of scope for this repository; callers inject
//! an already-connected transport, typically wrapping a SOAP or JSON-RPC
//! client.

use async_trait::async_trait;
use ispconfig_core::Fault;
use serde_json::Value;

/// Remote call name used to establish a session.
pub const LOGIN_CALL: &str = "login";
/// Remote call name used to invalidate a session.
pub const LOGOUT_CALL: &str = "logout";

/// A connected client for the remote RPC endpoint.
///
/// `call` performs exactly one blocking round trip: positional arguments
/// in, a result value or a fault back. Session-scoped calls carry the
/// session token as their first positional argument; `login` carries the
/// credentials instead, and `logout` only the token.
#[async_trait]
pub trait RemoteTransport: Send + Sync {
    /// Invokes the named remote call with the given positional arguments.
    ///
    /// # Errors
    ///
    /// Returns the remote fault when the endpoint rejects the call.
    /// Transport-level failures (connection loss, timeouts) surface the
    /// same way, as faults minted by the implementation.
    async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, Fault>;
}
