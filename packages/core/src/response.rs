//! Response normalization.
//!
//! Every remote call collapses into exactly one of three shapes:
//! a fault wrapped under `"error"`, a scalar wrapped under `"result"`,
//! or a structured payload passed through verbatim. The JSON string of
//! that shape is the gateway's sole output encoding. Normalization never
//! fails: a fault is data here, and serializing a `serde_json::Value`
//! cannot go wrong.

use serde::Serialize;
use serde_json::{json, Value};

use crate::fault::Fault;

/// The three-shape output contract of every invocation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NormalizedResult {
    /// A remote or locally constructed fault: `{"error":{"code","message"}}`.
    Error { error: Fault },
    /// A non-structured reply: `{"result": <scalar>}`.
    Scalar { result: Value },
    /// A structured reply (object or array), emitted verbatim.
    Payload(Value),
}

impl NormalizedResult {
    /// Collapses a raw call outcome into its normalized shape.
    ///
    /// Objects and arrays pass through untouched; everything else
    /// (null, booleans, numbers, strings) is wrapped as a scalar result.
    #[must_use]
    pub fn normalize(outcome: Result<Value, Fault>) -> Self {
        match outcome {
            Err(error) => Self::Error { error },
            Ok(value @ (Value::Object(_) | Value::Array(_))) => Self::Payload(value),
            Ok(scalar) => Self::Scalar { result: scalar },
        }
    }

    /// Shorthand for a fault-shaped result.
    #[must_use]
    pub fn fault(fault: Fault) -> Self {
        Self::Error { error: fault }
    }

    /// Whether this result carries a fault.
    #[must_use]
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// The normalized shape as a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        match self {
            Self::Error { error } => json!({ "error": error }),
            Self::Scalar { result } => json!({ "result": result }),
            Self::Payload(value) => value.clone(),
        }
    }

    /// The normalized shape as its JSON string encoding.
    #[must_use]
    pub fn to_json(&self) -> String {
        self.to_value().to_string()
    }
}

impl Default for NormalizedResult {
    /// The shape reported before any invocation: a null scalar.
    fn default() -> Self {
        Self::Scalar { result: Value::Null }
    }
}
