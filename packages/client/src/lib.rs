//! ISPConfig Client: session lifecycle, operation catalog, and the fluent gateway.
//!
//! The crate is a thin marshalling layer over the ISPConfig remote API:
//! stage a parameter bag, invoke one of the catalogued operations, read
//! the normalized JSON response. The remote transport itself is an
//! injected collaborator behind [`RemoteTransport`]; this crate only
//! shapes arguments and normalizes outcomes.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use ispconfig_client::{Gateway, GatewayConfig, RemoteTransport};
//! use ispconfig_core::ParamBag;
//! use serde_json::json;
//!
//! async fn demo(transport: Arc<dyn RemoteTransport>) {
//!     let config = GatewayConfig::new("https://panel.example.com:8080/remote", "admin", "secret");
//!     let mut gateway = Gateway::with_config(transport, config);
//!
//!     let bag: ParamBag = [("client_id", json!(7)), ("name", json!("joe"))]
//!         .into_iter()
//!         .collect();
//!     let response = gateway.with(bag).add_mail_alias().await.response();
//!     println!("{response}");
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod gateway;
pub mod session;
pub mod transport;

pub use catalog::{CallKind, Descriptor, Operation, RecordVerb};
pub use config::GatewayConfig;
pub use error::GatewayError;
pub use gateway::{dispatch, Gateway};
pub use session::SessionToken;
pub use transport::RemoteTransport;
