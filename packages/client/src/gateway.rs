//! The operation gateway: session lifecycle, dispatch, and the fluent
//! calling surface.
//!
//! `dispatch` is the stateless invocation core: given a transport, a
//! session token, an operation, and a parameter bag it performs exactly
//! one remote round trip and returns the normalized result. [`Gateway`]
//! layers the fluent chaining surface on top: stage a bag with
//! [`Gateway::with`], invoke an operation method, read the response with
//! [`Gateway::response`]. Operation methods never return errors; every
//! failure, including a lazy-login fault, lands in the stored response.

use std::sync::Arc;

use ispconfig_core::{NormalizedResult, ParamBag};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::catalog::Operation;
use crate::config::GatewayConfig;
use crate::error::GatewayError;
use crate::session::SessionToken;
use crate::transport::{RemoteTransport, LOGIN_CALL, LOGOUT_CALL};

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Invokes one catalogued operation against the remote endpoint.
///
/// Shapes the call per the operation's descriptor: session token first,
/// then the extracted identifiers in order (absent ones as JSON null),
/// then, for add/update-shaped calls, whatever is left of the bag as the
/// trailing structured argument. The outcome, including a fault, comes
/// back as data; this function never fails.
pub async fn dispatch(
    transport: &dyn RemoteTransport,
    session: &SessionToken,
    operation: Operation,
    mut bag: ParamBag,
) -> NormalizedResult {
    let descriptor = operation.descriptor();
    let call = match descriptor.call.resolve(&bag) {
        Ok(call) => call,
        Err(fault) => return NormalizedResult::fault(fault),
    };

    let mut args = Vec::with_capacity(descriptor.keys.len() + 2);
    args.push(session.as_value().clone());
    for key in descriptor.keys {
        args.push(bag.extract(key).unwrap_or(Value::Null));
    }
    if descriptor.forward_params {
        args.push(bag.into_value());
    }

    debug!(call = %call, args = args.len(), "invoking remote call");
    NormalizedResult::normalize(transport.call(&call, args).await)
}

// ---------------------------------------------------------------------------
// Gateway
// ---------------------------------------------------------------------------

/// A session-holding handle to the remote control plane.
///
/// Holds the injected transport, the connection config, the lazily
/// created session token, the staged parameter bag, and the last
/// normalized response. One invocation must complete (including reading
/// its response) before the next begins; the gateway has no per-call
/// isolation.
pub struct Gateway {
    transport: Arc<dyn RemoteTransport>,
    config: Option<GatewayConfig>,
    session: Option<SessionToken>,
    params: ParamBag,
    response: NormalizedResult,
}

impl Gateway {
    /// Creates a gateway without connection config; supply one later via
    /// [`Gateway::initialize`].
    #[must_use]
    pub fn new(transport: Arc<dyn RemoteTransport>) -> Self {
        Self {
            transport,
            config: None,
            session: None,
            params: ParamBag::new(),
            response: NormalizedResult::default(),
        }
    }

    /// Creates a gateway with connection config; login still happens
    /// lazily on first use.
    #[must_use]
    pub fn with_config(transport: Arc<dyn RemoteTransport>, config: GatewayConfig) -> Self {
        let mut gateway = Self::new(transport);
        gateway.config = Some(config);
        gateway
    }

    /// Stores the config (if given) and performs the remote login,
    /// replacing any existing session.
    ///
    /// # Errors
    ///
    /// [`GatewayError::MissingConfig`] when no config was ever supplied;
    /// [`GatewayError::Login`] carrying the remote fault when the login
    /// call is rejected.
    pub async fn initialize(
        &mut self,
        config: Option<GatewayConfig>,
    ) -> Result<(), GatewayError> {
        if let Some(config) = config {
            self.config = Some(config);
        }
        let Some(config) = self.config.as_ref() else {
            return Err(GatewayError::MissingConfig);
        };

        info!(host = %config.host, user = %config.user, "logging in");
        let reply = self
            .transport
            .call(
                LOGIN_CALL,
                vec![
                    Value::String(config.user.clone()),
                    Value::String(config.pass.clone()),
                ],
            )
            .await
            .map_err(GatewayError::Login)?;
        self.session = Some(SessionToken::new(reply));
        Ok(())
    }

    /// Returns the current session token, logging in first if none exists.
    ///
    /// # Errors
    ///
    /// Propagates [`Gateway::initialize`] failures from the lazy login.
    pub async fn ensure_session(&mut self) -> Result<SessionToken, GatewayError> {
        if self.session.is_none() {
            self.initialize(None).await?;
        }
        self.session.clone().ok_or(GatewayError::MissingConfig)
    }

    /// Invokes the remote logout for the current session.
    ///
    /// The local token is intentionally kept: a later operation replays
    /// the invalidated token and surfaces the remote fault, matching the
    /// behavior callers have always observed. A logout fault is logged
    /// and otherwise discarded; no result is consumed.
    pub async fn logout(&mut self) {
        let token = match self.ensure_session().await {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "logout skipped; no session could be established");
                return;
            }
        };
        if let Err(fault) = self
            .transport
            .call(LOGOUT_CALL, vec![token.into_value()])
            .await
        {
            warn!(code = %fault.code, "remote logout faulted");
        }
    }

    /// Replaces the staged parameter bag for the next invocation.
    pub fn set_params(&mut self, params: impl Into<ParamBag>) {
        self.params = params.into();
    }

    /// Fluent alias for [`Gateway::set_params`].
    pub fn with(&mut self, params: impl Into<ParamBag>) -> &mut Self {
        self.set_params(params);
        self
    }

    /// The most recent invocation's normalized response as a JSON string:
    /// one of `{"error":...}`, `{"result":...}`, or the structured payload
    /// verbatim. Before any invocation this is `{"result":null}`.
    #[must_use]
    pub fn get_response(&self) -> String {
        self.response.to_json()
    }

    /// Alias for [`Gateway::get_response`].
    #[must_use]
    pub fn response(&self) -> String {
        self.get_response()
    }

    /// Typed access to the most recent normalized response.
    #[must_use]
    pub fn last_response(&self) -> &NormalizedResult {
        &self.response
    }

    /// The current session token, if a login has happened.
    #[must_use]
    pub fn session(&self) -> Option<&SessionToken> {
        self.session.as_ref()
    }

    /// Runs one catalogued operation: consumes the staged bag, ensures a
    /// session, dispatches, and stores the normalized result.
    pub(crate) async fn invoke(&mut self, operation: Operation) -> &mut Self {
        let bag = std::mem::take(&mut self.params);
        self.response = match self.ensure_session().await {
            Ok(session) => dispatch(self.transport.as_ref(), &session, operation, bag).await,
            Err(err) => NormalizedResult::fault(err.into_fault()),
        };
        self
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;
    use ispconfig_core::Fault;
    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;

    /// Records every remote call and replays scripted replies.
    struct MockTransport {
        calls: Mutex<Vec<(String, Vec<Value>)>>,
        replies: Mutex<VecDeque<Result<Value, Fault>>>,
        login_reply: Result<Value, Fault>,
    }

    impl MockTransport {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                replies: Mutex::new(VecDeque::new()),
                login_reply: Ok(json!("sess-1")),
            }
        }

        fn failing_login(fault: Fault) -> Self {
            Self {
                login_reply: Err(fault),
                ..Self::new()
            }
        }

        fn script(&self, reply: Result<Value, Fault>) {
            self.replies.lock().push_back(reply);
        }

        fn calls(&self) -> Vec<(String, Vec<Value>)> {
            self.calls.lock().clone()
        }

        fn login_count(&self) -> usize {
            self.calls
                .lock()
                .iter()
                .filter(|(method, _)| method == LOGIN_CALL)
                .count()
        }
    }

    #[async_trait]
    impl RemoteTransport for MockTransport {
        async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value, Fault> {
            self.calls.lock().push((method.to_string(), args));
            match method {
                LOGIN_CALL => self.login_reply.clone(),
                LOGOUT_CALL => Ok(Value::Null),
                _ => self
                    .replies
                    .lock()
                    .pop_front()
                    .unwrap_or(Ok(json!("OK"))),
            }
        }
    }

    fn gateway(transport: Arc<MockTransport>) -> Gateway {
        Gateway::with_config(
            transport,
            GatewayConfig::new("https://panel:8080/remote", "admin", "secret"),
        )
    }

    fn bag(entries: &[(&str, Value)]) -> ParamBag {
        entries.iter().map(|(k, v)| ((*k), v.clone())).collect()
    }

    #[tokio::test]
    async fn ensure_session_twice_performs_one_login_round_trip() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        let first = gw.ensure_session().await.unwrap();
        let second = gw.ensure_session().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(transport.login_count(), 1);
    }

    #[tokio::test]
    async fn login_sends_credentials_from_config_not_bag() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());
        gw.with(bag(&[("loginUser", json!("spoof"))]));

        gw.ensure_session().await.unwrap();

        let calls = transport.calls();
        assert_eq!(calls[0].0, LOGIN_CALL);
        assert_eq!(calls[0].1, vec![json!("admin"), json!("secret")]);
    }

    #[tokio::test]
    async fn add_mail_alias_end_to_end() {
        let transport = Arc::new(MockTransport::new());
        transport.script(Ok(json!(3)));
        let mut gw = gateway(transport.clone());

        let response = gw
            .with(bag(&[("client_id", json!(7)), ("name", json!("joe"))]))
            .add_mail_alias()
            .await
            .get_response();

        let calls = transport.calls();
        assert_eq!(calls[1].0, "mail_alias_add");
        assert_eq!(calls[1].1, vec![json!("sess-1"), json!(7), json!({"name": "joe"})]);
        assert_eq!(response, r#"{"result":3}"#);
    }

    #[tokio::test]
    async fn extracted_keys_never_reach_the_forwarded_payload() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[
            ("client_id", json!(1)),
            ("domain_id", json!(2)),
            ("domain", json!("example.com")),
        ]))
        .update_mail_domain()
        .await;

        let (call, args) = transport.calls()[1].clone();
        assert_eq!(call, "mail_domain_update");
        assert_eq!(
            args,
            vec![
                json!("sess-1"),
                json!(1),
                json!(2),
                json!({"domain": "example.com"}),
            ]
        );
    }

    #[tokio::test]
    async fn dns_record_add_uses_type_templated_call_name() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[
            ("type", json!("a")),
            ("client_id", json!(3)),
            ("name", json!("www")),
        ]))
        .add_dns_record()
        .await;

        let (call, args) = transport.calls()[1].clone();
        assert_eq!(call, "dns_a_add");
        assert_eq!(args[1], json!(3));
        // type stays in the payload; client_id was extracted out of it.
        assert_eq!(args[2], json!({"type": "a", "name": "www"}));
    }

    #[tokio::test]
    async fn dns_record_with_unknown_type_faults_locally_without_a_round_trip() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[("type", json!("bogus")), ("client_id", json!(3))]))
            .add_dns_record()
            .await;

        assert!(gw.last_response().is_fault());
        assert!(gw.get_response().contains("unknown_record_type"));
        // Only the lazy login went over the wire.
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.calls()[0].0, LOGIN_CALL);
    }

    #[tokio::test]
    async fn remote_fault_is_response_data_not_an_error() {
        let transport = Arc::new(MockTransport::new());
        transport.script(Err(Fault::new("404", "not found")));
        let mut gw = gateway(transport);

        let response = gw
            .with(bag(&[("client_id", json!(9))]))
            .get_client()
            .await
            .get_response();

        assert_eq!(response, r#"{"error":{"code":"404","message":"not found"}}"#);
    }

    #[tokio::test]
    async fn structured_reply_passes_through_verbatim() {
        let transport = Arc::new(MockTransport::new());
        transport.script(Ok(json!({"id": 5, "name": "x"})));
        let mut gw = gateway(transport);

        let response = gw
            .with(bag(&[("client_id", json!(5))]))
            .get_client()
            .await
            .get_response();

        assert_eq!(response, r#"{"id":5,"name":"x"}"#);
    }

    #[tokio::test]
    async fn login_fault_during_lazy_auth_lands_in_the_response() {
        let transport = Arc::new(MockTransport::failing_login(Fault::new(
            "login_failed",
            "bad credentials",
        )));
        let mut gw = gateway(transport.clone());

        let response = gw
            .with(bag(&[("client_id", json!(1))]))
            .get_client()
            .await
            .get_response();

        assert_eq!(
            response,
            r#"{"error":{"code":"login_failed","message":"bad credentials"}}"#
        );
        // The operation call itself was never attempted.
        assert_eq!(transport.calls().len(), 1);
    }

    #[tokio::test]
    async fn initialize_without_any_config_is_rejected() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = Gateway::new(transport);

        let err = gw.initialize(None).await.unwrap_err();
        assert_eq!(err, GatewayError::MissingConfig);
    }

    #[tokio::test]
    async fn initialize_propagates_the_login_fault() {
        let fault = Fault::new("login_failed", "nope");
        let transport = Arc::new(MockTransport::failing_login(fault.clone()));
        let mut gw = gateway(transport);

        let err = gw.initialize(None).await.unwrap_err();
        assert_eq!(err, GatewayError::Login(fault));
    }

    #[tokio::test]
    async fn logout_keeps_the_local_session_token() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[("server_id", json!(1))])).get_server().await;
        gw.logout().await;
        gw.with(bag(&[("server_id", json!(2))])).get_server().await;

        // No re-login after logout: the invalidated token is replayed.
        assert_eq!(transport.login_count(), 1);
        let calls = transport.calls();
        let last = calls.last().unwrap();
        assert_eq!(last.0, "server_get");
        assert_eq!(last.1[0], json!("sess-1"));
    }

    #[tokio::test]
    async fn logout_without_session_logs_in_first() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.logout().await;

        let methods: Vec<String> = transport.calls().into_iter().map(|(m, _)| m).collect();
        assert_eq!(methods, vec![LOGIN_CALL.to_string(), LOGOUT_CALL.to_string()]);
    }

    #[tokio::test]
    async fn response_before_any_invocation_is_a_null_result() {
        let transport = Arc::new(MockTransport::new());
        let gw = gateway(transport);
        assert_eq!(gw.get_response(), r#"{"result":null}"#);
    }

    #[tokio::test]
    async fn change_client_password_sends_two_positionals_and_no_payload() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[("client_id", json!(5)), ("password", json!("pw"))]))
            .change_client_password()
            .await;

        let (call, args) = transport.calls()[1].clone();
        assert_eq!(call, "client_change_password");
        assert_eq!(args, vec![json!("sess-1"), json!(5), json!("pw")]);
    }

    #[tokio::test]
    async fn absent_identifier_is_forwarded_as_null() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.delete_client().await;

        let (call, args) = transport.calls()[1].clone();
        assert_eq!(call, "client_delete");
        assert_eq!(args, vec![json!("sess-1"), Value::Null]);
    }

    #[tokio::test]
    async fn staged_bag_is_consumed_per_invocation() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[("client_id", json!(1)), ("command", json!("true"))]))
            .add_cron()
            .await;
        gw.add_cron().await;

        let calls = transport.calls();
        assert_eq!(calls[1].1[2], json!({"command": "true"}));
        // Second invocation staged nothing: empty payload, null client_id.
        assert_eq!(calls[2].1[1], Value::Null);
        assert_eq!(calls[2].1[2], json!({}));
    }

    #[tokio::test]
    async fn with_replaces_the_previously_staged_bag() {
        let transport = Arc::new(MockTransport::new());
        let mut gw = gateway(transport.clone());

        gw.with(bag(&[("server_id", json!(1))]))
            .with(bag(&[("server_id", json!(2))]))
            .get_server()
            .await;

        assert_eq!(transport.calls()[1].1, vec![json!("sess-1"), json!(2)]);
    }

    #[tokio::test]
    async fn dispatch_is_usable_without_a_gateway() {
        let transport = MockTransport::new();
        transport.script(Ok(json!([{"id": 1}])));
        let session = SessionToken::new(json!("tok"));

        let result = dispatch(
            &transport,
            &session,
            Operation::GetClientSites,
            bag(&[("user_id", json!(4))]),
        )
        .await;

        assert_eq!(result.to_json(), r#"[{"id":1}]"#);
        assert_eq!(transport.calls()[0].1, vec![json!("tok"), json!(4)]);
    }
}
