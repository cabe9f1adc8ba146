// CCP JSON endpoint HTTP client
//
// Wraps `reqwest::Client` with the request envelope, session parameter
// injection, and response envelope unwrapping. The action-specific
// methods (login, DNS zone/record calls) are implemented as inherent
// methods in separate files to keep this module focused on transport
// mechanics.

use std::sync::{PoisonError, RwLock};

use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, trace};
use url::Url;

use crate::auth::Credentials;
use crate::error::Error;
use crate::models::{RequestEnvelope, ResponseEnvelope};
use crate::transport::TransportConfig;

/// Default JSON endpoint of the netcup customer control panel.
pub const DEFAULT_ENDPOINT: &str =
    "https://ccp.netcup.net/run/webservice/servers/endpoint.php?JSON";

/// Raw HTTP client for the CCP JSON API.
///
/// All actions POST to the same endpoint URL. Session actions carry the
/// API key, session id and customer number inside `param`; the client
/// adds them so callers only pass the action-specific fields.
pub struct NetcupClient {
    http: reqwest::Client,
    endpoint: Url,
    credentials: Credentials,
    /// Session id captured from a successful login, cleared on logout.
    session_id: RwLock<Option<String>>,
}

impl NetcupClient {
    /// Create a new client from a `TransportConfig`.
    pub fn new(
        endpoint: Url,
        credentials: Credentials,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self::with_client(http, endpoint, credentials))
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, endpoint: Url, credentials: Credentials) -> Self {
        Self {
            http,
            endpoint,
            credentials,
            session_id: RwLock::new(None),
        }
    }

    /// The endpoint URL all actions are posted to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Whether a session id is currently held.
    pub fn logged_in(&self) -> bool {
        self.session_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    // ── Session id management ────────────────────────────────────────

    pub(crate) fn set_session_id(&self, session_id: Option<String>) {
        *self
            .session_id
            .write()
            .unwrap_or_else(PoisonError::into_inner) = session_id;
    }

    fn session_id(&self) -> Option<String> {
        self.session_id
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Post an action and return the raw envelope, whatever its status.
    pub(crate) async fn post_action(
        &self,
        action: &str,
        param: Map<String, Value>,
    ) -> Result<ResponseEnvelope, Error> {
        debug!(action, "POST {}", self.endpoint);

        let body = RequestEnvelope { action, param };
        let resp = self
            .http
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Http {
                action: action.to_owned(),
                status: status.as_u16(),
            });
        }

        let text = resp.text().await.map_err(Error::Transport)?;
        trace!(action, body = %text, "response received");

        serde_json::from_str(&text).map_err(|e| {
            let preview = text.chars().take(200).collect::<String>();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: text.clone(),
            }
        })
    }

    /// Post a session action and decode `responsedata` on success.
    ///
    /// Adds `apikey`, `apisessionid` and `customernumber` to `param`.
    pub(crate) async fn session_action<T: DeserializeOwned>(
        &self,
        action: &str,
        param: Map<String, Value>,
    ) -> Result<T, Error> {
        let envelope = self.post_session_action(action, param).await?;
        decode_response_data(action, envelope)
    }

    /// Post a session action whose `responsedata` is irrelevant.
    pub(crate) async fn session_action_unit(
        &self,
        action: &str,
        param: Map<String, Value>,
    ) -> Result<(), Error> {
        self.post_session_action(action, param).await?;
        Ok(())
    }

    async fn post_session_action(
        &self,
        action: &str,
        mut param: Map<String, Value>,
    ) -> Result<ResponseEnvelope, Error> {
        let session_id = self.session_id().ok_or_else(|| Error::SessionRequired {
            action: action.to_owned(),
        })?;

        param.insert(
            "apikey".into(),
            Value::String(self.credentials.api_key.expose_secret().to_owned()),
        );
        param.insert("apisessionid".into(), Value::String(session_id));
        param.insert(
            "customernumber".into(),
            Value::String(self.credentials.customer.clone()),
        );

        let envelope = self.post_action(action, param).await?;
        ensure_success(action, envelope)
    }
}

/// Turn a non-success envelope into `Error::Api`.
pub(crate) fn ensure_success(
    action: &str,
    envelope: ResponseEnvelope,
) -> Result<ResponseEnvelope, Error> {
    if envelope.is_success() {
        Ok(envelope)
    } else {
        Err(Error::Api {
            action: action.to_owned(),
            status_code: envelope.statuscode,
            message: envelope.message(),
        })
    }
}

/// Decode the `responsedata` member of a successful envelope.
pub(crate) fn decode_response_data<T: DeserializeOwned>(
    action: &str,
    envelope: ResponseEnvelope,
) -> Result<T, Error> {
    let raw = envelope.responsedata;
    serde_json::from_value(raw.clone()).map_err(|e| Error::Deserialization {
        message: format!("unexpected responsedata for '{action}': {e}"),
        body: raw.to_string(),
    })
}
