// Session login / logout
//
// `login` exchanges API key + API password for an `apisessionid` which
// every later action must carry. Sessions expire server-side after a few
// minutes of inactivity, so callers log in right before a batch of work.

use secrecy::ExposeSecret;
use serde_json::{Map, Value};
use tracing::debug;

use crate::client::{NetcupClient, decode_response_data};
use crate::error::Error;
use crate::models::LoginData;

impl NetcupClient {
    /// Authenticate and store the session id.
    ///
    /// A non-success envelope becomes `Error::Authentication` quoting the
    /// customer number, the endpoint's message and its status code.
    pub async fn login(&self) -> Result<(), Error> {
        let creds = self.credentials();
        debug!(customer = %creds.customer, "logging in");

        let mut param = Map::new();
        param.insert(
            "apikey".into(),
            Value::String(creds.api_key.expose_secret().to_owned()),
        );
        param.insert(
            "apipassword".into(),
            Value::String(creds.api_password.expose_secret().to_owned()),
        );
        param.insert(
            "customernumber".into(),
            Value::String(creds.customer.clone()),
        );

        let envelope = self.post_action("login", param).await?;
        if !envelope.is_success() {
            return Err(Error::Authentication {
                message: format!(
                    "login failed for customer ID {}: {} (status code {})",
                    creds.customer,
                    envelope.message(),
                    envelope.statuscode
                ),
            });
        }

        let data: LoginData = decode_response_data("login", envelope)?;
        self.set_session_id(Some(data.apisessionid));
        debug!("login successful");
        Ok(())
    }

    /// End the current session. The local session id is dropped even if
    /// the endpoint reports an error.
    pub async fn logout(&self) -> Result<(), Error> {
        debug!("logging out");
        let result = self.session_action_unit("logout", Map::new()).await;
        self.set_session_id(None);
        result
    }
}
