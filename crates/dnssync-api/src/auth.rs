use std::fmt;

use secrecy::SecretString;

/// Credentials for the netcup customer control panel API.
///
/// The API key identifies the application, the API password authenticates
/// it. Both are generated in the CCP under "Master Data > API".
#[derive(Clone)]
pub struct Credentials {
    /// Customer number; sent as a string on the wire.
    pub customer: String,
    pub api_key: SecretString,
    pub api_password: SecretString,
}

impl Credentials {
    pub fn new(
        customer: impl Into<String>,
        api_key: impl Into<SecretString>,
        api_password: impl Into<SecretString>,
    ) -> Self {
        Self {
            customer: customer.into(),
            api_key: api_key.into(),
            api_password: api_password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("customer", &self.customer)
            .field("api_key", &"****")
            .field("api_password", &"****")
            .finish()
    }
}
