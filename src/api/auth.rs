use super::{ApiClient, ApiError, Body, Registration, TokenGrant};
use log::*;
use reqwest::Method;

/// Account endpoints: registration and credential issuing.
///
pub struct AuthGateway<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthGateway<'a> {
    pub(super) fn new(client: &'a ApiClient) -> Self {
        AuthGateway { client }
    }

    /// Create an account. The response body is ignored.
    ///
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ApiError> {
        debug!("Registering account for {}...", email);
        let body = serde_json::to_value(Registration {
            email: email.to_owned(),
            password: password.to_owned(),
        })?;
        self.client
            .request("/auth/register", Method::POST, Some(Body::Json(body)))
            .await?;
        Ok(())
    }

    /// Exchange credentials for an access token. The issuing endpoint only
    /// accepts form encoding, with the email sent as `username`.
    ///
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ApiError> {
        debug!("Requesting access token for {}...", email);
        let body = Body::Form(vec![
            ("username".to_owned(), email.to_owned()),
            ("password".to_owned(), password.to_owned()),
        ]);
        let grant: TokenGrant = self
            .client
            .request_as("/auth/login", Method::POST, Some(body))
            .await?;
        if grant.access_token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        Ok(grant.access_token)
    }
}
