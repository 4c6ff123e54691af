//! HTTP oracle querying the user service's existence endpoint.

use async_trait::async_trait;
use std::time::Duration;

use crate::config::UserServiceSettings;
use crate::task::{
    domain::UserId,
    ports::{UserExistenceOracle, UserLookupError, UserLookupResult},
};

/// Placeholder replaced by the user identifier in the endpoint path.
const ID_PLACEHOLDER: &str = "{id}";

/// Oracle that asks the user service over HTTP.
///
/// Sends `GET {base_url}{exists_path}` and expects a 2xx response whose body
/// is the JSON literal `true` or `false`. Any other outcome, including a
/// timeout, is a [`UserLookupError`]. There are no retries.
#[derive(Debug, Clone)]
pub struct HttpUserExistenceOracle {
    client: reqwest::Client,
    base_url: String,
    exists_path: String,
    timeout: Duration,
}

impl HttpUserExistenceOracle {
    /// Builds an oracle whose client enforces the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns [`UserLookupError::Transport`] when the HTTP client cannot be
    /// constructed.
    pub fn from_settings(settings: &UserServiceSettings) -> UserLookupResult<Self> {
        let timeout = settings.timeout();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(UserLookupError::transport)?;
        Ok(Self::with_client(
            client,
            settings.base_url.clone(),
            settings.exists_path.clone(),
            timeout,
        ))
    }

    /// Creates an oracle from an existing client.
    ///
    /// `timeout` is only reported in [`UserLookupError::Timeout`]; the client
    /// must already enforce it.
    #[must_use]
    pub fn with_client(
        client: reqwest::Client,
        base_url: impl Into<String>,
        exists_path: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            exists_path: exists_path.into(),
            timeout,
        }
    }

    /// Returns the URL queried for `user_id`.
    #[must_use]
    pub fn endpoint(&self, user_id: UserId) -> String {
        let path = self
            .exists_path
            .replace(ID_PLACEHOLDER, &user_id.value().to_string());
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn classify(&self, err: reqwest::Error) -> UserLookupError {
        if err.is_timeout() {
            UserLookupError::Timeout(self.timeout)
        } else {
            UserLookupError::transport(err)
        }
    }
}

#[async_trait]
impl UserExistenceOracle for HttpUserExistenceOracle {
    async fn exists(&self, user_id: UserId) -> UserLookupResult<bool> {
        let url = self.endpoint(user_id);
        tracing::debug!(%user_id, %url, "querying user service for existence");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| self.classify(err))?;
        let status = response.status();
        if !status.is_success() {
            return Err(UserLookupError::UnexpectedStatus(status));
        }

        let body = response.text().await.map_err(|err| self.classify(err))?;
        parse_existence_body(&body)
    }
}

fn parse_existence_body(body: &str) -> UserLookupResult<bool> {
    serde_json::from_str::<bool>(body.trim())
        .map_err(|_| UserLookupError::MalformedBody(body.to_owned()))
}
