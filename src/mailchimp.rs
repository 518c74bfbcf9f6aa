use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, Secret};

use crate::domain::SubscriberEmail;
use crate::routes::error_chain_fmt;

/// Upstream calls are bounded by a single fixed timeout. No retries.
pub const MAILCHIMP_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper over the Mailchimp marketing API.
///
/// Authenticates with HTTP basic auth; Mailchimp ignores the username and
/// reads the API key from the password slot.
pub struct MailchimpClient {
    http_client: Client,
    base_url: String,
    api_key: Secret<String>,
}

impl MailchimpClient {
    pub fn new(base_url: String, api_key: Secret<String>, timeout: Duration) -> Self {
        let http_client = Client::builder().timeout(timeout).build().unwrap();
        Self {
            http_client,
            base_url,
            api_key,
        }
    }

    /// Subscribe `email` to the list identified by `list_id`: verify the list
    /// exists, then create a member record in "pending" status.
    #[tracing::instrument(
        name = "Subscribe an email to a Mailchimp list",
        skip(self, email),
        fields(subscriber_email = %email)
    )]
    pub async fn subscribe(
        &self,
        list_id: &str,
        email: &SubscriberEmail,
    ) -> Result<(), SubscribeError> {
        self.get_list(list_id)
            .await
            .map_err(|source| SubscribeError::ListNotFound {
                list_id: list_id.to_owned(),
                source,
            })?;

        self.create_member(list_id, email)
            .await
            .map_err(|source| SubscribeError::MemberCreateFailed {
                email: email.as_ref().to_owned(),
                source,
            })?;

        Ok(())
    }

    async fn get_list(&self, list_id: &str) -> Result<(), reqwest::Error> {
        let url = format!("{}/3.0/lists/{}", self.base_url, list_id);
        self.http_client
            .get(url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn create_member(
        &self,
        list_id: &str,
        email: &SubscriberEmail,
    ) -> Result<(), reqwest::Error> {
        let url = format!("{}/3.0/lists/{}/members", self.base_url, list_id);
        let body = MemberRequest {
            email_address: email.as_ref(),
            status: "pending",
        };
        self.http_client
            .post(url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()))
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

#[derive(serde::Serialize)]
struct MemberRequest<'a> {
    email_address: &'a str,
    status: &'a str,
}

/// Both steps collapse their transport and HTTP-status failures into a single
/// variant each; the caller only distinguishes which step broke. The upstream
/// error text stays in the source chain and is never shown to HTTP callers.
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("failed to get list {list_id}")]
    ListNotFound {
        list_id: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to subscribe {email}")]
    MemberCreateFailed {
        email: String,
        #[source]
        source: reqwest::Error,
    },
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}
