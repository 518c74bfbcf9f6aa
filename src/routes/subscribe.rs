use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};

use crate::domain::SubscriberEmail;
use crate::mailchimp::{MailchimpClient, SubscribeError};
use crate::routes::{error_chain_fmt, ErrorResponse};

#[derive(Deserialize)]
pub struct SubscriptionRequest {
    email: String,
    #[serde(rename = "listID")]
    list_id: String,
}

#[derive(Serialize)]
pub struct SubscriptionResponse {
    status: &'static str,
}

#[tracing::instrument(
    name = "Forward a subscription to Mailchimp",
    skip(request, mailchimp_client),
    fields(
        subscriber_email = %request.email,
        list_id = %request.list_id,
    )
)]
pub async fn subscribe(
    request: web::Json<SubscriptionRequest>,
    mailchimp_client: web::Data<MailchimpClient>,
) -> Result<HttpResponse, SubscriptionError> {
    let email = SubscriberEmail::parse(request.email.trim())
        .map_err(SubscriptionError::ValidationError)?;
    let list_id = request.list_id.trim();

    mailchimp_client.subscribe(list_id, &email).await?;

    Ok(HttpResponse::Ok().json(SubscriptionResponse { status: "ok" }))
}

#[derive(thiserror::Error)]
pub enum SubscriptionError {
    #[error("{0}")]
    ValidationError(String),
    #[error(transparent)]
    SubscribeFailed(#[from] SubscribeError),
}

impl std::fmt::Debug for SubscriptionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscriptionError {
    // Validation and upstream failures both surface as 400; callers retry
    // with corrected input.
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            message: self.to_string(),
        })
    }
}
