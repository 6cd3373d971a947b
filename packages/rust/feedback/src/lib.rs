//! Citizen feedback mailbox client.
//!
//! The form is posted as `multipart/form-data` to a fixed endpoint that
//! answers with `{"status": "ok"}` or `{"status": "...", "message": "..."}`.
//! Submission borrows the form, so on failure the caller still holds every
//! field and can retry by hand. Nothing is retried automatically.

mod form;

use std::time::Duration;

use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use url::Url;

use sheetsite_shared::{AppConfig, Result, SheetsiteError};

pub use form::{
    Attachment, AttachmentKind, FeedbackForm, MAX_ATTACHMENT_BYTES, only_letters,
    only_phone_chars,
};

/// User-Agent string for feedback submissions.
const USER_AGENT: &str = concat!("sheetsite/", env!("CARGO_PKG_VERSION"));

/// Status value the endpoint uses for success.
const STATUS_OK: &str = "ok";

/// Endpoint response body.
#[derive(Debug, Deserialize)]
struct SubmitResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

/// Confirmation returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    /// Server-provided message, if any.
    pub message: Option<String>,
}

/// Posts feedback forms to the mailbox endpoint.
#[derive(Debug, Clone)]
pub struct FeedbackClient {
    client: Client,
    endpoint: Url,
}

impl FeedbackClient {
    /// Create a client from the application config.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.http.timeout_secs))
            .build()
            .map_err(|e| SheetsiteError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: config.feedback.endpoint_url()?,
        })
    }

    /// Sanitize, validate and submit `form`.
    ///
    /// Validation failures return before any request is made.
    #[instrument(skip_all, fields(endpoint = %self.endpoint))]
    pub async fn submit(&self, form: &FeedbackForm) -> Result<Receipt> {
        let form = form.sanitized();
        form.validate()?;

        let multipart = build_multipart(&form)?;

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(multipart)
            .send()
            .await
            .map_err(|e| SheetsiteError::Network(format!("{}: {e}", self.endpoint)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SheetsiteError::Network(format!("failed to read response: {e}")))?;

        let parsed: SubmitResponse = serde_json::from_str(&body).map_err(|e| {
            SheetsiteError::parse(format!("unexpected response (HTTP {status}): {e}"))
        })?;

        if parsed.status == STATUS_OK {
            info!(has_attachment = form.attachment.is_some(), "feedback submitted");
            Ok(Receipt {
                message: parsed.message,
            })
        } else {
            let message = parsed
                .message
                .unwrap_or_else(|| format!("status '{}'", parsed.status));
            warn!(%message, "feedback rejected");
            Err(SheetsiteError::Rejected(message))
        }
    }
}

/// Field names match the mailbox endpoint's form.
fn build_multipart(form: &FeedbackForm) -> Result<Form> {
    let mut multipart = Form::new()
        .text("nombre", form.name.trim().to_string())
        .text("canton", form.region.trim().to_string())
        .text("correo", form.email.trim().to_string())
        .text("whatsapp", form.phone.clone())
        .text("asunto", form.subject.trim().to_string())
        .text("mensaje", form.message.trim().to_string());

    if let Some(attachment) = &form.attachment {
        let part = Part::bytes(attachment.bytes().to_vec())
            .file_name(attachment.file_name().to_string())
            .mime_str(attachment.kind().mime())
            .map_err(|e| SheetsiteError::validation(format!("invalid attachment type: {e}")))?;
        multipart = multipart.part("archivo", part);
    }

    Ok(multipart)
}
