//! EmailJS delivery for the acceptance notification.
//!
//! Talks to the public REST endpoint (`/api/v1.0/email/send`) the browser SDK
//! wraps. The account must allow non-browser API calls for this to succeed.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use shared::{
    domain::NotificationRequest,
    error::NotificationError,
    protocol::{EmailSendRequest, TemplateParams},
};
use url::Url;
use valentine_core::{config::NotificationSettings, DisabledNotifier, NotificationCollaborator};

const PLACEHOLDER_PREFIX: &str = "YOUR_";
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailJsConfig {
    pub endpoint: Url,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub private_key: Option<String>,
    pub timeout: Duration,
}

impl EmailJsConfig {
    pub fn from_settings(settings: &NotificationSettings) -> Result<Self, NotificationError> {
        let endpoint = Url::parse(settings.endpoint.trim()).map_err(|err| {
            NotificationError::InvalidRequest(format!(
                "invalid EmailJS endpoint '{}': {err}",
                settings.endpoint
            ))
        })?;
        Ok(Self {
            endpoint,
            service_id: settings.service_id.trim().to_string(),
            template_id: settings.template_id.trim().to_string(),
            public_key: settings.public_key.trim().to_string(),
            private_key: settings
                .private_key
                .as_deref()
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            timeout: Duration::from_secs(settings.timeout_secs.max(1)),
        })
    }

    /// False while any identifier is empty or still a `YOUR_…` placeholder.
    pub fn is_configured(&self) -> bool {
        [&self.service_id, &self.template_id, &self.public_key]
            .iter()
            .all(|value| !value.is_empty() && !value.starts_with(PLACEHOLDER_PREFIX))
    }

    fn body_for(&self, request: &NotificationRequest) -> EmailSendRequest {
        EmailSendRequest {
            service_id: self.service_id.clone(),
            template_id: self.template_id.clone(),
            user_id: self.public_key.clone(),
            access_token: self.private_key.clone(),
            template_params: TemplateParams::from(request),
        }
    }
}

pub struct EmailJsClient {
    http: HttpClient,
    config: EmailJsConfig,
}

impl EmailJsClient {
    pub fn new(config: EmailJsConfig) -> Result<Self, NotificationError> {
        let http = HttpClient::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| {
                NotificationError::Transport(format!("failed to build http client: {err}"))
            })?;
        Ok(Self { http, config })
    }
}

#[async_trait]
impl NotificationCollaborator for EmailJsClient {
    async fn send(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        if !self.config.is_configured() {
            return Err(NotificationError::NotConfigured);
        }

        let body = self.config.body_for(request);
        tracing::debug!(
            endpoint = %self.config.endpoint,
            service_id = %body.service_id,
            template_id = %body.template_id,
            "sending EmailJS notification"
        );

        let response = self
            .http
            .post(self.config.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(|err| NotificationError::Transport(err.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body: truncate_chars(body.trim(), MAX_ERROR_BODY_CHARS),
        })
    }

    fn name(&self) -> &'static str {
        "emailjs"
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.to_string(),
    }
}

/// EmailJS when the credentials look real, the disabled stand-in otherwise.
pub fn build_collaborator(settings: &NotificationSettings) -> Arc<dyn NotificationCollaborator> {
    let config = match EmailJsConfig::from_settings(settings) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("notification disabled: {err}");
            return Arc::new(DisabledNotifier);
        }
    };

    if !config.is_configured() {
        tracing::warn!("EmailJS identifiers are placeholders; acceptance notification disabled");
        return Arc::new(DisabledNotifier);
    }

    match EmailJsClient::new(config) {
        Ok(client) => Arc::new(client),
        Err(err) => {
            tracing::warn!("notification disabled: {err}");
            Arc::new(DisabledNotifier)
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
