use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use shared::error::ConfigError;
use url::Url;

use crate::{controller::DEFAULT_NOTIFICATION_MESSAGE, presentation::PresentationTuning};

pub const DEFAULT_CONFIG_FILE: &str = "valentine.toml";
pub const DEFAULT_EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notification: NotificationSettings,
    pub presentation: PresentationTuning,
    pub copy: ScreenCopy,
    pub media: MediaSettings,
    pub confetti: ConfettiSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    pub message: String,
    pub timeout_secs: u64,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EMAILJS_ENDPOINT.into(),
            service_id: "YOUR_SERVICE_ID".into(),
            template_id: "YOUR_TEMPLATE_ID".into(),
            public_key: "YOUR_PUBLIC_KEY".into(),
            private_key: None,
            message: DEFAULT_NOTIFICATION_MESSAGE.into(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenCopy {
    pub window_title: String,
    pub question_title: String,
    pub question_subtitle: String,
    pub accept_label: String,
    pub hint: String,
    pub celebration_title: String,
    pub celebration_body: String,
    pub sending_notice: String,
}

impl Default for ScreenCopy {
    fn default() -> Self {
        Self {
            window_title: "Walentynka".into(),
            question_title: "Serdeczna hejka mam małe pytanko... Zostaniesz moją Walentynką?"
                .into(),
            question_subtitle: "Mam nadziejkę że jest tylko jedna prawidłowa odpowiedź!!!".into(),
            accept_label: "TAK".into(),
            hint: "The more you say no, the bigger the yes gets.".into(),
            celebration_title: "Okay, yay!".into(),
            celebration_body: "You just made my day. I promise to make this Valentine's Day \
                               (and every day after) extra special."
                .into(),
            sending_notice: "Sending a little notification to me right now…".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    pub asking_image_url: String,
    pub celebration_image_url: String,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            asking_image_url: "https://media.giphy.com/media/3oriO0OEd9QIDdllqo/giphy.gif".into(),
            celebration_image_url: "https://media.giphy.com/media/3oriO0MfzG1P3cKYko/giphy.gif"
                .into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfettiSettings {
    pub piece_count: usize,
    pub recycle: bool,
}

impl Default for ConfettiSettings {
    fn default() -> Self {
        Self {
            piece_count: 500,
            recycle: false,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.presentation.validate()?;
        parse_url("notification.endpoint", &self.notification.endpoint)?;
        for (field, value) in [
            ("media.asking_image_url", &self.media.asking_image_url),
            (
                "media.celebration_image_url",
                &self.media.celebration_image_url,
            ),
        ] {
            if !value.trim().is_empty() {
                parse_url(field, value)?;
            }
        }
        Ok(())
    }

    /// Copy safe to print: credentials replaced with a marker.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        let notification = &mut copy.notification;
        notification.public_key = redact(&notification.public_key);
        notification.private_key = notification.private_key.as_deref().map(redact);
        copy
    }
}

fn redact(secret: &str) -> String {
    if secret.is_empty() {
        String::new()
    } else {
        "<redacted>".to_string()
    }
}

fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value.trim()).map_err(|err| ConfigError::InvalidUrl {
        field,
        message: format!("'{value}': {err}"),
    })
}

/// Defaults, then `valentine.toml` (or `explicit_path`), then environment.
pub fn load_settings(explicit_path: Option<&Path>) -> Result<Settings, ConfigError> {
    load_settings_with(explicit_path, |name| std::env::var(name).ok())
}

pub fn load_settings_with(
    explicit_path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings, ConfigError> {
    let mut settings = match explicit_path {
        Some(path) => read_settings_file(path)?,
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_settings_file(&path)?
            } else {
                tracing::debug!("no {DEFAULT_CONFIG_FILE} found; using built-in settings");
                Settings::default()
            }
        }
    };

    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

fn read_settings_file(path: &Path) -> Result<Settings, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let settings = toml::from_str::<Settings>(&raw).map_err(|err| ConfigError::Parse {
        path: path.display().to_string(),
        message: err.to_string(),
    })?;
    tracing::info!(path = %path.display(), "loaded settings file");
    Ok(settings)
}

fn first_non_empty(env: &impl Fn(&str) -> Option<String>, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| env(name))
        .find(|value| !value.trim().is_empty())
}

fn apply_env_overrides(settings: &mut Settings, env: impl Fn(&str) -> Option<String>) {
    let notification = &mut settings.notification;

    if let Some(v) = first_non_empty(&env, &["APP__EMAILJS_ENDPOINT"]) {
        notification.endpoint = v;
    }
    if let Some(v) = first_non_empty(&env, &["APP__EMAILJS_SERVICE_ID", "EMAILJS_SERVICE_ID"]) {
        notification.service_id = v;
    }
    if let Some(v) = first_non_empty(&env, &["APP__EMAILJS_TEMPLATE_ID", "EMAILJS_TEMPLATE_ID"]) {
        notification.template_id = v;
    }
    if let Some(v) = first_non_empty(&env, &["APP__EMAILJS_PUBLIC_KEY", "EMAILJS_PUBLIC_KEY"]) {
        notification.public_key = v;
    }
    if let Some(v) = first_non_empty(&env, &["APP__EMAILJS_PRIVATE_KEY", "EMAILJS_PRIVATE_KEY"]) {
        notification.private_key = Some(v);
    }
    if let Some(v) = first_non_empty(&env, &["APP__NOTIFICATION_MESSAGE"]) {
        notification.message = v;
    }
    if let Some(v) = first_non_empty(&env, &["APP__NOTIFICATION_TIMEOUT_SECS"]) {
        match v.trim().parse::<u64>() {
            Ok(parsed) => notification.timeout_secs = parsed,
            Err(err) => tracing::warn!("ignoring APP__NOTIFICATION_TIMEOUT_SECS={v}: {err}"),
        }
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
