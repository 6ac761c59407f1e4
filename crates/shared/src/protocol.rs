use serde::{Deserialize, Serialize};

use crate::domain::NotificationRequest;

/// Template variables rendered by the EmailJS template.
///
/// `noCount` keeps the key name the hosted template already references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateParams {
    pub message: String,
    #[serde(rename = "noCount")]
    pub no_count: u64,
    pub accepted_at: String,
}

impl From<&NotificationRequest> for TemplateParams {
    fn from(value: &NotificationRequest) -> Self {
        Self {
            message: value.message.clone(),
            no_count: value.rejection_count,
            accepted_at: value.accepted_at.to_rfc3339(),
        }
    }
}

/// Request body for `POST /api/v1.0/email/send`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmailSendRequest {
    pub service_id: String,
    pub template_id: String,
    pub user_id: String,
    #[serde(rename = "accessToken", skip_serializing_if = "Option::is_none", default)]
    pub access_token: Option<String>,
    pub template_params: TemplateParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_params_use_no_count_key() {
        let request = NotificationRequest::new("She said YES!", 4);
        let value = serde_json::to_value(TemplateParams::from(&request)).expect("serialize");
        assert_eq!(value["noCount"], 4);
        assert_eq!(value["message"], "She said YES!");
        assert!(value.get("no_count").is_none());
    }

    #[test]
    fn access_token_is_omitted_when_absent() {
        let request = NotificationRequest::new("hi", 0);
        let body = EmailSendRequest {
            service_id: "svc".into(),
            template_id: "tpl".into(),
            user_id: "pub".into(),
            access_token: None,
            template_params: TemplateParams::from(&request),
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert!(value.get("accessToken").is_none());
        assert_eq!(value["user_id"], "pub");
    }
}
