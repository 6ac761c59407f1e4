use super::*;

use std::{
    collections::HashMap,
    env,
    sync::atomic::{AtomicUsize, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

static NEXT_CONFIG: AtomicUsize = AtomicUsize::new(0);

fn no_env(_: &str) -> Option<String> {
    None
}

fn temp_config(contents: &str) -> PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let seq = NEXT_CONFIG.fetch_add(1, Ordering::SeqCst);
    let path = env::temp_dir().join(format!("valentine_config_test_{suffix}_{seq}.toml"));
    fs::write(&path, contents).expect("write config");
    path
}

#[test]
fn defaults_carry_original_constants() {
    let settings = Settings::default();
    assert_eq!(settings.notification.message, "She said YES!");
    assert_eq!(settings.notification.endpoint, DEFAULT_EMAILJS_ENDPOINT);
    assert_eq!(settings.presentation.decline_phrases.len(), 17);
    assert_eq!(settings.confetti.piece_count, 500);
    assert!(!settings.confetti.recycle);
    assert_eq!(settings.copy.accept_label, "TAK");
    settings.validate().expect("defaults validate");
}

#[test]
fn file_values_override_defaults_and_keep_the_rest() {
    let path = temp_config(
        r#"
[notification]
service_id = "service_abc"
timeout_secs = 3

[presentation]
scale_cap = 4.0
decline_phrases = ["no", "please"]

[confetti]
piece_count = 120
"#,
    );

    let settings = load_settings_with(Some(path.as_path()), no_env).expect("load");
    assert_eq!(settings.notification.service_id, "service_abc");
    assert_eq!(settings.notification.timeout_secs, 3);
    assert_eq!(settings.notification.template_id, "YOUR_TEMPLATE_ID");
    assert_eq!(settings.presentation.scale_cap, 4.0);
    assert_eq!(settings.presentation.scale_step, 0.25);
    assert_eq!(settings.presentation.decline_phrases, vec!["no", "please"]);
    assert_eq!(settings.confetti.piece_count, 120);
    assert_eq!(settings.copy, ScreenCopy::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_overrides_win_over_file_and_app_prefix_wins_over_plain() {
    let path = temp_config(
        r#"
[notification]
service_id = "from_file"
public_key = "from_file"
"#,
    );
    let vars: HashMap<&str, &str> = HashMap::from([
        ("EMAILJS_SERVICE_ID", "plain"),
        ("APP__EMAILJS_SERVICE_ID", "prefixed"),
        ("EMAILJS_PUBLIC_KEY", "pk_env"),
        ("APP__EMAILJS_TEMPLATE_ID", "   "),
        ("APP__NOTIFICATION_TIMEOUT_SECS", "7"),
    ]);

    let settings = load_settings_with(Some(path.as_path()), |name| {
        vars.get(name).map(|value| (*value).to_string())
    })
    .expect("load");

    assert_eq!(settings.notification.service_id, "prefixed");
    assert_eq!(settings.notification.public_key, "pk_env");
    assert_eq!(settings.notification.template_id, "YOUR_TEMPLATE_ID");
    assert_eq!(settings.notification.timeout_secs, 7);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn unparsable_timeout_override_is_ignored() {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings, |name| {
        (name == "APP__NOTIFICATION_TIMEOUT_SECS").then(|| "soon".to_string())
    });
    assert_eq!(settings.notification.timeout_secs, 10);
}

#[test]
fn missing_explicit_file_is_an_error() {
    let path = env::temp_dir().join("valentine_config_does_not_exist.toml");
    let err = load_settings_with(Some(path.as_path()), no_env).expect_err("missing file");
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn malformed_file_is_a_parse_error() {
    let path = temp_config("[notification\nservice_id = ");
    let err = load_settings_with(Some(path.as_path()), no_env).expect_err("parse error");
    assert!(matches!(err, ConfigError::Parse { .. }));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn invalid_tuning_in_file_is_rejected() {
    let path = temp_config("[presentation]\ndecline_phrases = []\n");
    let err = load_settings_with(Some(path.as_path()), no_env).expect_err("invalid tuning");
    assert!(matches!(err, ConfigError::InvalidTuning(_)));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn invalid_endpoint_is_rejected() {
    let mut settings = Settings::default();
    settings.notification.endpoint = "not a url".into();
    let err = settings.validate().expect_err("bad url");
    assert!(matches!(
        err,
        ConfigError::InvalidUrl {
            field: "notification.endpoint",
            ..
        }
    ));
}

#[test]
fn empty_media_url_is_allowed() {
    let mut settings = Settings::default();
    settings.media.celebration_image_url.clear();
    settings.validate().expect("empty media url means no image");
}

#[test]
fn redacted_hides_keys_but_keeps_identifiers() {
    let mut settings = Settings::default();
    settings.notification.public_key = "pk_live".into();
    settings.notification.private_key = Some("sk_live".into());

    let redacted = settings.redacted();
    assert_eq!(redacted.notification.public_key, "<redacted>");
    assert_eq!(redacted.notification.private_key.as_deref(), Some("<redacted>"));
    assert_eq!(redacted.notification.service_id, "YOUR_SERVICE_ID");

    let rendered = toml::to_string(&redacted).expect("serialize");
    assert!(!rendered.contains("pk_live"));
    assert!(!rendered.contains("sk_live"));
}
