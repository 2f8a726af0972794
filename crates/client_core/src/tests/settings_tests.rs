use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

use super::*;
use crate::format::Presentation;

fn temp_settings_path(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("fee_entry_settings_{tag}_{suffix}.toml"))
}

#[test]
fn missing_file_keeps_defaults() {
    let settings = load_settings_from(&temp_settings_path("missing"));
    assert_eq!(settings, ClientSettings::default());
}

#[test]
fn file_values_override_defaults() {
    let path = temp_settings_path("file");
    fs::write(
        &path,
        "server_url = \"http://school.local:8080/\"\ncurrency_symbol = \"$\"\nrequest_timeout_secs = 15\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path);
    assert_eq!(settings.server_url, "http://school.local:8080/");
    assert_eq!(settings.currency_symbol, "$");
    assert_eq!(settings.date_format, "%-m/%-d/%Y");
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(15)));

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let path = temp_settings_path("malformed");
    fs::write(&path, "server_url = [not toml").expect("write settings");

    assert_eq!(load_settings_from(&path), ClientSettings::default());

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn file_date_format_with_unknown_specifier_keeps_default() {
    let path = temp_settings_path("bad_date_format");
    fs::write(&path, "currency_symbol = \"$\"\ndate_format = \"%Q\"\n").expect("write settings");

    let settings = load_settings_from(&path);
    assert_eq!(settings.currency_symbol, "$");
    assert_eq!(settings.date_format, ClientSettings::default().date_format);

    fs::remove_file(path).expect("cleanup");
}

#[test]
fn env_date_format_with_unknown_specifier_keeps_previous_value() {
    let mut settings = ClientSettings {
        date_format: "%d-%m-%Y".into(),
        ..ClientSettings::default()
    };
    apply_env_overrides(&mut settings, |key| {
        (key == "APP__DATE_FORMAT").then(|| "%Q".to_string())
    });
    assert_eq!(settings.date_format, "%d-%m-%Y");

    let presentation = Presentation::from(&settings);
    assert_eq!(presentation.short_date("2024-01-05"), "05-01-2024");
}

#[test]
fn app_prefixed_env_wins_over_legacy_name() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("FEE_ENTRY_SERVER_URL", "http://legacy:5000"),
        ("APP__SERVER_URL", "http://preferred:5000"),
        ("APP__DATE_FORMAT", "%d/%m/%Y"),
        ("APP__REQUEST_TIMEOUT_SECS", "soon"),
    ]);
    let mut settings = ClientSettings::default();
    apply_env_overrides(&mut settings, |key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(settings.server_url, "http://preferred:5000");
    assert_eq!(settings.date_format, "%d/%m/%Y");
    assert_eq!(settings.request_timeout_secs, None);
}

#[test]
fn zero_timeout_means_no_timeout() {
    let settings = ClientSettings {
        request_timeout_secs: Some(0),
        ..ClientSettings::default()
    };
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn validated_server_url_strips_trailing_slash() {
    let settings = ClientSettings {
        server_url: " https://fees.example.org/ ".into(),
        ..ClientSettings::default()
    };
    assert_eq!(
        settings.validated_server_url().expect("valid url"),
        "https://fees.example.org"
    );
}

#[test]
fn validated_server_url_rejects_bad_input() {
    let relative = ClientSettings {
        server_url: "fees.example.org".into(),
        ..ClientSettings::default()
    };
    assert!(matches!(
        relative.validated_server_url(),
        Err(SettingsError::InvalidServerUrl { .. })
    ));

    let ftp = ClientSettings {
        server_url: "ftp://fees.example.org".into(),
        ..ClientSettings::default()
    };
    assert!(matches!(
        ftp.validated_server_url(),
        Err(SettingsError::UnsupportedScheme(_))
    ));
}
