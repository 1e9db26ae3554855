use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub mod outcome;

pub const DEFAULT_TARGET_PREFIX: &str = "site";

/// one configurable parameter as sent by the integration platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub label: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub required: bool,
    pub default: String,
}

/// body of an inbound tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonitorRequest {
    pub channel_id: String,
    pub return_url: String,
    pub settings: Vec<Setting>,
}

impl MonitorRequest {
    /// urls to probe: the `default` of every setting whose label starts with `prefix`,
    /// in settings order, duplicates included
    pub fn targets(&self, prefix: &str) -> Vec<String> {
        self.settings
            .iter()
            .filter(|setting| setting.label.starts_with(prefix))
            .map(|setting| setting.default.clone())
            .collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        match reqwest::Url::parse(&self.return_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") && url.has_host() => Ok(()),
            _ => Err(ValidationError::InvalidReturnUrl(self.return_url.clone())),
        }
    }
}

/// Whether an `Up` outcome carries an acknowledgement and whether an all-clear
/// report says so. `Strict` keeps both empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    #[default]
    Strict,
    Lenient,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setting(label: &str, default: &str) -> Setting {
        Setting {
            label: label.into(),
            kind: "text".into(),
            required: true,
            default: default.into(),
        }
    }

    fn request(return_url: &str, settings: Vec<Setting>) -> MonitorRequest {
        MonitorRequest {
            channel_id: "chan-1".into(),
            return_url: return_url.into(),
            settings,
        }
    }

    #[test]
    fn targets_follow_settings_order_and_keep_duplicates() {
        let request = request(
            "https://hooks.example/return",
            vec![
                setting("site-2", "https://b.example"),
                setting("interval", "* * * * *"),
                setting("site-1", "https://a.example"),
                setting("site-3", "https://b.example"),
                setting("website", "https://ignored.example"),
            ],
        );

        assert_eq!(
            request.targets(DEFAULT_TARGET_PREFIX),
            vec![
                "https://b.example".to_string(),
                "https://a.example".to_string(),
                "https://b.example".to_string(),
            ]
        );
    }

    #[test]
    fn empty_defaults_are_still_targets() {
        let request = request("https://hooks.example", vec![setting("site-1", "")]);
        assert_eq!(request.targets("site"), vec![String::new()]);
    }

    #[test]
    fn deserializes_wire_format() {
        let body = r#"{
            "channel_id": "0192",
            "return_url": "https://ping.telex.im/v1/return/0192",
            "settings": [
                {"label": "site-1", "type": "text", "required": true, "default": "https://example.com"}
            ]
        }"#;

        let request: MonitorRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.settings[0].kind, "text");
        assert_eq!(request.targets("site"), vec!["https://example.com"]);
    }

    #[test]
    fn missing_settings_field_is_rejected() {
        let body = r#"{"channel_id": "0192", "return_url": "https://example.com"}"#;
        assert!(serde_json::from_str::<MonitorRequest>(body).is_err());
    }

    #[test]
    fn validate_accepts_http_and_https_only() {
        let valid = |url: &str| request(url, vec![]).validate().is_ok();

        assert!(valid("https://hooks.example/x"));
        assert!(valid("http://127.0.0.1:9000/cb"));
        assert!(!valid("ftp://hooks.example/x"));
        assert!(!valid("not a url"));
        assert!(!valid(""));
    }

    #[test]
    fn report_mode_uses_lowercase_names() {
        let mode: ReportMode = serde_json::from_str("\"lenient\"").unwrap();
        assert_eq!(mode, ReportMode::Lenient);
        let strict = serde_json::to_string(&ReportMode::Strict).unwrap();
        assert_eq!(strict, "\"strict\"");
        assert!(serde_json::from_str::<ReportMode>("\"loose\"").is_err());
    }
}
