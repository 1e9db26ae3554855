use serde::Serialize;
use uptime_probe::Setting;

use crate::config::IntegrationConfig;

#[derive(Debug, Serialize)]
pub struct IntegrationDescriptor {
    pub data: IntegrationData,
}

#[derive(Debug, Serialize)]
pub struct IntegrationData {
    pub descriptions: IntegrationDescriptions,
    pub integration_type: String,
    pub integration_category: String,
    pub key_features: Vec<String>,
    pub settings: Vec<Setting>,
    pub tick_url: String,
}

#[derive(Debug, Serialize)]
pub struct IntegrationDescriptions {
    pub app_name: String,
    pub app_description: String,
    pub app_url: String,
    pub app_logo: String,
    pub background_color: String,
}

fn text_setting(label: &str, default: &str) -> Setting {
    Setting {
        label: label.into(),
        kind: "text".into(),
        required: true,
        default: default.into(),
    }
}

impl IntegrationDescriptor {
    /// `base_url` must not end with a slash
    pub fn new(config: &IntegrationConfig, base_url: &str) -> Self {
        IntegrationDescriptor {
            data: IntegrationData {
                descriptions: IntegrationDescriptions {
                    app_name: config.app_name.clone(),
                    app_description: config.app_description.clone(),
                    app_url: base_url.to_string(),
                    app_logo: config.app_logo.clone(),
                    background_color: config.background_color.clone(),
                },
                integration_type: "interval".into(),
                integration_category: "Website Uptime".into(),
                key_features: vec!["\"checks uptime\"".into()],
                settings: vec![
                    text_setting("site-1", ""),
                    text_setting("site-2", ""),
                    text_setting("interval", &config.interval),
                ],
                tick_url: format!("{}/tick", base_url),
            },
        }
    }
}
