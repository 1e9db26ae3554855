use std::time::Duration;

use serde::{Deserialize, Serialize};
use uptime_probe::ReportMode;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GeneralConfig {
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> GeneralConfig {
        GeneralConfig {
            log_level: "info".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// externally visible base url, used for `tick_url`; derived from the Host header when unset
    pub public_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> ServerConfig {
        ServerConfig {
            host: "0.0.0.0".into(),
            port: 8000,
            public_url: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProbeConfig {
    pub timeout_secs: u64,
    pub max_concurrency: usize,
    /// 0 disables the batch deadline
    pub batch_timeout_secs: u64,
    pub target_prefix: String,
    pub report_mode: ReportMode,
}

impl ProbeConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn batch_timeout(&self) -> Option<Duration> {
        match self.batch_timeout_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }
}

impl Default for ProbeConfig {
    fn default() -> ProbeConfig {
        ProbeConfig {
            timeout_secs: 10,
            max_concurrency: 16,
            batch_timeout_secs: 30,
            target_prefix: "site".into(),
            report_mode: ReportMode::Strict,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CallbackConfig {
    pub max_retries: u32,
    pub timeout_secs: u64,
}

impl Default for CallbackConfig {
    fn default() -> CallbackConfig {
        CallbackConfig {
            max_retries: 2,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PipelineConfig {
    pub queue_capacity: usize,
    pub max_concurrent_runs: usize,
    pub single_flight: bool,
}

impl Default for PipelineConfig {
    fn default() -> PipelineConfig {
        PipelineConfig {
            queue_capacity: 64,
            max_concurrent_runs: 8,
            single_flight: false,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntegrationConfig {
    pub app_name: String,
    pub app_description: String,
    pub app_logo: String,
    pub background_color: String,
    pub interval: String,
}

impl Default for IntegrationConfig {
    fn default() -> IntegrationConfig {
        IntegrationConfig {
            app_name: "Uptime Monitor".into(),
            app_description: "Monitors website uptime".into(),
            app_logo: "https://i.imgur.com/lZqvffp.png".into(),
            background_color: "#fff".into(),
            interval: "* * * * *".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormatterConfig {
    /// fallback destination for formatted messages when the request carries none
    pub return_url: Option<String>,
    pub username: String,
    pub event_name: String,
}

impl Default for FormatterConfig {
    fn default() -> FormatterConfig {
        FormatterConfig {
            return_url: None,
            username: "message-formatter-bot".into(),
            event_name: "message_formatted".into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct NumbersConfig {
    pub fun_fact_url: String,
    pub timeout_secs: u64,
}

impl Default for NumbersConfig {
    fn default() -> NumbersConfig {
        NumbersConfig {
            fun_fact_url: "http://numbersapi.com".into(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct InfoConfig {
    pub email: String,
    pub github_url: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub server: ServerConfig,
    pub probe: ProbeConfig,
    pub callback: CallbackConfig,
    pub pipeline: PipelineConfig,
    pub integration: IntegrationConfig,
    pub formatter: FormatterConfig,
    pub numbers: NumbersConfig,
    pub info: InfoConfig,
}

impl AppConfig {
    /// defaults, overridden by the toml file, overridden by `UPTIMED_*` env vars
    pub fn load(config_path: &str) -> eyre::Result<AppConfig> {
        use figment::{
            providers::{Env, Format, Serialized, Toml},
            Figment,
        };

        let config = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("UPTIMED_").split("__"))
            .extract::<AppConfig>()?;

        Ok(config)
    }
}
