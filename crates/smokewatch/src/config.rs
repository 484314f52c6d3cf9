//! Runtime configuration

use std::time::Duration;

use anyhow::Result;
use serde::Deserialize;
use smokewatch_lib::transport::BrokerConfig;

/// Monitor configuration, loaded from `SMOKEWATCH_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// AMQP broker host
    #[serde(default = "default_host")]
    pub host: String,

    /// AMQP broker port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds between published records
    #[serde(default = "default_cadence_secs")]
    pub cadence_secs: u64,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5672
}

fn default_cadence_secs() -> u64 {
    30
}

impl MonitorConfig {
    /// Load configuration from the environment.
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("SMOKEWATCH"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| MonitorConfig {
            host: default_host(),
            port: default_port(),
            cadence_secs: default_cadence_secs(),
        }))
    }

    /// Broker settings for the transport layer.
    pub fn broker(&self) -> BrokerConfig {
        BrokerConfig::new(&self.host, self.port)
    }

    /// Pacing interval for the distributor.
    pub fn cadence(&self) -> Duration {
        Duration::from_secs(self.cadence_secs)
    }
}
