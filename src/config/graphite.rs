use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphiteProtocol {
    Tcp,
    Udp,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct GraphiteConfig {
    pub host: String,
    pub port: u16,
    pub prefix: String,
    pub protocol: GraphiteProtocol,
    pub connect_timeout_ms: u64,
}

impl GraphiteConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for GraphiteConfig {
    fn default() -> Self {
        GraphiteConfig {
            host: "localhost".to_string(),
            port: 2003,
            prefix: "fuelagg.tankerkoenig".to_string(),
            protocol: GraphiteProtocol::Tcp,
            connect_timeout_ms: 5000,
        }
    }
}
