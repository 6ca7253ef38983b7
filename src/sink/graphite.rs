use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpStream, UdpSocket};
use crate::config::{GraphiteConfig, GraphiteProtocol};
use crate::error::{Error, Result};
use crate::interfaces::aggregate_sink::AggregateSink;
use crate::types::aggregate::Aggregate;
use crate::types::partition::sanitize_metric_component;

/// Sends aggregates to Graphite using the plaintext protocol.
pub struct GraphiteSink {
    config: GraphiteConfig,
}

impl GraphiteSink {
    pub fn new(config: GraphiteConfig) -> Self {
        GraphiteSink { config }
    }

    /// One `path value timestamp` line per metric.
    pub fn render(&self, aggregate: &Aggregate) -> String {
        let prefix: Vec<String> = self.config.prefix
            .split('.')
            .filter(|part| !part.trim().is_empty())
            .map(sanitize_metric_component)
            .collect();
        let timestamp = aggregate.unix_timestamp();

        aggregate.metrics()
            .into_iter()
            .map(|(metric, value)| {
                let mut path = prefix.clone();
                path.push(metric);
                format!("{} {} {}\n", path.join("."), value, timestamp)
            })
            .collect()
    }

    async fn send_tcp(&self, payload: &[u8]) -> Result<()> {
        let address = self.config.address();
        let mut stream = tokio::time::timeout(self.config.connect_timeout(), TcpStream::connect(&address))
            .await
            .map_err(|_| Error::SinkError(format!("connect to {} timed out", address)))?
            .map_err(|e| Error::SinkError(format!("connect to {} failed: {}", address, e)))?;

        stream.write_all(payload).await?;
        stream.shutdown().await?;
        Ok(())
    }

    async fn send_udp(&self, payload: &[u8]) -> Result<()> {
        let socket = UdpSocket::bind("0.0.0.0:0").await?;
        socket.send_to(payload, self.config.address()).await?;
        Ok(())
    }
}

#[async_trait]
impl AggregateSink for GraphiteSink {
    async fn write(&self, aggregate: &Aggregate) -> Result<()> {
        let payload = self.render(aggregate);

        let sent = match self.config.protocol {
            GraphiteProtocol::Tcp => self.send_tcp(payload.as_bytes()).await,
            GraphiteProtocol::Udp => self.send_udp(payload.as_bytes()).await,
        };

        match sent {
            Ok(()) => {
                tracing::info!(
                    "Sent data to graphite: {:?} with timestamp {} ({})",
                    aggregate.metrics(),
                    aggregate.unix_timestamp(),
                    aggregate.timestamp,
                );
                Ok(())
            }
            Err(Error::IoError(e)) => Err(Error::SinkError(e.to_string())),
            Err(e) => Err(e),
        }
    }
}
