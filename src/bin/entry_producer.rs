use std::path::PathBuf;
use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{info, warn};
use fuelagg::config::AppConfig;
use fuelagg::event_log::KafkaEntryProducer;
use fuelagg::events::route;
use fuelagg::observability::tracing::init_tracing;

/// Publishes newline-delimited JSON price entries, one partition per postal-code region.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration profile loaded from `config/{env}.toml`
    #[arg(long, default_value = "development")]
    env: String,

    /// Input file; reads stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = AppConfig::load(&args.env).context("failed to load configuration")?;
    init_tracing(&config.logging).context("failed to initialise tracing")?;

    let producer = KafkaEntryProducer::new(&config.kafka).context("failed to create producer")?;

    let input: Box<dyn AsyncRead + Unpin + Send> = match &args.input {
        Some(path) => Box::new(
            tokio::fs::File::open(path)
                .await
                .with_context(|| format!("cannot open {}", path.display()))?,
        ),
        None => Box::new(tokio::io::stdin()),
    };

    let mut lines = BufReader::new(input).lines();
    let mut published = 0u64;
    let mut skipped = 0u64;

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (entry, partition) = match route(line.as_bytes(), config.aggregation.partitions) {
            Ok(routed) => routed,
            Err(e) => {
                warn!("Skipping line: {}", e);
                skipped += 1;
                continue;
            }
        };

        producer
            .produce(line.as_bytes(), &entry.post_code, partition)
            .await
            .with_context(|| format!("failed to publish entry for station {}", entry.station))?;
        published += 1;
    }

    info!("Published {} entries to {}, skipped {}", published, config.kafka.topic, skipped);
    Ok(())
}
