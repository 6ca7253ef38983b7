use std::sync::Arc;
use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use fuelagg::config::AppConfig;
use fuelagg::event_log::KafkaSourceFactory;
use fuelagg::interfaces::AggregateSink;
use fuelagg::observability::metrics::register_metrics;
use fuelagg::observability::tracing::init_tracing;
use fuelagg::pipeline::AggregationSupervisor;
use fuelagg::sink::{GraphiteSink, LogSink};

/// Aggregates per-partition fuel price averages from Kafka into Graphite.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Configuration profile loaded from `config/{env}.toml`
    #[arg(long, default_value = "development")]
    env: String,

    /// Number of partitions to consume, starting at partition 0
    #[arg(long)]
    partitions: Option<i32>,

    /// Aggregation interval in seconds
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Log aggregates instead of sending them to Graphite
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.env).context("failed to load configuration")?;
    if let Some(partitions) = args.partitions {
        config.aggregation.partitions = partitions;
    }
    if let Some(interval_secs) = args.interval_secs {
        config.aggregation.interval_secs = interval_secs;
    }
    config.validate().context("invalid configuration")?;

    init_tracing(&config.logging).context("failed to initialise tracing")?;
    register_metrics().context("failed to register metrics")?;

    let sink: Arc<dyn AggregateSink> = if args.dry_run {
        info!("Dry run: aggregates are logged, not sent");
        Arc::new(LogSink)
    } else {
        Arc::new(GraphiteSink::new(config.graphite.clone()))
    };
    let factory = Arc::new(KafkaSourceFactory::new(config.kafka.clone()));

    info!(
        "Consuming {} from {} ({} partitions)",
        config.kafka.topic, config.kafka.brokers, config.aggregation.partitions
    );

    let supervisor = AggregationSupervisor::new(factory, sink, config.aggregation.clone());
    let reports = supervisor.run(shutdown_signal()).await?;

    for report in &reports {
        info!(
            partition = report.partition,
            entries = report.entries_buffered,
            decode_failures = report.decode_failures,
            transport_errors = report.transport_errors,
            aggregates = report.aggregates_emitted,
            sink_failures = report.sink_failures,
            "Partition summary"
        );
    }
    Ok(())
}

/// Resolves on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for ctrl-c: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
