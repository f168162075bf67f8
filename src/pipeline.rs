/// Pipeline Module
///
/// Consumes the update stream one event at a time: Extract → Transform → Load,
/// and reports why the stream stopped together with run statistics.
use futures::{Stream, StreamExt};
use std::fmt::Display;
use std::time::{Duration, Instant};
use yellowstone_grpc_proto::prelude::SubscribeUpdate;

use crate::etl::{extract::transaction_from_update, load::EventSink, transform::EventFormatter};
use crate::models::TransactionUpdate;

/// Pipeline execution statistics
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    pub updates_received: usize,
    pub transactions_seen: usize,
    pub malformed_updates: usize,
    pub matches: usize,
    pub records_emitted: usize,
    pub decode_failures: usize,
    pub events_dropped: usize,
    pub elapsed_time: Duration,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions_per_second(&self) -> f64 {
        let secs = self.elapsed_time.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            self.transactions_seen as f64 / secs
        }
    }
}

/// Why the stream stopped
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamTermination {
    Completed,
    Errored(String),
}

impl std::fmt::Display for StreamTermination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StreamTermination::Completed => write!(f, "completed"),
            StreamTermination::Errored(reason) => write!(f, "errored: {}", reason),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub termination: StreamTermination,
    pub stats: PipelineStats,
}

/// Main mint detection pipeline
pub struct Pipeline<K: EventSink> {
    formatter: EventFormatter,
    sink: K,
}

impl<K: EventSink> Pipeline<K> {
    pub fn new(formatter: EventFormatter, sink: K) -> Self {
        Self { formatter, sink }
    }

    /// Drain the stream until it ends or fails
    pub async fn run<S, E>(&mut self, stream: S) -> PipelineReport
    where
        S: Stream<Item = Result<SubscribeUpdate, E>>,
        E: Display,
    {
        let start_time = Instant::now();
        let mut stats = PipelineStats::new();
        let mut stream = std::pin::pin!(stream);

        tracing::info!("Watching stream for new mints");

        let termination = loop {
            let Some(next) = stream.next().await else {
                tracing::info!("Stream ended");
                break StreamTermination::Completed;
            };

            let update = match next {
                Ok(update) => update,
                Err(e) => {
                    tracing::error!("Stream error: {}", e);
                    break StreamTermination::Errored(e.to_string());
                }
            };
            stats.updates_received += 1;

            let tx = match transaction_from_update(update) {
                Ok(Some(tx)) => tx,
                Ok(None) => continue,
                Err(e) => {
                    stats.malformed_updates += 1;
                    tracing::warn!("Skipping malformed update: {}", e);
                    continue;
                }
            };

            if let Err(e) = self.process_transaction(&tx, &mut stats).await {
                tracing::error!("Output failed: {:#}", e);
                break StreamTermination::Errored(format!("{:#}", e));
            }
        };

        stats.elapsed_time = start_time.elapsed();
        log_final_stats(&stats);

        PipelineReport { termination, stats }
    }

    /// Format one transaction and emit it when it is a mint
    ///
    /// Only sink failures are returned; per-event problems are logged and counted.
    pub async fn process_transaction(&mut self, tx: &TransactionUpdate, stats: &mut PipelineStats) -> anyhow::Result<()> {
        stats.transactions_seen += 1;

        let slot = tx.slot.to_string();
        match self.formatter.format(&tx.message, &tx.signature, &slot).await {
            Ok(Some(record)) => {
                stats.matches += 1;
                if record.args.is_none() {
                    stats.decode_failures += 1;
                }
                self.sink.emit(&record)?;
                stats.records_emitted += 1;
            }
            Ok(None) => {}
            Err(e) => {
                stats.matches += 1;
                stats.events_dropped += 1;
                tracing::warn!("Dropping {} at slot {}: {}", tx.signature, slot, e);
            }
        }

        Ok(())
    }

    #[allow(dead_code)]
    pub fn sink(&self) -> &K {
        &self.sink
    }
}

fn log_final_stats(stats: &PipelineStats) {
    tracing::info!(
        "Pipeline statistics: {} updates, {} transactions ({:.0} tx/s), {} matches, {} emitted, {} undecodable, {} dropped, {} malformed in {:.2}s",
        stats.updates_received,
        stats.transactions_seen,
        stats.transactions_per_second(),
        stats.matches,
        stats.records_emitted,
        stats.decode_failures,
        stats.events_dropped,
        stats.malformed_updates,
        stats.elapsed_time.as_secs_f64()
    );
}
