//! # Schedule
//!
//! Drives a [Reporter] at its flush interval
//!
//! # Example
//! ```no_run
//! # async fn demo() {
//! use metrics_cloudwatch_reporter::{schedule, Builder, MetricsSnapshot, WriterTransport};
//!
//! let reporter = Builder::new()
//!     .cloudwatch_namespace("MyApplication")
//!     .build(WriterTransport::new(std::io::stdout()))
//!     .unwrap();
//!
//! let (shutdown, signal) = tokio::sync::watch::channel(false);
//! tokio::spawn(async move {
//!     tokio::time::sleep(std::time::Duration::from_secs(60)).await;
//!     let _ = shutdown.send(true);
//! });
//!
//! schedule::run(&reporter, || MetricsSnapshot::new(0), signal).await;
//! # }
//! ```

use super::reporter::Reporter;
use super::snapshot::MetricsSnapshot;
use super::transport::Transport;
use futures::future::{self, Either};
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, warn};

/// Flush a snapshot from `source` every flush interval until `shutdown` reads true
///
/// Flushes never overlap, a slow flush delays the next tick. The shutdown signal is also the
/// cancellation signal of the flush in progress
pub async fn run<T, S>(reporter: &Reporter<T>, mut source: S, mut shutdown: watch::Receiver<bool>)
where
    T: Transport,
    S: FnMut() -> MetricsSnapshot,
{
    let period = reporter.flush_interval();
    let mut interval = time::interval_at(time::Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        if *shutdown.borrow_and_update() {
            break;
        }

        let due = {
            let tick = std::pin::pin!(interval.tick());
            let stop = std::pin::pin!(shutdown.changed());
            match future::select(tick, stop).await {
                Either::Left(_) => true,
                Either::Right((Ok(()), _)) => false,
                // Sender gone, nothing can stop us anymore but the flushes continue
                Either::Right((Err(_), tick)) => {
                    tick.await;
                    true
                }
            }
        };
        if !due {
            continue;
        }

        let snapshot = source();
        if !reporter.flush(&snapshot, &shutdown).await {
            warn!(contexts = snapshot.contexts.len(), "Metrics flush failed");
        }
    }

    debug!("Metrics reporter {reporter} stopped");
}
