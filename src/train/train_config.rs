use std::sync::mpsc;
use std::sync::{Arc, atomic::AtomicBool};
use crate::train::epoch_stats::EpochStats;

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`           — upper bound on full passes over the samples
/// - `acceptable_error` — the loop returns as soon as an epoch's guess level
///                        exceeds this value
/// - `parallel`         — evaluate the nodes of a layer concurrently
/// - `progress_tx`      — optional channel sender; one `EpochStats` is sent per
///                        completed epoch.  If the receiver is dropped the loop
///                        terminates early.
/// - `stop_flag`        — optional atomic flag; when set to `true` from another
///                        thread the loop terminates before the next epoch.
pub struct TrainConfig {
    pub epochs: usize,
    pub acceptable_error: f64,
    pub parallel: bool,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a sequential `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, acceptable_error: f64) -> Self {
        TrainConfig {
            epochs,
            acceptable_error,
            parallel: false,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
