//! One-second elapsed-time ticker owned by a running search.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::progress::Action;

const TICK: Duration = Duration::from_secs(1);

/// Sends [`Action::Tick`] once per second until dropped.
pub struct ElapsedTicker {
    handle: JoinHandle<()>,
}

impl ElapsedTicker {
    pub fn start(actions: UnboundedSender<Action>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if actions.send(Action::Tick).is_err() {
                    break;
                }
            }
        });

        Self { handle }
    }
}

impl Drop for ElapsedTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
