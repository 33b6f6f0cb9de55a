//! Drives the progress state machine: owns the ticker, the step timer and
//! the network call for one search at a time.

use std::time::Duration;

use orchid_core::domains::analysis::models::AnalysisRequest;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::time::{interval_at, sleep, Instant};
use tracing::info;

use crate::api::OrchidApi;
use crate::fixtures::{demo_results, ANALYSIS_STEPS, LIVE_PHASES};
use crate::progress::{reduce, Action, Effect, ProgressModel};
use crate::retry::RetryPolicy;
use crate::ticker::ElapsedTicker;

/// Fixed-timer cadence between simulated steps.
pub const STEP_INTERVAL: Duration = Duration::from_millis(1200);
/// Pause after the last simulated step before results show.
pub const SETTLE_DELAY: Duration = Duration::from_millis(800);

/// Receives the model after every transition.
pub trait ProgressView {
    fn update(&mut self, model: &ProgressModel);
}

/// Ignores every update.
pub struct NoopView;

impl ProgressView for NoopView {
    fn update(&mut self, _model: &ProgressModel) {}
}

pub struct Session<V> {
    model: ProgressModel,
    view: V,
    actions_tx: UnboundedSender<Action>,
    actions_rx: UnboundedReceiver<Action>,
    ticker: Option<ElapsedTicker>,
}

impl<V: ProgressView> Session<V> {
    pub fn new(view: V) -> Self {
        let (actions_tx, actions_rx) = mpsc::unbounded_channel();
        Self {
            model: ProgressModel::default(),
            view,
            actions_tx,
            actions_rx,
            ticker: None,
        }
    }

    pub fn model(&self) -> &ProgressModel {
        &self.model
    }

    /// Handle for feeding actions in from outside while a search runs.
    pub fn sender(&self) -> UnboundedSender<Action> {
        self.actions_tx.clone()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn dispatch(&mut self, action: Action) -> Effect {
        let effect = reduce(&mut self.model, action);

        match &effect {
            Effect::Started(query) => {
                // Queued actions belong to an earlier search.
                while self.actions_rx.try_recv().is_ok() {}
                info!(query = %query, "Search started");
                self.ticker = Some(ElapsedTicker::start(self.actions_tx.clone()));
            }
            Effect::Settled => {
                info!(elapsed_secs = self.model.elapsed_secs, "Search settled");
                self.ticker = None;
            }
            Effect::None | Effect::StepsExhausted => {}
        }

        self.view.update(&self.model);
        effect
    }

    fn declare_steps(&mut self, total_steps: usize) {
        if !self.model.is_running() {
            self.model.total_steps = total_steps;
        }
    }

    /// Simulated search: advance one fixed step every [`STEP_INTERVAL`], then
    /// show the sample companies after [`SETTLE_DELAY`].
    ///
    /// Returns `false` when the submit was rejected and nothing ran.
    pub async fn run_demo(&mut self, query: &str) -> bool {
        self.declare_steps(ANALYSIS_STEPS.len());
        if !matches!(self.dispatch(Action::Submit(query.to_string())), Effect::Started(_)) {
            return false;
        }

        let mut steps = interval_at(Instant::now() + STEP_INTERVAL, STEP_INTERVAL);
        loop {
            tokio::select! {
                _ = steps.tick() => {
                    if self.dispatch(Action::StepAdvanced) == Effect::StepsExhausted {
                        break;
                    }
                }
                Some(action) = self.actions_rx.recv() => {
                    self.dispatch(action);
                    if !self.model.is_running() {
                        return true;
                    }
                }
            }
        }

        let settle = sleep(SETTLE_DELAY);
        tokio::pin!(settle);
        loop {
            tokio::select! {
                _ = &mut settle => break,
                Some(action) = self.actions_rx.recv() => {
                    self.dispatch(action);
                    if !self.model.is_running() {
                        return true;
                    }
                }
            }
        }

        self.dispatch(Action::Resolved(demo_results()));
        true
    }

    /// Real search against the API, retried per `policy`.
    ///
    /// Returns `false` when the submit was rejected and no request was sent.
    pub async fn run_live(
        &mut self,
        api: &OrchidApi,
        request: AnalysisRequest,
        policy: &RetryPolicy,
    ) -> bool {
        self.declare_steps(LIVE_PHASES.len());
        let query = match self.dispatch(Action::Submit(request.query.clone())) {
            Effect::Started(query) => query,
            _ => return false,
        };

        let request = AnalysisRequest {
            query,
            steps: request.steps,
        };
        let call = api.deep_analysis_with_retry(&request, policy);
        tokio::pin!(call);

        let outcome = loop {
            tokio::select! {
                result = &mut call => break result,
                Some(action) = self.actions_rx.recv() => {
                    self.dispatch(action);
                }
            }
        };

        match outcome {
            Ok(response) => {
                self.dispatch(Action::LiveProgress {
                    total_steps: response.results.steps.len(),
                    events: response.progress,
                });
                self.dispatch(Action::Resolved(response.results));
            }
            Err(e) => {
                self.dispatch(Action::Rejected(e.to_string()));
            }
        }
        true
    }
}
