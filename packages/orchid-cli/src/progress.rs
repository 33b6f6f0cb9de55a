//! Progress state machine for one search at a time.
//!
//! All transitions go through [`reduce`], which is pure: timers and network
//! calls live in [`crate::session`] and feed their outcomes back in as
//! [`Action`]s.

use orchid_core::domains::analysis::models::{AnalysisResults, ProgressEvent};

/// Which of the three views is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    /// Search entry. Carries the banner of the last failed search, if any.
    Idle {
        error: Option<String>,
        retry_query: Option<String>,
    },
    Running,
    Done,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Idle {
            error: None,
            retry_query: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Submit(String),
    /// Fixed-cadence timer fired
    StepAdvanced,
    /// Server-reported plan size and progress log
    LiveProgress {
        total_steps: usize,
        events: Vec<ProgressEvent>,
    },
    Resolved(AnalysisResults),
    Rejected(String),
    /// One second of elapsed time
    Tick,
}

/// What the driver has to do after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// A search was accepted; start the ticker and the work for `query`.
    Started(String),
    /// The last declared step completed.
    StepsExhausted,
    /// The search left `Running`; stop the ticker.
    Settled,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressModel {
    pub state: ViewState,
    pub query: String,
    /// Number of declared analysis steps for the current search
    pub total_steps: usize,
    pub current_step: usize,
    /// Indices of finished steps, unique and non-decreasing
    pub completed_steps: Vec<usize>,
    pub elapsed_secs: u64,
    pub progress: Vec<ProgressEvent>,
    /// Last successful results; kept when a later search fails
    pub results: Option<AnalysisResults>,
}

impl ProgressModel {
    pub fn new(total_steps: usize) -> Self {
        Self {
            total_steps,
            ..Self::default()
        }
    }

    pub fn is_running(&self) -> bool {
        self.state == ViewState::Running
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            ViewState::Idle { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn retry_query(&self) -> Option<&str> {
        match &self.state {
            ViewState::Idle { retry_query, .. } => retry_query.as_deref(),
            _ => None,
        }
    }

    fn mark_completed(&mut self, index: usize) {
        if self.completed_steps.last().is_some_and(|&last| index <= last) {
            return;
        }
        self.completed_steps.push(index);
    }
}

pub fn reduce(model: &mut ProgressModel, action: Action) -> Effect {
    match action {
        Action::Submit(query) => {
            let query = query.trim();
            if query.is_empty() || model.is_running() {
                return Effect::None;
            }

            model.state = ViewState::Running;
            model.query = query.to_string();
            model.current_step = 0;
            model.completed_steps.clear();
            model.elapsed_secs = 0;
            model.progress.clear();
            Effect::Started(model.query.clone())
        }

        Action::StepAdvanced => {
            if !model.is_running() || model.current_step >= model.total_steps {
                return Effect::None;
            }

            let finished = model.current_step;
            model.mark_completed(finished);
            model.current_step += 1;

            if model.current_step >= model.total_steps {
                Effect::StepsExhausted
            } else {
                Effect::None
            }
        }

        Action::LiveProgress {
            total_steps,
            events,
        } => {
            if !model.is_running() {
                return Effect::None;
            }

            model.total_steps = total_steps;
            model.current_step = events.len().min(total_steps);
            for index in 0..model.current_step {
                model.mark_completed(index);
            }
            model.progress = events;
            Effect::None
        }

        Action::Resolved(results) => {
            if !model.is_running() {
                return Effect::None;
            }

            model.state = ViewState::Done;
            model.results = Some(results);
            Effect::Settled
        }

        Action::Rejected(message) => {
            if !model.is_running() {
                return Effect::None;
            }

            tracing::error!(query = %model.query, error = %message, "Search failed");
            model.state = ViewState::Idle {
                error: Some(message),
                retry_query: Some(model.query.clone()),
            };
            Effect::Settled
        }

        Action::Tick => {
            if model.is_running() {
                model.elapsed_secs += 1;
            }
            Effect::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(total_steps: usize) -> ProgressModel {
        let mut model = ProgressModel::new(total_steps);
        reduce(&mut model, Action::Submit("idaho media".into()));
        model
    }

    #[test]
    fn blank_query_does_not_start() {
        let mut model = ProgressModel::new(6);

        assert_eq!(reduce(&mut model, Action::Submit("  \t".into())), Effect::None);
        assert_eq!(model.state, ViewState::default());
    }

    #[test]
    fn submit_trims_and_starts() {
        let mut model = ProgressModel::new(6);

        let effect = reduce(&mut model, Action::Submit("  idaho media  ".into()));

        assert_eq!(effect, Effect::Started("idaho media".into()));
        assert!(model.is_running());
    }

    #[test]
    fn resubmit_while_running_is_ignored() {
        let mut model = running(6);
        reduce(&mut model, Action::StepAdvanced);

        let effect = reduce(&mut model, Action::Submit("boise radio".into()));

        assert_eq!(effect, Effect::None);
        assert_eq!(model.query, "idaho media");
        assert_eq!(model.current_step, 1);
    }

    #[test]
    fn step_index_is_clamped() {
        let mut model = running(3);

        let effects: Vec<Effect> = (0..5)
            .map(|_| reduce(&mut model, Action::StepAdvanced))
            .collect();

        assert_eq!(
            effects,
            vec![
                Effect::None,
                Effect::None,
                Effect::StepsExhausted,
                Effect::None,
                Effect::None
            ]
        );
        assert_eq!(model.current_step, 3);
        assert_eq!(model.completed_steps, vec![0, 1, 2]);
    }

    #[test]
    fn live_progress_sets_index_from_event_count() {
        let mut model = running(0);
        let events: Vec<ProgressEvent> = (0..4)
            .map(|i| ProgressEvent::new(i, format!("note {i}")))
            .collect();

        reduce(
            &mut model,
            Action::LiveProgress {
                total_steps: 6,
                events: events.clone(),
            },
        );

        assert_eq!(model.current_step, 4);
        assert_eq!(model.completed_steps, vec![0, 1, 2, 3]);
        assert_eq!(model.progress, events);
    }

    #[test]
    fn live_progress_never_exceeds_declared_steps() {
        let mut model = running(0);
        let events = vec![ProgressEvent::new(0, "a"), ProgressEvent::new(1, "b")];

        reduce(
            &mut model,
            Action::LiveProgress {
                total_steps: 0,
                events,
            },
        );

        assert_eq!(model.current_step, 0);
        assert!(model.completed_steps.is_empty());
    }

    #[test]
    fn elapsed_only_grows_while_running_and_resets_on_submit() {
        let mut model = running(6);
        reduce(&mut model, Action::Tick);
        reduce(&mut model, Action::Tick);
        assert_eq!(model.elapsed_secs, 2);

        reduce(&mut model, Action::Resolved(AnalysisResults::default()));
        reduce(&mut model, Action::Tick);
        assert_eq!(model.elapsed_secs, 2);

        reduce(&mut model, Action::Submit("boise radio".into()));
        assert_eq!(model.elapsed_secs, 0);
    }

    #[test]
    fn rejection_returns_to_idle_with_retry() {
        let mut model = running(6);

        let effect = reduce(&mut model, Action::Rejected("Invalid JSON in final response".into()));

        assert_eq!(effect, Effect::Settled);
        assert_eq!(model.error(), Some("Invalid JSON in final response"));
        assert_eq!(model.retry_query(), Some("idaho media"));
    }

    #[test]
    fn failed_search_keeps_previous_results() {
        let mut model = running(6);
        let previous = AnalysisResults {
            partial_results: vec![ProgressEvent::new(3, "Results formatted")],
            ..AnalysisResults::default()
        };
        reduce(&mut model, Action::Resolved(previous.clone()));

        reduce(&mut model, Action::Submit("boise radio".into()));
        reduce(&mut model, Action::Rejected("boom".into()));

        assert_eq!(model.results, Some(previous));
    }

    #[test]
    fn late_settle_after_done_is_ignored() {
        let mut model = running(6);
        reduce(&mut model, Action::Resolved(AnalysisResults::default()));

        let effect = reduce(&mut model, Action::Rejected("stale".into()));

        assert_eq!(effect, Effect::None);
        assert_eq!(model.state, ViewState::Done);
    }
}
