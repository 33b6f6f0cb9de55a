// Orchid terminal client
//
// Submits prospecting queries to the Orchid API, tracks the analysis with a
// small progress state machine and renders the resulting company table.

pub mod api;
pub mod fixtures;
pub mod progress;
pub mod render;
pub mod retry;
pub mod session;
pub mod ticker;

pub use api::{ApiError, OrchidApi, DEFAULT_SERVER_URL};
pub use progress::{reduce, Action, Effect, ProgressModel, ViewState};
pub use retry::{RetryPolicy, MAX_RETRIES};
pub use session::{ProgressView, Session};
