use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, info};

pub mod error;
pub mod form;
pub mod presenter;
pub mod render;
pub mod surface;
pub mod transport;
pub mod ui_state;

pub use error::{FormError, SubmitError, TransportError};
pub use form::{Form, FormField};
pub use surface::{Element, MemorySurface, SummaryBlock, SurfaceError, UiSurface};
pub use transport::{HttpTransport, Transport};
pub use ui_state::{UiState, UiStateController};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StaleResponsePolicy {
    #[default]
    ApplyAll,
    DiscardStale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    Applied { sequence: u64, state: UiState },
    Superseded { sequence: u64 },
}

impl SubmissionOutcome {
    pub fn sequence(&self) -> u64 {
        match self {
            Self::Applied { sequence, .. } | Self::Superseded { sequence } => *sequence,
        }
    }

    pub fn state(&self) -> Option<&UiState> {
        match self {
            Self::Applied { state, .. } => Some(state),
            Self::Superseded { .. } => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Self::Applied {
                state: UiState::Success,
                ..
            }
        )
    }
}

/// The UI lock is never held across the network await, so overlapping
/// submissions proceed independently and may be resubmitted at any time.
pub struct AnalysisClient<T, S> {
    transport: T,
    ui: Mutex<UiStateController<S>>,
    issued: AtomicU64,
    stale_policy: StaleResponsePolicy,
}

impl<T: Transport, S: UiSurface> AnalysisClient<T, S> {
    pub fn new(transport: T, surface: S) -> Self {
        Self {
            transport,
            ui: Mutex::new(UiStateController::new(surface)),
            issued: AtomicU64::new(0),
            stale_policy: StaleResponsePolicy::default(),
        }
    }

    pub fn with_stale_policy(mut self, stale_policy: StaleResponsePolicy) -> Self {
        self.stale_policy = stale_policy;
        self
    }

    pub async fn submit(&self, form: &Form) -> SubmissionOutcome {
        let payload = form::serialize(form);
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        info!(sequence, fields = payload.len(), "form submitted");

        self.ui.lock().await.enter_loading();

        let result = self.transport.submit(payload).await;

        let mut ui = self.ui.lock().await;
        if self.stale_policy == StaleResponsePolicy::DiscardStale
            && sequence != self.issued.load(Ordering::SeqCst)
        {
            debug!(sequence, "discarding response of superseded submission");
            return SubmissionOutcome::Superseded { sequence };
        }

        match result.and_then(|response| render::render_response(ui.surface_mut(), response)) {
            Ok(_) => ui.enter_success(),
            Err(err) => {
                if let SubmitError::Config(element) = &err {
                    error!(sequence, %element, "rendering aborted by configuration error");
                }
                debug!(sequence, kind = err.kind(), "submission failed");
                ui.enter_error(&err.to_string());
            }
        }

        SubmissionOutcome::Applied {
            sequence,
            state: ui.state().clone(),
        }
    }

    pub async fn state(&self) -> UiState {
        self.ui.lock().await.state().clone()
    }

    pub async fn reset(&self) {
        self.ui.lock().await.reset();
    }

    pub async fn with_surface<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        let ui = self.ui.lock().await;
        f(ui.surface())
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
