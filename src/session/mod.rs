//! View state for one viewing session.
//!
//! Both upstream resources are fetched together and committed as a single
//! value, so a viewer never sees a new snapshot next to stale signals. A
//! session that has been torn down discards whatever arrives afterwards; the
//! in-flight requests themselves are left to finish.

use crate::assemble::assemble;
use crate::error::{Result, ViewError};
use crate::i18n::Locale;
use crate::models::{DisplaySnapshot, RawSignal, RawSnapshot};
use crate::upstream::ReportSource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Everything one fetch cycle produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Payload {
    pub snapshot: RawSnapshot,
    pub signals: Vec<RawSignal>,
}

/// Issue both requests at once; either failing fails the whole payload.
pub async fn fetch_payload(source: &dyn ReportSource) -> Result<Payload> {
    let (snapshot, signals) =
        tokio::try_join!(source.fetch_latest_report(), source.fetch_signals())?;
    Ok(Payload { snapshot, signals })
}

#[derive(Debug, Clone, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Ready(Arc<Payload>),
    Failed(ViewError),
}

/// What the presentation layer should draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Loading,
    /// Opaque: which resource failed is not shown.
    Error,
    Data(DisplaySnapshot),
}

impl ViewState {
    pub fn render(&self, locale: Locale) -> Screen {
        match self {
            ViewState::Loading => Screen::Loading,
            ViewState::Failed(_) => Screen::Error,
            ViewState::Ready(payload) => {
                Screen::Data(assemble(&payload.snapshot, &payload.signals, locale))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    Applied,
    Discarded,
}

/// Trips the session's cancellation flag.
#[derive(Debug, Clone)]
pub struct TeardownHandle(Arc<AtomicBool>);

impl TeardownHandle {
    pub fn teardown(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_torn_down(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

pub struct Dashboard {
    state: watch::Sender<ViewState>,
    cancelled: Arc<AtomicBool>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        let (state, _) = watch::channel(ViewState::Loading);
        Self {
            state,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn teardown_handle(&self) -> TeardownHandle {
        TeardownHandle(Arc::clone(&self.cancelled))
    }

    fn is_torn_down(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Run one fetch cycle and replace the state with its outcome.
    ///
    /// The prior state stays visible while the cycle is in flight.
    pub async fn refresh(&self, source: &dyn ReportSource) -> Commit {
        if self.is_torn_down() {
            return Commit::Discarded;
        }

        let outcome = fetch_payload(source).await;

        if self.is_torn_down() {
            debug!("Session torn down mid-fetch, discarding result");
            return Commit::Discarded;
        }

        let next = match outcome {
            Ok(payload) => {
                info!(
                    "Loaded report {} ({} symbols, {} signals)",
                    payload.snapshot.generated_at,
                    payload.snapshot.symbols.len(),
                    payload.signals.len()
                );
                ViewState::Ready(Arc::new(payload))
            }
            Err(e) => {
                warn!("Fetch cycle failed: {}", e);
                ViewState::Failed(e)
            }
        };
        self.state.send_replace(next);
        Commit::Applied
    }
}
