use crate::config::ControllerConfig;
use consent_guard_policy::Decision;
use consent_guard_signal::{SignalSink, TransportResolver};
use consent_guard_storage::{
    ConsentRecord, CookieSurface, CookieTier, FileTier, LayeredStore, MemoryTier, StorageTier,
};
use consent_guard_ui::{resolve_action, ConsentAction, EventNode, PromptSurface, UiBridge};
use parking_lot::Mutex;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentState {
    Booting,
    Undecided,
    Decided(Decision),
}

/// The consent state machine.
///
/// Owns the page-wide consent lifecycle. Stores, sink and prompt
/// bridge are injected explicitly; there is no hidden module state.
pub struct ConsentController {
    config: ControllerConfig,
    store: Arc<LayeredStore>,
    sink: Arc<SignalSink>,
    ui: Arc<UiBridge>,
    state: Mutex<ConsentState>,
}

impl ConsentController {
    pub fn new(
        config: ControllerConfig,
        store: Arc<LayeredStore>,
        sink: Arc<SignalSink>,
        ui: Arc<UiBridge>,
    ) -> Self {
        Self {
            config,
            store,
            sink,
            ui,
            state: Mutex::new(ConsentState::Booting),
        }
    }

    /// Assemble the standard stack for a host: file, cookie and memory
    /// tiers in that order, sink retry cadence and prompt transition
    /// taken from the config.
    pub fn bootstrap<P: AsRef<Path>>(
        config: ControllerConfig,
        storage_dir: P,
        cookies: Arc<dyn CookieSurface>,
        resolver: Arc<dyn TransportResolver>,
        surface: Option<Arc<dyn PromptSurface>>,
    ) -> Self {
        let tiers: Vec<Arc<dyn StorageTier>> = vec![
            Arc::new(FileTier::new(storage_dir)),
            Arc::new(CookieTier::new(cookies)),
            Arc::new(MemoryTier::new()),
        ];
        let store = Arc::new(LayeredStore::new(config.storage_key.clone(), tiers));

        let sink = Arc::new(SignalSink::with_retry(
            resolver,
            Duration::from_millis(config.sink_retry_interval_ms),
            config.sink_retry_budget,
        ));

        let ui = Arc::new(UiBridge::with_transition(
            surface,
            Duration::from_millis(config.transition_ms),
        ));

        Self::new(config, store, sink, ui)
    }

    pub fn state(&self) -> ConsentState {
        *self.state.lock()
    }

    /// Boot sequence: assert the fail-safe default before anything
    /// else, then replay a prior decision if one survives in storage.
    pub async fn boot(&self) {
        let denied = self.config.profile.derive_permissions(None);
        self.sink
            .set_default(denied, self.config.wait_for_update_ms);

        let decision = self
            .store
            .read()
            .await
            .and_then(|record| Decision::normalize(&record.choice));

        match decision {
            Some(decision) => {
                info!(decision = decision.as_str(), "prior consent found");
                self.apply(decision);
                self.ui.hide();
                *self.state.lock() = ConsentState::Decided(decision);
            }
            None => {
                info!("no usable prior consent, prompting");
                self.ui.show();
                *self.state.lock() = ConsentState::Undecided;
            }
        }
    }

    pub async fn on_accept(&self) {
        self.record_choice(Decision::Accepted).await;
    }

    pub async fn on_reject(&self) {
        self.record_choice(Decision::Rejected).await;
    }

    /// Dismissal records nothing: the visitor stays undecided on the
    /// next boot. The denied set is re-asserted before the prompt
    /// goes away.
    pub async fn on_dismiss(&self) {
        let denied = self.config.profile.derive_permissions(None);
        self.sink.update(denied);
        self.ui.hide();
    }

    /// Event-delegation entry point for clicks inside the prompt.
    pub async fn handle_click(&self, target: Arc<dyn EventNode>) {
        match resolve_action(target) {
            Some(ConsentAction::Accept) => self.on_accept().await,
            Some(ConsentAction::Reject) => self.on_reject().await,
            Some(ConsentAction::Dismiss) => self.on_dismiss().await,
            None => debug!("click did not resolve to an affordance"),
        }
    }

    async fn record_choice(&self, decision: Decision) {
        let record = ConsentRecord::new(decision.as_str(), chrono::Utc::now().timestamp_millis());

        // The store write always precedes the sink update for the
        // same interaction, and the hide follows the update.
        self.store.write(&record).await;
        self.apply(decision);
        self.ui.hide();
        *self.state.lock() = ConsentState::Decided(decision);

        info!(decision = decision.as_str(), "consent recorded");
    }

    fn apply(&self, decision: Decision) {
        let flags = self.config.profile.derive_permissions(Some(decision));
        self.sink.update(flags);
    }
}
