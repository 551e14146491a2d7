use consent_guard_policy::FlagSet;
use parking_lot::Mutex;
use std::sync::Arc;

/// One call into the external signaling mechanism.
#[derive(Debug, Clone, PartialEq)]
pub enum SignalCall {
    /// Assert the pre-decision state and ask the mechanism to withhold
    /// reporting for up to `wait_for_update_ms` while an update may
    /// still arrive.
    Default {
        flags: FlagSet,
        wait_for_update_ms: u64,
    },
    /// Push the full channel mapping after a decision.
    Update { flags: FlagSet },
}

impl SignalCall {
    pub fn command(&self) -> &'static str {
        match self {
            SignalCall::Default { .. } => "default",
            SignalCall::Update { .. } => "update",
        }
    }

    /// Flat wire params: channel name to grant string, plus
    /// `wait_for_update` on default calls.
    pub fn to_params(&self) -> serde_json::Map<String, serde_json::Value> {
        match self {
            SignalCall::Default {
                flags,
                wait_for_update_ms,
            } => {
                let mut params = flags.to_params();
                params.insert(
                    "wait_for_update".to_string(),
                    serde_json::Value::from(*wait_for_update_ms),
                );
                params
            }
            SignalCall::Update { flags } => flags.to_params(),
        }
    }
}

/// The external consent-signaling mechanism. Fire-and-forget; the
/// caller never learns whether a dispatch was acted on.
pub trait SignalTransport: Send + Sync {
    fn dispatch(&self, call: &SignalCall);
}

/// Capability probe for a transport that may not exist yet.
pub trait TransportResolver: Send + Sync {
    fn resolve(&self) -> Option<Arc<dyn SignalTransport>>;
}

/// Resolver slot that starts empty and receives the real transport
/// whenever the mechanism finishes initializing.
pub struct TransportSlot {
    inner: Mutex<Option<Arc<dyn SignalTransport>>>,
}

impl TransportSlot {
    pub fn empty() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    pub fn ready(transport: Arc<dyn SignalTransport>) -> Self {
        Self {
            inner: Mutex::new(Some(transport)),
        }
    }

    pub fn install(&self, transport: Arc<dyn SignalTransport>) {
        *self.inner.lock() = Some(transport);
    }
}

impl TransportResolver for TransportSlot {
    fn resolve(&self) -> Option<Arc<dyn SignalTransport>> {
        self.inner.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use consent_guard_policy::FlagSet;

    struct NullTransport;

    impl SignalTransport for NullTransport {
        fn dispatch(&self, _call: &SignalCall) {}
    }

    #[test]
    fn test_command_strings() {
        let default = SignalCall::Default {
            flags: FlagSet::baseline(),
            wait_for_update_ms: 500,
        };
        let update = SignalCall::Update {
            flags: FlagSet::baseline(),
        };

        assert_eq!(default.command(), "default");
        assert_eq!(update.command(), "update");
    }

    #[test]
    fn test_default_params_carry_hold_value() {
        let call = SignalCall::Default {
            flags: FlagSet::baseline(),
            wait_for_update_ms: 500,
        };
        let params = call.to_params();

        assert_eq!(params["wait_for_update"], 500);
        assert_eq!(params["analytics_storage"], "denied");
        assert_eq!(params["security_storage"], "granted");
    }

    #[test]
    fn test_update_params_have_no_hold_value() {
        let call = SignalCall::Update {
            flags: FlagSet::baseline(),
        };
        assert!(!call.to_params().contains_key("wait_for_update"));
    }

    #[test]
    fn test_slot_starts_empty_then_resolves() {
        let slot = TransportSlot::empty();
        assert!(slot.resolve().is_none());

        slot.install(Arc::new(NullTransport));
        assert!(slot.resolve().is_some());
    }
}
