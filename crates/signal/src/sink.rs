use crate::transport::{SignalCall, SignalTransport, TransportResolver};
use consent_guard_policy::FlagSet;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_RETRY_INTERVAL_MS: u64 = 200;
pub const DEFAULT_RETRY_BUDGET: u32 = 25;

/// Adapter in front of the external signaling mechanism.
///
/// Calls made before the mechanism exists are buffered in order and
/// flushed once it appears; a single bounded retry loop polls for it.
/// Running out of retries is tolerated silently.
pub struct SignalSink {
    inner: Arc<SinkInner>,
    retry_interval: Duration,
    retry_budget: u32,
}

struct SinkInner {
    resolver: Arc<dyn TransportResolver>,
    buffer: Mutex<VecDeque<SignalCall>>,
    retrying: AtomicBool,
}

impl SinkInner {
    /// Earlier calls always leave before the current one so the
    /// default-deny signal stays first.
    fn flush(&self, transport: &dyn SignalTransport) {
        loop {
            let Some(call) = self.buffer.lock().pop_front() else {
                break;
            };
            transport.dispatch(&call);
        }
    }
}

impl SignalSink {
    pub fn new(resolver: Arc<dyn TransportResolver>) -> Self {
        Self::with_retry(
            resolver,
            Duration::from_millis(DEFAULT_RETRY_INTERVAL_MS),
            DEFAULT_RETRY_BUDGET,
        )
    }

    pub fn with_retry(
        resolver: Arc<dyn TransportResolver>,
        retry_interval: Duration,
        retry_budget: u32,
    ) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                resolver,
                buffer: Mutex::new(VecDeque::new()),
                retrying: AtomicBool::new(false),
            }),
            retry_interval,
            retry_budget,
        }
    }

    /// Assert the pre-decision flag set, asking the mechanism to hold
    /// reporting for up to `hold_ms` while an update may follow.
    pub fn set_default(&self, flags: FlagSet, hold_ms: u64) {
        self.submit(SignalCall::Default {
            flags,
            wait_for_update_ms: hold_ms,
        });
    }

    /// Push the full channel mapping. Safe to repeat: the mapping
    /// itself is the entire observable effect.
    pub fn update(&self, flags: FlagSet) {
        self.submit(SignalCall::Update { flags });
    }

    /// Calls currently waiting for the mechanism to appear.
    pub fn buffered_len(&self) -> usize {
        self.inner.buffer.lock().len()
    }

    fn submit(&self, call: SignalCall) {
        if let Some(transport) = self.inner.resolver.resolve() {
            self.inner.flush(transport.as_ref());
            transport.dispatch(&call);
            return;
        }

        debug!(command = call.command(), "mechanism not ready, buffering call");
        self.inner.buffer.lock().push_back(call);
        self.spawn_retry();
    }

    fn spawn_retry(&self) {
        if self.inner.retrying.swap(true, Ordering::SeqCst) {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let interval = self.retry_interval;
        let budget = self.retry_budget;
        tokio::spawn(async move {
            for _ in 0..budget {
                tokio::time::sleep(interval).await;
                if let Some(transport) = inner.resolver.resolve() {
                    inner.flush(transport.as_ref());
                    inner.retrying.store(false, Ordering::SeqCst);
                    return;
                }
            }
            inner.retrying.store(false, Ordering::SeqCst);
            debug!(
                buffered = inner.buffer.lock().len(),
                "retry budget exhausted waiting for signaling mechanism"
            );
        });
    }
}
