pub mod sink;
pub mod transport;

pub use sink::{SignalSink, DEFAULT_RETRY_BUDGET, DEFAULT_RETRY_INTERVAL_MS};
pub use transport::{SignalCall, SignalTransport, TransportResolver, TransportSlot};
