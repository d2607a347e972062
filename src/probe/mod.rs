pub mod icmp;

pub use icmp::IcmpProbe;

use async_trait::async_trait;

/// One latency measurement attempt against a network endpoint.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Returns the round-trip time in whole milliseconds, or `None` when the
    /// endpoint is unreachable or the response cannot be measured. Probe
    /// failures are never surfaced as errors past this boundary.
    async fn probe(&self, address: &str) -> Option<u64>;
}
