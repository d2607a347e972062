use std::fmt;

use serde::{Deserialize, Serialize};

use crate::probe::Probe;

/// One candidate resolver and its latency statistics.
///
/// A mean or last latency of 0 means "never successfully measured" as well as
/// "unmeasured"; `failure_count` tells the two apart for the most recent
/// probing pass, but is not part of the persisted record.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DnsServer {
    pub address: String,
    pub mean_latency: f64,
    pub last_latency: u64,
    #[serde(default)]
    pub failure_count: u32,
}

impl DnsServer {
    pub fn new(address: &str) -> Self {
        Self {
            address: address.trim().to_string(),
            mean_latency: 0.0,
            last_latency: 0,
            failure_count: 0,
        }
    }

    /// Runs `tries` sequential probe attempts against this server; a caller's
    /// 0 is coerced to 1.
    ///
    /// The mean is taken over every attempt with failures counted as 0ms, so
    /// a partially unreachable server ranks better than its true latency.
    /// `last_latency` reflects only the final attempt.
    pub async fn probe<P: Probe + ?Sized>(&mut self, probe: &P, tries: u32) {
        let tries = if tries == 0 { 1 } else { tries };
        let mut sum = 0u64;
        let mut last = 0u64;
        self.failure_count = 0;

        for _ in 0..tries {
            last = match probe.probe(&self.address).await {
                Some(ms) => {
                    sum += ms;
                    ms
                }
                None => {
                    self.failure_count += 1;
                    0
                }
            };
        }

        self.mean_latency = sum as f64 / tries as f64;
        self.last_latency = last;
    }
}

impl fmt::Display for DnsServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>15}{:>15}{:>15}",
            self.address,
            format!("mean={}ms", self.mean_latency),
            format!("last={}ms", self.last_latency)
        )
    }
}
