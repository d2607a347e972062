use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use super::Probe;

/// Probes via the system `ping` binary, one echo request per attempt.
///
/// Raw ICMP sockets need elevated privileges on most platforms; delegating to
/// `ping` sidesteps that at the cost of parsing its output.
pub struct IcmpProbe {
    timeout: Duration,
    latency_re: Regex,
}

impl IcmpProbe {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            // Matches "time=14.9 ms" (Linux, macOS) and "time=14ms" /
            // "time<1ms" (Windows).
            latency_re: Regex::new(r"time[=<]([0-9]+(?:\.[0-9]+)?)\s*ms")
                .expect("latency pattern is valid"),
        }
    }

    fn parse_latency(&self, output: &str) -> Option<u64> {
        let caps = self.latency_re.captures(output)?;
        caps.get(1)?.as_str().parse::<f64>().ok().map(|ms| ms as u64)
    }
}

impl Default for IcmpProbe {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

#[async_trait]
impl Probe for IcmpProbe {
    async fn probe(&self, address: &str) -> Option<u64> {
        let count_flag = if cfg!(windows) { "-n" } else { "-c" };

        let output = tokio::time::timeout(
            self.timeout,
            Command::new("ping")
                .arg(count_flag)
                .arg("1")
                .arg(address)
                .output(),
        )
        .await;

        let output = match output {
            Ok(Ok(out)) if out.status.success() => out,
            _ => {
                tracing::debug!(address, "probe failed");
                return None;
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let latency = self.parse_latency(&stdout);
        if latency.is_none() {
            tracing::debug!(address, "no latency field in ping output");
        }
        latency
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_latency_linux_output() {
        let probe = IcmpProbe::default();
        let out = "64 bytes from 1.1.1.1: icmp_seq=1 ttl=57 time=14.9 ms";
        assert_eq!(probe.parse_latency(out), Some(14));
    }

    #[test]
    fn test_parse_latency_windows_output() {
        let probe = IcmpProbe::default();
        assert_eq!(
            probe.parse_latency("Reply from 1.1.1.1: bytes=32 time=23ms TTL=57"),
            Some(23)
        );
        assert_eq!(
            probe.parse_latency("Reply from 1.1.1.1: bytes=32 time<1ms TTL=57"),
            Some(1)
        );
    }

    #[test]
    fn test_parse_latency_sub_millisecond_truncates_to_zero() {
        let probe = IcmpProbe::default();
        let out = "64 bytes from 127.0.0.1: icmp_seq=1 ttl=64 time=0.045 ms";
        assert_eq!(probe.parse_latency(out), Some(0));
    }

    #[test]
    fn test_parse_latency_rejects_garbage() {
        let probe = IcmpProbe::default();
        assert_eq!(probe.parse_latency("Destination Host Unreachable"), None);
        assert_eq!(probe.parse_latency(""), None);
    }
}
