use std::path::PathBuf;
use std::time::Duration;

/// Runtime knobs for one discovery-and-rank pass.
#[derive(Debug, Clone)]
pub struct RankConfig {
    /// Ping attempts per server.
    pub tries: u32,
    /// How many ranked servers to show.
    pub top: usize,
    /// Refetch the report and reprobe even when today's results exist.
    pub force_refresh: bool,
    /// Per-attempt probe timeout.
    pub probe_timeout: Duration,
    /// Where report and result files live.
    pub cache_dir: PathBuf,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            tries: 4,
            top: 10,
            force_refresh: false,
            probe_timeout: Duration::from_secs(4),
            cache_dir: PathBuf::from("."),
        }
    }
}
