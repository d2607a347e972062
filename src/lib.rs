pub mod config;
pub mod error;
pub mod fetch;
pub mod pool;
pub mod probe;
pub mod progress;
pub mod report;
pub mod types;

pub use config::RankConfig;
pub use error::{PoolError, Result};
pub use pool::ServerPool;
pub use probe::{IcmpProbe, Probe};
pub use progress::{FnProgress, NoopProgress, ProgressObserver};
pub use types::DnsServer;
