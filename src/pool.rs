use std::cmp::Ordering;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{PoolError, Result};
use crate::probe::Probe;
use crate::progress::ProgressObserver;
use crate::types::DnsServer;

/// An ordered collection of candidate DNS servers.
///
/// Order is insertion order until `rank_by_latency` runs, ranking order
/// after. Duplicate addresses are kept as-is.
#[derive(Debug, Clone, Default)]
pub struct ServerPool {
    servers: Vec<DnsServer>,
}

impl ServerPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a zero-initialized record for `address`.
    pub fn add_server(&mut self, address: &str) {
        self.servers.push(DnsServer::new(address));
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn servers(&self) -> &[DnsServer] {
        &self.servers
    }

    /// Probes every server in pool order, strictly one at a time.
    ///
    /// Emits one progress event per server before probing it. There is no
    /// pool-level timeout, so the wall-clock bound is each probe's own
    /// timeout times `len() * tries`.
    pub async fn probe_all<P: Probe + ?Sized>(
        &mut self,
        probe: &P,
        tries: u32,
        observer: &mut dyn ProgressObserver,
    ) {
        let total = self.servers.len();
        for (i, server) in self.servers.iter_mut().enumerate() {
            observer.on_probe(i + 1, total, &server.address);
            server.probe(probe, tries).await;
            tracing::debug!(
                address = %server.address,
                mean_ms = server.mean_latency,
                last_ms = server.last_latency,
                failures = server.failure_count,
                "probed"
            );
        }
    }

    /// Stable sort, fastest first. A zero mean marks a server that never
    /// answered, so those sort after every measured server rather than
    /// topping the list. Records with equal means keep their relative order
    /// so identical input yields identical output.
    pub fn rank_by_latency(&mut self) {
        fn key(s: &DnsServer) -> (bool, f64) {
            (s.mean_latency == 0.0, s.mean_latency)
        }
        self.servers
            .sort_by(|a, b| key(a).partial_cmp(&key(b)).unwrap_or(Ordering::Equal));
    }

    /// Drops servers that never answered. If every server failed (no network,
    /// no ping permission) the pool is left untouched rather than emptied.
    pub fn filter_unresponsive(&mut self) {
        if self.servers.iter().any(|s| s.mean_latency != 0.0) {
            self.servers.retain(|s| s.mean_latency != 0.0);
        }
    }

    /// First `min(n, len)` records in current pool order.
    pub fn top_n(&self, n: usize) -> &[DnsServer] {
        &self.servers[..n.min(self.servers.len())]
    }

    pub fn as_address_list(&self) -> Vec<String> {
        self.servers.iter().map(|s| s.address.clone()).collect()
    }

    /// Writes one `address,mean,last` line per server in current order,
    /// replacing whatever the sink held.
    pub fn persist<W: Write>(&self, mut writer: W) -> Result<()> {
        for server in &self.servers {
            writeln!(
                writer,
                "{},{},{}",
                server.address, server.mean_latency, server.last_latency
            )?;
        }
        Ok(())
    }

    /// Reads `address,mean,last` lines, appending to the pool in source
    /// order.
    ///
    /// Persisted files are self-generated, so a malformed line is treated as
    /// corruption and aborts the whole load.
    pub fn restore<R: BufRead>(&mut self, reader: R) -> Result<()> {
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            if line.is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.splitn(3, ',').collect();
            if fields.len() != 3 {
                return Err(PoolError::MalformedRecord {
                    line: idx + 1,
                    content: line,
                });
            }
            let mean = fields[1].trim().parse::<f64>();
            let last = fields[2].trim().parse::<u64>();
            let (Ok(mean), Ok(last)) = (mean, last) else {
                return Err(PoolError::MalformedRecord {
                    line: idx + 1,
                    content: line,
                });
            };

            let mut server = DnsServer::new(fields[0]);
            server.mean_latency = mean;
            server.last_latency = last;
            self.servers.push(server);
        }
        Ok(())
    }

    pub fn persist_to_path(&self, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.persist(BufWriter::new(file))
    }

    pub fn restore_from_path(&mut self, path: &Path) -> Result<()> {
        let file = File::open(path)?;
        self.restore(BufReader::new(file))
    }
}
