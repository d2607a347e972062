/// Receives one notification per server while a pool probes its members.
///
/// Purely informational; nothing feeds back into probing.
pub trait ProgressObserver {
    fn on_probe(&mut self, current: usize, total: usize, address: &str);
}

/// Discards all progress events.
pub struct NoopProgress;

impl ProgressObserver for NoopProgress {
    fn on_probe(&mut self, _current: usize, _total: usize, _address: &str) {}
}

/// Adapts a closure into a progress observer.
pub struct FnProgress<F>(pub F);

impl<F: FnMut(usize, usize, &str)> ProgressObserver for FnProgress<F> {
    fn on_probe(&mut self, current: usize, total: usize, address: &str) {
        (self.0)(current, total, address)
    }
}
