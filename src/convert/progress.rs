use std::sync::atomic::{AtomicUsize, Ordering};

/// Receives progress notifications during a conversion
///
/// Notifications may arrive from several worker threads at once.
pub trait ProgressSink: Send + Sync {
    /// Extraction of `total` documents is starting
    fn started(&self, _total: usize) {}

    /// A document has been extracted
    fn document_finished(&self, _name: &str) {}

    /// The ISA-Tab files are about to be written
    fn writing(&self) {}

    /// The conversion is complete
    fn finished(&self) {}
}

/// Reports progress through the `log` facade
#[derive(Debug, Default)]
pub struct LogProgress {
    total: AtomicUsize,
    done: AtomicUsize,
}

impl ProgressSink for LogProgress {
    fn started(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.done.store(0, Ordering::Relaxed);
        log::info!("Parsing {} documents", total);
    }

    fn document_finished(&self, name: &str) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        log::info!("[{}/{}] Finished parsing: {}", done, self.total.load(Ordering::Relaxed), name);
    }

    fn writing(&self) {
        log::info!("Writing ISA-Tab files");
    }

    fn finished(&self) {
        log::info!("Finished writing ISA-Tab files");
    }
}

/// Discards every notification
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressSink for NoProgress {}
