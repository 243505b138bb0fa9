use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use filaudit_core::ports::ProgressReporter;
use tracing::{debug, info};

/// Cada cuántos archivos se emite una línea de progreso a nivel `info`.
const PROGRESS_EVERY: usize = 500;

/// `ProgressReporter` que vuelca el avance de la auditoría en `tracing`.
///
/// Los contadores son atómicos: el trait solo da `&self`.
#[derive(Debug, Default)]
pub struct TracingReporter {
  total: AtomicUsize,
  done: AtomicUsize,
  failed: AtomicUsize,
}

impl TracingReporter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn done(&self) -> usize {
    self.done.load(Ordering::Relaxed)
  }

  pub fn failed(&self) -> usize {
    self.failed.load(Ordering::Relaxed)
  }
}

#[async_trait]
impl ProgressReporter for TracingReporter {
  async fn start(&self, total_files: usize) {
    self.total.store(total_files, Ordering::Relaxed);
    self.done.store(0, Ordering::Relaxed);
    self.failed.store(0, Ordering::Relaxed);
    info!(total_files, "audit:start");
  }

  async fn on_success(&self, path: &str) {
    let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
    debug!(path, "audit:success");

    if done % PROGRESS_EVERY == 0 {
      info!(done, total = self.total.load(Ordering::Relaxed), "audit:progress");
    }
  }

  async fn on_error(&self, path: &str, error: &str) {
    self.failed.fetch_add(1, Ordering::Relaxed);
    debug!(path, error, "audit:error");
  }

  async fn finish(&self) {
    info!(done = self.done(), failed = self.failed(), "audit:finish");
  }
}
