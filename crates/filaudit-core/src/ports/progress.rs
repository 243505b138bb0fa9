use async_trait::async_trait;

/// Avisos de progreso de una auditoría.
/// La CLI lo implementa sobre `tracing`; los tests usan `NoopReporter`.
#[async_trait]
pub trait ProgressReporter: Send + Sync {
  async fn start(&self, total_files: usize);
  async fn on_success(&self, path: &str);
  async fn on_error(&self, path: &str, error: &str);
  async fn finish(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

#[async_trait]
impl ProgressReporter for NoopReporter {
  async fn start(&self, _total_files: usize) {}
  async fn on_success(&self, _path: &str) {}
  async fn on_error(&self, _path: &str, _error: &str) {}
  async fn finish(&self) {}
}
