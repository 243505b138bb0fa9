use async_trait::async_trait;

use crate::domain::Record;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
  #[error("io error: {0}")]
  Io(String),

  #[error("internal error: {0}")]
  Internal(String),
}

/// Port del scanner de archivos.
///
/// Devuelve el listado en bruto, un registro por entrada encontrada, con las
/// mismas claves que produciría un paso de "listar directorio" de un flujo
/// (`path`, `name`, `size`, `file_type`, `last_modified`, `is_directory`).
/// El adapter puede recorrer en paralelo por dentro; el orden del resultado
/// es el orden del listado.
#[async_trait]
pub trait FileScanner: Send + Sync {
  async fn scan_listing(&self) -> Result<Vec<Record>, ScanError>;
}
