use std::path::Path;

use async_trait::async_trait;

use crate::errors::FileAccessError;

/// Port que abstrae el cálculo de la huella del contenido de un archivo.
///
/// Devuelve el SHA-256 en hexadecimal minúsculo. La implementación decide
/// cómo leer (bloques, hilo bloqueante, etc.).
#[async_trait]
pub trait ContentDigester: Send + Sync {
  async fn hash_file(&self, path: &Path) -> Result<String, FileAccessError>;
}
