// crates/filaudit-core/src/errors.rs
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error genérico del núcleo de filaudit.
///
/// Las capas superiores (CLI, etc.) deberían mapear este error
/// a mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  #[error("scan error: {0}")]
  Scan(String),

  #[error("invalid options: {0}")]
  InvalidOptions(String),
}

/// Fallo al leer el contenido de un archivo para calcular su huella.
///
/// Cubre ruta inexistente, permisos denegados y contenido que no se puede
/// decodificar como texto. No se captura localmente: se propaga al llamador.
#[derive(Debug, Error)]
#[error("cannot access {}: {reason}", path.display())]
pub struct FileAccessError {
  pub path: PathBuf,
  pub reason: FileAccessReason,
}

#[derive(Debug, Error)]
pub enum FileAccessReason {
  #[error("file not found")]
  NotFound,

  #[error("permission denied")]
  PermissionDenied,

  #[error("content is not valid UTF-8: {0}")]
  Decode(#[source] std::string::FromUtf8Error),

  #[error("io error: {0}")]
  Io(#[source] io::Error),
}

impl FileAccessError {
  pub fn new(path: impl Into<PathBuf>, reason: FileAccessReason) -> Self {
    Self { path: path.into(), reason }
  }

  /// Clasifica un `io::Error` según su `ErrorKind`.
  pub fn from_io(path: &Path, err: io::Error) -> Self {
    let reason = match err.kind() {
      io::ErrorKind::NotFound => FileAccessReason::NotFound,
      io::ErrorKind::PermissionDenied => FileAccessReason::PermissionDenied,
      _ => FileAccessReason::Io(err),
    };
    Self::new(path, reason)
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self.reason, FileAccessReason::NotFound)
  }
}
