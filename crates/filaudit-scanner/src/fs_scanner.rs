use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use futures::StreamExt;
use thiserror::Error;
use tracing::{debug, info, warn};

use filaudit_core::domain::ListingItem;
use filaudit_core::ports::to_iso8601;
use filaudit_fs::async_walker::{Filtering, WalkConfig, WalkEntry, walk_filtered};

use crate::config::ScannerConfig;

#[derive(Debug, Error)]
pub enum ScannerError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("config error: {0}")]
  Config(#[from] filaudit_config::ConfigError),

  #[error("root not found: {}", .0.display())]
  RootNotFound(PathBuf),

  #[error("root is not a directory: {}", .0.display())]
  NotADirectory(PathBuf),

  #[error("no roots configured")]
  NoRoots,
}

/// Tipo declarado para directorios en el listado.
pub const DIRECTORY_FILE_TYPE: &str = "directory";

/// Recorre las raíces configuradas y devuelve el listado en bruto: archivos y
/// directorios, en el orden del recorrido.
///
/// * Los ocultos se podan (si así se configura) sin entrar en ellos.
/// * El filtro de extensiones solo afecta a archivos, nunca a directorios.
/// * Un error puntual (permiso denegado, archivo que desaparece) se registra
///   y se sigue; solo una raíz inexistente o que no es directorio aborta.
pub async fn scan_listing_with_cfg(cfg: &ScannerConfig) -> Result<Vec<ListingItem>, ScannerError> {
  if cfg.roots.is_empty() {
    return Err(ScannerError::NoRoots);
  }

  for root in &cfg.roots {
    let meta = match tokio::fs::metadata(root).await {
      Ok(m) => m,
      Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Err(ScannerError::RootNotFound(root.clone())),
      Err(e) => return Err(e.into()),
    };
    if !meta.is_dir() {
      return Err(ScannerError::NotADirectory(root.clone()));
    }
  }

  let walk_cfg = WalkConfig {
    follow_symlinks: cfg.follow_symlinks,
    max_depth: cfg.max_depth.unwrap_or(ScannerConfig::DEFAULT_MAX_DEPTH) as usize,
    dedup_dirs: true,
  };

  let mut items = Vec::new();

  for root in &cfg.roots {
    let ignore_hidden = cfg.ignore_hidden;

    let entries = walk_filtered(root, walk_cfg.clone(), move |entry| {
      let hidden = ignore_hidden && entry.is_hidden();
      async move { if hidden { Filtering::IgnoreDir } else { Filtering::Continue } }
    });

    tokio::pin!(entries);

    let before = items.len();

    while let Some(res) = entries.next().await {
      let entry = match res {
        Ok(e) => e,
        Err(e) => {
          warn!(root = %root.display(), error = %e, "walker error");
          continue;
        }
      };

      match listing_item(&entry, cfg).await {
        Ok(Some(item)) => items.push(item),
        Ok(None) => {}
        Err(e) => warn!(path = %entry.path.display(), error = %e, "metadata error"),
      }
    }

    info!(root = %root.display(), entries = items.len() - before, "root scanned");
  }

  Ok(items)
}

/// Convierte una entrada del walker en un item de listado.
/// `None` = la entrada no pasa los filtros.
async fn listing_item(entry: &WalkEntry, cfg: &ScannerConfig) -> Result<Option<ListingItem>, std::io::Error> {
  let meta = if entry.file_type.is_symlink() {
    if !cfg.follow_symlinks {
      debug!(path = %entry.path.display(), "symlink skipped");
      return Ok(None);
    }
    tokio::fs::metadata(&entry.path).await?
  } else {
    tokio::fs::symlink_metadata(&entry.path).await?
  };

  let is_directory = meta.is_dir();

  if !is_directory && !cfg.accepts(&entry.path) {
    return Ok(None);
  }

  let last_modified = meta.modified().ok().map(|t| to_iso8601(DateTime::<Utc>::from(t)));

  Ok(Some(ListingItem {
    file_path: Some(entry.path.to_string_lossy().into_owned()),
    file_name: entry.file_name(),
    size: if is_directory { None } else { Some(meta.len()) },
    file_type: Some(if is_directory { DIRECTORY_FILE_TYPE.to_string() } else { file_type_of(&entry.path) }),
    last_modified,
    is_directory: Some(is_directory),
  }))
}

/// Extensión en minúsculas sin punto, o `unknown`.
fn file_type_of(path: &Path) -> String {
  match path.extension().and_then(|e| e.to_str()) {
    Some(ext) if !ext.is_empty() => ext.to_ascii_lowercase(),
    _ => "unknown".to_string(),
  }
}
