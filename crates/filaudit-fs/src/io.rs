use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}

/// Escribe `contents` en un temporal junto a `path` y lo renombra encima.
///
/// Quien lea `path` ve el archivo viejo o el nuevo completo, nunca uno a medias.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

/// Serializa `value` como JSON indentado y lo escribe de forma atómica,
/// creando el directorio padre si hace falta.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), FsError> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let mut json = serde_json::to_string_pretty(value)?;
  json.push('\n');
  atomic_write_str(path, &json)?;
  Ok(())
}
