use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::debug;

use filaudit_core::domain::Record;
use filaudit_core::ports::{Clock, ContentDigester, to_iso8601};
use filaudit_core::{FileAccessError, FileAccessReason};

/// Tamaño de bloque por defecto al alimentar el hash (64 KiB).
pub const HASH_CHUNK_SIZE: usize = 64 * 1024;

pub const FIELD_SHA256: &str = "sha256";

pub const FIELD_TIMESTAMP: &str = "timestamp";

/// Entrada del adjuntador de huellas: el archivo a leer y el registro al que
/// se le añaden los campos.
#[derive(Debug, Clone, Default)]
pub struct DigestRequest {
  pub binary: PathBuf,
  pub json: Record,
}

impl DigestRequest {
  pub fn new(binary: impl Into<PathBuf>, json: Record) -> Self {
    Self { binary: binary.into(), json }
  }
}

/// Lee el archivo completo y lo decodifica como UTF-8.
pub fn read_text(path: &Path) -> Result<String, FileAccessError> {
  let bytes = std::fs::read(path).map_err(|e| FileAccessError::from_io(path, e))?;
  String::from_utf8(bytes).map_err(|e| FileAccessError::new(path, FileAccessReason::Decode(e)))
}

/// SHA-256 del texto, alimentado por bloques. Hex en minúsculas, 64 caracteres.
pub fn sha256_text(text: &str) -> String {
  let mut hasher = Sha256::new();
  for chunk in text.as_bytes().chunks(HASH_CHUNK_SIZE) {
    hasher.update(chunk);
  }
  hex::encode(hasher.finalize())
}

/// Calcula la huella del contenido de `request.binary` (decodificado como
/// texto) y devuelve un único registro: una copia de `request.json` con
/// `sha256` y `timestamp` añadidos o sobrescritos.
///
/// Cualquier fallo de lectura o de decodificación se devuelve tal cual; no
/// hay reintentos ni salida parcial.
pub fn attach_digest<C>(request: &DigestRequest, clock: &C) -> Result<Vec<Record>, FileAccessError>
where
  C: Clock + ?Sized,
{
  let text = read_text(&request.binary)?;
  let sha256 = sha256_text(&text);

  debug!(path = %request.binary.display(), %sha256, "digest attached");

  let mut json = request.json.clone();
  json.insert(FIELD_SHA256.into(), Value::String(sha256));
  json.insert(FIELD_TIMESTAMP.into(), Value::String(to_iso8601(clock.now())));

  Ok(vec![json])
}

/// SHA-256 de los bytes en bruto de un archivo, leído por bloques de `chunk_size`.
///
/// A diferencia de [`attach_digest`] no decodifica nada: sirve para cualquier
/// archivo, binario o no.
pub fn sha256_file(path: &Path, chunk_size: usize) -> Result<String, FileAccessError> {
  let mut file = File::open(path).map_err(|e| FileAccessError::from_io(path, e))?;
  let mut hasher = Sha256::new();
  let mut buf = vec![0u8; chunk_size.max(1)];

  loop {
    let n = file.read(&mut buf).map_err(|e| FileAccessError::from_io(path, e))?;
    if n == 0 {
      break; // EOF
    }
    hasher.update(&buf[..n]);
  }

  Ok(hex::encode(hasher.finalize()))
}

/// `ContentDigester` sobre el sistema de archivos local.
///
/// La lectura es bloqueante, así que se delega a `spawn_blocking` para no
/// frenar el runtime de Tokio.
#[derive(Debug, Clone)]
pub struct Sha256Digester {
  chunk_size: usize,
}

impl Sha256Digester {
  pub fn new(chunk_size: usize) -> Self {
    Self { chunk_size: chunk_size.max(1) }
  }
}

impl Default for Sha256Digester {
  fn default() -> Self {
    Self::new(HASH_CHUNK_SIZE)
  }
}

#[async_trait]
impl ContentDigester for Sha256Digester {
  async fn hash_file(&self, path: &Path) -> Result<String, FileAccessError> {
    let owned = path.to_path_buf();
    let chunk_size = self.chunk_size;

    tokio::task::spawn_blocking(move || sha256_file(&owned, chunk_size))
      .await
      .map_err(|e| FileAccessError::new(path, FileAccessReason::Io(std::io::Error::other(e))))?
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};
  use filaudit_core::ports::FixedClock;
  use serde_json::json;
  use tempfile::tempdir;

  const EMPTY_SHA256: &str = "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855";

  fn clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap())
  }

  #[test]
  fn empty_text_has_the_well_known_digest() {
    assert_eq!(sha256_text(""), EMPTY_SHA256);
  }

  #[test]
  fn digest_is_deterministic_lowercase_hex() {
    let a = sha256_text("presupuesto v2");
    let b = sha256_text("presupuesto v2");

    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
  }

  #[test]
  fn chunking_does_not_change_the_digest() {
    let text = "x".repeat(HASH_CHUNK_SIZE * 2 + 17);
    assert_eq!(sha256_text(&text), hex::encode(Sha256::digest(text.as_bytes())));
  }

  #[test]
  fn attaches_sha256_and_timestamp_over_existing_fields() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("nota.txt");
    std::fs::write(&path, "abc").unwrap();

    let json = json!({ "id": 7, "sha256": "stale", "tags": ["a"] }).as_object().cloned().unwrap();
    let out = attach_digest(&DigestRequest::new(&path, json), &clock()).unwrap();

    assert_eq!(out.len(), 1);
    assert_eq!(
      Value::Object(out[0].clone()),
      json!({
        "id": 7,
        "tags": ["a"],
        "sha256": "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad",
        "timestamp": "2024-05-01T10:00:00.000Z",
      })
    );
  }

  #[test]
  fn empty_file_hashes_like_empty_text() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("vacio.txt");
    std::fs::write(&path, "").unwrap();

    let out = attach_digest(&DigestRequest::new(&path, Record::new()), &clock()).unwrap();
    assert_eq!(out[0][FIELD_SHA256], json!(EMPTY_SHA256));
  }

  #[test]
  fn missing_file_is_a_file_access_error() {
    let tmp = tempdir().unwrap();
    let err = attach_digest(&DigestRequest::new(tmp.path().join("nope.txt"), Record::new()), &clock()).unwrap_err();
    assert!(err.is_not_found());
  }

  #[test]
  fn invalid_utf8_is_a_file_access_error() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("plano.dwg");
    std::fs::write(&path, [0xffu8, 0xfe, 0x00, 0xc3]).unwrap();

    let err = attach_digest(&DigestRequest::new(&path, Record::new()), &clock()).unwrap_err();
    assert!(matches!(err.reason, FileAccessReason::Decode(_)));
  }

  #[test]
  fn raw_file_hash_matches_text_hash_for_utf8_content() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("acta.md");
    std::fs::write(&path, "acta de replanteo\n").unwrap();

    assert_eq!(sha256_file(&path, 4).unwrap(), sha256_text("acta de replanteo\n"));
  }

  #[tokio::test]
  async fn digester_reads_binary_files() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("plano.dwg");
    std::fs::write(&path, [0xffu8, 0xfe, 0x00]).unwrap();

    let got = Sha256Digester::default().hash_file(&path).await.unwrap();
    assert_eq!(got, hex::encode(Sha256::digest([0xffu8, 0xfe, 0x00])));

    let err = Sha256Digester::default().hash_file(&tmp.path().join("nope")).await.unwrap_err();
    assert!(err.is_not_found());
  }
}
