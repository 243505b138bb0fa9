use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador de una entrada explorada: `scan_<epoch_ms>_<índice>`.
///
/// Solo es único dentro de una misma invocación del normalizador: dos
/// invocaciones en el mismo milisegundo generan los mismos ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(String);

impl ScanId {
  pub const PREFIX: &'static str = "scan_";

  pub fn new(epoch_ms: i64, index: usize) -> Self {
    ScanId(format!("{}{epoch_ms}_{index}", Self::PREFIX))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for ScanId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador único de una ejecución de auditoría.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuditRunId(Uuid);

impl AuditRunId {
  /// Genera un nuevo identificador único.
  pub fn new() -> Self {
    AuditRunId(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for AuditRunId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for AuditRunId {
  fn from(u: Uuid) -> Self {
    AuditRunId(u)
  }
}

impl fmt::Display for AuditRunId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scan_id_embeds_timestamp_and_index() {
    let id = ScanId::new(1_700_000_000_123, 7);
    assert_eq!(id.as_str(), "scan_1700000000123_7");
    assert_eq!(serde_json::to_value(&id).unwrap(), serde_json::json!("scan_1700000000123_7"));
  }

  #[test]
  fn run_ids_differ() {
    assert_ne!(AuditRunId::new(), AuditRunId::new());
  }
}
