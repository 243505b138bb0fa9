use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::ids::ScanId;
use crate::domain::record::{Record, find_str};

pub const KEYS_FILE_PATH: &[&str] = &["file_path", "path"];

pub const KEYS_FILE_NAME: &[&str] = &["file_name", "name"];

pub const KEY_SIZE: &str = "size";

pub const KEY_FILE_TYPE: &str = "file_type";

pub const KEY_LAST_MODIFIED: &str = "last_modified";

pub const KEY_IS_DIRECTORY: &str = "is_directory";

/// Vista tipada de un registro de listado de directorio.
///
/// Todos los campos son opcionales: el listado viene de un paso anterior del
/// flujo sin esquema garantizado. Un valor mal formado se trata igual que uno
/// ausente, nunca como error.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingItem {
  pub file_path: Option<String>,
  pub file_name: Option<String>,
  pub size: Option<u64>,
  pub file_type: Option<String>,
  pub last_modified: Option<String>,
  pub is_directory: Option<bool>,
}

impl ListingItem {
  pub fn from_record(record: &Record) -> Self {
    Self {
      file_path: find_str(record, KEYS_FILE_PATH),
      file_name: find_str(record, KEYS_FILE_NAME),
      size: record.get(KEY_SIZE).and_then(size_value),
      file_type: find_str(record, &[KEY_FILE_TYPE]),
      last_modified: find_str(record, &[KEY_LAST_MODIFIED]),
      is_directory: record.get(KEY_IS_DIRECTORY).and_then(Value::as_bool),
    }
  }

  /// Serializa el item con las claves cortas (`path`, `name`) que usan los
  /// listados de origen.
  pub fn to_record(&self) -> Record {
    let mut record = Record::new();

    if let Some(path) = &self.file_path {
      record.insert("path".into(), Value::from(path.as_str()));
    }
    if let Some(name) = &self.file_name {
      record.insert("name".into(), Value::from(name.as_str()));
    }
    if let Some(size) = self.size {
      record.insert(KEY_SIZE.into(), Value::from(size));
    }
    if let Some(file_type) = &self.file_type {
      record.insert(KEY_FILE_TYPE.into(), Value::from(file_type.as_str()));
    }
    if let Some(last_modified) = &self.last_modified {
      record.insert(KEY_LAST_MODIFIED.into(), Value::from(last_modified.as_str()));
    }
    if let Some(is_directory) = self.is_directory {
      record.insert(KEY_IS_DIRECTORY.into(), Value::from(is_directory));
    }

    record
  }
}

/// Acepta enteros no negativos, flotantes no negativos (truncados) y cadenas decimales.
fn size_value(value: &Value) -> Option<u64> {
  match value {
    Value::Number(n) => n
      .as_u64()
      .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f >= 0.0).map(|f| f as u64)),
    Value::String(s) => s.trim().parse::<u64>().ok(),
    _ => None,
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
  Explored,
}

/// Registro normalizado que produce el normalizador para cada item del listado.
///
/// `file_path` y `file_name` se omiten al serializar cuando no se pudieron
/// resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExploredEntry {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file_path: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub file_name: Option<String>,
  pub file_size: u64,
  pub file_type: String,
  pub last_modified: String,
  pub is_directory: bool,
  pub cloud_provider: String,
  pub scan_id: ScanId,
  pub status: ScanStatus,
}
