use chrono::{DateTime, Utc};

use crate::domain::{ExploredEntry, ListingItem, Record, ScanId, ScanStatus};
use crate::ports::clock::{Clock, to_iso8601};

pub const DEFAULT_CLOUD_PROVIDER: &str = "your_cloud_provider";

pub const DEFAULT_FILE_TYPE: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizerOptions {
  /// Valor que se copia tal cual en `cloud_provider` de cada entrada.
  pub cloud_provider: String,
}

impl Default for NormalizerOptions {
  fn default() -> Self {
    Self { cloud_provider: DEFAULT_CLOUD_PROVIDER.to_string() }
  }
}

/// Normaliza un listado de directorio: una entrada de salida por registro de
/// entrada, en el mismo orden.
///
/// Cada registro se resuelve de forma independiente y nunca falla: lo que
/// falte o venga mal formado toma su valor por defecto. El reloj se consulta
/// una vez por registro; esa lectura alimenta tanto el `last_modified` por
/// defecto como el `scan_id`.
pub fn normalize_listing<C>(items: &[Record], clock: &C, options: &NormalizerOptions) -> Vec<ExploredEntry>
where
  C: Clock + ?Sized,
{
  items
    .iter()
    .enumerate()
    .map(|(index, record)| normalize_item(&ListingItem::from_record(record), index, clock.now(), options))
    .collect()
}

pub fn normalize_item(
  item: &ListingItem,
  index: usize,
  now: DateTime<Utc>,
  options: &NormalizerOptions,
) -> ExploredEntry {
  ExploredEntry {
    file_path: item.file_path.clone(),
    file_name: item.file_name.clone(),
    file_size: item.size.unwrap_or(0),
    file_type: item.file_type.clone().unwrap_or_else(|| DEFAULT_FILE_TYPE.to_string()),
    last_modified: item.last_modified.clone().unwrap_or_else(|| to_iso8601(now)),
    is_directory: item.is_directory.unwrap_or(false),
    cloud_provider: options.cloud_provider.clone(),
    scan_id: ScanId::new(now.timestamp_millis(), index),
    status: ScanStatus::Explored,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ports::FixedClock;
  use chrono::TimeZone;
  use serde_json::{Value, json};

  const MS: i64 = 1_714_557_600_000;

  fn clock() -> FixedClock {
    FixedClock(Utc.timestamp_millis_opt(MS).unwrap())
  }

  fn records(v: Value) -> Vec<Record> {
    v.as_array().unwrap().iter().map(|r| r.as_object().cloned().unwrap()).collect()
  }

  #[test]
  fn output_has_one_entry_per_input_with_indexed_scan_ids() {
    let input = records(json!([{}, { "path": "/x" }, { "name": "y" }, {}, {}]));

    let out = normalize_listing(&input, &clock(), &NormalizerOptions::default());

    assert_eq!(out.len(), input.len());
    for (i, e) in out.iter().enumerate() {
      assert!(e.scan_id.as_str().ends_with(&format!("_{i}")));
    }
  }

  #[test]
  fn fully_populated_record() {
    let input = records(json!([
      { "path": "/a/b", "name": "f", "size": 10, "file_type": "txt", "is_directory": false }
    ]));

    let out = normalize_listing(&input, &clock(), &NormalizerOptions::default());
    let v = serde_json::to_value(&out[0]).unwrap();

    assert_eq!(
      v,
      json!({
        "file_path": "/a/b",
        "file_name": "f",
        "file_size": 10,
        "file_type": "txt",
        "last_modified": "2024-05-01T10:00:00.000Z",
        "is_directory": false,
        "cloud_provider": "your_cloud_provider",
        "scan_id": format!("scan_{MS}_0"),
        "status": "explored",
      })
    );
  }

  #[test]
  fn empty_record_takes_defaults() {
    let out = normalize_listing(&records(json!([{}])), &clock(), &NormalizerOptions::default());
    let e = &out[0];

    assert_eq!(e.file_path, None);
    assert_eq!(e.file_name, None);
    assert_eq!(e.file_size, 0);
    assert_eq!(e.file_type, "unknown");
    assert!(!e.is_directory);
    assert_eq!(e.last_modified, "2024-05-01T10:00:00.000Z");
    assert_eq!(e.cloud_provider, DEFAULT_CLOUD_PROVIDER);
    assert_eq!(e.scan_id.as_str(), format!("scan_{MS}_0"));
    assert_eq!(e.status, ScanStatus::Explored);
  }

  #[test]
  fn falsy_values_fall_back() {
    let input = records(json!([
      { "file_path": "", "path": "/fallback", "size": 0, "file_type": "", "last_modified": "", "is_directory": null }
    ]));

    let e = &normalize_listing(&input, &clock(), &NormalizerOptions::default())[0];

    assert_eq!(e.file_path.as_deref(), Some("/fallback"));
    assert_eq!(e.file_size, 0);
    assert_eq!(e.file_type, "unknown");
    assert_eq!(e.last_modified, "2024-05-01T10:00:00.000Z");
    assert!(!e.is_directory);
  }

  #[test]
  fn given_last_modified_is_kept_verbatim() {
    let input = records(json!([{ "last_modified": "2020-01-01T00:00:00Z", "is_directory": true }]));
    let e = &normalize_listing(&input, &clock(), &NormalizerOptions::default())[0];

    assert_eq!(e.last_modified, "2020-01-01T00:00:00Z");
    assert!(e.is_directory);
  }

  #[test]
  fn cloud_provider_comes_from_options() {
    let opts = NormalizerOptions { cloud_provider: "nas-obra-norte".into() };
    let e = &normalize_listing(&records(json!([{}])), &clock(), &opts)[0];
    assert_eq!(e.cloud_provider, "nas-obra-norte");
  }

  #[test]
  fn empty_listing_yields_empty_output() {
    assert!(normalize_listing(&[], &clock(), &NormalizerOptions::default()).is_empty());
  }
}
