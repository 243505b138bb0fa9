use std::io::{self, Read};
use std::path::Path;

use anyhow::{Context, bail};
use serde_json::Value;
use tracing::warn;

use filaudit_config::NormalizerConfig;
use filaudit_core::domain::Record;
use filaudit_core::ports::SystemClock;
use filaudit_core::services::{NormalizerOptions, normalize_listing};

use crate::commands::print_json;

pub fn run(input: Option<&Path>) -> anyhow::Result<()> {
  let raw = match input {
    Some(path) => std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?,
    None => {
      let mut buf = String::new();
      io::stdin().read_to_string(&mut buf).context("reading stdin")?;
      buf
    }
  };

  let records = parse_listing(&raw)?;
  let cfg = NormalizerConfig::load()?;
  let options = NormalizerOptions { cloud_provider: cfg.cloud_provider };

  print_json(&normalize_listing(&records, &SystemClock, &options))
}

/// El listado debe ser un array JSON. Un elemento que no sea objeto se trata
/// como un registro vacío: el normalizador le pone todos los valores por defecto.
pub(crate) fn parse_listing(raw: &str) -> anyhow::Result<Vec<Record>> {
  let value: Value = serde_json::from_str(raw).context("listing is not valid JSON")?;

  let Value::Array(items) = value else {
    bail!("listing must be a JSON array of records");
  };

  Ok(
    items
      .into_iter()
      .enumerate()
      .map(|(index, item)| match item {
        Value::Object(record) => record,
        other => {
          warn!(index, value = %other, "listing item is not an object");
          Record::new()
        }
      })
      .collect(),
  )
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::{TimeZone, Utc};
  use filaudit_core::ports::FixedClock;

  #[test]
  fn non_object_items_become_empty_records() {
    let records = parse_listing(r#"[{"path": "/a.txt"}, 3, null]"#).unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0]["path"], "/a.txt");
    assert!(records[1].is_empty());
    assert!(records[2].is_empty());
  }

  #[test]
  fn top_level_must_be_an_array() {
    assert!(parse_listing(r#"{"path": "/a.txt"}"#).is_err());
    assert!(parse_listing("not json").is_err());
  }

  #[test]
  fn parsed_listing_feeds_the_normalizer() {
    let records = parse_listing(r#"[{"name": "plano.dwg", "size": "2048"}, "basura"]"#).unwrap();
    let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap());

    let out = normalize_listing(&records, &clock, &NormalizerOptions::default());

    assert_eq!(out.len(), 2);
    assert_eq!(out[0].file_name.as_deref(), Some("plano.dwg"));
    assert_eq!(out[0].file_size, 2048);
    assert_eq!(out[1].file_type, "unknown");
    assert_eq!(out[1].scan_id.as_str(), "scan_1714557600000_1");
  }
}
