use std::path::Path;

use anyhow::{Context, bail};
use serde_json::Value;

use filaudit_core::domain::Record;
use filaudit_core::ports::SystemClock;
use filaudit_fs::{DigestRequest, attach_digest};

use crate::commands::print_json;

pub fn run(file: &Path, json: &str) -> anyhow::Result<()> {
  let record = parse_record(json)?;
  let out = attach_digest(&DigestRequest::new(file, record), &SystemClock)?;
  print_json(&out)
}

fn parse_record(raw: &str) -> anyhow::Result<Record> {
  match serde_json::from_str::<Value>(raw).context("--json is not valid JSON")? {
    Value::Object(record) => Ok(record),
    other => bail!("--json must be a JSON object, got {other}"),
  }
}
