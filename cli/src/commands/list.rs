use std::path::PathBuf;

use filaudit_core::ports::FileScanner;
use filaudit_scanner::{FsScanner, ScannerConfig};

use crate::commands::print_json;

pub async fn run(roots: Vec<PathBuf>) -> anyhow::Result<()> {
  let cfg = ScannerConfig::load()?.with_roots(roots);
  let records = FsScanner::new(cfg).scan_listing().await?;
  print_json(&records)
}
