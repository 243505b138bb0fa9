use std::fmt::{self, Write as _};
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use tracing::info;

use filaudit_config::{AuditConfig, NormalizerConfig};
use filaudit_core::domain::AuditReport;
use filaudit_core::ports::SystemClock;
use filaudit_core::services::{AuditOptions, AuditService, NormalizerOptions};
use filaudit_fs::{Sha256Digester, write_json_atomic};
use filaudit_scanner::{FsScanner, ScannerConfig};

use crate::infrastructure::reporter::TracingReporter;

/// Grupos de duplicados que se muestran en el resumen.
const TOP_GROUPS: usize = 10;

const HASH_PREFIX_LEN: usize = 12;

pub async fn run(roots: Vec<PathBuf>, save: bool) -> anyhow::Result<()> {
  // --- Configuración ---
  let scanner_cfg = ScannerConfig::load()?.with_roots(roots);
  let normalizer_cfg = NormalizerConfig::load()?;
  let audit_cfg = AuditConfig::load()?;

  // --- Inyección de dependencias ---
  let options = AuditOptions { normalizer: NormalizerOptions { cloud_provider: normalizer_cfg.cloud_provider } };
  let service = AuditService::new(
    FsScanner::new(scanner_cfg),
    Sha256Digester::new(audit_cfg.hash_chunk_size),
    TracingReporter::new(),
    SystemClock,
    options,
  )?;

  let report = service.run().await?;
  print!("{}", render_summary(&report)?);

  if save {
    let path = audit_cfg.resolved_report_dir().join(report_file_name(report.started_at));
    write_json_atomic(&path, &report)?;
    info!(path = %path.display(), "report saved");
    println!("Informe: {}", path.display());
  }

  Ok(())
}

/// `Audit_<YYYYmmdd_HHMMSS>.json`, con la hora de inicio de la auditoría (UTC).
pub(crate) fn report_file_name(started_at: DateTime<Utc>) -> String {
  format!("Audit_{}.json", started_at.format("%Y%m%d_%H%M%S"))
}

fn megabytes(bytes: u64) -> f64 {
  bytes as f64 / (1024.0 * 1024.0)
}

/// Resumen en texto plano: totales y los grupos de duplicados más pesados.
pub(crate) fn render_summary(report: &AuditReport) -> Result<String, fmt::Error> {
  let wasted: u64 = report.duplicates.iter().map(|g| g.wasted_bytes).sum();
  let mut out = String::new();

  writeln!(out, "Archivos analizados: {}", report.files_scanned)?;
  writeln!(out, "Grupos de duplicados: {} ({:.2} MB recuperables)", report.duplicates.len(), megabytes(wasted))?;
  writeln!(out, "Residuos: {} archivos ({:.2} MB)", report.trash.count, megabytes(report.trash.total_bytes))?;
  writeln!(out, "Ganancia potencial: {:.2} MB", megabytes(report.potential_gain_bytes))?;

  if report.duplicates.is_empty() {
    return Ok(out);
  }

  writeln!(out)?;
  writeln!(out, "{:<12}  {:>6}  {:>12}  EJEMPLO", "HASH", "COPIAS", "PERDIDO (MB)")?;

  for group in report.duplicates.iter().take(TOP_GROUPS) {
    let prefix: String = group.content_hash.chars().take(HASH_PREFIX_LEN).collect();
    let example = group.paths.first().map(String::as_str).unwrap_or("-");
    writeln!(out, "{:<12}  {:>6}  {:>12.2}  {}", prefix, group.count, megabytes(group.wasted_bytes), example)?;
  }

  if report.duplicates.len() > TOP_GROUPS {
    writeln!(out, "... y {} grupos más", report.duplicates.len() - TOP_GROUPS)?;
  }

  Ok(out)
}
