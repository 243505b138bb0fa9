use std::path::Path;

use tracing::{debug, info, warn};

use crate::domain::{
  AuditEntry, AuditReport, AuditRunId, ContentHash, DebrisFilter, ExploredEntry, ProcessingStatus, extension_of,
};
use crate::errors::CoreError;
use crate::ports::{Clock, ContentDigester, FileScanner, ProgressReporter};
use crate::services::normalizer::{NormalizerOptions, normalize_listing};

#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
  pub normalizer: NormalizerOptions,
}

impl AuditOptions {
  pub fn validate(&self) -> Result<(), CoreError> {
    if self.normalizer.cloud_provider.trim().is_empty() {
      return Err(CoreError::InvalidOptions("cloud_provider must not be empty".into()));
    }
    Ok(())
  }
}

pub struct AuditService<S, D, P, C>
where
  S: FileScanner,
  D: ContentDigester,
  P: ProgressReporter,
  C: Clock,
{
  scanner: S,
  digester: D,
  reporter: P,
  clock: C,
  options: AuditOptions,
}

impl<S, D, P, C> AuditService<S, D, P, C>
where
  S: FileScanner,
  D: ContentDigester,
  P: ProgressReporter,
  C: Clock,
{
  pub fn new(scanner: S, digester: D, reporter: P, clock: C, options: AuditOptions) -> Result<Self, CoreError> {
    options.validate()?;
    Ok(Self { scanner, digester, reporter, clock, options })
  }

  /// Ejecuta una auditoría completa:
  /// - escanea las raíces configuradas en el scanner
  /// - normaliza el listado
  /// - clasifica residuos y calcula la huella de cada archivo
  /// - agrupa duplicados y totaliza residuos
  ///
  /// Solo un fallo del scanner aborta la ejecución. Un archivo ilegible queda
  /// marcado como `ACCESS_DENIED` y la auditoría sigue.
  pub async fn run(&self) -> Result<AuditReport, CoreError> {
    let run_id = AuditRunId::new();
    let started_at = self.clock.now();

    // 1) Listado en bruto
    let listing = self.scanner.scan_listing().await.map_err(|e| CoreError::Scan(e.to_string()))?;

    // 2) Normalización (los directorios no se auditan)
    let files: Vec<ExploredEntry> = normalize_listing(&listing, &self.clock, &self.options.normalizer)
      .into_iter()
      .filter(|e| !e.is_directory)
      .collect();

    info!(%run_id, files = files.len(), "audit started");
    self.reporter.start(files.len()).await;

    // 3) Veredicto + huella por archivo
    let mut entries = Vec::with_capacity(files.len());
    for entry in files {
      entries.push(self.audit_entry(entry).await);
    }

    self.reporter.finish().await;

    let report = AuditReport::build(run_id, started_at, self.clock.now(), entries);

    info!(
      %run_id,
      files = report.files_scanned,
      duplicate_groups = report.duplicates.len(),
      trash = report.trash.count,
      potential_gain_bytes = report.potential_gain_bytes,
      "audit finished"
    );

    Ok(report)
  }

  async fn audit_entry(&self, entry: ExploredEntry) -> AuditEntry {
    let file_name = display_name(&entry);
    let extension = extension_of(&file_name);
    let (risk_score, processing_status) = DebrisFilter::evaluate(&file_name, &extension);
    let label = entry.file_path.clone().unwrap_or_else(|| file_name.clone());

    // Los archivos de sistema no se leen: suelen estar bloqueados y no aportan nada.
    let content_hash = if processing_status == ProcessingStatus::TrashSys {
      ContentHash::SkippedTrash
    } else {
      match entry.file_path.as_deref() {
        Some(path) => match self.digester.hash_file(Path::new(path)).await {
          Ok(hex) => ContentHash::Digest(hex),
          Err(e) => {
            warn!(path, error = %e, "content hash failed");
            self.reporter.on_error(&label, &e.to_string()).await;
            ContentHash::AccessDenied
          }
        },
        None => {
          self.reporter.on_error(&label, "entry has no path").await;
          ContentHash::AccessDenied
        }
      }
    };

    debug!(file = %label, status = processing_status.as_str(), hash = %content_hash, "entry audited");

    if content_hash != ContentHash::AccessDenied {
      self.reporter.on_success(&label).await;
    }

    AuditEntry { entry, extension, risk_score, processing_status, content_hash }
  }
}

/// Nombre del archivo: el del listado o, si falta, el último componente de la ruta.
fn display_name(entry: &ExploredEntry) -> String {
  entry
    .file_name
    .clone()
    .or_else(|| {
      entry
        .file_path
        .as_deref()
        .and_then(|p| Path::new(p).file_name())
        .map(|n| n.to_string_lossy().into_owned())
    })
    .unwrap_or_default()
}
