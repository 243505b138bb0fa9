use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::debris::{DebrisFilter, ProcessingStatus};
use crate::domain::ids::AuditRunId;
use crate::domain::listing::ExploredEntry;

/// Huella de contenido de un archivo auditado.
///
/// Se serializa como cadena: el hex SHA-256, o uno de los marcadores
/// `ACCESS_DENIED` / `SKIPPED_TRASH`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ContentHash {
  Digest(String),
  AccessDenied,
  SkippedTrash,
}

impl ContentHash {
  pub const ACCESS_DENIED: &'static str = "ACCESS_DENIED";
  pub const SKIPPED_TRASH: &'static str = "SKIPPED_TRASH";

  pub fn as_str(&self) -> &str {
    match self {
      ContentHash::Digest(hex) => hex,
      ContentHash::AccessDenied => Self::ACCESS_DENIED,
      ContentHash::SkippedTrash => Self::SKIPPED_TRASH,
    }
  }

  pub fn digest(&self) -> Option<&str> {
    match self {
      ContentHash::Digest(hex) => Some(hex),
      _ => None,
    }
  }
}

impl From<ContentHash> for String {
  fn from(hash: ContentHash) -> Self {
    match hash {
      ContentHash::Digest(hex) => hex,
      other => other.as_str().to_string(),
    }
  }
}

impl From<String> for ContentHash {
  fn from(s: String) -> Self {
    match s.as_str() {
      ContentHash::ACCESS_DENIED => ContentHash::AccessDenied,
      ContentHash::SKIPPED_TRASH => ContentHash::SkippedTrash,
      _ => ContentHash::Digest(s),
    }
  }
}

impl fmt::Display for ContentHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Una entrada normalizada más el veredicto de la auditoría.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
  #[serde(flatten)]
  pub entry: ExploredEntry,
  pub extension: String,
  pub risk_score: u8,
  pub processing_status: ProcessingStatus,
  pub content_hash: ContentHash,
}

impl AuditEntry {
  pub fn is_trash(&self) -> bool {
    self.risk_score >= DebrisFilter::TRASH_THRESHOLD
  }
}

/// Archivos con contenido idéntico.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuplicateGroup {
  pub content_hash: String,
  pub count: usize,
  pub paths: Vec<String>,
  pub total_bytes: u64,
  /// Bytes recuperables conservando una sola copia.
  pub wasted_bytes: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrashStats {
  pub count: usize,
  pub total_bytes: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
  pub run_id: AuditRunId,
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub files_scanned: usize,
  pub entries: Vec<AuditEntry>,
  pub duplicates: Vec<DuplicateGroup>,
  pub trash: TrashStats,
  pub potential_gain_bytes: u64,
}

impl AuditReport {
  pub fn build(
    run_id: AuditRunId,
    started_at: DateTime<Utc>,
    finished_at: DateTime<Utc>,
    entries: Vec<AuditEntry>,
  ) -> Self {
    let duplicates = find_duplicates(&entries);
    let trash = trash_stats(&entries);
    let wasted: u64 = duplicates.iter().map(|g| g.wasted_bytes).sum();

    Self {
      run_id,
      started_at,
      finished_at,
      files_scanned: entries.len(),
      entries,
      duplicates,
      trash,
      potential_gain_bytes: wasted + trash.total_bytes,
    }
  }
}

/// Agrupa por huella los archivos con contenido idéntico.
///
/// Los residuos por extensión y los archivos sin huella real quedan fuera.
/// Orden: mayor volumen total primero, luego por huella para que sea estable.
pub fn find_duplicates(entries: &[AuditEntry]) -> Vec<DuplicateGroup> {
  let mut by_hash: HashMap<&str, Vec<&AuditEntry>> = HashMap::new();

  for e in entries {
    if e.processing_status == ProcessingStatus::TrashExt {
      continue;
    }
    if let Some(hex) = e.content_hash.digest() {
      by_hash.entry(hex).or_default().push(e);
    }
  }

  let mut groups: Vec<DuplicateGroup> = by_hash
    .into_iter()
    .filter(|(_, members)| members.len() > 1)
    .map(|(hex, members)| {
      let count = members.len();
      let total_bytes: u64 = members.iter().map(|m| m.entry.file_size).sum();
      let paths = members.iter().filter_map(|m| m.entry.file_path.clone()).collect();

      DuplicateGroup {
        content_hash: hex.to_string(),
        count,
        paths,
        total_bytes,
        wasted_bytes: total_bytes - total_bytes / count as u64,
      }
    })
    .collect();

  groups.sort_by(|a, b| b.total_bytes.cmp(&a.total_bytes).then_with(|| a.content_hash.cmp(&b.content_hash)));
  groups
}

pub fn trash_stats(entries: &[AuditEntry]) -> TrashStats {
  entries.iter().filter(|e| e.is_trash()).fold(TrashStats::default(), |mut acc, e| {
    acc.count += 1;
    acc.total_bytes += e.entry.file_size;
    acc
  })
}
