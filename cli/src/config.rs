use filaudit_config::{AuditConfig, NormalizerConfig};
use filaudit_scanner::ScannerConfig;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ScannerConfigDto {
  pub roots: Vec<String>,
  pub target_exts: Option<Vec<String>>,
  pub ignore_hidden: bool,
  pub follow_symlinks: bool,
  pub max_depth: Option<u32>,
}

impl From<ScannerConfig> for ScannerConfigDto {
  fn from(cfg: ScannerConfig) -> Self {
    ScannerConfigDto {
      roots: cfg.roots.into_iter().map(|p| p.to_string_lossy().to_string()).collect(),
      target_exts: cfg.target_exts,
      ignore_hidden: cfg.ignore_hidden,
      follow_symlinks: cfg.follow_symlinks,
      max_depth: cfg.max_depth,
    }
  }
}

#[derive(Debug, Serialize)]
pub struct AuditConfigDto {
  pub report_dir: String,
  pub hash_chunk_size: usize,
}

impl From<AuditConfig> for AuditConfigDto {
  fn from(cfg: AuditConfig) -> Self {
    AuditConfigDto {
      report_dir: cfg.resolved_report_dir().to_string_lossy().to_string(),
      hash_chunk_size: cfg.hash_chunk_size,
    }
  }
}

/// Configuración efectiva, tal como la ve `filaudit config`.
#[derive(Debug, Serialize)]
pub struct EffectiveConfigDto {
  pub config_file: String,
  pub scanner: ScannerConfigDto,
  pub normalizer: NormalizerConfig,
  pub audit: AuditConfigDto,
}
