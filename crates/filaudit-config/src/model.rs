use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};

/// Sección `[normalizer]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
  /// Se copia tal cual en `cloud_provider` de cada entrada normalizada.
  #[serde(default = "default_cloud_provider")]
  pub cloud_provider: String,
}

fn default_cloud_provider() -> String {
  "your_cloud_provider".into()
}

impl Default for NormalizerConfig {
  fn default() -> Self {
    Self { cloud_provider: default_cloud_provider() }
  }
}

impl NormalizerConfig {
  pub fn load() -> Result<Self, ConfigError> {
    Self::load_from(&*CONFIG_BACKEND)
  }

  /// Variante para tests: inyectar un backend distinto.
  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    backend.load_section_with_default("normalizer")
  }
}

/// Sección `[audit]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditConfig {
  /// Carpeta de los informes JSON. Sin valor: `<data_dir>/reports`.
  pub report_dir: Option<PathBuf>,

  /// Tamaño de bloque (bytes) al leer archivos para el hash.
  #[serde(default = "default_hash_chunk_size")]
  pub hash_chunk_size: usize,
}

fn default_hash_chunk_size() -> usize {
  65_536
}

impl Default for AuditConfig {
  fn default() -> Self {
    Self { report_dir: None, hash_chunk_size: default_hash_chunk_size() }
  }
}

impl AuditConfig {
  /// Carga la sección y la vuelve a escribir para que los valores por defecto
  /// queden visibles en el archivo.
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = Self::load_from(&*CONFIG_BACKEND)?;
    CONFIG_BACKEND.save_section("audit", &cfg)?;
    Ok(cfg)
  }

  pub fn load_from<B: ConfigBackend>(backend: &B) -> Result<Self, ConfigError> {
    let cfg: Self = backend.load_section_with_default("audit")?;
    if cfg.hash_chunk_size == 0 {
      return Err(ConfigError::Other("[audit] hash_chunk_size must be greater than 0".into()));
    }
    Ok(cfg)
  }

  pub fn resolved_report_dir(&self) -> PathBuf {
    self.report_dir.clone().unwrap_or_else(|| PATHS.reports_dir())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::TomlConfigBackend;
  use tempfile::tempdir;

  #[test]
  fn defaults_when_sections_are_missing() {
    let tmp = tempdir().unwrap();
    let backend = TomlConfigBackend::at(tmp.path().join("filaudit.toml"));

    assert_eq!(NormalizerConfig::load_from(&backend).unwrap().cloud_provider, "your_cloud_provider");
    assert_eq!(AuditConfig::load_from(&backend).unwrap(), AuditConfig::default());
  }

  #[test]
  fn partial_sections_fill_in_defaults() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("filaudit.toml");
    std::fs::write(&path, "[audit]\nreport_dir = \"/srv/informes\"\n[normalizer]\n").unwrap();
    let backend = TomlConfigBackend::at(&path);

    let audit = AuditConfig::load_from(&backend).unwrap();
    assert_eq!(audit.report_dir, Some(PathBuf::from("/srv/informes")));
    assert_eq!(audit.hash_chunk_size, 65_536);
    assert_eq!(audit.resolved_report_dir(), PathBuf::from("/srv/informes"));

    assert_eq!(NormalizerConfig::load_from(&backend).unwrap(), NormalizerConfig::default());
  }

  #[test]
  fn zero_chunk_size_is_rejected() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("filaudit.toml");
    std::fs::write(&path, "[audit]\nhash_chunk_size = 0\n").unwrap();

    assert!(AuditConfig::load_from(&TomlConfigBackend::at(&path)).is_err());
  }
}
