use filaudit_config::{CONFIG_BACKEND, ConfigBackend, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScannerConfig {
  /// Directorios raíz a escanear.
  #[serde(default)]
  pub roots: Vec<PathBuf>,

  /// Extensiones a incluir (`.pdf`, `dwg`...). Sin valor: todos los archivos.
  pub target_exts: Option<Vec<String>>,

  /// Ignorar archivos/directorios ocultos. Por defecto se recorren: varios
  /// residuos (`.bridgecache`, `.DS_Store`) son justamente archivos ocultos.
  #[serde(default)]
  pub ignore_hidden: bool,

  /// Seguir enlaces simbólicos (con protección anti-ciclos).
  #[serde(default)]
  pub follow_symlinks: bool,

  /// Profundidad máxima opcional.
  pub max_depth: Option<u32>,
}

impl Default for ScannerConfig {
  fn default() -> Self {
    ScannerConfig {
      roots: Vec::new(),
      target_exts: None,
      ignore_hidden: false,
      follow_symlinks: false,
      max_depth: None,
    }
  }
}

impl ScannerConfig {
  pub const DEFAULT_MAX_DEPTH: u32 = 64;

  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("scanner")?;
    CONFIG_BACKEND.save_section("scanner", &cfg)?;
    Ok(cfg)
  }

  pub fn with_roots(mut self, roots: Vec<PathBuf>) -> Self {
    if !roots.is_empty() {
      self.roots = roots;
    }
    self
  }

  /// `true` si el archivo entra en el filtro de extensiones.
  /// Comparación sin distinguir mayúsculas y con el punto inicial opcional.
  pub fn accepts(&self, path: &Path) -> bool {
    let Some(targets) = &self.target_exts else {
      return true;
    };

    let ext = match path.extension().and_then(|e| e.to_str()) {
      Some(e) => e,
      None => return false,
    };

    targets.iter().any(|t| t.trim_start_matches('.').eq_ignore_ascii_case(ext))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn no_filter_accepts_everything() {
    let cfg = ScannerConfig::default();
    assert!(cfg.accepts(Path::new("/a/Makefile")));
    assert!(cfg.accepts(Path::new("/a/plano.dwg")));
  }

  #[test]
  fn extension_filter_ignores_case_and_dot() {
    let cfg = ScannerConfig { target_exts: Some(vec![".PDF".into(), "dwg".into()]), ..Default::default() };

    assert!(cfg.accepts(Path::new("/a/memoria.pdf")));
    assert!(cfg.accepts(Path::new("/a/PLANO.DWG")));
    assert!(!cfg.accepts(Path::new("/a/notas.txt")));
    assert!(!cfg.accepts(Path::new("/a/Makefile")));
  }

  #[test]
  fn cli_roots_override_only_when_given() {
    let cfg = ScannerConfig { roots: vec!["/cfg".into()], ..Default::default() };
    assert_eq!(cfg.clone().with_roots(vec![]).roots, vec![PathBuf::from("/cfg")]);
    assert_eq!(cfg.with_roots(vec!["/cli".into()]).roots, vec![PathBuf::from("/cli")]);
  }

  #[test]
  fn toml_roundtrip_uses_defaults() {
    let cfg: ScannerConfig = toml::from_str("roots = [\"/obra\"]\n").unwrap();
    assert_eq!(cfg.roots, vec![PathBuf::from("/obra")]);
    assert!(!cfg.ignore_hidden);
    assert!(!cfg.follow_symlinks);
    assert_eq!(cfg.target_exts, None);
  }
}
