use directories::ProjectDirs;
use std::path::PathBuf;
use thiserror::Error;

pub const BASE_DIR_ENV: &str = "FILAUDIT_BASE_DIR";

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("directories error: could not determine home directory")]
  Directories,
  #[error("other: {0}")]
  Other(String),
}

#[derive(Debug, Clone)]
pub struct FilauditPaths {
  pub base_dir: PathBuf,
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl FilauditPaths {
  /// Resuelve los directorios y los crea si no existen.
  ///
  /// Con `FILAUDIT_BASE_DIR` todo cuelga de esa carpeta (modo portable);
  /// sin ella se usan los directorios de la plataforma.
  pub fn detect() -> Result<Self, ConfigError> {
    let paths = match std::env::var(BASE_DIR_ENV) {
      Ok(env_base) => Self::portable(PathBuf::from(env_base)),
      Err(_) => {
        let proj_dirs = ProjectDirs::from("com", "filaudit", "filaudit").ok_or(ConfigError::Directories)?;
        Self {
          base_dir: proj_dirs.config_dir().to_path_buf(),
          config_dir: proj_dirs.config_dir().to_path_buf(),
          data_dir: proj_dirs.data_dir().to_path_buf(),
        }
      }
    };

    std::fs::create_dir_all(&paths.config_dir)?;
    std::fs::create_dir_all(&paths.data_dir)?;

    Ok(paths)
  }

  pub fn portable(base: PathBuf) -> Self {
    Self { config_dir: base.join("config"), data_dir: base.join("data"), base_dir: base }
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("filaudit.toml")
  }

  pub fn reports_dir(&self) -> PathBuf {
    self.data_dir.join("reports")
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  struct EnvVarGuard {
    key: String,
    original: Option<String>,
  }

  impl EnvVarGuard {
    fn new(key: &str, value: &str) -> Self {
      let original = std::env::var(key).ok();
      unsafe { std::env::set_var(key, value) };
      EnvVarGuard { key: key.to_owned(), original }
    }
  }

  impl Drop for EnvVarGuard {
    fn drop(&mut self) {
      match &self.original {
        Some(val) => unsafe { std::env::set_var(&self.key, val) },
        None => unsafe { std::env::remove_var(&self.key) },
      }
    }
  }

  #[test]
  fn base_dir_override() {
    let tmp = tempdir().unwrap();
    let _env = EnvVarGuard::new(BASE_DIR_ENV, tmp.path().to_str().unwrap());

    let paths = FilauditPaths::detect().unwrap();

    assert_eq!(paths.base_dir, tmp.path());
    assert_eq!(paths.config_dir, tmp.path().join("config"));
    assert_eq!(paths.data_dir, tmp.path().join("data"));
    assert_eq!(paths.config_file(), tmp.path().join("config").join("filaudit.toml"));
    assert_eq!(paths.reports_dir(), tmp.path().join("data").join("reports"));

    assert!(paths.config_dir.exists());
    assert!(paths.data_dir.exists());
  }
}
