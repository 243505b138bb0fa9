mod backend;
mod model;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use model::{AuditConfig, NormalizerConfig};
pub use paths::{ConfigError, FilauditPaths};

use once_cell::sync::Lazy;

// Singleton de paths (FILAUDIT_BASE_DIR o directorios del sistema)
pub static PATHS: Lazy<FilauditPaths> = Lazy::new(|| FilauditPaths::detect().expect("failed to init FilauditPaths"));

// Singleton del backend de config
pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(&PATHS));
