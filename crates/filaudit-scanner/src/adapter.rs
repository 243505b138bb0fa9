use async_trait::async_trait;

use filaudit_core::domain::Record;
use filaudit_core::ports::{FileScanner as CoreFileScanner, ScanError as CoreScanError};

use crate::config::ScannerConfig;
use crate::fs_scanner::{ScannerError, scan_listing_with_cfg};

/// Implementación de `FileScanner` sobre el disco local.
#[derive(Debug, Clone)]
pub struct FsScanner {
  config: ScannerConfig,
}

impl FsScanner {
  pub fn new(config: ScannerConfig) -> Self {
    Self { config }
  }
}

#[async_trait]
impl CoreFileScanner for FsScanner {
  async fn scan_listing(&self) -> Result<Vec<Record>, CoreScanError> {
    let items = scan_listing_with_cfg(&self.config).await.map_err(map_scanner_error)?;

    // Infra -> registros de listado
    Ok(items.iter().map(|item| item.to_record()).collect())
  }
}

fn map_scanner_error(err: ScannerError) -> CoreScanError {
  match err {
    ScannerError::Io(e) => CoreScanError::Io(e.to_string()),
    ScannerError::RootNotFound(p) => CoreScanError::Io(format!("root not found: {}", p.display())),
    ScannerError::NotADirectory(p) => CoreScanError::Io(format!("root is not a directory: {}", p.display())),
    ScannerError::Config(e) => CoreScanError::Internal(e.to_string()),
    ScannerError::NoRoots => CoreScanError::Internal("no roots configured".into()),
  }
}
