use filaudit_config::{AuditConfig, CONFIG_BACKEND, NormalizerConfig};
use filaudit_scanner::ScannerConfig;

use crate::commands::print_json;
use crate::config::EffectiveConfigDto;

pub fn run() -> anyhow::Result<()> {
  let dto = EffectiveConfigDto {
    config_file: CONFIG_BACKEND.config_file().to_string_lossy().to_string(),
    scanner: ScannerConfig::load()?.into(),
    normalizer: NormalizerConfig::load()?,
    audit: AuditConfig::load()?.into(),
  };

  print_json(&dto)
}
