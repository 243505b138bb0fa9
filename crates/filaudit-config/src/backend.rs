use crate::paths::{ConfigError, FilauditPaths};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// toml_edit para escribir preservando comentarios y orden del usuario
use toml_edit::{DocumentMut, Item};

/// Lectura/escritura de secciones `[nombre]` del archivo de configuración.
pub trait ConfigBackend {
  /// Falla si el archivo o la sección no existen.
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;

  /// Como `load_section`, pero un archivo o una sección ausentes dan `T::default()`.
  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default;

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

pub struct TomlConfigBackend {
  config_file: PathBuf,
}

impl TomlConfigBackend {
  pub fn new(paths: &FilauditPaths) -> Self {
    Self::at(paths.config_file())
  }

  /// Backend sobre un archivo concreto (tests, `--config`).
  pub fn at(config_file: impl Into<PathBuf>) -> Self {
    Self { config_file: config_file.into() }
  }

  pub fn config_file(&self) -> &Path {
    &self.config_file
  }

  /// `None` si el archivo no existe todavía.
  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    match fs::read_to_string(&self.config_file) {
      Ok(content) => Ok(Some(toml::from_str(&content)?)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: toml::Value) -> Result<T, ConfigError> {
  value.try_into().map_err(|e| ConfigError::Other(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let mut table = self
      .read_table()?
      .ok_or_else(|| ConfigError::Other(format!("missing config file {:?}", self.config_file)))?;

    let value = table
      .remove(section)
      .ok_or_else(|| ConfigError::Other(format!("missing section [{section}] in {:?}", self.config_file)))?;

    decode_section(section, value)
  }

  fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    match self.read_table()?.and_then(|mut t| t.remove(section)) {
      Some(value) => decode_section(section, value),
      None => Ok(T::default()),
    }
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    // 1) Documento actual (o uno vacío si el archivo no existe).
    let mut doc: DocumentMut = match fs::read_to_string(&self.config_file) {
      Ok(content) => {
        content.parse::<DocumentMut>().map_err(|e| ConfigError::Other(format!("parse toml_edit doc: {e}")))?
      }
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) La sección se serializa con `toml` (serde) y se vuelve a parsear como
    //    tabla de toml_edit para poder insertarla en el documento.
    let section_str =
      toml::to_string(value).map_err(|e| ConfigError::Other(format!("encode section [{section}]: {e}")))?;

    let section_doc = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Other(format!("parse section as doc: {e}")))?;

    // 3) Reemplazo de la sección; el resto del documento queda intacto.
    doc[section] = Item::Table(section_doc.as_table().clone());

    if let Some(parent) = self.config_file.parent() {
      fs::create_dir_all(parent)?;
    }

    // 4) Escritura atómica.
    filaudit_fs::atomic_write_str(&self.config_file, &doc.to_string())?;

    Ok(())
  }
}
