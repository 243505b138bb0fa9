use serde::{Deserialize, Serialize};

/// Estado de procesamiento que asigna el filtro de residuos a cada archivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProcessingStatus {
  /// Sin veredicto: archivo normal.
  Pending,
  /// Extensión de archivo temporal o de respaldo.
  TrashExt,
  /// Archivo de sistema o de caché.
  TrashSys,
  /// Copia generada por un conflicto de sincronización.
  ConflictCopy,
}

impl ProcessingStatus {
  pub fn as_str(&self) -> &'static str {
    match self {
      ProcessingStatus::Pending => "PENDING",
      ProcessingStatus::TrashExt => "TRASH_EXT",
      ProcessingStatus::TrashSys => "TRASH_SYS",
      ProcessingStatus::ConflictCopy => "CONFLICT_COPY",
    }
  }
}

/// Identifica archivos temporales o inútiles típicos de carpetas de proyecto
/// compartidas (CAD, ofimática, clientes de sincronización).
pub struct DebrisFilter;

impl DebrisFilter {
  pub const TRASH_EXTENSIONS: &'static [&'static str] =
    &[".bak", ".sv$", ".tmp", ".log", ".ds_store", ".plot.log", ".err", ".dmp", ".old"];

  pub const TRASH_FILENAMES: &'static [&'static str] = &["thumbs.db", "desktop.ini", ".bridgecache"];

  /// Puntuación a partir de la cual un archivo cuenta como residuo.
  pub const TRASH_THRESHOLD: u8 = 90;

  /// Devuelve `(puntuación de riesgo, estado)`. 100 = residuo seguro.
  ///
  /// `extension` debe venir en minúsculas y con el punto, tal como la
  /// devuelve [`extension_of`].
  pub fn evaluate(file_name: &str, extension: &str) -> (u8, ProcessingStatus) {
    if Self::TRASH_EXTENSIONS.contains(&extension) {
      return (100, ProcessingStatus::TrashExt);
    }

    let lower = file_name.to_lowercase();

    if Self::TRASH_FILENAMES.contains(&lower.as_str()) {
      return (100, ProcessingStatus::TrashSys);
    }

    if lower.contains("conflit") && lower.contains("copie") {
      return (90, ProcessingStatus::ConflictCopy);
    }

    (0, ProcessingStatus::Pending)
  }
}

/// Extensión en minúsculas, con el punto, desde el último `.` del nombre.
///
/// Los puntos iniciales no cuentan: `.bridgecache` no tiene extensión y
/// `informe.final.PDF` devuelve `.pdf`.
pub fn extension_of(file_name: &str) -> String {
  let stem_start = file_name.len() - file_name.trim_start_matches('.').len();

  match file_name[stem_start..].rfind('.') {
    Some(idx) => file_name[stem_start + idx..].to_lowercase(),
    None => String::new(),
  }
}
