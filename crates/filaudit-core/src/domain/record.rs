use serde_json::{Map, Value};

/// Registro opaco: el mapa campo -> valor que se intercambian los pasos de un flujo.
pub type Record = Map<String, Value>;

/// Busca la primera cadena no vacía asociada a una de las claves proporcionadas.
///
/// Los valores que no son cadenas se tratan como ausentes.
pub fn find_str(record: &Record, keys: &[&str]) -> Option<String> {
  for key in keys {
    if let Some(Value::String(val)) = record.get(*key) {
      if !val.is_empty() {
        return Some(val.clone());
      }
    }
  }
  None
}
