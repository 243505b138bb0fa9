use std::collections::HashSet;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use futures::stream::{self, Stream};
use tokio::fs::{self, ReadDir};

// =============================================================================
// Identidad de directorios (anti-ciclos)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct DirId(u64, u64);

#[cfg(unix)]
fn dir_id(meta: &std::fs::Metadata) -> DirId {
  use std::os::unix::fs::MetadataExt;
  DirId(meta.dev(), meta.ino())
}

#[cfg(not(unix))]
fn dir_id(_meta: &std::fs::Metadata) -> DirId {
  // Sin inodo estable: la deduplicación queda desactivada en la práctica.
  DirId(0, 0)
}

// =============================================================================
// Configuración y tipos públicos
// =============================================================================

/// Controla el recorrido.
#[derive(Debug, Clone)]
pub struct WalkConfig {
  pub follow_symlinks: bool,
  /// Profundidad máxima de las entradas emitidas; los hijos directos de la raíz tienen profundidad 1.
  pub max_depth: usize,
  /// No volver a entrar en un directorio ya visitado (enlaces cíclicos).
  pub dedup_dirs: bool,
}

impl Default for WalkConfig {
  fn default() -> Self {
    Self { follow_symlinks: false, max_depth: 64, dedup_dirs: true }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filtering {
  /// No emitir la entrada; si es directorio, entrar igualmente.
  Ignore,
  /// No emitir la entrada y no entrar si es directorio.
  IgnoreDir,
  /// Emitir y, si es directorio, entrar.
  Continue,
}

#[derive(Debug)]
pub struct WalkEntry {
  pub path: PathBuf,
  pub depth: usize,
  /// Tipo obtenido vía `lstat`: un symlink se reporta como symlink.
  pub file_type: std::fs::FileType,
}

impl WalkEntry {
  pub fn path(&self) -> &Path {
    &self.path
  }

  pub fn file_name(&self) -> Option<String> {
    self.path.file_name().map(|n| n.to_string_lossy().into_owned())
  }

  pub fn is_hidden(&self) -> bool {
    self.file_name().is_some_and(|n| n.starts_with('.'))
  }
}

// =============================================================================
// Estado interno
// =============================================================================

enum Frame {
  /// Directorio por abrir. `id_hint` llega resuelto cuando venimos de un symlink.
  Pending { path: PathBuf, depth: usize, id_hint: Option<DirId> },
  /// Directorio abierto que se está iterando.
  Open { rd: ReadDir, depth: usize },
}

struct WalkState<F> {
  stack: Vec<Frame>,
  visited: HashSet<DirId>,
  cfg: WalkConfig,
  filter: F,
}

enum Step {
  Emit(io::Result<WalkEntry>),
  Skip,
}

// =============================================================================
// Recorrido
// =============================================================================

/// Stream que recorre `root` recursivamente sin filtrar.
pub fn walk(root: impl Into<PathBuf>, cfg: WalkConfig) -> impl Stream<Item = io::Result<WalkEntry>> {
  walk_filtered(root, cfg, |_| async { Filtering::Continue })
}

/// Stream con filtrado asíncrono.
///
/// Los errores de E/S (permiso denegado al abrir un directorio, por ejemplo)
/// se emiten como `Err` y el recorrido continúa con lo siguiente.
pub fn walk_filtered<F, Fut>(
  root: impl Into<PathBuf>,
  cfg: WalkConfig,
  filter: F,
) -> impl Stream<Item = io::Result<WalkEntry>>
where
  F: FnMut(&WalkEntry) -> Fut + Send + 'static,
  Fut: Future<Output = Filtering> + Send,
{
  let mut stack = Vec::with_capacity(16);
  stack.push(Frame::Pending { path: root.into(), depth: 0, id_hint: None });

  let state = WalkState { stack, visited: HashSet::new(), cfg, filter };

  stream::unfold(state, |mut state| async move {
    loop {
      let step = match state.stack.pop()? {
        Frame::Pending { path, depth, id_hint } => open_dir(&mut state, path, depth, id_hint).await,
        Frame::Open { rd, depth } => next_entry(&mut state, rd, depth).await,
      };

      if let Step::Emit(item) = step {
        return Some((item, state));
      }
    }
  })
}

async fn open_dir<F>(state: &mut WalkState<F>, path: PathBuf, depth: usize, id_hint: Option<DirId>) -> Step {
  if depth > state.cfg.max_depth {
    return Step::Skip;
  }

  if state.cfg.dedup_dirs {
    let id = match id_hint {
      Some(id) => Some(id),
      None => match fs::metadata(&path).await {
        Ok(m) if m.is_dir() => Some(dir_id(&m)),
        Ok(_) => None,
        Err(e) => return Step::Emit(Err(e)),
      },
    };

    if let Some(id) = id {
      if !state.visited.insert(id) {
        return Step::Skip;
      }
    }
  }

  match fs::read_dir(&path).await {
    Ok(rd) => {
      state.stack.push(Frame::Open { rd, depth });
      Step::Skip
    }
    Err(e) => Step::Emit(Err(e)),
  }
}

async fn next_entry<F, Fut>(state: &mut WalkState<F>, mut rd: ReadDir, depth: usize) -> Step
where
  F: FnMut(&WalkEntry) -> Fut,
  Fut: Future<Output = Filtering>,
{
  let entry = match rd.next_entry().await {
    // Directorio agotado: el frame ya salió de la pila.
    Ok(None) => return Step::Skip,
    Err(e) => return Step::Emit(Err(e)),
    Ok(Some(entry)) => entry,
  };

  // El directorio abierto vuelve a la pila antes que sus hijos: los hijos se
  // procesan primero (profundidad primero) y después se sigue iterando.
  state.stack.push(Frame::Open { rd, depth });

  let file_type = match entry.file_type().await {
    Ok(ft) => ft,
    Err(e) => return Step::Emit(Err(e)),
  };

  let walk_entry = WalkEntry { path: entry.path(), depth: depth + 1, file_type };
  let filtering = (state.filter)(&walk_entry).await;

  if filtering != Filtering::IgnoreDir && walk_entry.depth < state.cfg.max_depth {
    if let Some(frame) = descend_frame(&state.cfg, &walk_entry).await {
      state.stack.push(frame);
    }
  }

  match filtering {
    Filtering::Continue => Step::Emit(Ok(walk_entry)),
    Filtering::Ignore | Filtering::IgnoreDir => Step::Skip,
  }
}

/// Frame para entrar en `entry` si es un directorio (o un symlink a uno y se siguen).
async fn descend_frame(cfg: &WalkConfig, entry: &WalkEntry) -> Option<Frame> {
  if entry.file_type.is_dir() {
    return Some(Frame::Pending { path: entry.path.clone(), depth: entry.depth, id_hint: None });
  }

  if entry.file_type.is_symlink() && cfg.follow_symlinks {
    // Resolvemos ya la metadata del destino: si es directorio, su id viaja como hint.
    if let Ok(m) = fs::metadata(&entry.path).await {
      if m.is_dir() {
        let id_hint = if cfg.dedup_dirs { Some(dir_id(&m)) } else { None };
        return Some(Frame::Pending { path: entry.path.clone(), depth: entry.depth, id_hint });
      }
    }
  }

  None
}

#[cfg(test)]
mod tests {
  use super::*;
  use futures::StreamExt;
  use std::fs as stdfs;
  use tempfile::tempdir;

  async fn collect_names<S>(s: S) -> Vec<String>
  where
    S: Stream<Item = io::Result<WalkEntry>>,
  {
    let mut names: Vec<String> =
      s.filter_map(|r| async move { r.ok() }).filter_map(|e| async move { e.file_name() }).collect().await;
    names.sort();
    names
  }

  fn fixture() -> tempfile::TempDir {
    let tmp = tempdir().unwrap();
    stdfs::create_dir_all(tmp.path().join("obra/planos")).unwrap();
    stdfs::create_dir_all(tmp.path().join(".cache")).unwrap();
    stdfs::write(tmp.path().join("obra/memoria.pdf"), b"pdf").unwrap();
    stdfs::write(tmp.path().join("obra/planos/p1.dwg"), b"dwg").unwrap();
    stdfs::write(tmp.path().join(".cache/blob"), b"x").unwrap();
    tmp
  }

  #[tokio::test]
  async fn walks_everything_depth_first() {
    let tmp = fixture();
    let names = collect_names(walk(tmp.path(), WalkConfig::default())).await;
    assert_eq!(names, vec![".cache", "blob", "memoria.pdf", "obra", "p1.dwg", "planos"]);
  }

  #[tokio::test]
  async fn ignore_dir_prunes_subtree() {
    let tmp = fixture();
    let s = walk_filtered(tmp.path(), WalkConfig::default(), |e| {
      let hidden = e.is_hidden();
      async move { if hidden { Filtering::IgnoreDir } else { Filtering::Continue } }
    });

    let names = collect_names(s).await;
    assert_eq!(names, vec!["memoria.pdf", "obra", "p1.dwg", "planos"]);
  }

  #[tokio::test]
  async fn ignore_still_descends() {
    let tmp = fixture();
    let s = walk_filtered(tmp.path(), WalkConfig::default(), |e| {
      let is_dir = e.file_type.is_dir();
      async move { if is_dir { Filtering::Ignore } else { Filtering::Continue } }
    });

    let names = collect_names(s).await;
    assert_eq!(names, vec!["blob", "memoria.pdf", "p1.dwg"]);
  }

  #[tokio::test]
  async fn max_depth_limits_recursion() {
    let tmp = fixture();
    let cfg = WalkConfig { max_depth: 1, ..WalkConfig::default() };
    let names = collect_names(walk(tmp.path(), cfg)).await;
    assert_eq!(names, vec![".cache", "obra"]);
  }

  #[tokio::test]
  async fn missing_root_yields_an_error() {
    let tmp = tempdir().unwrap();
    let results: Vec<_> = walk(tmp.path().join("nope"), WalkConfig::default()).collect().await;
    assert_eq!(results.len(), 1);
    assert!(results[0].is_err());
  }

  #[cfg(unix)]
  #[tokio::test]
  async fn symlink_cycles_are_cut() {
    let tmp = fixture();
    std::os::unix::fs::symlink(tmp.path(), tmp.path().join("obra/loop")).unwrap();

    let cfg = WalkConfig { follow_symlinks: true, ..WalkConfig::default() };
    let names = collect_names(walk(tmp.path(), cfg)).await;

    assert!(names.contains(&"loop".to_string()));
    assert_eq!(names.iter().filter(|n| *n == "p1.dwg").count(), 1);
  }
}
