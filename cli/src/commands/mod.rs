pub mod audit;
pub mod config;
pub mod digest;
pub mod list;
pub mod normalize;

use std::io::{self, Write};

use serde::Serialize;

/// Vuelca `value` como JSON indentado en stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
  let mut out = io::stdout().lock();
  serde_json::to_writer_pretty(&mut out, value)?;
  writeln!(out)?;
  Ok(())
}
