mod commands;
mod config;
mod infrastructure;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "filaudit", version, about = "Inventario y auditoría de directorios")]
pub struct Cli {
  #[command(subcommand)]
  pub cmd: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
  /// Normaliza un listado de directorio (array JSON de registros).
  Normalize {
    /// Archivo con el listado. Sin valor: stdin.
    #[arg(long)]
    input: Option<PathBuf>,
  },

  /// Añade `sha256` y `timestamp` a un registro JSON a partir de un archivo de texto.
  Digest {
    /// Archivo cuyo contenido se resume.
    file: PathBuf,

    /// Registro JSON de partida (objeto).
    #[arg(long, default_value = "{}")]
    json: String,
  },

  /// Lista las raíces y emite los registros en bruto del scanner.
  List {
    /// Raíces a recorrer. Sin valor: las de `[scanner]`.
    roots: Vec<PathBuf>,
  },

  /// Auditoría completa: residuos, huellas y duplicados.
  Audit {
    /// Raíces a auditar. Sin valor: las de `[scanner]`.
    roots: Vec<PathBuf>,

    /// No escribir el informe JSON.
    #[arg(long)]
    no_save: bool,
  },

  /// Muestra la configuración efectiva.
  Config,
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
  match cli.cmd {
    Command::Normalize { input } => commands::normalize::run(input.as_deref()),
    Command::Digest { file, json } => commands::digest::run(&file, &json),
    Command::List { roots } => commands::list::run(roots).await,
    Command::Audit { roots, no_save } => commands::audit::run(roots, !no_save).await,
    Command::Config => commands::config::run(),
  }
}
