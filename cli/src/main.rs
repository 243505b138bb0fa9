use clap::Parser;
use tracing_subscriber::EnvFilter;

use filaudit_lib::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // stdout queda para el JSON; los logs van a stderr.
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  filaudit_lib::run(Cli::parse()).await
}
