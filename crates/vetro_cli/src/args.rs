use std::path::PathBuf;

use clap::Args;

#[derive(Args)]
pub struct CommonArgs {
  /// Path to a JSON config file; defaults to `vetro.config.json` in the
  /// project root when present.
  #[clap(long)]
  pub config: Option<PathBuf>,

  /// Project root; defaults to the current directory.
  #[clap(long)]
  pub cwd: Option<PathBuf>,
}

#[derive(Args)]
pub struct BuildArgs {
  #[clap(flatten)]
  pub common: CommonArgs,

  /// Entry point specifiers, e.g. `./src/main.js`.
  #[clap(long, short)]
  pub input: Option<Vec<PathBuf>>,

  /// Output directory.
  #[clap(long, short)]
  pub dir: Option<String>,

  /// Suppress the per-asset summary.
  #[clap(long)]
  pub silent: bool,
}

#[derive(Args)]
pub struct DevArgs {
  #[clap(flatten)]
  pub common: CommonArgs,

  #[clap(long)]
  pub host: Option<String>,

  #[clap(long, short)]
  pub port: Option<u16>,
}
