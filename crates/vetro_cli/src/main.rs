mod args;

use std::time::Instant;

use ansi_term::Colour;
use args::{BuildArgs, CommonArgs, DevArgs};
use clap::{Parser, Subcommand};

use vetro::{Bundler, BundlerOptions, OutputAsset, ServerOptions};
use vetro_server::DevServer;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Bundle the project for production
  Build(BuildArgs),
  /// Start the development server
  Dev(DevArgs),
}

/// CLI flags override the config file, the config file overrides defaults.
fn load_options(common: &CommonArgs) -> anyhow::Result<BundlerOptions> {
  let cwd = match &common.cwd {
    Some(cwd) => cwd.clone(),
    None => std::env::current_dir()?,
  };

  let config_path = common.config.clone().unwrap_or_else(|| cwd.join("vetro.config.json"));

  let mut options = if config_path.is_file() {
    let raw = std::fs::read_to_string(&config_path)?;
    serde_json::from_str::<BundlerOptions>(&raw).map_err(|err| {
      anyhow::anyhow!("Invalid config {}: {err}", config_path.display())
    })?
  } else {
    BundlerOptions::default()
  };

  options.cwd = Some(cwd);
  Ok(options)
}

fn print_output_assets(outputs: Vec<OutputAsset>) {
  let mut left = 0;
  let mut right = 0;

  let mut assets = Vec::with_capacity(outputs.len());

  for output in outputs {
    let size = format!("{:.2}", output.content_as_bytes().len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if output.filename.len() > left {
      left = output.filename.len();
    }

    let is_chunk = output.is_chunk();
    assets.push((output.filename, size, is_chunk));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, is_chunk) in assets {
    let asset_type = if is_chunk { "chunk" } else { "asset" };
    let filename_len = filename.len();

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename),
      "",
      dim.paint(asset_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename_len,
      right = right - size.len()
    );
  }
}

async fn run_build(args: BuildArgs) -> anyhow::Result<()> {
  let mut options = load_options(&args.common)?;

  if let Some(input) = args.input {
    options.input = Some(input.iter().map(|p| p.to_string_lossy().into()).collect());
  }
  if args.dir.is_some() {
    options.dir = args.dir;
  }

  let mut bundler = Bundler::new(options);

  let start = Instant::now();
  match bundler.write().await {
    Ok(output) => {
      if !args.silent {
        for warning in output.warnings {
          println!("{} {}", Colour::Yellow.paint("Warning:"), warning);
        }

        if !output.assets.is_empty() {
          print_output_assets(output.assets);
        }
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!(
        "\n{} Finished in {}",
        Colour::Green.paint("✔"),
        Colour::White.bold().paint(elapsed)
      );
      Ok(())
    }
    Err(errors) => {
      for error in &*errors {
        println!("{} {}", Colour::Red.paint("Error:"), error);
      }
      Err(anyhow::anyhow!("Build failed"))
    }
  }
}

async fn run_dev(args: DevArgs) -> anyhow::Result<()> {
  let mut options = load_options(&args.common)?;

  let mut server_options = options.server.take().unwrap_or_else(ServerOptions::default);
  if args.host.is_some() {
    server_options.host = args.host;
  }
  if args.port.is_some() {
    server_options.port = args.port;
  }
  options.server = Some(server_options);

  let server = DevServer::new(options);
  let shutdown = server.shutdown_token();

  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      shutdown.cancel();
    }
  });

  server.serve().await
}

fn init_tracing() {
  use tracing_subscriber::EnvFilter;

  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();

  let cli = Cli::parse();
  match cli.command {
    Commands::Build(build) => run_build(build).await,
    Commands::Dev(dev) => run_dev(dev).await,
  }
}
