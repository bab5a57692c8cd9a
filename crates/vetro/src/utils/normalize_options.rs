use std::path::{Path, PathBuf};

use sugar_path::SugarPath;

use vetro_common::{AliasItem, BundlerOptions, NormalizedBundlerOptions};

pub fn normalize_options(mut raw_options: BundlerOptions) -> NormalizedBundlerOptions {
  let cwd = raw_options
    .cwd
    .take()
    .unwrap_or_else(|| std::env::current_dir().expect("Failed to get current dir"));

  let alias = raw_options
    .alias
    .unwrap_or_default()
    .into_iter()
    .map(|rule| AliasItem {
      find: rule.find,
      replacement: Path::new(&rule.replacement).absolutize_with(&cwd).to_string_lossy().into_owned(),
    })
    .collect();

  let assets_dir = raw_options.assets_dir.unwrap_or_else(|| "assets".to_string());

  let server = raw_options.server.unwrap_or_default();
  let fs_allow = server
    .fs_allow
    .unwrap_or_default()
    .into_iter()
    .map(|root| Path::new(&root).absolutize_with(&cwd))
    .collect::<Vec<PathBuf>>();

  NormalizedBundlerOptions {
    input: raw_options.input.unwrap_or_default(),
    base: normalize_base(raw_options.base),
    public_dir: cwd.join(raw_options.public_dir.as_deref().unwrap_or("public")),
    dir: raw_options.dir.unwrap_or_else(|| "dist".to_string()),
    entry_filenames: raw_options.entry_filenames.unwrap_or_else(|| "[name].js".to_string()),
    chunk_filenames: raw_options
      .chunk_filenames
      .unwrap_or_else(|| format!("{assets_dir}/[name]-[hash].js")),
    assets_dir,
    manual_chunks: raw_options.manual_chunks.unwrap_or_default(),
    host: server.host.unwrap_or_else(|| "127.0.0.1".to_string()),
    port: server.port.unwrap_or(5173),
    fs_allow,
    alias,
    cwd,
  }
}

/// The public base path always starts and ends with a slash.
fn normalize_base(base: Option<String>) -> String {
  let base = base.unwrap_or_else(|| "/".to_string());
  let mut normalized = String::with_capacity(base.len() + 2);
  if !base.starts_with('/') {
    normalized.push('/');
  }
  normalized.push_str(&base);
  if !normalized.ends_with('/') {
    normalized.push('/');
  }
  normalized
}

#[cfg(test)]
mod tests {
  use super::normalize_options;
  use vetro_common::BundlerOptions;

  #[test]
  fn defaults_mirror_the_stock_configuration() {
    let options = normalize_options(BundlerOptions {
      cwd: Some("/project".into()),
      ..BundlerOptions::default()
    });

    assert_eq!(options.base, "/");
    assert_eq!(options.dir, "dist");
    assert_eq!(options.assets_dir, "assets");
    assert_eq!(options.public_dir, std::path::PathBuf::from("/project/public"));
    assert_eq!(options.entry_filenames, "[name].js");
    assert_eq!(options.chunk_filenames, "assets/[name]-[hash].js");
    assert_eq!(options.port, 5173);
  }

  #[test]
  fn base_gains_surrounding_slashes() {
    let options = normalize_options(BundlerOptions {
      cwd: Some("/project".into()),
      base: Some("app".to_string()),
      ..BundlerOptions::default()
    });
    assert_eq!(options.base, "/app/");
  }

  #[test]
  fn parent_allowance_is_absolutized() {
    let options = normalize_options(BundlerOptions {
      cwd: Some("/workspace/app".into()),
      server: Some(vetro_common::ServerOptions {
        fs_allow: Some(vec!["..".to_string()]),
        ..vetro_common::ServerOptions::default()
      }),
      ..BundlerOptions::default()
    });
    assert_eq!(options.fs_allow, vec![std::path::PathBuf::from("/workspace")]);
  }
}
