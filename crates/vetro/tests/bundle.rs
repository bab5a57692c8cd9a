use std::path::Path;

use vetro::{Bundler, BundlerOptions, OutputAssetKind};
use vetro_error::BundleError;
use vetro_utils::indexmap::FxIndexMap;

fn write(root: &Path, rel: &str, content: &str) {
  let path = root.join(rel);
  std::fs::create_dir_all(path.parent().unwrap()).unwrap();
  std::fs::write(path, content).unwrap();
}

fn options(root: &Path) -> BundlerOptions {
  BundlerOptions {
    cwd: Some(root.to_path_buf()),
    input: Some(vec!["./src/main.js".into()]),
    ..BundlerOptions::default()
  }
}

/// Each bundled module contributes a `// <stable_id>` banner to its chunk, so
/// membership can be asserted from the rendered output alone.
fn banner_count(output: &vetro::BundleOutput, stable_id: &str) -> usize {
  let needle = format!("// {stable_id}");
  output
    .assets
    .iter()
    .filter(|asset| asset.is_chunk())
    .map(|asset| {
      String::from_utf8_lossy(asset.content_as_bytes())
        .lines()
        .filter(|line| *line == needle)
        .count()
    })
    .sum()
}

#[tokio::test]
async fn bundles_a_single_entry_graph() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import { greet } from './greet.js'\ngreet()\n");
  write(root, "src/greet.js", "export function greet() {}\n");

  let mut bundler = Bundler::new(options(root));
  let output = bundler.generate().await.expect("build should succeed");

  let chunks: Vec<_> = output.assets.iter().filter(|a| a.is_chunk()).collect();
  assert_eq!(chunks.len(), 1);
  assert_eq!(chunks[0].filename, "main.js");

  let body = String::from_utf8_lossy(chunks[0].content_as_bytes()).into_owned();
  // Dependencies execute before their importers.
  let greet_at = body.find("src/greet.js").expect("greet module in chunk");
  let main_at = body.find("src/main.js").expect("main module in chunk");
  assert!(greet_at < main_at);
}

#[tokio::test]
async fn cyclic_imports_terminate_and_appear_once() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './a.js'\n");
  write(root, "src/a.js", "import './b.js'\nexport const a = 1\n");
  write(root, "src/b.js", "import './a.js'\nexport const b = 2\n");

  let mut bundler = Bundler::new(options(root));
  let output = bundler.generate().await.expect("cycles are not an error");

  assert_eq!(banner_count(&output, "src/a.js"), 1);
  assert_eq!(banner_count(&output, "src/b.js"), 1);
  assert!(
    output.warnings.iter().any(|w| w.to_string().contains("Circular dependency")),
    "expected a circular dependency warning"
  );
}

#[tokio::test]
async fn manual_grouping_claims_its_modules() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './lib_a.js'\nimport './lib_b.js'\n");
  write(root, "src/lib_a.js", "export const a = 1\n");
  write(root, "src/lib_b.js", "export const b = 2\n");

  let mut raw = options(root);
  raw.manual_chunks = Some(FxIndexMap::from_iter([(
    "vendor".to_string(),
    vec!["./src/lib_a.js".to_string(), "./src/lib_b.js".to_string()],
  )]));

  let mut bundler = Bundler::new(raw);
  let output = bundler.generate().await.expect("build should succeed");

  let vendor = output
    .assets
    .iter()
    .find(|asset| asset.is_chunk() && asset.filename.contains("vendor"))
    .expect("vendor chunk emitted");
  let vendor_body = String::from_utf8_lossy(vendor.content_as_bytes()).into_owned();
  assert!(vendor_body.contains("src/lib_a.js"));
  assert!(vendor_body.contains("src/lib_b.js"));

  // Claimed by vendor and nowhere else.
  assert_eq!(banner_count(&output, "src/lib_a.js"), 1);
  assert_eq!(banner_count(&output, "src/lib_b.js"), 1);
}

#[tokio::test]
async fn double_manual_claim_is_a_configuration_error() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './shared.js'\n");
  write(root, "src/shared.js", "export const s = 1\n");

  let mut raw = options(root);
  raw.manual_chunks = Some(FxIndexMap::from_iter([
    ("first".to_string(), vec!["./src/shared.js".to_string()]),
    ("second".to_string(), vec!["./src/shared.js".to_string()]),
  ]));

  let mut bundler = Bundler::new(raw);
  let errs = bundler.generate().await.expect_err("conflicting claims must abort");

  assert!(errs.iter().any(|err| matches!(
    err,
    BundleError::ConfigurationConflict { first, second, .. }
      if first == "first" && second == "second"
  )));
}

#[tokio::test]
async fn empty_manual_group_emits_an_empty_chunk() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "export {}\n");

  let mut raw = options(root);
  raw.manual_chunks = Some(FxIndexMap::from_iter([("reserved".to_string(), Vec::new())]));

  let mut bundler = Bundler::new(raw);
  let output = bundler.generate().await.expect("an empty group is not an error");

  let reserved = output
    .assets
    .iter()
    .find(|asset| asset.is_chunk() && asset.filename.contains("reserved"))
    .expect("reserved chunk emitted");
  assert!(reserved.content_as_bytes().is_empty());
}

#[tokio::test]
async fn shared_dependencies_are_extracted_once() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/one.js", "import './shared.js'\nexport const one = 1\n");
  write(root, "src/two.js", "import './shared.js'\nexport const two = 2\n");
  write(root, "src/shared.js", "export const s = 0\n");

  let raw = BundlerOptions {
    cwd: Some(root.to_path_buf()),
    input: Some(vec!["./src/one.js".into(), "./src/two.js".into()]),
    ..BundlerOptions::default()
  };

  let mut bundler = Bundler::new(raw);
  let output = bundler.generate().await.expect("build should succeed");

  let chunks: Vec<_> = output.assets.iter().filter(|a| a.is_chunk()).collect();
  // Two entry chunks plus one shared chunk.
  assert_eq!(chunks.len(), 3);

  // The shared module lands in exactly one chunk, and not in either entry.
  assert_eq!(banner_count(&output, "src/shared.js"), 1);
  for entry in ["one.js", "two.js"] {
    let entry_chunk = chunks.iter().find(|c| c.filename == *entry).expect("entry chunk");
    let body = String::from_utf8_lossy(entry_chunk.content_as_bytes()).into_owned();
    assert!(!body.contains("src/shared.js"), "{entry} must not duplicate the shared module");
  }
}

#[tokio::test]
async fn chunk_assignment_is_a_partition() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/one.js", "import './shared.js'\nimport './only_one.js'\n");
  write(root, "src/two.js", "import './shared.js'\nimport './only_two.js'\n");
  write(root, "src/shared.js", "export const s = 0\n");
  write(root, "src/only_one.js", "export const a = 1\n");
  write(root, "src/only_two.js", "export const b = 2\n");

  let raw = BundlerOptions {
    cwd: Some(root.to_path_buf()),
    input: Some(vec!["./src/one.js".into(), "./src/two.js".into()]),
    ..BundlerOptions::default()
  };

  let mut bundler = Bundler::new(raw);
  let output = bundler.generate().await.expect("build should succeed");

  for module in ["src/one.js", "src/two.js", "src/shared.js", "src/only_one.js", "src/only_two.js"]
  {
    assert_eq!(banner_count(&output, module), 1, "{module} must be assigned exactly once");
  }
}

#[tokio::test]
async fn unresolved_imports_abort_the_build_with_context() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './missing.js'\n");

  let mut bundler = Bundler::new(options(root));
  let errs = bundler.generate().await.expect_err("unresolved import must abort");

  assert!(errs.iter().any(|err| matches!(
    err,
    BundleError::ResolutionFailure { specifier, importer }
      if specifier == "./missing.js" && importer.contains("main.js")
  )));
}

#[tokio::test]
async fn alias_resolution_follows_the_configured_rules() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import '@/utils/helper.js'\n");
  write(root, "src/utils/helper.js", "export const h = 1\n");

  let mut raw = options(root);
  raw.alias = Some(vec![vetro::AliasItem::new("@", "./src")]);

  let mut bundler = Bundler::new(raw);
  let output = bundler.generate().await.expect("aliased import should resolve");
  assert_eq!(banner_count(&output, "src/utils/helper.js"), 1);
}

#[tokio::test]
async fn dynamic_imports_join_the_graph() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "const p = () => import('./lazy.js')\n");
  write(root, "src/lazy.js", "export const lazy = true\n");

  let mut bundler = Bundler::new(options(root));
  let output = bundler.generate().await.expect("build should succeed");
  assert_eq!(banner_count(&output, "src/lazy.js"), 1);
}

#[tokio::test]
async fn static_assets_are_copied_from_the_public_root() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "export {}\n");
  write(root, "public/favicon.svg", "<svg/>");
  write(root, "public/fonts/body.woff2", "woff");

  let mut bundler = Bundler::new(options(root));
  let output = bundler.generate().await.expect("build should succeed");

  let copied: Vec<_> = output
    .assets
    .iter()
    .filter(|asset| asset.kind == OutputAssetKind::Asset)
    .map(|asset| asset.filename.as_str())
    .collect();
  assert!(copied.contains(&"favicon.svg"));
  assert!(copied.contains(&"fonts/body.woff2"));
}

#[tokio::test]
async fn rebuilding_an_unchanged_tree_is_deterministic() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './a.js'\nimport './b.js'\n");
  write(root, "src/a.js", "export const a = 1\n");
  write(root, "src/b.js", "export const b = 2\n");

  let mut first = Bundler::new(options(root));
  let mut second = Bundler::new(options(root));

  let summarize = |output: vetro::BundleOutput| {
    let mut entries: Vec<(String, Vec<u8>)> = output
      .assets
      .into_iter()
      .map(|asset| (asset.filename.clone(), asset.content.into_bytes()))
      .collect();
    entries.sort();
    entries
  };

  let a = summarize(first.generate().await.expect("first build"));
  let b = summarize(second.generate().await.expect("second build"));
  assert_eq!(a, b);
}

#[tokio::test]
async fn a_cancelled_build_reports_cancellation() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "export {}\n");

  let mut bundler = Bundler::new(options(root));
  bundler.cancel_token().cancel();

  let errs = bundler.generate().await.expect_err("cancelled build must not complete");
  assert!(errs.iter().any(|err| err.to_string().contains("cancelled")));
}

#[tokio::test]
async fn write_emits_the_output_directory_layout() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path();
  write(root, "src/main.js", "import './big.js'\nexport {}\n");
  write(root, "src/big.js", "export const big = 1\n");
  write(root, "public/robots.txt", "User-agent: *\n");

  let mut bundler = Bundler::new(options(root));
  bundler.write().await.expect("write should succeed");

  assert!(root.join("dist/main.js").is_file());
  assert!(root.join("dist/robots.txt").is_file());
}
